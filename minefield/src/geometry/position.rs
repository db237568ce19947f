/// A point in pixel space.
///
/// Positions are never mutated in place; the `move_*` helpers return a shifted copy.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns this position shifted horizontally by `delta` pixels.
    pub fn move_x(self, delta: f32) -> Self {
        Self {
            x: self.x + delta,
            ..self
        }
    }

    /// Returns this position shifted vertically by `delta` pixels.
    pub fn move_y(self, delta: f32) -> Self {
        Self {
            y: self.y + delta,
            ..self
        }
    }

    /// The absolute horizontal distance in pixels.
    pub fn horizontal_distance_to(self, other: Self) -> f32 {
        (self.x - other.x).abs()
    }

    /// The absolute vertical distance in pixels.
    pub fn vertical_distance_to(self, other: Self) -> f32 {
        (self.y - other.y).abs()
    }

    pub fn midpoint(self, other: Self) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

impl From<(f32, f32)> for Position {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_leaves_original_untouched() {
        let origin = Position::new(3.0, 4.0);
        let moved = origin.move_x(2.5).move_y(-1.0);

        assert_eq!(origin, Position::new(3.0, 4.0));
        assert_eq!(moved, Position::new(5.5, 3.0));
    }

    #[test]
    fn distances_are_absolute() {
        let a = Position::new(10.0, 2.0);
        let b = Position::new(4.0, 9.0);

        assert_eq!(a.horizontal_distance_to(b), 6.0);
        assert_eq!(b.horizontal_distance_to(a), 6.0);
        assert_eq!(a.vertical_distance_to(b), 7.0);
        assert_eq!(b.vertical_distance_to(a), 7.0);
    }

    #[test]
    fn midpoint_is_centered() {
        let mid = Position::new(0.0, 50.0).midpoint(Position::new(50.0, 100.0));
        assert_eq!(mid, Position::new(25.0, 75.0));
    }
}
