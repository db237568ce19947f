use super::Position;

/// An axis-aligned rectangle used to test pointer positions against a field.
///
/// Both edges are inclusive, so neighbouring fields share their common edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hitbox {
    left_upper: Position,
    right_lower: Position,
}

impl Hitbox {
    /// Creates a hitbox spanning the two given corners.
    ///
    /// The corners are normalized, so `left_upper` always ends up with the smaller coordinates.
    pub fn new(left_upper: Position, right_lower: Position) -> Self {
        Self {
            left_upper: Position::new(
                left_upper.x.min(right_lower.x),
                left_upper.y.min(right_lower.y),
            ),
            right_lower: Position::new(
                left_upper.x.max(right_lower.x),
                left_upper.y.max(right_lower.y),
            ),
        }
    }

    pub fn left_upper(&self) -> Position {
        self.left_upper
    }

    pub fn right_lower(&self) -> Position {
        self.right_lower
    }

    pub fn width(&self) -> f32 {
        self.left_upper.horizontal_distance_to(self.right_lower)
    }

    pub fn height(&self) -> f32 {
        self.left_upper.vertical_distance_to(self.right_lower)
    }

    pub fn center(&self) -> Position {
        self.left_upper.midpoint(self.right_lower)
    }

    /// Whether `point` lies within the rectangle, edges included.
    pub fn is_hit(&self, point: Position) -> bool {
        (self.left_upper.x..=self.right_lower.x).contains(&point.x)
            && (self.left_upper.y..=self.right_lower.y).contains(&point.y)
    }
}
