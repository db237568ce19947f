use std::{fmt, str::FromStr};

use thiserror::Error;
use tracing::trace;

use crate::{
    config::GameConfig,
    geometry::{Hitbox, Position},
    grid::GridPos,
    render::FieldRender,
};

/// How a field is displayed.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum FieldState {
    /// Not revealed yet. The initial state of every field.
    Hidden = 0,
    /// Marked by the player as a suspected mine.
    Flagged = 1,
    /// Revealed and free of mines.
    Unveiled = 2,
    /// Revealed and containing a mine.
    Detonated = 3,
}

impl FieldState {
    pub const ALL: [Self; 4] = [
        Self::Hidden,
        Self::Flagged,
        Self::Unveiled,
        Self::Detonated,
    ];

    /// The single character used for this state in board dumps.
    pub fn symbol(self) -> char {
        match self {
            Self::Hidden => '#',
            Self::Flagged => 'F',
            Self::Unveiled => '.',
            Self::Detonated => 'X',
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for FieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<char> for FieldState {
    type Error = UnknownFieldState;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|state| state.symbol() == symbol)
            .ok_or_else(|| UnknownFieldState {
                symbol: symbol.to_string(),
            })
    }
}

impl TryFrom<u8> for FieldState {
    type Error = UnknownFieldState;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|state| state.code() == code)
            .ok_or_else(|| UnknownFieldState {
                symbol: code.to_string(),
            })
    }
}

impl FromStr for FieldState {
    type Err = UnknownFieldState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => Self::try_from(symbol),
            _ => Err(UnknownFieldState {
                symbol: s.to_owned(),
            }),
        }
    }
}

/// A single cell of the board.
///
/// The coordinates are fixed at construction. The mutable state is made up of the reveal and flag
/// bits plus the hitbox assigned by the last render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    col_no: usize,
    row_no: usize,
    has_mine: bool,
    is_unveiled: bool,
    is_flagged: bool,
    hit_box: Option<Hitbox>,
}

impl Field {
    /// Creates a hidden field without a mine.
    ///
    /// Fails if either coordinate lies outside of `0..field_size`.
    pub fn new(
        col_no: isize,
        row_no: isize,
        config: &GameConfig,
    ) -> Result<Self, InvalidFieldPosition> {
        Self::with_mine(col_no, row_no, config, false)
    }

    /// Same as [`Field::new`], but the field contains a mine.
    pub fn new_mine(
        col_no: isize,
        row_no: isize,
        config: &GameConfig,
    ) -> Result<Self, InvalidFieldPosition> {
        Self::with_mine(col_no, row_no, config, true)
    }

    pub(crate) fn with_mine(
        col_no: isize,
        row_no: isize,
        config: &GameConfig,
        has_mine: bool,
    ) -> Result<Self, InvalidFieldPosition> {
        let field_size = config.field_size();
        let in_bounds = |coord: isize| usize::try_from(coord).ok().filter(|&c| c < field_size);
        let (Some(col), Some(row)) = (in_bounds(col_no), in_bounds(row_no)) else {
            return Err(InvalidFieldPosition {
                col_no,
                row_no,
                field_size,
            });
        };
        Ok(Self {
            col_no: col,
            row_no: row,
            has_mine,
            is_unveiled: false,
            is_flagged: false,
            hit_box: None,
        })
    }

    pub fn col_no(&self) -> usize {
        self.col_no
    }

    pub fn row_no(&self) -> usize {
        self.row_no
    }

    pub fn pos(&self) -> GridPos {
        GridPos::new(self.col_no, self.row_no)
    }

    pub fn has_mine(&self) -> bool {
        self.has_mine
    }

    pub fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    pub fn is_unveiled(&self) -> bool {
        self.is_unveiled
    }

    /// The hitbox assigned by the most recent render pass, if any.
    pub fn hit_box(&self) -> Option<Hitbox> {
        self.hit_box
    }

    /// Remembers `hit_box` for hit testing and draws the field through `renderer`.
    pub fn render_on_field(&mut self, renderer: &mut impl FieldRender, hit_box: Hitbox) {
        self.hit_box = Some(hit_box);
        renderer.render(self.state());
    }

    /// Returns the display state.
    ///
    /// Unveiled takes precedence over the flag, which takes precedence over hidden.
    pub fn state(&self) -> FieldState {
        if self.is_unveiled {
            if self.has_mine {
                FieldState::Detonated
            } else {
                FieldState::Unveiled
            }
        } else if self.is_flagged {
            FieldState::Flagged
        } else {
            FieldState::Hidden
        }
    }

    /// Flags or reveals the field if `hit_point` lies within its hitbox.
    ///
    /// Returns whether the field was hit. Flagging toggles the flag, unless the field is already
    /// unveiled, in which case the hit has no effect. Revealing is permanent.
    ///
    /// A field that was never rendered has no hitbox and is never hit.
    pub fn check_for_hit(&mut self, hit_point: Position, flagging: bool) -> bool {
        let Some(hit_box) = self.hit_box else {
            trace!(pos = ?self.pos(), "field has not been rendered yet");
            return false;
        };
        if !hit_box.is_hit(hit_point) {
            return false;
        }

        if flagging {
            if !self.is_unveiled {
                self.is_flagged = !self.is_flagged;
            }
        } else {
            self.is_unveiled = true;
        }
        trace!(pos = ?self.pos(), flagging, state = ?self.state(), "field hit");
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("field position ({col_no}, {row_no}) is outside of a {field_size}x{field_size} board")]
pub struct InvalidFieldPosition {
    pub col_no: isize,
    pub row_no: isize,
    pub field_size: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown field state {symbol:?}")]
pub struct UnknownFieldState {
    pub symbol: String,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use itertools::iproduct;

    use super::*;

    fn config() -> GameConfig {
        GameConfig::new(8).unwrap()
    }

    fn rendered_field() -> Field {
        let mut field = Field::new(0, 0, &config()).unwrap();
        field.render_on_field(
            &mut |_: FieldState| {},
            Hitbox::new(Position::new(0.0, 0.0), Position::new(10.0, 10.0)),
        );
        field
    }

    #[test]
    fn valid_positions_start_hidden() {
        let config = config();
        for (col, row) in iproduct!(0..8, 0..8) {
            let field = Field::new(col, row, &config).unwrap();
            assert_eq!(field.state(), FieldState::Hidden);
            assert_eq!(field.pos(), GridPos::new(col as usize, row as usize));
            assert!(!field.is_flagged());
        }
    }

    #[test]
    fn invalid_positions_are_rejected() {
        let config = config();
        for (col, row) in [(-1, 0), (0, -1), (8, 0), (0, 8), (-3, 12), (isize::MIN, 0)] {
            assert_matches!(
                Field::new(col, row, &config),
                Err(InvalidFieldPosition { col_no, row_no, field_size: 8 })
                    if col_no == col && row_no == row
            );
        }
    }

    #[test]
    fn flag_toggles_on_hit() {
        let mut field = rendered_field();

        assert!(field.check_for_hit(Position::new(5.0, 5.0), true));
        assert!(field.is_flagged());
        assert_eq!(field.state(), FieldState::Flagged);

        assert!(field.check_for_hit(Position::new(5.0, 5.0), true));
        assert!(!field.is_flagged());
        assert_eq!(field.state(), FieldState::Hidden);
    }

    #[test]
    fn miss_leaves_state_unchanged() {
        let mut field = rendered_field();

        assert!(!field.check_for_hit(Position::new(20.0, 20.0), true));
        assert!(!field.check_for_hit(Position::new(20.0, 20.0), false));
        assert_eq!(field.state(), FieldState::Hidden);
    }

    #[test]
    fn unveiled_is_terminal() {
        let mut field = rendered_field();
        field.check_for_hit(Position::new(5.0, 5.0), true);

        assert!(field.check_for_hit(Position::new(5.0, 5.0), false));
        assert_eq!(field.state(), FieldState::Unveiled);

        // still counts as a hit, but the flag is left alone
        assert!(field.check_for_hit(Position::new(5.0, 5.0), true));
        assert!(field.is_flagged());
        assert_eq!(field.state(), FieldState::Unveiled);

        assert!(field.check_for_hit(Position::new(5.0, 5.0), false));
        assert_eq!(field.state(), FieldState::Unveiled);
    }

    #[test]
    fn unveiled_mine_detonates() {
        let mut field = Field::new_mine(3, 4, &config()).unwrap();
        field.render_on_field(
            &mut |_: FieldState| {},
            Hitbox::new(Position::new(0.0, 0.0), Position::new(1.0, 1.0)),
        );

        assert!(field.check_for_hit(Position::new(1.0, 1.0), false));
        assert_eq!(field.state(), FieldState::Detonated);
    }

    #[test]
    fn unrendered_field_is_never_hit() {
        let mut field = Field::new(0, 0, &config()).unwrap();
        assert!(!field.check_for_hit(Position::ORIGIN, false));
        assert_eq!(field.state(), FieldState::Hidden);
    }

    #[test]
    fn render_passes_state_and_stores_hitbox() {
        let mut field = Field::new(1, 1, &config()).unwrap();
        let hit_box = Hitbox::new(Position::new(50.0, 50.0), Position::new(100.0, 100.0));
        let mut rendered = Vec::new();
        field.render_on_field(&mut |state: FieldState| rendered.push(state), hit_box);

        assert_eq!(rendered, [FieldState::Hidden]);
        assert_eq!(field.hit_box(), Some(hit_box));

        let moved = Hitbox::new(Position::new(0.0, 0.0), Position::new(10.0, 10.0));
        field.render_on_field(&mut |state: FieldState| rendered.push(state), moved);
        assert_eq!(field.hit_box(), Some(moved));
    }

    #[test]
    fn states_parse_from_symbols_and_codes() {
        for state in FieldState::ALL {
            assert_eq!(FieldState::try_from(state.symbol()), Ok(state));
            assert_eq!(FieldState::try_from(state.code()), Ok(state));
            assert_eq!(state.to_string().parse(), Ok(state));
        }
    }

    #[test]
    fn unknown_states_are_rejected() {
        assert_matches!(FieldState::try_from('?'), Err(UnknownFieldState { .. }));
        assert_matches!(FieldState::try_from(4u8), Err(UnknownFieldState { .. }));
        assert_matches!("".parse::<FieldState>(), Err(UnknownFieldState { .. }));
        assert_matches!("##".parse::<FieldState>(), Err(UnknownFieldState { .. }));
        assert_eq!(
            FieldState::try_from(255u8).unwrap_err().to_string(),
            "unknown field state \"255\""
        );
    }
}
