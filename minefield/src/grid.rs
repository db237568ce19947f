use std::fmt;

use itertools::iproduct;
use thiserror::Error;
use tracing::debug;

use crate::{config::GameConfig, field::Field, geometry::Position, mine_map::MineMap};

/// The logical address of a field on the board.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GridPos {
    pub col: usize,
    pub row: usize,
}

impl GridPos {
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    pub(crate) fn to_field_index(self, field_size: usize) -> Option<usize> {
        (self.col < field_size && self.row < field_size).then(|| self.col + self.row * field_size)
    }
}

/// A square board of fields, stored as `fields[row][col]`.
///
/// The board is owned by whoever drives the game. Rendering only reads it, apart from handing out
/// hitboxes, and clicks only change the flag and reveal bits of single fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    config: GameConfig,
    fields: Vec<Vec<Field>>,
}

impl Grid {
    /// Creates a board of hidden fields without any mines.
    pub fn new(config: GameConfig) -> Self {
        Self::build(config, |_| false)
    }

    /// Creates a board of hidden fields with mines where `mines` has them.
    pub fn from_mine_map(config: GameConfig, mines: &MineMap) -> Result<Self, GridError> {
        if mines.field_size() != config.field_size() {
            return Err(GridError::SizeMismatch {
                expected: config.field_size(),
                actual: mines.field_size(),
            });
        }
        Ok(Self::build(config, |pos| mines.is_mine(pos)))
    }

    /// Takes over fields that were built elsewhere.
    ///
    /// Every field must sit at the row and column matching its own coordinates.
    pub fn from_rows(config: GameConfig, fields: Vec<Vec<Field>>) -> Result<Self, GridError> {
        let field_size = config.field_size();
        if fields.len() != field_size {
            return Err(GridError::RowCount {
                expected: field_size,
                actual: fields.len(),
            });
        }
        for (row_no, row) in fields.iter().enumerate() {
            if row.len() != field_size {
                return Err(GridError::RowLength {
                    row: row_no,
                    expected: field_size,
                    actual: row.len(),
                });
            }
            for (col_no, field) in row.iter().enumerate() {
                let expected = GridPos::new(col_no, row_no);
                if field.pos() != expected {
                    return Err(GridError::MisplacedField {
                        expected,
                        actual: field.pos(),
                    });
                }
            }
        }
        Ok(Self { config, fields })
    }

    fn build(config: GameConfig, has_mine: impl Fn(GridPos) -> bool) -> Self {
        let field_size = config.field_size();
        let fields = (0..field_size)
            .map(|row| {
                (0..field_size)
                    .map(|col| {
                        let pos = GridPos::new(col, row);
                        Field::with_mine(col as isize, row as isize, &config, has_mine(pos))
                            .expect("positions within the board should be valid")
                    })
                    .collect()
            })
            .collect();
        Self { config, fields }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn field_size(&self) -> usize {
        self.config.field_size()
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        pos.to_field_index(self.field_size()).is_some()
    }

    pub fn field(&self, pos: GridPos) -> Option<&Field> {
        self.fields.get(pos.row)?.get(pos.col)
    }

    pub fn field_mut(&mut self, pos: GridPos) -> Option<&mut Field> {
        self.fields.get_mut(pos.row)?.get_mut(pos.col)
    }

    /// All positions of the board in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = GridPos> {
        let field_size = self.field_size();
        iproduct!(0..field_size, 0..field_size).map(|(row, col)| GridPos::new(col, row))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Field]> + '_ {
        self.fields.iter().map(Vec::as_slice)
    }

    /// All fields in row-major order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields.iter().flatten()
    }

    /// The surrounding fields of `pos` in row-major order, cut off at the edges of the board.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not on the board.
    pub fn neighbors(&self, pos: GridPos) -> impl Iterator<Item = GridPos> {
        assert!(self.contains(pos), "{pos:?} should be on the board");
        let last = self.field_size() - 1;
        iproduct!(
            pos.row.saturating_sub(1)..=(pos.row + 1).min(last),
            pos.col.saturating_sub(1)..=(pos.col + 1).min(last)
        )
        .map(|(row, col)| GridPos::new(col, row))
        .filter(move |&neighbor| neighbor != pos)
    }

    /// The number of mines surrounding `pos`, not counting `pos` itself.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not on the board.
    pub fn adjacent_mines(&self, pos: GridPos) -> usize {
        self.neighbors(pos)
            .filter_map(|neighbor| self.field(neighbor))
            .filter(|field| field.has_mine())
            .count()
    }

    pub fn mine_count(&self) -> usize {
        self.fields().filter(|field| field.has_mine()).count()
    }

    /// Forwards a click to the fields in row-major order and returns the first one that was hit.
    ///
    /// Since hitboxes include their edges, a click exactly on the border between two fields only
    /// affects the upper or left one.
    pub fn click(&mut self, point: Position, flagging: bool) -> Option<GridPos> {
        let hit = self
            .fields
            .iter_mut()
            .flatten()
            .find_map(|field| field.check_for_hit(point, flagging).then(|| field.pos()));
        debug!(?point, flagging, ?hit, "click");
        hit
    }
}

/// One line per row, one symbol per field, as given by [`FieldState::symbol`].
///
/// [`FieldState::symbol`]: crate::field::FieldState::symbol
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for field in row {
                write!(f, "{}", field.state())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("mine map is {actual}x{actual}, but the board is {expected}x{expected}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("expected {expected} rows, got {actual}")]
    RowCount { expected: usize, actual: usize },
    #[error("expected {expected} fields in row {row}, got {actual}")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("field for {actual:?} was placed at {expected:?}")]
    MisplacedField { expected: GridPos, actual: GridPos },
}
