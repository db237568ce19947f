use bitvec::{bitbox, boxed::BitBox};

use crate::{config::GameConfig, grid::GridPos};

/// Stores which fields of a square board contain a mine.
///
/// This is how a controller hands its mine layout to [`Grid::from_mine_map`].
///
/// [`Grid::from_mine_map`]: crate::grid::Grid::from_mine_map
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct MineMap {
    field_size: usize,
    mines: BitBox,
}

impl MineMap {
    /// Creates a new [`MineMap`] without any mines.
    pub fn new(config: &GameConfig) -> Self {
        let field_size = config.field_size();
        Self {
            field_size,
            mines: bitbox![0; field_size * field_size],
        }
    }

    /// The number of fields per side.
    pub fn field_size(&self) -> usize {
        self.field_size
    }

    /// Returns whether the given field contains a mine.
    ///
    /// Positions outside of the board never contain a mine.
    pub fn is_mine(&self, pos: GridPos) -> bool {
        self.index(pos)
            .map(|index| self.mines[index])
            .unwrap_or(false)
    }

    /// Returns the total number of mines.
    pub fn mine_count(&self) -> usize {
        self.mines.count_ones()
    }

    /// Places or removes a mine at the given field.
    ///
    /// Does nothing if the state of the field already matches.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not on the board.
    pub fn set_mine(&mut self, pos: GridPos, is_mine: bool) {
        let index = self
            .index(pos)
            .unwrap_or_else(|| panic!("{pos:?} should be on the board"));
        self.mines.set(index, is_mine);
    }

    /// Shorthand for [`Self::set_mine()`] with `true`.
    pub fn place_mine(&mut self, pos: GridPos) {
        self.set_mine(pos, true);
    }

    /// Shorthand for [`Self::set_mine()`] with `false`.
    pub fn remove_mine(&mut self, pos: GridPos) {
        self.set_mine(pos, false);
    }

    /// Removes all mines, leaving the board size unchanged.
    pub fn reset(&mut self) {
        self.mines.fill(false);
    }

    /// Positions of all mines in row-major order.
    pub fn mines(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.mines
            .iter_ones()
            .map(|index| GridPos::new(index % self.field_size, index / self.field_size))
    }

    fn index(&self, pos: GridPos) -> Option<usize> {
        pos.to_field_index(self.field_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_and_removes_mines() {
        let mut mine_map = MineMap::new(&GameConfig::new(3).unwrap());
        assert_eq!(mine_map.mine_count(), 0);

        mine_map.place_mine(GridPos::new(2, 1));
        mine_map.place_mine(GridPos::new(0, 2));
        mine_map.place_mine(GridPos::new(0, 2));
        assert_eq!(mine_map.mine_count(), 2);
        assert!(mine_map.is_mine(GridPos::new(2, 1)));
        assert!(!mine_map.is_mine(GridPos::new(1, 2)));
        assert_eq!(
            mine_map.mines().collect::<Vec<_>>(),
            [GridPos::new(2, 1), GridPos::new(0, 2)]
        );

        mine_map.remove_mine(GridPos::new(2, 1));
        assert_eq!(mine_map.mine_count(), 1);

        mine_map.reset();
        assert_eq!(mine_map.mine_count(), 0);
        assert_eq!(mine_map.field_size(), 3);
    }

    #[test]
    fn outside_positions_are_free() {
        let mine_map = MineMap::new(&GameConfig::new(3).unwrap());
        assert!(!mine_map.is_mine(GridPos::new(3, 0)));
    }

    #[test]
    #[should_panic]
    fn placing_outside_panics() {
        let mut mine_map = MineMap::new(&GameConfig::new(3).unwrap());
        mine_map.place_mine(GridPos::new(0, 3));
    }
}
