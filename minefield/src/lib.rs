//! The board of a grid-based Minesweeper game: fields, their pixel layout and hit testing.
//!
//! A controller owns a [`Grid`] and a [`GameConfig`]. It asks a [`Renderer`] to draw the grid
//! onto any [`DrawSurface`] and forwards pointer clicks to [`Grid::click`], which finds the
//! [`Field`] whose [`Hitbox`] was hit and flags or reveals it.
//!
//! Mine placement, win and loss detection and everything else around the actual game is left to
//! the controller.

pub mod config;
pub mod field;
pub mod geometry;
pub mod grid;
pub mod mine_map;
pub mod render;

pub use config::{Config, ConfigError, GameConfig, RenderConfig};
pub use field::{Field, FieldState, InvalidFieldPosition, UnknownFieldState};
pub use geometry::{Hitbox, Position};
pub use grid::{Grid, GridError, GridPos};
pub use mine_map::MineMap;
pub use render::{
    Color, DrawCommand, DrawSurface, FieldRender, FieldRenderer, RecordingSurface, Renderer,
};
