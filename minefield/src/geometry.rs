//! Pixel-space geometry of the board.

mod hitbox;
mod position;

pub use hitbox::Hitbox;
pub use position::Position;
