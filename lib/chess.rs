mod board;
mod color;
mod piece;
mod placement;
mod sides;
mod square;
mod tint;

pub use board::*;
pub use color::*;
pub use piece::*;
pub use placement::*;
pub use sides::*;
pub use square::*;
pub use tint::*;
