use crate::chess::Color;
use derive_more::{Constructor, Display};
use serde::{Deserialize, Serialize};

/// A piece of some named type and a certain [`Color`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Constructor)]
#[derive(Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{} {}", color, name)]
pub struct Piece {
    #[cfg_attr(test, strategy("[A-Z][a-z]{2,8}"))]
    name: String,
    color: Color,
}

impl Piece {
    /// The name of this piece's type.
    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// This piece's [`Color`].
    #[inline(always)]
    pub fn color(&self) -> Color {
        self.color
    }
}
