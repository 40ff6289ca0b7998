use crate::chess::{ParseSquareError, Square};
use derive_more::{Constructor, Display, Error, From};
use serde::{Deserialize, Serialize};
use std::{num::ParseIntError, str::FromStr};

/// A [`Square`] on one of the boards of a variant.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Constructor)]
#[derive(Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{}:{}", board, square)]
pub struct Placement {
    /// Index of the board.
    pub board: usize,
    pub square: Square,
}

/// The reason why parsing [`Placement`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParsePlacementError {
    #[display(fmt = "failed to parse placement, expected `board:row:column`")]
    #[from(ignore)]
    InvalidSyntax,
    #[display(fmt = "failed to parse board index")]
    InvalidBoard(ParseIntError),
    #[display(fmt = "failed to parse placement")]
    InvalidSquare(ParseSquareError),
}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (board, square) = s.split_once(':').ok_or(ParsePlacementError::InvalidSyntax)?;
        Ok(Placement::new(board.parse()?, square.parse()?))
    }
}
