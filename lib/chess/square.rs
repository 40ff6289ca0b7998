use derive_more::{Constructor, Display, Error, From};
use serde::{Deserialize, Serialize};
use std::{num::ParseIntError, str::FromStr};

/// A square on a board, addressed by zero-based row and column.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Constructor)]
#[derive(Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{}:{}", row, column)]
pub struct Square {
    pub row: u8,
    pub column: u8,
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseSquareError {
    #[display(fmt = "failed to parse square, expected `row:column`")]
    #[from(ignore)]
    InvalidSyntax,
    #[display(fmt = "failed to parse square coordinate")]
    InvalidCoordinate(ParseIntError),
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, column) = s.split_once(':').ok_or(ParseSquareError::InvalidSyntax)?;
        Ok(Square::new(row.parse()?, column.parse()?))
    }
}
