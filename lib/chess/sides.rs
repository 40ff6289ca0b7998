use crate::chess::Color;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which side, or both sides, an edit applies to.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "lowercase")]
pub enum Sides {
    #[display(fmt = "white")]
    White,
    #[display(fmt = "black")]
    Black,
    #[display(fmt = "both")]
    Both,
}

impl Sides {
    /// The [`Color`]s covered.
    #[inline(always)]
    pub fn colors(self) -> &'static [Color] {
        match self {
            Sides::White => &[Color::White],
            Sides::Black => &[Color::Black],
            Sides::Both => &[Color::White, Color::Black],
        }
    }

    /// Whether `c` is covered.
    #[inline(always)]
    pub fn contains(self, c: Color) -> bool {
        self.colors().contains(&c)
    }
}

impl From<Color> for Sides {
    fn from(c: Color) -> Self {
        match c {
            Color::White => Sides::White,
            Color::Black => Sides::Black,
        }
    }
}

/// The reason why parsing [`Sides`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse sides, expected one of white, black or both")]
pub struct ParseSidesError;

impl FromStr for Sides {
    type Err = ParseSidesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "white" => Ok(Sides::White),
            "black" => Ok(Sides::Black),
            "both" => Ok(Sides::Both),
            _ => Err(ParseSidesError),
        }
    }
}
