use derive_more::{Constructor, Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An RGB color override for a square.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Constructor)]
#[derive(Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "#{:02x}{:02x}{:02x}", r, g, b)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Tint {
    /// The color squares take when highlighted as reachable.
    ///
    /// No square may be permanently painted with it.
    pub const HIGHLIGHT: Self = Tint {
        r: 20,
        g: 129,
        b: 191,
    };
}

/// The reason why parsing [`Tint`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse color, expected `#rrggbb`")]
pub struct ParseTintError;

impl FromStr for Tint {
    type Err = ParseTintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').ok_or(ParseTintError)?;
        if hex.len() != 6 || !hex.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseTintError);
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ParseTintError);
        Ok(Tint::new(channel(0)?, channel(2)?, channel(4)?))
    }
}
