use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, str::FromStr};

/// Whether a piece type ships with the game or was defined by the user.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Kind {
    Builtin,
    Custom,
}

/// Describes a registered piece type.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct PieceType {
    pub name: String,
    pub kind: Kind,
}

/// Trait for types that know which piece types exist.
#[cfg_attr(test, mockall::automock)]
pub trait Registry {
    /// Looks up a piece type by name.
    fn resolve(&self, name: &str) -> Option<PieceType>;

    /// The names of all registered piece types.
    fn names(&self) -> Vec<String>;
}

/// The built-in piece types, plus any user-defined ones.
#[derive(Debug, Display, Default, Clone, Eq, PartialEq, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{}", "ron::ser::to_string(self).unwrap()")]
#[serde(deny_unknown_fields, rename = "catalog", default)]
pub struct Catalog {
    /// Names of user-defined piece types.
    #[cfg_attr(test, strategy(proptest::collection::btree_set("[A-Z][a-z]{2,8}", 0..4)))]
    pub custom: BTreeSet<String>,
}

impl Catalog {
    /// The piece types every variant may use.
    pub const BUILTIN: [&'static str; 6] = ["Bishop", "King", "Knight", "Pawn", "Queen", "Rook"];

    /// A catalog with the given user-defined piece types.
    pub fn new<I: IntoIterator<Item = S>, S: Into<String>>(custom: I) -> Self {
        Catalog {
            custom: custom.into_iter().map(Into::into).collect(),
        }
    }
}

impl Registry for Catalog {
    fn resolve(&self, name: &str) -> Option<PieceType> {
        if Self::BUILTIN.contains(&name) {
            Some(PieceType {
                name: name.to_string(),
                kind: Kind::Builtin,
            })
        } else if self.custom.contains(name) {
            Some(PieceType {
                name: name.to_string(),
                kind: Kind::Custom,
            })
        } else {
            None
        }
    }

    fn names(&self) -> Vec<String> {
        let custom = self.custom.iter().filter(|n| !Self::BUILTIN.contains(&n.as_str()));
        Self::BUILTIN
            .iter()
            .map(|n| n.to_string())
            .chain(custom.cloned())
            .collect()
    }
}

/// The reason why parsing [`Catalog`] failed.
#[derive(Debug, Display, PartialEq, Error, From)]
#[display(fmt = "failed to parse piece catalog")]
pub struct ParseCatalogError(ron::de::SpannedError);

impl FromStr for Catalog {
    type Err = ParseCatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}
