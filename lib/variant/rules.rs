use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The piece whose loss ends the game for a side.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Objective {
    /// The traditional king-equivalent, not tied to any particular roster count.
    #[display(fmt = "classic")]
    Classic,
    /// A named piece type, of which the side must field exactly one.
    #[display(fmt = "{}", _0)]
    Piece(#[cfg_attr(test, strategy("[A-Z][a-z]{2,8}"))] String),
}

impl Objective {
    /// An objective named after a piece type, or [`Objective::Classic`] if `name` is blank.
    pub fn named(name: &str) -> Self {
        match name.trim() {
            "" => Objective::Classic,
            n => Objective::Piece(n.to_string()),
        }
    }
}

/// A condition that ends the game.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum EndCondition {
    /// Checkmate the objective piece.
    #[display(fmt = "classic")]
    Classic,
    /// Give check a number of times.
    #[display(fmt = "check {} times", _0)]
    CheckTimes(#[cfg_attr(test, strategy(1u32..10))] u32),
    /// Capture every opposing piece.
    #[display(fmt = "capture all pieces")]
    CaptureAll,
    /// Capture every opposing piece of a type.
    #[display(fmt = "capture all {}", _0)]
    CaptureAllOfType(#[cfg_attr(test, strategy("[A-Z][a-z]{2,8}"))] String),
    /// Lose every piece.
    #[display(fmt = "lose all pieces")]
    LoseAll,
}

/// The reason why parsing [`EndCondition`] failed.
#[derive(Debug, Display, PartialEq, Error, From)]
#[display(fmt = "failed to parse end condition")]
pub struct ParseEndConditionError(ron::de::SpannedError);

impl FromStr for EndCondition {
    type Err = ParseEndConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}

/// The rules that apply to one side.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(deny_unknown_fields, default)]
pub struct Rules {
    /// Unset until the objective is explicitly chosen.
    pub objective: Option<Objective>,
    pub conditions: Vec<EndCondition>,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            objective: None,
            conditions: vec![EndCondition::Classic],
        }
    }
}

impl Rules {
    /// The [`Objective`], falling back to [`Objective::Classic`] if unset.
    pub fn objective(&self) -> &Objective {
        self.objective.as_ref().unwrap_or(&Objective::Classic)
    }

    /// These rules with the objective made explicit.
    pub fn finalize(&self) -> Self {
        Rules {
            objective: Some(self.objective().clone()),
            conditions: self.conditions.clone(),
        }
    }
}
