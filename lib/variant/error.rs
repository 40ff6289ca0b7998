use crate::chess::{Color, Placement};
use derive_more::{Deref, Display, Error, IntoIterator};
use std::fmt::{self, Formatter};

/// Why a piece cannot stand on a square.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Obstruction {
    #[display(fmt = "no such square")]
    OutOfBounds,
    #[display(fmt = "the square is uninhabitable")]
    Uninhabitable,
    #[display(fmt = "the square is occupied")]
    Occupied,
}

/// The reason why an edit was rejected.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash, Error)]
pub enum EditError {
    #[display(fmt = "unknown piece type `{}`", name)]
    UnknownPieceType { name: String },

    #[display(fmt = "cannot place a piece on {}, {}", at, reason)]
    InvalidPlacement { at: Placement, reason: Obstruction },

    #[display(fmt = "square {} must be cleared before it can be made uninhabitable", at)]
    SquareOccupied { at: Placement },

    #[display(fmt = "square {} cannot take the highlight color", at)]
    ReservedTint { at: Placement },

    #[display(fmt = "a variant needs at least one board")]
    NoBoards,
}

/// A rule the variant breaks.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash, Error)]
pub enum ValidationError {
    #[display(fmt = "the variant needs a name")]
    EmptyName,

    #[display(fmt = "the {} team has no {} as its objective", color, name)]
    MissingObjective { color: Color, name: String },

    #[display(fmt = "the {} team has {} {} but its objective must be unique", color, count, name)]
    DuplicateObjective {
        color: Color,
        name: String,
        count: usize,
    },
}

/// Every rule a variant breaks, in the order they were checked.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Deref, IntoIterator)]
pub struct ValidationErrors(#[into_iterator(owned, ref)] Vec<ValidationError>);

impl ValidationErrors {
    pub(crate) fn new(errors: Vec<ValidationError>) -> Self {
        debug_assert!(!errors.is_empty());
        ValidationErrors(errors)
    }

    /// The [`ValidationError`]s that concern `c`.
    pub fn by_color(&self, c: Color) -> impl Iterator<Item = &ValidationError> {
        self.0.iter().filter(move |e| match e {
            ValidationError::EmptyName => false,
            ValidationError::MissingObjective { color, .. } => *color == c,
            ValidationError::DuplicateObjective { color, .. } => *color == c,
        })
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }

            fmt::Display::fmt(e, f)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
