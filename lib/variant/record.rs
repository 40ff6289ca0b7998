use crate::chess::{Board, Color, Placement};
use crate::variant::{Promotions, Rules};
use derive_more::{Display, Error, From};
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt, str::FromStr};

/// A piece on the roster of a saved variant.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Member {
    pub name: String,
    pub placement: Placement,
    /// The types this piece may promote to, empty if it doesn't promote.
    #[serde(default)]
    pub promotes_to: Vec<String>,
}

/// Everything that belongs to one side of a saved variant.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct Army {
    pub rules: Rules,
    pub promotions: Promotions,
    pub team: Vec<Member>,
}

/// A validated chess variant, ready to be persisted.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(into = "RawRecord", try_from = "RawRecord")]
pub struct Record {
    name: String,
    boards: Vec<Board>,
    armies: [Army; 2],
}

#[derive(Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename = "Variant")]
struct RawRecord {
    name: String,
    boards: Vec<Board>,
    white: Army,
    black: Army,
}

/// The reason why a [`Record`] is inconsistent.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash, Error)]
pub enum RecordError {
    #[display(fmt = "a variant needs at least one board")]
    NoBoards,
    #[display(fmt = "no piece may stand on {}", at)]
    Unplaceable { at: Placement },
    #[display(fmt = "more than one piece stands on {}", at)]
    Overlap { at: Placement },
    #[display(fmt = "the piece on {} disagrees with its team's promotions", at)]
    Promotions { at: Placement },
}

impl Record {
    pub(crate) fn new(name: String, boards: Vec<Board>, white: Army, black: Army) -> Self {
        Record {
            name,
            boards,
            armies: [white, black],
        }
    }

    /// The variant's name.
    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The variant's boards.
    #[inline(always)]
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// The [`Army`] of a [`Color`].
    #[inline(always)]
    pub fn army(&self, c: Color) -> &Army {
        &self.armies[c as usize]
    }

    fn check(&self) -> Result<(), RecordError> {
        if self.boards.is_empty() {
            return Err(RecordError::NoBoards);
        }

        let mut occupied = BTreeSet::new();
        for army in &self.armies {
            for m in &army.team {
                let at = m.placement;
                if !self.boards.get(at.board).is_some_and(|b| b.is_habitable(at.square)) {
                    return Err(RecordError::Unplaceable { at });
                } else if !occupied.insert(at) {
                    return Err(RecordError::Overlap { at });
                } else if m.promotes_to != army.promotions.resolve(&m.name) {
                    return Err(RecordError::Promotions { at });
                }
            }
        }

        Ok(())
    }
}

impl From<Record> for RawRecord {
    fn from(r: Record) -> Self {
        let [white, black] = r.armies;
        RawRecord {
            name: r.name,
            boards: r.boards,
            white,
            black,
        }
    }
}

impl TryFrom<RawRecord> for Record {
    type Error = RecordError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let record = Record::new(raw.name, raw.boards, raw.white, raw.black);
        record.check()?;
        Ok(record)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = PrettyConfig::default()
            .struct_names(true)
            .compact_arrays(true);
        let s = ron::ser::to_string_pretty(self, config).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

/// The reason why parsing [`Record`] failed.
#[derive(Debug, Display, PartialEq, Error, From)]
#[display(fmt = "failed to parse variant")]
pub struct ParseRecordError(ron::de::SpannedError);

impl FromStr for Record {
    type Err = ParseRecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}
