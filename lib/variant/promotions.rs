use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maps a piece type to the ordered list of types it may promote to.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(transparent)]
pub struct Promotions(BTreeMap<String, Vec<String>>);

impl Promotions {
    /// The promotion targets of a piece type, if it promotes at all.
    #[inline(always)]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// Replaces the promotion targets of a piece type.
    ///
    /// An empty list of targets means the piece type doesn't promote.
    pub fn set(&mut self, name: &str, targets: Vec<String>) {
        if targets.is_empty() {
            self.0.remove(name);
        } else {
            self.0.insert(name.to_string(), targets);
        }
    }

    /// The promotion targets of a piece type, empty if it doesn't promote.
    pub fn resolve(&self, name: &str) -> Vec<String> {
        self.get(name).map(<[_]>::to_vec).unwrap_or_default()
    }
}
