//! Persisted lifetime progress
use crate::category::CategoryId;
use crate::constants::{REGULAR_CATEGORY_COUNT, THIRD_ROUTE_THRESHOLD, TOTAL_CATEGORY_COUNT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A player's progress across every session in one browser profile.
///
/// Field names on the wire match what earlier builds wrote to storage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressRecord {
    #[serde(rename = "totalRoutesCompleted")]
    pub routes_completed: u32,
    #[serde(rename = "avoidedScamTypes")]
    pub avoided: BTreeSet<CategoryId>,
    #[serde(rename = "fallenForScamTypes")]
    pub fallen_for: BTreeSet<CategoryId>,
    #[serde(rename = "rickRollCompleted")]
    pub easter_egg_completed: bool,
    #[serde(rename = "learnedScamTypes")]
    pub learned: BTreeSet<CategoryId>,
    #[serde(rename = "readRickRollText")]
    pub read_easter_egg_text: bool,
}

impl ProgressRecord {
    /// The zero-value record a fresh profile starts with.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn all_avoided(&self) -> bool {
        self.avoided.len() >= REGULAR_CATEGORY_COUNT
    }

    #[must_use]
    pub fn all_fallen(&self) -> bool {
        self.fallen_for.len() >= REGULAR_CATEGORY_COUNT
    }

    #[must_use]
    pub fn all_learned(&self) -> bool {
        self.learned.len() >= TOTAL_CATEGORY_COUNT
    }

    /// Regular categories the player has not declined yet.
    pub fn unavoided(&self) -> impl Iterator<Item = CategoryId> + '_ {
        CategoryId::REGULAR
            .into_iter()
            .filter(|id| !self.avoided.contains(id))
    }

    /// Every sub-condition of the grand achievement holds.
    #[must_use]
    pub fn grand_conditions_met(&self) -> bool {
        self.routes_completed >= THIRD_ROUTE_THRESHOLD
            && self.easter_egg_completed
            && self.all_avoided()
            && self.all_fallen()
            && self.all_learned()
            && self.read_easter_egg_text
    }

    /// Parse a stored record; the easter egg is stripped from the regular tallies.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON object of the expected shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut record: Self = serde_json::from_str(json)?;
        record.avoided.retain(|id| !id.is_easter_egg());
        record.fallen_for.retain(|id| !id.is_easter_egg());
        Ok(record)
    }
}
