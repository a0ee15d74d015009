//! Scam category identifiers
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the fixed scam archetypes, plus the bonus easter-egg archetype.
///
/// The serialized form matches the keys the widget has always persisted, so
/// progress saved by older builds keeps loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryId {
    Lottery,
    Inheritance,
    TechSupport,
    Tax,
    Romance,
    Delivery,
    Stranded,
    Investment,
    RickRoll,
}

impl CategoryId {
    /// The eight regular categories, in catalog order.
    pub const REGULAR: [Self; 8] = [
        Self::Lottery,
        Self::Inheritance,
        Self::TechSupport,
        Self::Tax,
        Self::Romance,
        Self::Delivery,
        Self::Stranded,
        Self::Investment,
    ];

    /// Every category including the easter egg.
    pub const ALL: [Self; 9] = [
        Self::Lottery,
        Self::Inheritance,
        Self::TechSupport,
        Self::Tax,
        Self::Romance,
        Self::Delivery,
        Self::Stranded,
        Self::Investment,
        Self::RickRoll,
    ];

    /// The bonus category that never counts towards avoided/fallen tallies.
    pub const EASTER_EGG: Self = Self::RickRoll;

    #[must_use]
    pub const fn is_easter_egg(self) -> bool {
        matches!(self, Self::RickRoll)
    }

    /// Stable key used in persisted progress and asset files.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Lottery => "lottery",
            Self::Inheritance => "inheritance",
            Self::TechSupport => "techSupport",
            Self::Tax => "tax",
            Self::Romance => "romance",
            Self::Delivery => "delivery",
            Self::Stranded => "stranded",
            Self::Investment => "investment",
            Self::RickRoll => "rickRoll",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.key() == key)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_roundtrip_through_serde() {
        for id in CategoryId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.key()));
            assert_eq!(CategoryId::from_key(id.key()), Some(id));
        }
        assert_eq!(CategoryId::from_key("phishing"), None);
    }

    #[test]
    fn only_rick_roll_is_special() {
        assert!(CategoryId::ALL.iter().filter(|id| id.is_easter_egg()).count() == 1);
        assert!(!CategoryId::REGULAR.iter().any(|id| id.is_easter_egg()));
    }
}
