//! Scenario prompt pool and keyword-based category resolution
use crate::catalog::CatalogError;
use crate::category::CategoryId;
use serde::{Deserialize, Serialize};

const DEFAULT_PROMPT_DATA: &str =
    include_str!("../../scamducation-web/static/assets/data/prompts.json");

/// How a prompt participates in weighted selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptTag {
    Category(CategoryId),
    EasterEgg,
    Untagged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioPrompt {
    pub text: String,
    pub tag: PromptTag,
}

impl ScenarioPrompt {
    /// Category used for catalog lookups and progress tallies.
    #[must_use]
    pub fn category(&self) -> CategoryId {
        match self.tag {
            PromptTag::Category(id) => id,
            PromptTag::EasterEgg => CategoryId::EASTER_EGG,
            PromptTag::Untagged => classify_prompt(&self.text),
        }
    }
}

/// Ordered list of scenario prompts; order drives tie-breaking in selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPool {
    prompts: Vec<ScenarioPrompt>,
}

impl PromptPool {
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or holds no prompts.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let pool: Self = serde_json::from_str(json)?;
        if pool.prompts.is_empty() {
            return Err(CatalogError::EmptyPool);
        }
        Ok(pool)
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyPool`] when `prompts` is empty.
    pub fn new(prompts: Vec<ScenarioPrompt>) -> Result<Self, CatalogError> {
        if prompts.is_empty() {
            return Err(CatalogError::EmptyPool);
        }
        Ok(Self { prompts })
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_PROMPT_DATA).unwrap_or_else(|err| {
            log::error!("bundled prompt pool unusable: {err}");
            Self::fallback()
        })
    }

    fn fallback() -> Self {
        Self {
            prompts: vec![ScenarioPrompt {
                text: "Congratulations! You've won a prize! Just send me your bank details to claim it!"
                    .to_string(),
                tag: PromptTag::Category(CategoryId::Lottery),
            }],
        }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ScenarioPrompt> {
        self.prompts.get(index)
    }

    #[must_use]
    pub fn prompts(&self) -> &[ScenarioPrompt] {
        &self.prompts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}

impl Default for PromptPool {
    fn default() -> Self {
        Self::load_from_static()
    }
}

const EASTER_EGG_KEYWORDS: &[&str] = &["rick roll", "rickroll"];

/// First match wins, so overlapping keywords resolve to the earlier entry.
const CATEGORY_KEYWORDS: &[(&[&str], CategoryId)] = &[
    (&["won", "prize", "million"], CategoryId::Lottery),
    (&["prince", "inherit", "funds"], CategoryId::Inheritance),
    (&["virus", "computer", "click"], CategoryId::TechSupport),
    (&["irs", "tax", "arrest"], CategoryId::Tax),
    (&["singles", "meet", "credit card"], CategoryId::Romance),
    (&["package", "customs", "delivery"], CategoryId::Delivery),
    (&["stranded", "wallet", "wire"], CategoryId::Stranded),
    (&["investment", "rich", "opportunity"], CategoryId::Investment),
];

const DEFAULT_CATEGORY: CategoryId = CategoryId::Lottery;

/// Whether raw prompt text is the easter-egg prompt.
#[must_use]
pub fn is_easter_egg_text(text: &str) -> bool {
    let lowered = text.to_lowercase();
    EASTER_EGG_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

/// Resolve a category from free text.
///
/// The easter egg is checked first and exclusively; unmatched text resolves
/// to the lottery category.
#[must_use]
pub fn classify_prompt(text: &str) -> CategoryId {
    if is_easter_egg_text(text) {
        return CategoryId::EASTER_EGG;
    }
    let lowered = text.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map_or(DEFAULT_CATEGORY, |(_, id)| *id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easter_egg_wins_over_other_keywords() {
        let text = "Click this link to claim your prize, it won't be a rick roll";
        assert_eq!(classify_prompt(text), CategoryId::RickRoll);
    }

    #[test]
    fn earlier_entries_win_overlaps() {
        // "click" is tech support, "won" is lottery; lottery is listed first.
        assert_eq!(classify_prompt("You won! Click here"), CategoryId::Lottery);
        assert_eq!(classify_prompt("The IRS will arrest you"), CategoryId::Tax);
    }

    #[test]
    fn unmatched_text_defaults_to_lottery() {
        assert_eq!(classify_prompt("Good afternoon"), CategoryId::Lottery);
        assert_eq!(classify_prompt(""), CategoryId::Lottery);
    }

    #[test]
    fn tags_parse_from_asset_shape() {
        let json = r#"{ "prompts": [
            { "text": "a", "tag": { "category": "tax" } },
            { "text": "b", "tag": "easter_egg" },
            { "text": "c", "tag": "untagged" }
        ] }"#;
        let pool = PromptPool::from_json(json).unwrap();
        assert_eq!(pool.get(0).unwrap().tag, PromptTag::Category(CategoryId::Tax));
        assert_eq!(pool.get(1).unwrap().tag, PromptTag::EasterEgg);
        assert_eq!(pool.get(2).unwrap().tag, PromptTag::Untagged);
        assert_eq!(pool.get(1).unwrap().category(), CategoryId::RickRoll);
    }

    #[test]
    fn empty_pool_is_rejected() {
        let err = PromptPool::from_json(r#"{ "prompts": [] }"#).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyPool));
        assert!(PromptPool::new(Vec::new()).is_err());
    }
}
