//! Static educational content for every scam category
use crate::category::CategoryId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_CATALOG_DATA: &str =
    include_str!("../../scamducation-web/static/assets/data/categories.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog has no entry for category `{0}`")]
    MissingCategory(CategoryId),
    #[error("prompt pool is empty")]
    EmptyPool,
}

/// External reading material shown alongside a category explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub url: String,
}

/// Immutable description of one scam archetype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub statistics: String,
    pub money_lost: String,
    pub resource: Resource,
    /// Bait message sent after the player takes the hook.
    pub follow_up: String,
    /// Call-to-action label on the bait link.
    pub link_text: String,
    /// Scambert's grumble when the player declines.
    pub defeat_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScenarioCatalog {
    categories: Vec<CategoryDefinition>,
}

impl ScenarioCatalog {
    /// Parse and validate a catalog; every category must be described.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a category is missing.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        if let Some(missing) = CategoryId::ALL
            .into_iter()
            .find(|id| catalog.definition(*id).is_none())
        {
            return Err(CatalogError::MissingCategory(missing));
        }
        Ok(catalog)
    }

    /// Load the catalog bundled with the widget assets.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_CATALOG_DATA).unwrap_or_else(|err| {
            log::error!("bundled category catalog unusable: {err}");
            Self::default()
        })
    }

    #[must_use]
    pub fn definition(&self, id: CategoryId) -> Option<&CategoryDefinition> {
        self.categories.iter().find(|def| def.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryDefinition> {
        self.categories.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_describes_every_category() {
        let catalog = ScenarioCatalog::load_from_static();
        assert_eq!(catalog.len(), CategoryId::ALL.len());
        for id in CategoryId::ALL {
            let def = catalog.definition(id).expect("category present");
            assert!(!def.follow_up.is_empty());
            assert!(!def.link_text.is_empty());
            assert!(def.resource.url.starts_with("https://"));
        }
    }

    #[test]
    fn missing_category_is_rejected() {
        let json = r#"{ "categories": [] }"#;
        let err = ScenarioCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::MissingCategory(CategoryId::Lottery)));
    }

    #[test]
    fn malformed_catalog_reports_json_error() {
        let err = ScenarioCatalog::from_json("{").unwrap_err();
        assert!(err.to_string().starts_with("catalog JSON is invalid"));
    }
}
