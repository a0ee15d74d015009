//! Scamducation Core
//!
//! Platform-agnostic logic for the Scamducation scam-awareness widget: the
//! scenario catalog, weighted prompt selection, achievement rules, the chat
//! and boss-quiz controllers, and the QR inspection minigame. Nothing in this
//! crate touches the browser.

pub mod achievements;
pub mod boss;
pub mod catalog;
pub mod category;
pub mod constants;
pub mod conversation;
pub mod progress;
pub mod prompts;
pub mod qr;
pub mod selector;
pub mod store;

// Re-export commonly used types
pub use achievements::{Achievement, ProgressEvent, Unlocks, apply, earned};
pub use boss::{
    BossQuizController, QuizConfig, QuizError, QuizMode, QuizQuestion, QuizStep, QuizTurn,
    TextGenRequest, TurnRole,
};
pub use catalog::{CatalogError, CategoryDefinition, Resource, ScenarioCatalog};
pub use category::CategoryId;
pub use conversation::{
    ActionOutcome, ChatMessage, ConversationController, ConversationError, PlayerAction,
    RevealTicket, Speaker, Stage,
};
pub use progress::ProgressRecord;
pub use prompts::{PromptPool, PromptTag, ScenarioPrompt, classify_prompt, is_easter_egg_text};
pub use qr::{QrGame, QrPhase, QrScenario, QrVerdict, QrScenarioSet};
pub use selector::{SelectionPhase, choose_weighted, prompt_weights, select};
pub use store::{MemoryStore, ProgressStore, StoreError};

/// Trait for abstracting string key-value persistence
/// Platform-specific implementations should provide this
pub trait KeyValueStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Delete `key`; absent keys are not an error
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the removal.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

/// Shared static content every widget session reads from
#[derive(Debug, Clone)]
pub struct ContentBundle {
    pub catalog: ScenarioCatalog,
    pub prompts: PromptPool,
    pub quiz: QuizConfig,
    pub qr: QrScenarioSet,
}

impl ContentBundle {
    /// Load every embedded asset, degrading to defaults on parse failure
    #[must_use]
    pub fn load_from_static() -> Self {
        Self {
            catalog: ScenarioCatalog::load_from_static(),
            prompts: PromptPool::load_from_static(),
            quiz: QuizConfig::load_from_static(),
            qr: QrScenarioSet::load_from_static(),
        }
    }
}

impl Default for ContentBundle {
    fn default() -> Self {
        Self::load_from_static()
    }
}
