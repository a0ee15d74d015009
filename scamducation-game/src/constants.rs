//! Centralized tuning constants for Scamducation logic.
//!
//! The selector weights are part of the widget's observable behaviour: the
//! coverage guarantees of the scenario sequencer depend on their exact values.

// Selector weights ---------------------------------------------------------
pub const WEIGHT_FRESH: f64 = 0.9;
pub const WEIGHT_SEEN: f64 = 0.005;
pub const WEIGHT_EASTER_EGG_RARE: f64 = 0.01;
pub const WEIGHT_EASTER_EGG_SUPPRESSED: f64 = 0.05;
pub const WEIGHT_EASTER_EGG_BOOSTED: f64 = 0.3;
pub const WEIGHT_UNTAGGED: f64 = 0.9;

// Achievement thresholds ---------------------------------------------------
pub const FIRST_ROUTE_THRESHOLD: u32 = 1;
pub const THIRD_ROUTE_THRESHOLD: u32 = 3;
pub const REGULAR_CATEGORY_COUNT: usize = 8;
pub const TOTAL_CATEGORY_COUNT: usize = 9;

// Persistence keys ---------------------------------------------------------
pub const PROGRESS_KEY: &str = "Scambert_achievements";
pub const WELCOME_SEEN_KEY: &str = "Scambert_welcome_seen";
pub const BOSS_DEFEATED_KEY: &str = "Scambert_boss_defeated";
pub(crate) const FLAG_TRUE: &str = "true";

// Chat script --------------------------------------------------------------
pub const OPENING_LINE: &str =
    "Hello there... I have a very *legitimate* business proposal for you...";
pub const RETRY_LINE: &str = "Well then, let's see if you can catch me this time... 😏";
pub const CAUGHT_LINE: &str = "Got you! You fell for it! I have caught you! 😈🎣";
pub const ACCEPT_REPLY: &str = "YES, let's do this!";
pub const DECLINE_REPLY: &str = "NO. I'm not 100% sure you're legitimate.";
pub const FALLBACK_DEFEAT_LINE: &str =
    "Oh my... You're too smart for me! You spotted my tricks! 😤";

// Personas -----------------------------------------------------------------
pub const PERSONA_SCAMMER: &str = "Scambert";
pub const PERSONA_LECTURER: &str = "Professor Scambert";
pub const PERSONA_CHAMPION: &str = "👑 MEGA CHAMPION Scambert 👑";
