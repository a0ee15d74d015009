use std::fmt;

use clap::ValueEnum;
use scamducation_game::{CategoryId, ProgressRecord};
use serde::Serialize;

/// How a simulated player answers one scam prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RouteChoice {
    Decline,
    Fall,
}

/// Policy interface for automated play strategies.
pub trait PlayerPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Answer the prompt for `category`.
    fn choose(&mut self, progress: &ProgressRecord, category: CategoryId) -> RouteChoice;

    /// Whether to open the explanation after every route.
    fn learns(&self) -> bool {
        false
    }

    /// Whether to read the easter-egg text when it comes up.
    fn reads_easter_egg(&self) -> bool {
        false
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Always says no
    Decliner,
    /// Always takes the bait
    Faller,
    /// Declines and falls in turn
    Alternator,
    /// Declines until every scam is avoided, then falls, learning everything
    Completionist,
}

impl PolicyKind {
    pub const ALL: [Self; 4] = [
        Self::Decliner,
        Self::Faller,
        Self::Alternator,
        Self::Completionist,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Decliner => "decliner",
            Self::Faller => "faller",
            Self::Alternator => "alternator",
            Self::Completionist => "completionist",
        }
    }

    /// Policies that must reach the grand achievement for the run to pass.
    #[must_use]
    pub const fn expects_grand(self) -> bool {
        matches!(self, Self::Completionist)
    }

    #[must_use]
    pub fn create_policy(self) -> Box<dyn PlayerPolicy> {
        match self {
            Self::Decliner => Box::new(DeclinerPolicy),
            Self::Faller => Box::new(FallerPolicy),
            Self::Alternator => Box::new(AlternatorPolicy::default()),
            Self::Completionist => Box::new(CompletionistPolicy),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct DeclinerPolicy;
struct FallerPolicy;
struct CompletionistPolicy;

#[derive(Default)]
struct AlternatorPolicy {
    turn: u32,
}

impl PlayerPolicy for DeclinerPolicy {
    fn name(&self) -> &'static str {
        "decliner"
    }

    fn choose(&mut self, _progress: &ProgressRecord, _category: CategoryId) -> RouteChoice {
        RouteChoice::Decline
    }
}

impl PlayerPolicy for FallerPolicy {
    fn name(&self) -> &'static str {
        "faller"
    }

    fn choose(&mut self, _progress: &ProgressRecord, _category: CategoryId) -> RouteChoice {
        RouteChoice::Fall
    }
}

impl PlayerPolicy for AlternatorPolicy {
    fn name(&self) -> &'static str {
        "alternator"
    }

    fn choose(&mut self, _progress: &ProgressRecord, _category: CategoryId) -> RouteChoice {
        self.turn = self.turn.wrapping_add(1);
        if self.turn % 2 == 1 {
            RouteChoice::Decline
        } else {
            RouteChoice::Fall
        }
    }
}

impl PlayerPolicy for CompletionistPolicy {
    fn name(&self) -> &'static str {
        "completionist"
    }

    fn choose(&mut self, progress: &ProgressRecord, category: CategoryId) -> RouteChoice {
        // The easter egg only pays out when declined.
        if category.is_easter_egg() || !progress.all_avoided() {
            RouteChoice::Decline
        } else {
            RouteChoice::Fall
        }
    }

    fn learns(&self) -> bool {
        true
    }

    fn reads_easter_egg(&self) -> bool {
        true
    }
}
