//! Achievement rules
//!
//! [`apply`] is a pure function over [`ProgressRecord`]: it never touches
//! storage, and every "newly crossed" check compares the record before the
//! event with the record after it.
use crate::category::CategoryId;
use crate::constants::{FIRST_ROUTE_THRESHOLD, THIRD_ROUTE_THRESHOLD};
use crate::progress::ProgressRecord;
use crate::prompts::is_easter_egg_text;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    FirstRoute,
    ThirdRoute,
    EasterEggWin,
    AllAvoided,
    AllFallen,
    Completionist,
    AllLearned,
    ReadEasterEgg,
    GrandUnlock,
}

impl Achievement {
    /// Panel display order.
    pub const ALL: [Self; 9] = [
        Self::FirstRoute,
        Self::ThirdRoute,
        Self::EasterEggWin,
        Self::AllAvoided,
        Self::AllFallen,
        Self::Completionist,
        Self::AllLearned,
        Self::ReadEasterEgg,
        Self::GrandUnlock,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::FirstRoute => "first_route",
            Self::ThirdRoute => "third_route",
            Self::EasterEggWin => "easter_egg_win",
            Self::AllAvoided => "all_avoided",
            Self::AllFallen => "all_fallen",
            Self::Completionist => "completionist",
            Self::AllLearned => "all_learned",
            Self::ReadEasterEgg => "read_easter_egg",
            Self::GrandUnlock => "grand_unlock",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::FirstRoute => "First Steps",
            Self::ThirdRoute => "Getting Good",
            Self::EasterEggWin => "Never Gonna Give You Up",
            Self::AllAvoided => "Scam Master",
            Self::AllFallen => "Easily Fooled",
            Self::Completionist => "HYPERGAMER - Gotta unlock them all!",
            Self::AllLearned => "Wise One - Knowledge is Power!",
            Self::ReadEasterEgg => "Learned - masterful at reading text!",
            Self::GrandUnlock => "THE COLLECT ALL ACHIEVEMENTS MEGAACHIEVEMENT!",
        }
    }

    /// Colour tone used for the badge icon.
    #[must_use]
    pub const fn tone(self) -> &'static str {
        match self {
            Self::FirstRoute => "blue",
            Self::ThirdRoute => "purple",
            Self::EasterEggWin => "pink",
            Self::AllAvoided | Self::GrandUnlock => "yellow",
            Self::AllFallen => "red",
            Self::Completionist => "cyan",
            Self::AllLearned => "amber",
            Self::ReadEasterEgg => "green",
        }
    }

    /// Whether the achievement's condition holds for `progress` right now.
    #[must_use]
    pub fn is_met(self, progress: &ProgressRecord) -> bool {
        match self {
            Self::FirstRoute => progress.routes_completed >= FIRST_ROUTE_THRESHOLD,
            Self::ThirdRoute => progress.routes_completed >= THIRD_ROUTE_THRESHOLD,
            Self::EasterEggWin => progress.easter_egg_completed,
            Self::AllAvoided => progress.all_avoided(),
            Self::AllFallen => progress.all_fallen(),
            Self::Completionist => progress.all_avoided() && progress.all_fallen(),
            Self::AllLearned => progress.all_learned(),
            Self::ReadEasterEgg => progress.read_easter_egg_text,
            Self::GrandUnlock => progress.grand_conditions_met(),
        }
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Something the player did that can move progress forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProgressEvent {
    RouteCompleted {
        category: Option<CategoryId>,
        succeeded: bool,
        raw_prompt_text: String,
    },
    CategoryLearned {
        category: CategoryId,
    },
    EasterEggTextRead,
}

/// Achievements unlocked by a single event, in unlock order.
pub type Unlocks = SmallVec<[Achievement; 4]>;

/// Fold `event` into `progress`.
///
/// Returns the new record and the achievements it newly unlocked:
/// category-specific first, then thresholds, then the grand achievement.
#[must_use]
pub fn apply(progress: &ProgressRecord, event: &ProgressEvent) -> (ProgressRecord, Unlocks) {
    let mut next = progress.clone();
    let mut unlocked = Unlocks::new();

    match event {
        ProgressEvent::RouteCompleted {
            category,
            succeeded,
            raw_prompt_text,
        } => {
            if *succeeded && !progress.easter_egg_completed && is_easter_egg_text(raw_prompt_text) {
                next.easter_egg_completed = true;
                unlocked.push(Achievement::EasterEggWin);
            }

            if let Some(category) = category.filter(|id| !id.is_easter_egg()) {
                if *succeeded {
                    next.avoided.insert(category);
                } else {
                    next.fallen_for.insert(category);
                }
            }

            next.routes_completed = next.routes_completed.saturating_add(1);

            if progress.routes_completed < FIRST_ROUTE_THRESHOLD
                && next.routes_completed >= FIRST_ROUTE_THRESHOLD
            {
                unlocked.push(Achievement::FirstRoute);
            }
            if progress.routes_completed < THIRD_ROUTE_THRESHOLD
                && next.routes_completed >= THIRD_ROUTE_THRESHOLD
            {
                unlocked.push(Achievement::ThirdRoute);
            }
            if !progress.all_avoided() && next.all_avoided() {
                unlocked.push(Achievement::AllAvoided);
            }
            if !progress.all_fallen() && next.all_fallen() {
                unlocked.push(Achievement::AllFallen);
            }
            if !(progress.all_avoided() && progress.all_fallen())
                && next.all_avoided()
                && next.all_fallen()
            {
                unlocked.push(Achievement::Completionist);
            }
        }
        ProgressEvent::CategoryLearned { category } => {
            next.learned.insert(*category);
            if !progress.all_learned() && next.all_learned() {
                unlocked.push(Achievement::AllLearned);
            }
        }
        ProgressEvent::EasterEggTextRead => {
            if !progress.read_easter_egg_text {
                next.read_easter_egg_text = true;
                unlocked.push(Achievement::ReadEasterEgg);
            }
        }
    }

    if !progress.grand_conditions_met() && next.grand_conditions_met() {
        unlocked.push(Achievement::GrandUnlock);
    }

    if !unlocked.is_empty() {
        log::info!(
            "achievements unlocked: {}",
            unlocked
                .iter()
                .map(|achievement| achievement.id())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    (next, unlocked)
}

/// Every achievement whose condition currently holds, in panel order.
#[must_use]
pub fn earned(progress: &ProgressRecord) -> Vec<Achievement> {
    Achievement::ALL
        .into_iter()
        .filter(|achievement| achievement.is_met(progress))
        .collect()
}
