use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use scamducation_game::{
    Achievement, CategoryId, ContentBundle, ConversationController, MemoryStore, PlayerAction,
    ProgressStore, Unlocks,
};
use serde::Serialize;

use crate::policy::{PolicyKind, RouteChoice};

type SimController = ConversationController<MemoryStore, ChaCha20Rng>;

/// One completed route, kept for verbose output.
#[derive(Debug, Clone, Serialize)]
pub struct RouteRecord {
    pub route: u32,
    pub category: CategoryId,
    pub choice: RouteChoice,
    pub unlocked: Vec<Achievement>,
}

/// Route number at which an achievement unlocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub achievement: Achievement,
    pub route: u32,
}

/// Outcome of one policy/seed simulation.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub policy: PolicyKind,
    pub seed: u64,
    pub routes_played: u32,
    pub grand_reached: bool,
    pub avoided: usize,
    pub fallen_for: usize,
    pub learned: usize,
    pub milestones: Vec<Milestone>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<RouteRecord>,
}

impl RunReport {
    /// A run passes unless its policy was expected to reach the grand achievement and did not.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.grand_reached || !self.policy.expects_grand()
    }

    #[must_use]
    pub fn milestone(&self, achievement: Achievement) -> Option<u32> {
        self.milestones
            .iter()
            .find(|m| m.achievement == achievement)
            .map(|m| m.route)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub max_routes: u32,
    pub keep_routes: bool,
}

/// Publish whatever message is waiting; the simulator never waits on typing.
fn flush(controller: &mut SimController) {
    if let Some(ticket) = controller.pending_ticket() {
        controller.reveal(ticket);
    }
}

fn act(controller: &mut SimController, action: PlayerAction) -> Result<Unlocks> {
    let outcome = controller
        .act(action)
        .with_context(|| format!("{action:?} rejected in {:?}", controller.stage()))?;
    flush(controller);
    Ok(outcome.unlocked)
}

/// Play routes with `kind` until the grand achievement or the route cap.
///
/// # Errors
/// Returns an error if the controller rejects an action the policy relies on.
pub fn simulate(kind: PolicyKind, seed: u64, config: SimulationConfig) -> Result<RunReport> {
    let bundle = ContentBundle::load_from_static();
    let store = ProgressStore::load(MemoryStore::new());
    let mut controller = ConversationController::new(
        bundle.catalog,
        bundle.prompts,
        store,
        ChaCha20Rng::seed_from_u64(seed),
    );
    let mut policy = kind.create_policy();
    let mut milestones = Vec::new();
    let mut routes = Vec::new();
    let mut routes_played = 0;

    controller.start();
    flush(&mut controller);

    while routes_played < config.max_routes {
        let category = controller.current_category();
        let choice = policy.choose(controller.progress(), category);
        let mut unlocked = Unlocks::new();

        match choice {
            RouteChoice::Decline => {
                act(&mut controller, PlayerAction::Decline)?;
            }
            RouteChoice::Fall => {
                act(&mut controller, PlayerAction::Accept)?;
                act(&mut controller, PlayerAction::ClickLink)?;
            }
        }
        unlocked.extend(act(&mut controller, PlayerAction::Acknowledge)?);
        if policy.learns() {
            unlocked.extend(act(&mut controller, PlayerAction::Learn)?);
        }
        if policy.reads_easter_egg() && category.is_easter_egg() {
            unlocked.extend(act(&mut controller, PlayerAction::ReadEasterEgg)?);
        }
        routes_played += 1;

        log::debug!(
            "{} seed {seed} route {routes_played}: {category} {choice:?} -> {:?}",
            policy.name(),
            unlocked.as_slice()
        );
        milestones.extend(unlocked.iter().map(|achievement| Milestone {
            achievement: *achievement,
            route: routes_played,
        }));
        if config.keep_routes {
            routes.push(RouteRecord {
                route: routes_played,
                category,
                choice,
                unlocked: unlocked.to_vec(),
            });
        }

        if controller.progress().grand_conditions_met() {
            break;
        }
        act(&mut controller, PlayerAction::TryAgain)?;
    }

    let progress = controller.progress();
    Ok(RunReport {
        policy: kind,
        seed,
        routes_played,
        grand_reached: milestones
            .iter()
            .any(|m| m.achievement == Achievement::GrandUnlock),
        avoided: progress.avoided.len(),
        fallen_for: progress.fallen_for.len(),
        learned: progress.learned.len(),
        milestones,
        routes,
    })
}
