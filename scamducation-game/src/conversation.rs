//! Chat-style scenario flow
//!
//! The controller is a state machine over [`Stage`]. Every transition that
//! produces a Scambert message parks it behind a [`RevealTicket`] so the
//! presentation layer can play a typing delay before calling
//! [`ConversationController::reveal`]. At most one reveal is outstanding.
use crate::KeyValueStore;
use crate::achievements::{ProgressEvent, Unlocks};
use crate::catalog::{CategoryDefinition, ScenarioCatalog};
use crate::category::CategoryId;
use crate::constants::{
    ACCEPT_REPLY, CAUGHT_LINE, DECLINE_REPLY, FALLBACK_DEFEAT_LINE, OPENING_LINE,
    PERSONA_CHAMPION, PERSONA_LECTURER, PERSONA_SCAMMER, RETRY_LINE,
};
use crate::progress::ProgressRecord;
use crate::prompts::{PromptPool, ScenarioPrompt};
use crate::selector;
use crate::store::ProgressStore;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    Scambert,
    Player,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
}

impl ChatMessage {
    pub fn scambert(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Scambert,
            text: text.into(),
        }
    }

    pub fn player(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Player,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Prompt selected, waiting for it to be revealed.
    Presenting,
    AwaitingDecision,
    /// Player took the bait; follow-up message on its way.
    FollowUp,
    AwaitingLinkClick,
    OutcomePending { succeeded: bool },
    Resolved { succeeded: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    Accept,
    Decline,
    ClickLink,
    Acknowledge,
    Learn,
    ReadEasterEgg,
    TryAgain,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConversationError {
    #[error("{action:?} is not valid while {stage:?}")]
    InvalidAction { action: PlayerAction, stage: Stage },
    #[error("a message is still being typed")]
    RevealPending,
}

/// Handle for the single message waiting to be revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevealTicket(u64);

/// Result of a player action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionOutcome {
    pub reveal: Option<RevealTicket>,
    pub unlocked: Unlocks,
}

#[derive(Debug)]
struct PendingReveal {
    ticket: RevealTicket,
    message: ChatMessage,
}

pub struct ConversationController<S: KeyValueStore, R: Rng> {
    catalog: ScenarioCatalog,
    prompts: PromptPool,
    store: ProgressStore<S>,
    rng: R,
    stage: Stage,
    transcript: Vec<ChatMessage>,
    prompt_index: usize,
    pending: Option<PendingReveal>,
    next_ticket: u64,
}

impl<S: KeyValueStore, R: Rng> ConversationController<S, R> {
    pub const fn new(
        catalog: ScenarioCatalog,
        prompts: PromptPool,
        store: ProgressStore<S>,
        rng: R,
    ) -> Self {
        Self {
            catalog,
            prompts,
            store,
            rng,
            stage: Stage::Presenting,
            transcript: Vec::new(),
            prompt_index: 0,
            pending: None,
            next_ticket: 0,
        }
    }

    /// Greet the player and queue the first scenario prompt.
    pub fn start(&mut self) -> RevealTicket {
        self.pending = None;
        self.transcript.clear();
        self.transcript.push(ChatMessage::scambert(OPENING_LINE));
        self.present_new_prompt()
    }

    /// Publish the pending message if `ticket` is still current.
    ///
    /// Returns `false` for stale or cancelled tickets.
    pub fn reveal(&mut self, ticket: RevealTicket) -> bool {
        let Some(pending) = self.pending.take_if(|pending| pending.ticket == ticket) else {
            return false;
        };
        self.transcript.push(pending.message);
        self.stage = match self.stage {
            Stage::Presenting => Stage::AwaitingDecision,
            Stage::FollowUp => Stage::AwaitingLinkClick,
            other => other,
        };
        true
    }

    /// Drop the outstanding reveal, if any. Used on teardown.
    pub fn cancel_pending(&mut self) {
        if self.pending.take().is_some() {
            log::debug!("pending reveal cancelled");
        }
    }

    /// Handle one player input.
    ///
    /// # Errors
    ///
    /// Returns [`ConversationError::RevealPending`] while a message is still
    /// being typed (reset excepted), and
    /// [`ConversationError::InvalidAction`] when the action does not apply to
    /// the current stage.
    pub fn act(&mut self, action: PlayerAction) -> Result<ActionOutcome, ConversationError> {
        if action == PlayerAction::Reset {
            return Ok(self.reset());
        }
        if self.pending.is_some() {
            return Err(ConversationError::RevealPending);
        }

        let invalid = ConversationError::InvalidAction {
            action,
            stage: self.stage,
        };
        let outcome = match (self.stage, action) {
            (Stage::AwaitingDecision, PlayerAction::Accept) => {
                self.transcript.push(ChatMessage::player(ACCEPT_REPLY));
                self.stage = Stage::FollowUp;
                let follow_up = self.current_definition().map_or_else(
                    || self.current_prompt_text().to_string(),
                    |def| def.follow_up.clone(),
                );
                ActionOutcome {
                    reveal: Some(self.queue(follow_up)),
                    unlocked: Unlocks::new(),
                }
            }
            (Stage::AwaitingDecision, PlayerAction::Decline) => {
                self.transcript.push(ChatMessage::player(DECLINE_REPLY));
                self.stage = Stage::OutcomePending { succeeded: true };
                let defeat = self.current_definition().map_or_else(
                    || FALLBACK_DEFEAT_LINE.to_string(),
                    |def| def.defeat_message.clone(),
                );
                ActionOutcome {
                    reveal: Some(self.queue(defeat)),
                    unlocked: Unlocks::new(),
                }
            }
            (Stage::AwaitingLinkClick, PlayerAction::ClickLink) => {
                self.transcript.push(ChatMessage::scambert(CAUGHT_LINE));
                self.stage = Stage::OutcomePending { succeeded: false };
                ActionOutcome::default()
            }
            (Stage::OutcomePending { succeeded }, PlayerAction::Acknowledge) => {
                let event = ProgressEvent::RouteCompleted {
                    category: Some(self.current_category()),
                    succeeded,
                    raw_prompt_text: self.current_prompt_text().to_string(),
                };
                self.stage = Stage::Resolved { succeeded };
                ActionOutcome {
                    reveal: None,
                    unlocked: self.store.apply(&event),
                }
            }
            (Stage::Resolved { .. }, PlayerAction::Learn) => {
                let event = ProgressEvent::CategoryLearned {
                    category: self.current_category(),
                };
                ActionOutcome {
                    reveal: None,
                    unlocked: self.store.apply(&event),
                }
            }
            (Stage::Resolved { .. }, PlayerAction::ReadEasterEgg)
                if self.current_category().is_easter_egg() =>
            {
                ActionOutcome {
                    reveal: None,
                    unlocked: self.store.apply(&ProgressEvent::EasterEggTextRead),
                }
            }
            (Stage::Resolved { .. }, PlayerAction::TryAgain) => {
                self.transcript.push(ChatMessage::scambert(RETRY_LINE));
                ActionOutcome {
                    reveal: Some(self.present_new_prompt()),
                    unlocked: Unlocks::new(),
                }
            }
            _ => return Err(invalid),
        };
        Ok(outcome)
    }

    fn reset(&mut self) -> ActionOutcome {
        self.cancel_pending();
        if let Err(err) = self.store.reset() {
            log::warn!("progress reset not fully persisted: {err}");
        }
        ActionOutcome {
            reveal: Some(self.start()),
            unlocked: Unlocks::new(),
        }
    }

    fn present_new_prompt(&mut self) -> RevealTicket {
        self.prompt_index = selector::select(&self.prompts, self.store.progress(), &mut self.rng);
        self.stage = Stage::Presenting;
        let text = self.current_prompt_text().to_string();
        self.queue(text)
    }

    fn queue(&mut self, text: String) -> RevealTicket {
        self.next_ticket = self.next_ticket.wrapping_add(1);
        let ticket = RevealTicket(self.next_ticket);
        self.pending = Some(PendingReveal {
            ticket,
            message: ChatMessage::scambert(text),
        });
        ticket
    }

    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    #[must_use]
    pub fn pending_ticket(&self) -> Option<RevealTicket> {
        self.pending.as_ref().map(|pending| pending.ticket)
    }

    #[must_use]
    pub fn current_prompt(&self) -> Option<&ScenarioPrompt> {
        self.prompts.get(self.prompt_index)
    }

    fn current_prompt_text(&self) -> &str {
        self.current_prompt().map_or("", |prompt| prompt.text.as_str())
    }

    #[must_use]
    pub fn current_category(&self) -> CategoryId {
        self.current_prompt()
            .map_or(CategoryId::Lottery, ScenarioPrompt::category)
    }

    #[must_use]
    pub fn current_definition(&self) -> Option<&CategoryDefinition> {
        self.catalog.definition(self.current_category())
    }

    /// Replies offered as buttons, empty unless a decision is expected.
    #[must_use]
    pub fn quick_replies(&self) -> &'static [&'static str] {
        if self.stage == Stage::AwaitingDecision && self.pending.is_none() {
            &[ACCEPT_REPLY, DECLINE_REPLY]
        } else {
            &[]
        }
    }

    /// Label for the bait link while it is clickable.
    #[must_use]
    pub fn bait_link_label(&self) -> Option<&str> {
        if self.stage == Stage::AwaitingLinkClick {
            self.current_definition().map(|def| def.link_text.as_str())
        } else {
            None
        }
    }

    #[must_use]
    pub fn persona_title(&self) -> &'static str {
        if self.store.progress().grand_conditions_met() {
            PERSONA_CHAMPION
        } else if matches!(self.stage, Stage::Resolved { .. }) {
            PERSONA_LECTURER
        } else {
            PERSONA_SCAMMER
        }
    }

    #[must_use]
    pub const fn progress(&self) -> &ProgressRecord {
        self.store.progress()
    }

    #[must_use]
    pub const fn store(&self) -> &ProgressStore<S> {
        &self.store
    }

    #[must_use]
    pub fn boss_available(&self) -> bool {
        self.store.boss_available()
    }

    #[must_use]
    pub const fn catalog(&self) -> &ScenarioCatalog {
        &self.catalog
    }
}
