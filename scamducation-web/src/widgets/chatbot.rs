//! Floating Scambert chat: the scam role-play, achievements and boss unlock
use crate::components::achievements_panel::AchievementsPanel;
use crate::components::chat::{Chat, TypingIndicator};
use crate::components::modal::Modal;
use crate::components::scambert_icon::{IconMode, ScambertIcon};
use crate::components::unlock_toast::UnlockToast;
use crate::dom::{self, Timeout};
use crate::storage::LocalStorageStore;
use crate::textgen::TextGenConfig;
use crate::widgets::boss_battle::BossBattle;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use scamducation_game::{
    Achievement, CategoryDefinition, ContentBundle, ConversationController, PlayerAction,
    ProgressStore, RevealTicket, Speaker, Stage,
};
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

/// Typing delay before a queued Scambert message appears.
pub const REVEAL_DELAY_MS: i32 = 1200;
/// How long the beaten boss lingers before the battle closes.
pub const BOSS_CLOSE_DELAY_MS: i32 = 3000;

pub type WidgetController = ConversationController<LocalStorageStore, SmallRng>;

type RevealSlot = Rc<RefCell<Option<(RevealTicket, Timeout)>>>;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or(true)]
    pub animate: bool,
    #[prop_or_default]
    pub text_gen: Option<TextGenConfig>,
    /// Start with the chat dialog open.
    #[prop_or_default]
    pub open: bool,
}

fn new_controller() -> WidgetController {
    let bundle = ContentBundle::load_from_static();
    let store = ProgressStore::load(LocalStorageStore::new());
    let rng = SmallRng::seed_from_u64(dom::browser_seed());
    let mut controller = ConversationController::new(bundle.catalog, bundle.prompts, store, rng);
    controller.start();
    controller
}

fn icon_mode(controller: &WidgetController) -> IconMode {
    if controller.progress().grand_conditions_met() {
        IconMode::Mega
    } else if matches!(controller.stage(), Stage::Resolved { .. }) {
        IconMode::Lecturer
    } else {
        IconMode::Scammer
    }
}

/// Queue a timer for the controller's pending message unless one is already set.
fn schedule_reveal(
    controller: &Rc<RefCell<WidgetController>>,
    slot: &RevealSlot,
    rerender: &UseForceUpdateHandle,
) {
    let Some(ticket) = controller.borrow().pending_ticket() else {
        return;
    };
    if slot
        .borrow()
        .as_ref()
        .is_some_and(|(scheduled, _)| *scheduled == ticket)
    {
        return;
    }
    let reveal = {
        let controller = controller.clone();
        let rerender = rerender.clone();
        move || {
            if controller.borrow_mut().reveal(ticket) {
                rerender.force_update();
            }
        }
    };
    match Timeout::schedule(REVEAL_DELAY_MS, reveal) {
        Ok(timer) => {
            *slot.borrow_mut() = Some((ticket, timer));
        }
        Err(err) => {
            log::warn!(
                "typing timer unavailable, revealing at once: {}",
                dom::js_error_message(&err)
            );
            controller.borrow_mut().reveal(ticket);
            rerender.force_update();
        }
    }
}

fn definition_card(def: &CategoryDefinition, learning: bool) -> Html {
    html! {
        <article class="sb-learn-card" data-category={def.id.key()}>
            <h3 class="sb-heading">{ def.name.clone() }</h3>
            <p>{ def.description.clone() }</p>
            { learning.then(|| html! {
                <>
                    <p class="sb-learn-card__stat">{ def.statistics.clone() }</p>
                    <p class="sb-learn-card__loss">{ format!("Money lost: {}", def.money_lost) }</p>
                    <a class="link" href={def.resource.url.clone()} target="_blank" rel="noopener noreferrer">
                        { def.resource.name.clone() }
                    </a>
                </>
            }).unwrap_or_default() }
        </article>
    }
}

#[function_component(Chatbot)]
#[allow(clippy::too_many_lines)]
pub fn chatbot(props: &Props) -> Html {
    let controller = use_mut_ref(new_controller);
    let reveal_slot: RevealSlot = use_mut_ref(|| None);
    let boss_close = use_mut_ref(|| None::<Timeout>);
    let rerender = use_force_update();

    let open = use_state(|| props.open);
    let welcome_open = use_state(|| false);
    let achievements_open = use_state(|| false);
    let learning = use_state(|| false);
    let boss_open = use_state(|| false);
    let newly_unlocked = use_state(Vec::<Achievement>::new);

    {
        let controller = controller.clone();
        let reveal_slot = reveal_slot.clone();
        let rerender = rerender.clone();
        use_effect(move || {
            schedule_reveal(&controller, &reveal_slot, &rerender);
            || {}
        });
    }

    {
        let controller = controller.clone();
        let reveal_slot = reveal_slot.clone();
        let boss_close = boss_close.clone();
        use_effect_with((), move |()| {
            move || {
                controller.borrow_mut().cancel_pending();
                reveal_slot.borrow_mut().take();
                boss_close.borrow_mut().take();
            }
        });
    }

    let act = {
        let controller = controller.clone();
        let rerender = rerender.clone();
        let newly_unlocked = newly_unlocked.clone();
        let learning = learning.clone();
        move |action: PlayerAction| {
            let controller = controller.clone();
            let rerender = rerender.clone();
            let newly_unlocked = newly_unlocked.clone();
            let learning = learning.clone();
            Callback::from(move |_: MouseEvent| {
                let result = controller.borrow_mut().act(action);
                match result {
                    Ok(outcome) => {
                        match action {
                            PlayerAction::Learn => learning.set(true),
                            PlayerAction::TryAgain | PlayerAction::Reset => learning.set(false),
                            _ => {}
                        }
                        newly_unlocked.set(outcome.unlocked.into_iter().collect());
                        rerender.force_update();
                    }
                    Err(err) => log::debug!("ignored {action:?}: {err}"),
                }
            })
        }
    };

    let on_launcher = {
        let controller = controller.clone();
        let open = open.clone();
        let welcome_open = welcome_open.clone();
        Callback::from(move |_: MouseEvent| {
            if controller.borrow().store().welcome_seen() {
                open.set(true);
            } else {
                welcome_open.set(true);
            }
        })
    };

    let on_welcome_close = {
        let controller = controller.clone();
        let open = open.clone();
        let welcome_open = welcome_open.clone();
        Callback::from(move |()| {
            if let Err(err) = controller.borrow().store().mark_welcome_seen() {
                log::warn!("welcome flag not saved: {err}");
            }
            welcome_open.set(false);
            open.set(true);
        })
    };

    let on_close_chat = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(false))
    };
    let on_toggle_achievements = {
        let achievements_open = achievements_open.clone();
        Callback::from(move |_: MouseEvent| achievements_open.set(!*achievements_open))
    };
    let on_open_boss = {
        let boss_open = boss_open.clone();
        Callback::from(move |_: MouseEvent| boss_open.set(true))
    };
    let on_close_boss = {
        let boss_open = boss_open.clone();
        Callback::from(move |()| boss_open.set(false))
    };
    let on_toast_expire = {
        let newly_unlocked = newly_unlocked.clone();
        Callback::from(move |()| newly_unlocked.set(Vec::new()))
    };
    let on_boss_victory = {
        let controller = controller.clone();
        let boss_close = boss_close.clone();
        let boss_open = boss_open.clone();
        let rerender = rerender.clone();
        Callback::from(move |()| {
            if let Err(err) = controller.borrow().store().mark_boss_defeated() {
                log::warn!("boss result not saved: {err}");
            }
            log::info!("boss defeated");
            let boss_open = boss_open.clone();
            match Timeout::schedule(BOSS_CLOSE_DELAY_MS, move || boss_open.set(false)) {
                Ok(timer) => *boss_close.borrow_mut() = Some(timer),
                Err(err) => log::warn!("close timer unavailable: {}", dom::js_error_message(&err)),
            }
            rerender.force_update();
        })
    };

    let state = controller.borrow();
    let stage = state.stage();
    let champion = state.progress().grand_conditions_met();

    let launcher = html! {
        <button type="button" class="scambert-float" aria-label="Chat with Scambert" onclick={on_launcher}>
            <span class="scambert-bubble"><p class="sb-chat-bubble-text">{ "Hey you! Psst!..." }</p></span>
            <ScambertIcon
                size={80}
                animate={props.animate}
                mode={if champion { IconMode::Mega } else { IconMode::Scammer }}
            />
        </button>
    };

    let boss_button = state.boss_available().then(|| html! {
        <button type="button" class="sb-boss-icon-container" onclick={on_open_boss}>
            <ScambertIcon size={90} animate={props.animate} mode={IconMode::Boss} label={AttrValue::from("Boss Scambert")} />
            <p class="sb-boss-click-indicator-text">{ "⚠️ CLICK TO BATTLE! ⚠️" }</p>
        </button>
    });

    let transcript = state.transcript().iter().map(|message| {
        let author = match message.speaker {
            Speaker::Scambert => state.persona_title(),
            Speaker::Player => "You",
        };
        html! {
            <Chat
                author={author}
                message={message.text.clone()}
                speaker={message.speaker}
            />
        }
    });

    let replies = state.quick_replies().iter().enumerate().map(|(idx, reply)| {
        let action = if idx == 0 {
            PlayerAction::Accept
        } else {
            PlayerAction::Decline
        };
        html! {
            <button type="button" class="sb-quick-reply" onclick={act(action)}>{ *reply }</button>
        }
    });

    let bait = state.bait_link_label().map(|label| html! {
        <button type="button" class="sb-bait-link" onclick={act(PlayerAction::ClickLink)}>
            { label.to_string() }
        </button>
    });

    let outcome_pending =
        matches!(stage, Stage::OutcomePending { .. }) && state.pending_ticket().is_none();
    let continue_button = outcome_pending.then(|| html! {
        <button type="button" class="sb-button" onclick={act(PlayerAction::Acknowledge)}>{ "Continue" }</button>
    });

    let resolved = match stage {
        Stage::Resolved { succeeded } => {
            let category = state.current_category();
            let verdict = if succeeded {
                "🛡️ You avoided the scam!"
            } else {
                "🎣 You got scammed!"
            };
            let easter_egg = (category.is_easter_egg() && *learning).then(|| html! {
                <button type="button" class="sb-button" onclick={act(PlayerAction::ReadEasterEgg)}>
                    { "I read every word" }
                </button>
            });
            Some(html! {
                <section class="sb-outcome" data-succeeded={succeeded.to_string()}>
                    <p class="sb-heading">{ verdict }</p>
                    { state.current_definition().map(|def| definition_card(def, *learning)).unwrap_or_default() }
                    <div class="sb-outcome__actions">
                        { (!*learning).then(|| html! {
                            <button type="button" class="sb-button" onclick={act(PlayerAction::Learn)}>{ "Learn more" }</button>
                        }).unwrap_or_default() }
                        { easter_egg.unwrap_or_default() }
                        <button type="button" class="sb-button" onclick={act(PlayerAction::TryAgain)}>{ "Try again" }</button>
                        <button type="button" class="sb-button sb-button--ghost" onclick={act(PlayerAction::Reset)}>{ "Reset progress" }</button>
                    </div>
                </section>
            })
        }
        _ => None,
    };

    let subtitle = if matches!(stage, Stage::Resolved { .. }) {
        "Educational Mode"
    } else {
        "Totally legitimate business"
    };

    let dialog = (*open).then(|| html! {
        <div class="sb-dialog-container" role="dialog" aria-label="Scambert chat">
            <header class="sb-header">
                <ScambertIcon size={60} animate={props.animate} mode={icon_mode(&state)} />
                <div class="sb-header-text">
                    <h1 class="sb-heading">{ state.persona_title() }</h1>
                    <p class="sb-muted">{ subtitle }</p>
                </div>
                <button type="button" class="sb-icon-button" aria-label="Achievements" onclick={on_toggle_achievements}>{ "🏆" }</button>
                <button type="button" class="sb-icon-button" aria-label="Close chat" onclick={on_close_chat}>{ "X" }</button>
            </header>
            { (*achievements_open).then(|| html! {
                <AchievementsPanel progress={state.progress().clone()} newly_unlocked={(*newly_unlocked).clone()} />
            }).unwrap_or_default() }
            <UnlockToast
                unlocked={(*newly_unlocked).clone()}
                hidden={*achievements_open}
                on_expire={on_toast_expire}
            />
            <div class="sb-messages" role="list">
                { for transcript }
                { state.pending_ticket().map(|_| html! { <TypingIndicator /> }).unwrap_or_default() }
            </div>
            <div class="sb-controls">
                { for replies }
                { bait.unwrap_or_default() }
                { continue_button.unwrap_or_default() }
            </div>
            { resolved.unwrap_or_default() }
        </div>
    });

    html! {
        <div class="sb-chatbot">
            { launcher }
            { boss_button.unwrap_or_default() }
            <Modal
                open={*welcome_open}
                title="Welcome to Scambert!"
                description={AttrValue::from("Scambert is a scammer. Your job is to catch him out before he catches you.")}
                on_close={on_welcome_close}
            >
                <ul class="sb-welcome-list">
                    <li>{ "Decline his offers to avoid scams." }</li>
                    <li>{ "Fall for them on purpose to see how they work." }</li>
                    <li>{ "Learn about each scam to unlock achievements." }</li>
                </ul>
            </Modal>
            { dialog.unwrap_or_default() }
            { (*boss_open).then(|| html! {
                <BossBattle text_gen={props.text_gen.clone()} on_victory={on_boss_victory} on_close={on_close_boss} />
            }).unwrap_or_default() }
        </div>
    }
}
