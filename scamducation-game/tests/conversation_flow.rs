use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use scamducation_game::constants::{
    ACCEPT_REPLY, CAUGHT_LINE, DECLINE_REPLY, OPENING_LINE, PERSONA_CHAMPION, RETRY_LINE,
};
use scamducation_game::{
    Achievement, CategoryId, ConversationController, MemoryStore, PlayerAction, ProgressStore,
    PromptPool, ScenarioCatalog, Speaker, Stage,
};

type Chat = ConversationController<MemoryStore, ChaCha20Rng>;

fn chat_with(backend: MemoryStore, seed: u64) -> Chat {
    ConversationController::new(
        ScenarioCatalog::load_from_static(),
        PromptPool::load_from_static(),
        ProgressStore::load(backend),
        ChaCha20Rng::seed_from_u64(seed),
    )
}

fn reveal_pending(chat: &mut Chat) {
    let ticket = chat.pending_ticket().expect("message pending");
    assert!(chat.reveal(ticket));
}

/// Play the presented prompt to resolution and return what unlocked.
fn play_route(chat: &mut Chat, decline: bool) -> Vec<Achievement> {
    reveal_pending(chat);
    assert_eq!(chat.stage(), Stage::AwaitingDecision);
    if decline {
        chat.act(PlayerAction::Decline).unwrap();
        reveal_pending(chat);
    } else {
        chat.act(PlayerAction::Accept).unwrap();
        reveal_pending(chat);
        chat.act(PlayerAction::ClickLink).unwrap();
    }
    chat.act(PlayerAction::Acknowledge).unwrap().unlocked.into_vec()
}

#[test]
fn first_route_transcript_reads_in_order() {
    let mut chat = chat_with(MemoryStore::new(), 10);
    chat.start();
    let unlocked = play_route(&mut chat, true);
    assert!(unlocked.contains(&Achievement::FirstRoute));

    let transcript = chat.transcript();
    assert_eq!(transcript[0].text, OPENING_LINE);
    assert_eq!(transcript[1].speaker, Speaker::Scambert);
    assert_eq!(transcript[2].text, DECLINE_REPLY);
    assert_eq!(transcript[2].speaker, Speaker::Player);
    let defeat = &chat.current_definition().unwrap().defeat_message;
    assert_eq!(&transcript[3].text, defeat);
    assert_eq!(chat.stage(), Stage::Resolved { succeeded: true });
}

#[test]
fn falling_for_the_bait_shows_follow_up_then_caught() {
    let mut chat = chat_with(MemoryStore::new(), 11);
    chat.start();
    play_route(&mut chat, false);

    let transcript = chat.transcript();
    let follow_up = &chat.current_definition().unwrap().follow_up;
    assert_eq!(transcript[2].text, ACCEPT_REPLY);
    assert_eq!(&transcript[3].text, follow_up);
    assert_eq!(transcript[4].text, CAUGHT_LINE);
    assert_eq!(chat.stage(), Stage::Resolved { succeeded: false });
}

#[test]
fn try_again_presents_a_new_prompt() {
    let mut chat = chat_with(MemoryStore::new(), 12);
    chat.start();
    play_route(&mut chat, true);
    let before = chat.transcript().len();

    let outcome = chat.act(PlayerAction::TryAgain).unwrap();
    assert!(outcome.reveal.is_some());
    assert_eq!(chat.stage(), Stage::Presenting);
    assert_eq!(chat.transcript()[before].text, RETRY_LINE);
    play_route(&mut chat, false);
    assert_eq!(chat.progress().routes_completed, 2);
}

#[test]
fn completionist_run_reaches_grand_achievement() {
    let backend = MemoryStore::new();
    let mut chat = chat_with(backend.clone(), 0x5EED);
    chat.start();

    let mut all_unlocked = Vec::new();
    for _ in 0..2_000 {
        let category = chat.current_category();
        let decline = category.is_easter_egg() || !chat.progress().all_avoided();
        all_unlocked.extend(play_route(&mut chat, decline));
        all_unlocked.extend(chat.act(PlayerAction::Learn).unwrap().unlocked);
        if category == CategoryId::RickRoll {
            all_unlocked.extend(chat.act(PlayerAction::ReadEasterEgg).unwrap().unlocked);
        }
        if chat.progress().grand_conditions_met() {
            break;
        }
        chat.act(PlayerAction::TryAgain).unwrap();
    }

    assert!(chat.progress().grand_conditions_met());
    assert_eq!(chat.persona_title(), PERSONA_CHAMPION);
    for achievement in Achievement::ALL {
        let count = all_unlocked.iter().filter(|a| **a == achievement).count();
        assert_eq!(count, 1, "{achievement} unlocked {count} times");
    }
    assert_eq!(all_unlocked.last(), Some(&Achievement::GrandUnlock));

    let reloaded = ProgressStore::load(backend);
    assert!(reloaded.progress().grand_conditions_met());
}

#[test]
fn reset_wipes_progress_and_flags() {
    let backend = MemoryStore::new();
    let mut chat = chat_with(backend.clone(), 13);
    chat.start();
    play_route(&mut chat, true);
    chat.act(PlayerAction::Learn).unwrap();
    chat.store().mark_welcome_seen().unwrap();

    chat.act(PlayerAction::Reset).unwrap();
    assert_eq!(chat.progress().routes_completed, 0);
    assert!(chat.progress().learned.is_empty());
    assert!(!chat.store().welcome_seen());
    assert_eq!(chat.stage(), Stage::Presenting);
    assert_eq!(chat.transcript().len(), 1);

    let reloaded = ProgressStore::load(backend);
    assert_eq!(reloaded.progress(), chat.progress());
}

#[test]
fn learning_twice_is_harmless() {
    let mut chat = chat_with(MemoryStore::new(), 14);
    chat.start();
    play_route(&mut chat, true);
    chat.act(PlayerAction::Learn).unwrap();
    let outcome = chat.act(PlayerAction::Learn).unwrap();
    assert!(outcome.unlocked.is_empty());
    assert_eq!(chat.progress().learned.len(), 1);
}
