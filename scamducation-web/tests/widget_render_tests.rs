use futures::executor::block_on;
use scamducation_game::{Achievement, CategoryId, ProgressRecord, QrScenarioSet};
use scamducation_web::components::achievements_panel::{self, AchievementsPanel};
use scamducation_web::components::modal::{self, Modal};
use scamducation_web::components::unlock_toast::{self, UnlockToast};
use scamducation_web::mount::{WidgetOptions, WidgetType};
use scamducation_web::widgets::{Chatbot, Greeting, QrGameWidget, ScamsInYourArea, Widget};
use scamducation_web::widgets::{chatbot, greeting, qr_game};
use yew::html::ChildrenRenderer;
use yew::{AttrValue, Callback, LocalServerRenderer};

fn render_widget(widget_type: WidgetType) -> String {
    let options = WidgetOptions {
        widget_type,
        ..WidgetOptions::default()
    };
    block_on(LocalServerRenderer::<Widget>::with_props(options).render())
}

#[test]
fn greeting_introduces_scambert_by_default() {
    let props = greeting::Props {
        character: "scambert".to_string(),
        animate: true,
    };
    let html = block_on(LocalServerRenderer::<Greeting>::with_props(props).render());
    assert!(html.contains("Hi there, I"));
    assert!(html.contains("Scambert!"));
    assert!(html.contains("level up your scam-spotting skills"));
    assert!(html.contains("sb-scambert--animated"));
}

#[test]
fn greeting_for_other_characters_is_generic() {
    let props = greeting::Props {
        character: "owl".to_string(),
        animate: false,
    };
    let html = block_on(LocalServerRenderer::<Greeting>::with_props(props).render());
    assert!(html.contains("Hi there!"));
    assert!(!html.contains("Scambert!"));
    assert!(!html.contains("sb-scambert--animated"));
}

#[test]
fn root_widget_routes_by_type() {
    assert!(render_widget(WidgetType::Greeting).contains("sb-greeting"));
    assert!(render_widget(WidgetType::Default).contains("sb-greeting"));
    assert!(render_widget(WidgetType::Qr).contains("QR Code Scam Detective"));
    assert!(render_widget(WidgetType::ScamsInYourArea).contains("sb-area-card"));
    assert!(render_widget(WidgetType::Chatbot).contains("scambert-float"));
}

#[test]
fn scams_card_shows_generic_heading_before_lookup() {
    let html = block_on(LocalServerRenderer::<ScamsInYourArea>::new().render());
    assert!(html.contains("Scams in your area"));
    assert!(html.contains("WARNING: Bank Impersonation Scam"));
    assert!(html.contains("€170,000 stolen from her account"));
    assert!(html.contains("Hang up and call the bank yourself"));
}

#[test]
fn qr_game_opens_on_intro() {
    let html = block_on(
        LocalServerRenderer::<QrGameWidget>::with_props(qr_game::Props {
            scenarios: QrScenarioSet::load_from_static(),
            autostart: false,
        })
        .render(),
    );
    assert!(html.contains("Start Training"));
    assert!(!html.contains("Scenario 1/"));
}

#[test]
fn qr_game_autostart_shows_first_scenario() {
    let scenarios = QrScenarioSet::load_from_static();
    let total = scenarios.len();
    let first_context = scenarios.scenarios()[0].context.clone();
    let html = block_on(
        LocalServerRenderer::<QrGameWidget>::with_props(qr_game::Props {
            scenarios,
            autostart: true,
        })
        .render(),
    );
    assert!(html.contains(&format!("Scenario 1/{total}")));
    assert!(html.contains(&format!("Score: 0/{total}")));
    assert!(html.contains(&first_context));
    assert!(html.contains("Would you scan this QR code?"));
}

#[test]
fn qr_game_without_scenarios_goes_straight_to_summary() {
    let html = block_on(
        LocalServerRenderer::<QrGameWidget>::with_props(qr_game::Props {
            scenarios: QrScenarioSet::default(),
            autostart: true,
        })
        .render(),
    );
    assert!(html.contains("Training Complete!"));
    assert!(html.contains("0%"));
}

#[test]
fn closed_chatbot_renders_only_the_launcher() {
    let html = block_on(
        LocalServerRenderer::<Chatbot>::with_props(chatbot::Props {
            animate: true,
            text_gen: None,
            open: false,
        })
        .render(),
    );
    assert!(html.contains("Hey you! Psst!..."));
    assert!(!html.contains("sb-dialog-container"));
    assert!(!html.contains("CLICK TO BATTLE"));
}

#[test]
fn open_chatbot_shows_opener_and_typing_indicator() {
    let html = block_on(
        LocalServerRenderer::<Chatbot>::with_props(chatbot::Props {
            animate: false,
            text_gen: None,
            open: true,
        })
        .render(),
    );
    assert!(html.contains("sb-dialog-container"));
    assert!(html.contains("legitimate"));
    assert!(html.contains("business proposal"));
    assert!(html.contains("sb-typing"));
    // No quick replies until the prompt has been revealed.
    assert!(!html.contains("sb-quick-reply"));
}

#[test]
fn modal_renders_when_open_and_skips_when_closed() {
    let open = modal::Props {
        open: true,
        title: AttrValue::from("Welcome"),
        description: Some(AttrValue::from("Spot the scam")),
        on_close: Callback::noop(),
        children: ChildrenRenderer::default(),
    };
    let html = block_on(LocalServerRenderer::<Modal>::with_props(open).render());
    assert!(html.contains("sb-modal__header"));
    assert!(html.contains("Spot the scam"));

    let closed = modal::Props {
        open: false,
        title: AttrValue::from("Welcome"),
        description: None,
        on_close: Callback::noop(),
        children: ChildrenRenderer::default(),
    };
    let html = block_on(LocalServerRenderer::<Modal>::with_props(closed).render());
    assert!(!html.contains("sb-dialog-backdrop"));
}

#[test]
fn achievements_panel_marks_earned_badges() {
    let mut progress = ProgressRecord::new();
    progress.routes_completed = 1;
    progress.avoided.insert(CategoryId::Lottery);
    let html = block_on(
        LocalServerRenderer::<AchievementsPanel>::with_props(achievements_panel::Props {
            progress,
            newly_unlocked: vec![Achievement::FirstRoute],
        })
        .render(),
    );
    assert!(html.contains("Achievement unlocked!"));
    assert!(html.contains("First Steps"));
    assert!(html.contains("Achievements 1/9"));
    assert!(html.contains("1/8"));
    assert!(html.contains("sb-achievement--locked"));
}

fn render_toast(unlocked: Vec<Achievement>, hidden: bool) -> String {
    block_on(
        LocalServerRenderer::<UnlockToast>::with_props(unlock_toast::Props {
            unlocked,
            on_expire: Callback::noop(),
            duration_ms: unlock_toast::TOAST_DURATION_MS,
            hidden,
        })
        .render(),
    )
}

#[test]
fn unlock_toast_lists_new_achievements() {
    let html = render_toast(vec![Achievement::FirstRoute, Achievement::ThirdRoute], false);
    assert!(html.contains("sb-achievement-toast"));
    assert!(html.contains("First Steps"));
    assert!(html.contains("Getting Good"));

    assert!(!render_toast(Vec::new(), false).contains("sb-achievement-toast"));
    assert!(!render_toast(vec![Achievement::FirstRoute], true).contains("sb-achievement-toast"));
}
