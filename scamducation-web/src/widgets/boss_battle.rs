use crate::components::chat::{Chat, TypingIndicator};
use crate::components::scambert_icon::{IconMode, ScambertIcon};
use crate::dom;
use crate::textgen::{GeminiClient, TextGenConfig, TextGenError};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use scamducation_game::{BossQuizController, QuizConfig, QuizStep, Speaker, TextGenRequest};
use std::cell::RefCell;
use std::rc::Rc;
use yew::html::TargetCast;
use yew::prelude::*;

type SharedQuiz = Rc<RefCell<BossQuizController>>;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or_default]
    pub text_gen: Option<TextGenConfig>,
    pub on_victory: Callback<()>,
    pub on_close: Callback<()>,
}

/// Feed the service's reply (or failure) back into the quiz.
fn settle(
    quiz: &SharedQuiz,
    reply: Result<String, TextGenError>,
    rerender: &UseForceUpdateHandle,
    on_victory: &Callback<()>,
) {
    let step = quiz.borrow_mut().receive_reply(reply);
    match step {
        Ok(QuizStep::Judged { victory: true, .. }) => on_victory.emit(()),
        Ok(QuizStep::FellBack) => log::warn!("boss quiz fell back to the script"),
        Ok(_) => {}
        Err(err) => log::warn!("unexpected boss reply: {err}"),
    }
    rerender.force_update();
}

fn dispatch(
    quiz: SharedQuiz,
    client: Option<GeminiClient>,
    request: TextGenRequest,
    rerender: UseForceUpdateHandle,
    on_victory: Callback<()>,
) {
    #[cfg(target_arch = "wasm32")]
    wasm_bindgen_futures::spawn_local(async move {
        let reply = match &client {
            Some(client) => client.generate(&request).await,
            None => Err(TextGenError::Unavailable),
        };
        settle(&quiz, reply, &rerender, &on_victory);
    });
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (client, request);
        settle(&quiz, Err(TextGenError::Unavailable), &rerender, &on_victory);
    }
}

#[function_component(BossBattle)]
pub fn boss_battle(props: &Props) -> Html {
    let quiz: SharedQuiz = {
        let remote = props.text_gen.is_some();
        use_mut_ref(move || {
            let mut rng = SmallRng::seed_from_u64(dom::browser_seed());
            BossQuizController::new(QuizConfig::load_from_static(), remote, &mut rng)
        })
    };
    let client = props.text_gen.clone().map(GeminiClient::new);
    let input = use_state(String::new);
    let rerender = use_force_update();

    {
        let quiz = quiz.clone();
        let client = client.clone();
        let rerender = rerender.clone();
        let on_victory = props.on_victory.clone();
        use_effect_with((), move |()| {
            let request = quiz.borrow_mut().begin();
            if let Some(request) = request {
                dispatch(quiz, client, request, rerender.clone(), on_victory);
            }
            rerender.force_update();
            || {}
        });
    }

    let submit = {
        let quiz = quiz.clone();
        let input = input.clone();
        let rerender = rerender.clone();
        let on_victory = props.on_victory.clone();
        Callback::from(move |()| {
            let answer = (*input).clone();
            let step = quiz.borrow_mut().submit_answer(&answer);
            match step {
                Ok(QuizStep::AwaitRemote(request)) => {
                    dispatch(
                        quiz.clone(),
                        client.clone(),
                        request,
                        rerender.clone(),
                        on_victory.clone(),
                    );
                }
                Ok(QuizStep::Judged { victory: true, .. }) => on_victory.emit(()),
                Ok(_) => {}
                Err(err) => {
                    log::debug!("answer not accepted: {err}");
                    return;
                }
            }
            input.set(String::new());
            rerender.force_update();
        })
    };

    let on_input = {
        let input = input.clone();
        Callback::from(move |e: InputEvent| {
            let el: web_sys::HtmlInputElement = e.target_unchecked_into();
            input.set(el.value());
        })
    };
    let on_keydown = {
        let submit = submit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                e.prevent_default();
                submit.emit(());
            }
        })
    };
    let on_send = Callback::from(move |_: MouseEvent| submit.emit(()));
    let on_close = {
        let cb = props.on_close.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    let state = quiz.borrow();
    let busy = state.is_awaiting_reply() || state.is_won();
    let boss_name = state.boss_name().to_string();

    html! {
        <div class="sb-boss-backdrop" role="presentation">
            <section class="sb-boss-window" role="dialog" aria-label="Boss battle">
                <header class="sb-boss-header">
                    <ScambertIcon size={48} mode={IconMode::Boss} label={AttrValue::from(boss_name.clone())} />
                    <div>
                        <h2 class="sb-heading">{ "BOSS BATTLE" }</h2>
                        <p class="sb-boss-name">{ boss_name.clone() }</p>
                        <p class="sb-boss-score">{ format!("Correct: {}/{}", state.correct_answers(), state.win_threshold()) }</p>
                    </div>
                    <button type="button" class="sb-icon-button" aria-label="Close battle" onclick={on_close}>{ "X" }</button>
                </header>
                <div class="sb-messages" role="list">
                    { for state.transcript().iter().map(|message| {
                        let author = match message.speaker {
                            Speaker::Scambert => boss_name.clone(),
                            Speaker::Player => "You".to_string(),
                        };
                        html! { <Chat author={author} message={message.text.clone()} speaker={message.speaker} /> }
                    }) }
                    { state.is_awaiting_reply().then(|| html! { <TypingIndicator /> }).unwrap_or_default() }
                </div>
                { state.is_won().then(|| html! {
                    <p class="sb-boss-victory" role="status">{ "👑 You defeated the boss!" }</p>
                }).unwrap_or_default() }
                <div class="sb-boss-input">
                    <input
                        type="text"
                        placeholder="Type your answer..."
                        value={(*input).clone()}
                        disabled={busy}
                        oninput={on_input}
                        onkeydown={on_keydown}
                    />
                    <button type="button" class="sb-button" aria-label="Send" disabled={busy} onclick={on_send}>{ "➤" }</button>
                </div>
            </section>
        </div>
    }
}
