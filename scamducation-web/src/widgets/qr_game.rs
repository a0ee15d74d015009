use crate::components::scambert_icon::{IconMode, ScambertIcon};
use scamducation_game::{QrGame, QrPhase, QrScenario, QrScenarioSet, QrVerdict};
use yew::prelude::*;

const LESSONS: [&str; 3] = [
    "Identify red flags in QR code posters",
    "Understand common scam tactics",
    "Practice safe scanning habits",
];

const TAKEAWAYS: [(&str, &str); 5] = [
    ("Check for official branding", "Legitimate QR codes have clear logos"),
    ("Beware prizes/vouchers", "Too good to be true offers are bait"),
    ("Watch for layered stickers", "Stickers placed over originals are a red flag"),
    ("Preview URLs", "Check the URL before opening"),
    ("Trust your instincts", "If it feels off, don't scan"),
];

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or_else(QrScenarioSet::load_from_static)]
    pub scenarios: QrScenarioSet,
    /// Skip the intro card and open on the first scenario.
    #[prop_or_default]
    pub autostart: bool,
}

/// Clues listed under the poster: red flags for scams, reassurances otherwise.
#[must_use]
pub fn clues(scenario: &QrScenario) -> &[String] {
    if scenario.is_scam {
        &scenario.red_flags
    } else {
        &scenario.safe_points
    }
}

fn poster(scenario: &QrScenario) -> Html {
    html! {
        <div class={classes!("qr-poster", format!("qr-poster--{}", scenario.image))} aria-hidden="true">
            <div class="qr-poster__code">{ "▚▞▚▞" }</div>
        </div>
    }
}

#[function_component(QrGameWidget)]
pub fn qr_game_widget(props: &Props) -> Html {
    let game = {
        let scenarios = props.scenarios.clone();
        let autostart = props.autostart;
        use_mut_ref(move || {
            let mut game = QrGame::new(scenarios);
            if autostart {
                game.start();
            }
            game
        })
    };
    let rerender = use_force_update();

    let act = |update: fn(&mut QrGame)| {
        let game = game.clone();
        let rerender = rerender.clone();
        Callback::from(move |_: MouseEvent| {
            update(&mut game.borrow_mut());
            rerender.force_update();
        })
    };
    let on_start = act(QrGame::start);
    let on_next = act(QrGame::next);
    let on_safe = act(|g| {
        g.choose(QrVerdict::Safe);
    });
    let on_scam = act(|g| {
        g.choose(QrVerdict::Scam);
    });

    let state = game.borrow();
    let total = state.total();
    match state.phase() {
        QrPhase::Intro => html! {
            <section class="qr-card qr-card--intro">
                <header class="qr-card-header">
                    <ScambertIcon size={50} mode={IconMode::Lecturer} />
                    <h1 class="qr-title">{ "QR Code Scam Detective" }</h1>
                    <p class="qr-subtitle">{ "Learn to spot malicious QR codes" }</p>
                </header>
                <h2 class="qr-info-title">{ "What You'll Learn:" }</h2>
                <ul class="qr-info-items">
                    { for LESSONS.iter().map(|lesson| html! { <li>{ *lesson }</li> }) }
                </ul>
                <p class="qr-alert-text">{ "Vouchers and prizes are powerful hooks for QR scams." }</p>
                <button type="button" class="qr-button" onclick={on_start}>{ "Start Training" }</button>
            </section>
        },
        QrPhase::Playing { index, verdict } => {
            let Some(scenario) = state.current() else {
                return Html::default();
            };
            let flags = clues(scenario)
                .iter()
                .enumerate()
                .map(|(idx, clue)| {
                    let onclick = {
                        let game = game.clone();
                        let rerender = rerender.clone();
                        Callback::from(move |_: MouseEvent| {
                            game.borrow_mut().toggle_flag(idx);
                            rerender.force_update();
                        })
                    };
                    let class = classes!("qr-clue", state.is_flagged(idx).then_some("qr-clue--found"));
                    html! { <li class={class} onclick={onclick}>{ clue.clone() }</li> }
                });
            let body = match verdict {
                None => html! {
                    <div class="qr-decision">
                        <p>{ "Would you scan this QR code?" }</p>
                        <button type="button" class="qr-button qr-button--safe" onclick={on_safe}>{ "Safe" }</button>
                        <button type="button" class="qr-button qr-button--scam" onclick={on_scam}>{ "Scam" }</button>
                    </div>
                },
                Some(_) => {
                    let correct = state.results().last().copied().unwrap_or(false);
                    let (class, title) = if correct {
                        ("qr-result-title-correct", "Correct!")
                    } else {
                        ("qr-result-title-incorrect", "Not quite!")
                    };
                    let label = if index + 1 < total { "Next Scenario" } else { "See Results" };
                    html! {
                        <div class="qr-result-box">
                            <h3 class={classes!("qr-result-title", class)}>{ title }</h3>
                            <p>{ scenario.explanation.clone() }</p>
                            { scenario.link.as_ref().map(|link| html! {
                                <a class="link" href={link.url.clone()} target="_blank" rel="noopener noreferrer">{ link.text.clone() }</a>
                            }).unwrap_or_default() }
                            <button type="button" class="qr-button" onclick={on_next}>{ label }</button>
                        </div>
                    }
                }
            };
            html! {
                <section class="qr-card qr-card--playing">
                    <header class="qr-card-header">
                        <h2 class="qr-title">{ format!("Scenario {}/{}", index + 1, total) }</h2>
                        <span class="qr-score">{ format!("Score: {}/{}", state.score(), total) }</span>
                    </header>
                    <p class="qr-context">{ scenario.context.clone() }</p>
                    { poster(scenario) }
                    <h3 class="qr-clues-title">{ "Inspect for clues:" }</h3>
                    <ul class="qr-clues">{ for flags }</ul>
                    { body }
                </section>
            }
        }
        QrPhase::Summary => html! {
            <section class="qr-card qr-card--summary">
                <header class="qr-card-header">
                    <h1 class="qr-title qr-title-large">{ "Training Complete!" }</h1>
                    <button type="button" class="qr-button qr-button-icon" aria-label="Restart" onclick={on_start}>{ "↺" }</button>
                </header>
                <div class="qr-score-container">
                    <div class="qr-score-percentage">{ format!("{}%", state.percentage()) }</div>
                    <p class="qr-score-text">{ format!("You got {} out of {} correct", state.score(), total) }</p>
                </div>
                <h2 class="qr-info-title">{ "Key Takeaways:" }</h2>
                <ul class="qr-info-items">
                    { for TAKEAWAYS.iter().map(|(head, tail)| html! {
                        <li><strong>{ *head }</strong>{ format!(" - {tail}") }</li>
                    }) }
                </ul>
                <p class="qr-alert-text">{ "You're now equipped to spot QR scams that fool most people. Stay sharp!" }</p>
            </section>
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clues_follow_the_verdict_side() {
        let set = QrScenarioSet::load_from_static();
        for scenario in set.scenarios() {
            let expected = if scenario.is_scam {
                &scenario.red_flags
            } else {
                &scenario.safe_points
            };
            assert_eq!(clues(scenario), expected.as_slice());
        }
    }
}
