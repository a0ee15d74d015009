use scamducation_game::constants::{REGULAR_CATEGORY_COUNT, TOTAL_CATEGORY_COUNT};
use scamducation_game::{Achievement, ProgressRecord, earned};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub progress: ProgressRecord,
    /// Achievements unlocked by the most recent action.
    #[prop_or_default]
    pub newly_unlocked: Vec<Achievement>,
}

/// Counters shown under the badge list.
#[must_use]
pub fn tallies(progress: &ProgressRecord) -> [(&'static str, usize, usize); 4] {
    [
        ("Scams avoided", progress.avoided.len(), REGULAR_CATEGORY_COUNT),
        ("Scams fallen for", progress.fallen_for.len(), REGULAR_CATEGORY_COUNT),
        (
            "Routes explored",
            progress.avoided.len() + progress.fallen_for.len(),
            REGULAR_CATEGORY_COUNT * 2,
        ),
        ("Scams learned", progress.learned.len(), TOTAL_CATEGORY_COUNT),
    ]
}

fn badge(achievement: Achievement, unlocked: bool) -> Html {
    let class = classes!(
        "sb-achievement",
        format!("sb-icon--{}", achievement.tone()),
        (!unlocked).then_some("sb-achievement--locked"),
    );
    html! {
        <li class={class} data-achievement={achievement.id()}>
            <span class="sb-achievement__icon" aria-hidden="true">{ if unlocked { "🏆" } else { "🔒" } }</span>
            <span class="sb-achievement__title">{ achievement.title() }</span>
        </li>
    }
}

#[function_component(AchievementsPanel)]
pub fn achievements_panel(props: &Props) -> Html {
    let unlocked = earned(&props.progress);
    let banner = (!props.newly_unlocked.is_empty()).then(|| {
        html! {
            <div class="sb-achievement-toast" role="status">
                <p class="sb-heading">{ "Achievement unlocked!" }</p>
                <ul>
                    { for props.newly_unlocked.iter().map(|a| html! {
                        <li class={format!("sb-icon--{}", a.tone())}>{ a.title() }</li>
                    }) }
                </ul>
            </div>
        }
    });
    html! {
        <section class="sb-achievements" aria-label="Achievements">
            { banner.unwrap_or_default() }
            <h2 class="sb-heading">{ format!("Achievements {}/{}", unlocked.len(), Achievement::ALL.len()) }</h2>
            <ul class="sb-achievement-list">
                { for Achievement::ALL.iter().map(|a| badge(*a, unlocked.contains(a))) }
            </ul>
            <dl class="sb-tallies">
                { for tallies(&props.progress).iter().map(|(label, have, of)| html! {
                    <>
                        <dt>{ *label }</dt>
                        <dd>{ format!("{have}/{of}") }</dd>
                    </>
                }) }
            </dl>
        </section>
    }
}
