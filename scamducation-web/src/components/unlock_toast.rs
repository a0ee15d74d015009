use crate::dom::{self, Timeout};
use scamducation_game::Achievement;
use yew::prelude::*;

/// How long an unlock announcement stays on screen.
pub const TOAST_DURATION_MS: i32 = 3000;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or_default]
    pub unlocked: Vec<Achievement>,
    /// Fired once the toast has been visible for `duration_ms`.
    pub on_expire: Callback<()>,
    #[prop_or(TOAST_DURATION_MS)]
    pub duration_ms: i32,
    #[prop_or_default]
    pub hidden: bool,
}

#[function_component(UnlockToast)]
pub fn unlock_toast(props: &Props) -> Html {
    // Replaced on the next announcement and cleared when the toast unmounts.
    let timer = use_mut_ref(|| None::<Timeout>);

    {
        let timer = timer.clone();
        let on_expire = props.on_expire.clone();
        use_effect_with(
            (props.unlocked.clone(), props.duration_ms),
            move |(unlocked, delay)| {
                if !unlocked.is_empty() {
                    match Timeout::schedule(*delay, move || on_expire.emit(())) {
                        Ok(handle) => *timer.borrow_mut() = Some(handle),
                        Err(err) => {
                            log::warn!(
                                "toast timer unavailable: {}",
                                dom::js_error_message(&err)
                            );
                        }
                    }
                }
                || {}
            },
        );
    }

    if props.hidden || props.unlocked.is_empty() {
        return Html::default();
    }

    html! {
        <div class="sb-achievement-toast" role="status">
            { for props.unlocked.iter().map(|a| html! {
                <p class={format!("sb-icon--{}", a.tone())}>{ format!("🏆 {}", a.title()) }</p>
            }) }
        </div>
    }
}
