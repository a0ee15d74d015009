use crate::components::scambert_icon::ScambertIcon;
use crate::mount::DEFAULT_CHARACTER;
use yew::prelude::*;

pub const CALL_TO_ACTION: &str = "Ready to level up your scam-spotting skills? Let's go! 🚀";

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or_else(|| DEFAULT_CHARACTER.to_string())]
    pub character: String,
    #[prop_or(true)]
    pub animate: bool,
}

/// Opening line for `character`.
#[must_use]
pub fn greeting_line(character: &str) -> &'static str {
    if character == DEFAULT_CHARACTER {
        "Hi there, I'm Scambert!"
    } else {
        "Hi there!"
    }
}

#[function_component(Greeting)]
pub fn greeting(props: &Props) -> Html {
    html! {
        <div class="sb-greeting">
            <div class="widget-header">
                <ScambertIcon animate={props.animate} />
                <div class="sb-speech-bubble" role="status">
                    <p>{ greeting_line(&props.character) }</p>
                    <p>{ CALL_TO_ACTION }</p>
                </div>
            </div>
        </div>
    }
}
