//! Top-level widgets selectable through the mount API
pub mod boss_battle;
pub mod chatbot;
pub mod greeting;
pub mod qr_game;
pub mod scams_in_your_area;

use crate::mount::{WidgetOptions, WidgetType};
use yew::prelude::*;

pub use boss_battle::BossBattle;
pub use chatbot::Chatbot;
pub use greeting::Greeting;
pub use qr_game::QrGameWidget;
pub use scams_in_your_area::ScamsInYourArea;

/// Root component: picks the widget named by `widget_type`.
#[function_component(Widget)]
pub fn widget(options: &WidgetOptions) -> Html {
    let body = match options.widget_type {
        WidgetType::Greeting | WidgetType::Default => html! {
            <Greeting character={options.character.clone()} animate={options.animate} />
        },
        WidgetType::Qr => html! { <QrGameWidget /> },
        WidgetType::ScamsInYourArea => html! { <ScamsInYourArea /> },
        WidgetType::Chatbot => html! {
            <Chatbot animate={options.animate} text_gen={options.text_gen()} />
        },
    };
    html! {
        <div class="scamducation-widget" data-widget-type={options.widget_type.as_str()}>
            { body }
        </div>
    }
}
