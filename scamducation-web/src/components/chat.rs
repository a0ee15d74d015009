use once_cell::sync::Lazy;
use regex::Regex;
use scamducation_game::Speaker;
use yew::prelude::*;

static URL_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"https?://[^\s<>()]+[^\s<>().,!?]").ok());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Link(&'a str),
}

/// Split chat text into plain runs and bare URLs.
#[must_use]
pub fn split_links(text: &str) -> Vec<Segment<'_>> {
    let Some(pattern) = URL_PATTERN.as_ref() else {
        return vec![Segment::Text(text)];
    };
    let mut segments = Vec::new();
    let mut cursor = 0;
    for found in pattern.find_iter(text) {
        if found.start() > cursor {
            segments.push(Segment::Text(&text[cursor..found.start()]));
        }
        segments.push(Segment::Link(found.as_str()));
        cursor = found.end();
    }
    if cursor < text.len() || segments.is_empty() {
        segments.push(Segment::Text(&text[cursor..]));
    }
    segments
}

fn linkify(text: &str) -> Html {
    split_links(text)
        .into_iter()
        .map(|segment| match segment {
            Segment::Text(run) => html! { { run.to_string() } },
            Segment::Link(url) => html! {
                <a class="link" href={url.to_string()} target="_blank" rel="noopener noreferrer">{ url.to_string() }</a>
            },
        })
        .collect()
}

#[derive(Properties, PartialEq, Eq, Clone)]
pub struct ChatProps {
    pub author: AttrValue,
    pub message: AttrValue,
    pub speaker: Speaker,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(Chat)]
pub fn chat(props: &ChatProps) -> Html {
    let mut class = classes!("chat", props.class.clone());
    match props.speaker {
        Speaker::Scambert => class.push("chat-start"),
        Speaker::Player => class.push("chat-end"),
    }
    html! {
        <div class={class} role="listitem">
            <div class="chat-header">
                <span class="font-semibold">{ props.author.clone() }</span>
            </div>
            <div class="chat-bubble">{ linkify(&props.message) }</div>
        </div>
    }
}

/// Animated dots shown while Scambert is "typing".
#[function_component(TypingIndicator)]
pub fn typing_indicator() -> Html {
    html! {
        <div class="chat chat-start sb-typing" role="status" aria-label="Scambert is typing">
            <div class="chat-bubble"><span class="dot"/><span class="dot"/><span class="dot"/></div>
        </div>
    }
}
