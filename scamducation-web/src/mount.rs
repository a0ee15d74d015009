//! Mount API: turn a host element's `data-*` attributes into a running widget
use crate::textgen::TextGenConfig;
use std::fmt;
use yew::Properties;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Id of the element the widget mounts itself onto at startup.
pub const AUTO_MOUNT_ID: &str = "sc-widget";
pub const DEFAULT_CHARACTER: &str = "scambert";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetType {
    #[default]
    Greeting,
    /// Alias that renders the greeting.
    Default,
    Qr,
    ScamsInYourArea,
    Chatbot,
}

impl WidgetType {
    /// Parse a `data-widget-type` value; anything unrecognised is a greeting.
    #[must_use]
    pub fn from_attr(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "default" => Self::Default,
            "qr" => Self::Qr,
            "scams-in-your-area" => Self::ScamsInYourArea,
            "chatbot" => Self::Chatbot,
            _ => Self::Greeting,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Default => "default",
            Self::Qr => "qr",
            Self::ScamsInYourArea => "scams-in-your-area",
            Self::Chatbot => "chatbot",
        }
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime configuration read from the host element.
#[derive(Properties, Debug, Clone, PartialEq, Eq)]
pub struct WidgetOptions {
    pub widget_type: WidgetType,
    pub character: String,
    pub animate: bool,
    pub api_endpoint: Option<String>,
    pub api_key: Option<String>,
    pub debug: bool,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            widget_type: WidgetType::Greeting,
            character: DEFAULT_CHARACTER.to_string(),
            animate: true,
            api_endpoint: None,
            api_key: None,
            debug: false,
        }
    }
}

fn flag(value: Option<String>, default: bool) -> bool {
    value.map_or(default, |raw| {
        !matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "false" | "0" | "no" | "off"
        )
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

impl WidgetOptions {
    /// Build options from a dataset-style lookup keyed by camelCase names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            widget_type: lookup("widgetType")
                .map(|raw| WidgetType::from_attr(&raw))
                .unwrap_or_default(),
            character: non_empty(lookup("character"))
                .unwrap_or_else(|| DEFAULT_CHARACTER.to_string()),
            animate: flag(lookup("animate"), true),
            api_endpoint: non_empty(lookup("apiEndpoint")),
            api_key: non_empty(lookup("apiKey")),
            debug: flag(lookup("debug"), false),
        }
    }

    /// Text-generation settings, present only when a key was supplied.
    #[must_use]
    pub fn text_gen(&self) -> Option<TextGenConfig> {
        self.api_key
            .as_ref()
            .map(|key| TextGenConfig::new(self.api_endpoint.clone(), key.clone()))
    }
}

#[cfg(target_arch = "wasm32")]
fn options_for(element: &web_sys::Element) -> WidgetOptions {
    use wasm_bindgen::JsCast;
    match element.dyn_ref::<web_sys::HtmlElement>() {
        Some(html) => {
            let dataset = html.dataset();
            WidgetOptions::from_lookup(|key| dataset.get(key))
        }
        None => WidgetOptions::default(),
    }
}

/// Handle returned to JavaScript for tearing the widget down.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct WidgetHandle {
    handle: Option<yew::AppHandle<crate::widgets::Widget>>,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl WidgetHandle {
    /// Destroy the widget. Calling twice is a no-op.
    pub fn unmount(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.destroy();
            log::debug!("widget unmounted");
        }
    }
}

/// Mount the widget selected by `element`'s data attributes onto it.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = mountScamducationWidget)]
#[must_use]
pub fn mount(element: Option<web_sys::Element>) -> Option<WidgetHandle> {
    let element = element?;
    let options = options_for(&element);
    crate::logging::init(options.debug);
    log::info!("mounting {} widget", options.widget_type);
    let handle =
        yew::Renderer::<crate::widgets::Widget>::with_root_and_props(element, options).render();
    Some(WidgetHandle {
        handle: Some(handle),
    })
}

/// Mount onto `#sc-widget` when the page has one.
#[cfg(target_arch = "wasm32")]
pub fn auto_mount() -> Option<WidgetHandle> {
    let element = crate::dom::document()?.get_element_by_id(AUTO_MOUNT_ID)?;
    mount(Some(element))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn widget_types_parse_with_greeting_fallback() {
        assert_eq!(WidgetType::from_attr("qr"), WidgetType::Qr);
        assert_eq!(WidgetType::from_attr("Chatbot"), WidgetType::Chatbot);
        assert_eq!(
            WidgetType::from_attr("scams-in-your-area"),
            WidgetType::ScamsInYourArea
        );
        assert_eq!(WidgetType::from_attr("default"), WidgetType::Default);
        assert_eq!(WidgetType::from_attr("carousel"), WidgetType::Greeting);
        assert_eq!(WidgetType::from_attr(""), WidgetType::Greeting);
    }

    #[test]
    fn empty_dataset_gives_defaults() {
        let options = WidgetOptions::from_lookup(lookup(&[]));
        assert_eq!(options, WidgetOptions::default());
        assert!(options.text_gen().is_none());
    }

    #[test]
    fn dataset_values_are_read() {
        let options = WidgetOptions::from_lookup(lookup(&[
            ("widgetType", "chatbot"),
            ("character", "owl"),
            ("animate", "false"),
            ("apiKey", " secret "),
            ("debug", "true"),
        ]));
        assert_eq!(options.widget_type, WidgetType::Chatbot);
        assert_eq!(options.character, "owl");
        assert!(!options.animate);
        assert!(options.debug);
        let text_gen = options.text_gen().unwrap();
        assert_eq!(text_gen.api_key, "secret");
        assert_eq!(text_gen.endpoint, crate::textgen::DEFAULT_ENDPOINT);
    }

    #[test]
    fn blank_key_disables_text_generation() {
        let options = WidgetOptions::from_lookup(lookup(&[("apiKey", "  ")]));
        assert!(options.text_gen().is_none());
    }
}
