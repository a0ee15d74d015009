//! Client for the generative-language service that voices the boss quiz.
//!
//! Request and response mapping is plain serde so it can be exercised on the
//! host; only [`GeminiClient::generate`] touches the browser.
use scamducation_game::{TextGenRequest, TurnRole};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-pro:generateContent";

const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Endpoint and credentials for the text-generation service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextGenConfig {
    pub endpoint: String,
    pub api_key: String,
}

impl TextGenConfig {
    #[must_use]
    pub fn new(endpoint: Option<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            api_key: api_key.into(),
        }
    }

    /// Full request URL with the key in the query string.
    #[must_use]
    pub fn request_url(&self) -> String {
        let separator = if self.endpoint.contains('?') { '&' } else { '?' };
        format!("{}{separator}key={}", self.endpoint, self.api_key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextGenError {
    #[error("network error: {0}")]
    Network(String),
    #[error("service returned HTTP {0}")]
    Status(u16),
    #[error("could not decode reply: {0}")]
    Decode(String),
    #[error("service returned no text")]
    EmptyReply,
    #[error("text generation is not available outside the browser")]
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.9,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
    pub safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// Map a quiz request onto the service's wire format.
///
/// The preamble rides on the first turn, separated by a blank line.
#[must_use]
pub fn build_request(request: &TextGenRequest) -> GenerateContentRequest {
    let contents = request
        .turns
        .iter()
        .enumerate()
        .map(|(idx, turn)| {
            let role = match turn.role {
                TurnRole::User => "user",
                TurnRole::Model => "model",
            };
            let text = if idx == 0 && !request.preamble.is_empty() {
                format!("{}\n\n{}", request.preamble, turn.text)
            } else {
                turn.text.clone()
            };
            Content {
                role: Some(role.to_string()),
                parts: vec![Part { text }],
            }
        })
        .collect();

    GenerateContentRequest {
        contents,
        generation_config: GenerationConfig::default(),
        safety_settings: HARM_CATEGORIES
            .iter()
            .map(|category| SafetySetting {
                category: (*category).to_string(),
                threshold: "BLOCK_NONE".to_string(),
            })
            .collect(),
    }
}

/// Pull the reply text out of the first candidate.
///
/// # Errors
/// Returns [`TextGenError::EmptyReply`] when there is no candidate text.
pub fn extract_text(response: &GenerateContentResponse) -> Result<String, TextGenError> {
    response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .and_then(|content| content.parts.first())
        .map(|part| part.text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(TextGenError::EmptyReply)
}

/// Decode a raw response body.
///
/// # Errors
/// Returns [`TextGenError::Decode`] on malformed JSON and
/// [`TextGenError::EmptyReply`] when no text came back.
pub fn parse_response(body: &str) -> Result<String, TextGenError> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|err| TextGenError::Decode(err.to_string()))?;
    extract_text(&response)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiClient {
    config: TextGenConfig,
}

impl GeminiClient {
    #[must_use]
    pub const fn new(config: TextGenConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &TextGenConfig {
        &self.config
    }

    /// Send `request` and return the boss's reply.
    ///
    /// # Errors
    /// Returns a [`TextGenError`] on network failure, a non-success status, or an empty reply.
    #[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
    pub async fn generate(&self, request: &TextGenRequest) -> Result<String, TextGenError> {
        let body = serde_json::to_string(&build_request(request))
            .map_err(|err| TextGenError::Decode(err.to_string()))?;
        let text = self.post(&body).await?;
        parse_response(&text)
    }

    #[cfg(target_arch = "wasm32")]
    async fn post(&self, body: &str) -> Result<String, TextGenError> {
        use crate::dom;
        use wasm_bindgen::{JsCast, JsValue};
        use wasm_bindgen_futures::JsFuture;
        use web_sys::{Request, RequestInit, RequestMode, Response};

        let network = |err: JsValue| TextGenError::Network(dom::js_error_message(&err));

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_mode(RequestMode::Cors);
        init.set_body(&JsValue::from_str(body));
        let request = Request::new_with_str_and_init(&self.config.request_url(), &init)
            .map_err(network)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(network)?;

        let win = dom::window().ok_or(TextGenError::Unavailable)?;
        let resp: Response = JsFuture::from(win.fetch_with_request(&request))
            .await
            .map_err(network)?
            .dyn_into()
            .map_err(network)?;
        if !resp.ok() {
            return Err(TextGenError::Status(resp.status()));
        }
        let text = JsFuture::from(resp.text().map_err(network)?)
            .await
            .map_err(network)?;
        text.as_string()
            .ok_or_else(|| TextGenError::Decode("body is not text".to_string()))
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[allow(clippy::unused_async)]
    async fn post(&self, _body: &str) -> Result<String, TextGenError> {
        Err(TextGenError::Unavailable)
    }
}
