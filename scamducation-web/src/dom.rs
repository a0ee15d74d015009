use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Response, Storage, Window};

/// Retrieve the global `window` object.
///
/// Always `None` off the browser, so server-side rendering never reaches
/// into JavaScript.
#[must_use]
pub fn window() -> Option<Window> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Retrieve the document object for DOM interactions.
#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

fn no_window() -> JsValue {
    JsValue::from_str("`window` unavailable")
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    if window().is_some() {
        web_sys::console::error_1(&JsValue::from(message));
    }
}

/// A scheduled `setTimeout` callback, cleared when dropped.
///
/// Dropping after the callback ran is a silent no-op. The owner must not drop
/// the handle from inside its own callback; replace it on the next schedule
/// instead.
pub struct Timeout {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Timeout {
    /// Run `callback` once after `delay_ms`.
    ///
    /// # Errors
    /// Returns an error if there is no browser window or the timer cannot be scheduled.
    pub fn schedule(delay_ms: i32, callback: impl FnOnce() + 'static) -> Result<Self, JsValue> {
        let win = window().ok_or_else(no_window)?;
        let closure: Closure<dyn FnMut()> = Closure::once(callback);
        let id = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay_ms,
        )?;
        Ok(Self {
            id,
            _closure: closure,
        })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Some(win) = window() {
            win.clear_timeout_with_handle(self.id);
        }
    }
}

impl std::fmt::Debug for Timeout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeout").field("id", &self.id).finish()
    }
}

/// Perform a fetch request and return the browser `Response`.
///
/// # Errors
/// Returns an error if the fetch request fails or the response cannot be converted to `Response`.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn fetch_response(url: &str) -> Result<Response, JsValue> {
    let win = window().ok_or_else(no_window)?;
    let resp_value = JsFuture::from(win.fetch_with_str(url)).await?;
    resp_value.dyn_into::<Response>()
}

/// Fetch `url` and decode its JSON body.
///
/// # Errors
/// Returns an error on network failure, a non-success status, or a body that does not decode.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, JsValue> {
    let resp = fetch_response(url).await?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", resp.status())));
    }
    let body = JsFuture::from(resp.json()?).await?;
    serde_wasm_bindgen::from_value(body).map_err(Into::into)
}

/// Access the browser `localStorage` handle.
///
/// # Errors
/// Returns an error if the browser window cannot be accessed or `localStorage` is unavailable.
pub fn local_storage() -> Result<Storage, JsValue> {
    window()
        .ok_or_else(no_window)?
        .local_storage()?
        .ok_or_else(|| JsValue::from_str("localStorage unavailable"))
}

/// Seed material for the widget's RNG.
#[must_use]
pub fn browser_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let noise = (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let clock = js_sys::Date::now() as u64;
        noise ^ clock.rotate_left(32)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        0x5CA4_BE27
    }
}
