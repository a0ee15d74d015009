#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod components;
pub mod dom;
pub mod logging;
pub mod mount;
pub mod storage;
pub mod textgen;
pub mod widgets;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    crate::logging::init(false);
    if crate::mount::auto_mount().is_none() {
        log::debug!(
            "no #{} element, waiting for mountScamducationWidget",
            crate::mount::AUTO_MOUNT_ID
        );
    }
}
