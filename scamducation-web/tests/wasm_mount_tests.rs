#![cfg(target_arch = "wasm32")]
use scamducation_game::{Achievement, KeyValueStore};
use scamducation_web::components::unlock_toast::{self, UnlockToast};
use scamducation_web::dom;
use scamducation_web::mount::mount;
use scamducation_web::storage::LocalStorageStore;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use yew::Callback;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn host_element(widget_type: &str) -> web_sys::Element {
    let doc = dom::document().expect("document");
    let root = doc.create_element("div").expect("create host");
    root.set_attribute("data-widget-type", widget_type)
        .expect("set widget type");
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append host");
    root
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        dom::window()
            .expect("window")
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .expect("set timeout");
    });
    JsFuture::from(promise).await.expect("sleep");
}

#[wasm_bindgen_test]
fn dom_helpers_see_the_browser() {
    assert!(dom::window().is_some());
    assert!(dom::document().is_some());
}

#[wasm_bindgen_test]
fn local_storage_round_trips_values() {
    let store = LocalStorageStore::new();
    store.set("sc-test-key", "true").expect("set");
    assert_eq!(store.get("sc-test-key").expect("get").as_deref(), Some("true"));
    store.remove("sc-test-key").expect("remove");
    assert_eq!(store.get("sc-test-key").expect("get"), None);
}

#[wasm_bindgen_test]
fn mount_returns_a_handle_that_unmounts() {
    let root = host_element("greeting");
    let mut handle = mount(Some(root)).expect("handle");
    handle.unmount();
    handle.unmount();
}

#[wasm_bindgen_test]
fn mount_without_element_is_none() {
    assert!(mount(None).is_none());
}

#[wasm_bindgen_test]
async fn unlock_toast_expires_after_its_duration() {
    let expired = Rc::new(Cell::new(0_u32));
    let on_expire = {
        let expired = expired.clone();
        Callback::from(move |()| expired.set(expired.get() + 1))
    };
    let root = host_element("greeting");
    yew::Renderer::<UnlockToast>::with_root_and_props(
        root.clone(),
        unlock_toast::Props {
            unlocked: vec![Achievement::FirstRoute],
            on_expire,
            duration_ms: 200,
            hidden: false,
        },
    )
    .render();

    sleep(5).await;
    assert!(root.inner_html().contains("First Steps"));
    assert_eq!(expired.get(), 0);
    sleep(400).await;
    assert_eq!(expired.get(), 1);
}

#[wasm_bindgen_test]
async fn unmounted_toast_never_expires() {
    let expired = Rc::new(Cell::new(false));
    let on_expire = {
        let expired = expired.clone();
        Callback::from(move |()| expired.set(true))
    };
    let handle = yew::Renderer::<UnlockToast>::with_root_and_props(
        host_element("greeting"),
        unlock_toast::Props {
            unlocked: vec![Achievement::FirstRoute],
            on_expire,
            duration_ms: 30,
            hidden: false,
        },
    )
    .render();

    sleep(5).await;
    handle.destroy();
    sleep(100).await;
    assert!(!expired.get());
}
