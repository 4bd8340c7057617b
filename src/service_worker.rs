use wasm_bindgen_futures::{spawn_local, JsFuture};

use crate::dom::js_err;

/// Registers the offline worker. Failures only cost offline support.
pub(crate) fn register(script: &'static str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let navigator = window.navigator();
    if !js_sys::Reflect::has(&navigator, &"serviceWorker".into()).unwrap_or(false) {
        gloo::console::log!("service worker: unsupported");
        return;
    }
    let promise = navigator.service_worker().register(script);
    spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(_) => gloo::console::log!("service worker: registered", script),
            Err(err) => gloo::console::warn!("service worker: registration failed", js_err(err)),
        }
    });
}
