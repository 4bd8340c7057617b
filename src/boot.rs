use std::cell::Cell;

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

const BOOT_OBJECT: &str = "__KK_BOOT";

thread_local! {
    static READY_SENT: Cell<bool> = Cell::new(false);
}

/// Calls into the loading overlay script in `index.html`, if present.
fn call(method: &str, args: &[JsValue]) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(boot) = Reflect::get(&window, &JsValue::from_str(BOOT_OBJECT)) else {
        return;
    };
    if boot.is_null() || boot.is_undefined() {
        return;
    }
    let Ok(func) = Reflect::get(&boot, &JsValue::from_str(method)) else {
        return;
    };
    let Ok(func) = func.dyn_into::<Function>() else {
        return;
    };
    let array = js_sys::Array::new();
    for arg in args {
        array.push(arg);
    }
    let _ = func.apply(&boot, &array);
}

pub(crate) fn set_phase(label: &str) {
    call("setPhase", &[JsValue::from_str(label)]);
}

pub(crate) fn fail(message: &str) {
    gloo::console::error!("boot failed", message.to_string());
    call("fail", &[JsValue::from_str(message)]);
}

pub(crate) fn ready() {
    let already_sent = READY_SENT.with(|flag| flag.replace(true));
    if already_sent {
        return;
    }
    call("ready", &[]);
}
