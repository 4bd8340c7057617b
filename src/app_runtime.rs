use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;

use crate::controls::ControlBar;
use crate::flipbook::Flipbook;

/// Global that page documents call as `parent.flipbookGoToPage(n)`.
pub(crate) const PAGE_JUMP_GLOBAL: &str = "flipbookGoToPage";

thread_local! {
    static FLIPBOOK: RefCell<Option<Rc<Flipbook>>> = RefCell::new(None);
    static CONTROLS: RefCell<Option<Rc<ControlBar>>> = RefCell::new(None);
}

/// Keeps the mounted views alive for the page lifetime. A second install
/// tears the previous views down first.
pub(crate) fn install(flipbook: Rc<Flipbook>, controls: Rc<ControlBar>) {
    if let Some(previous) = CONTROLS.with(|slot| slot.borrow_mut().replace(controls)) {
        previous.destroy();
    }
    if let Some(previous) = FLIPBOOK.with(|slot| slot.borrow_mut().replace(flipbook)) {
        previous.destroy();
    }
}

pub(crate) fn flipbook() -> Option<Rc<Flipbook>> {
    FLIPBOOK.with(|slot| slot.borrow().clone())
}

/// Jump used by links inside page documents. Returns whether the jump
/// happened.
pub(crate) fn jump_to_page(page: f64) -> bool {
    if !page.is_finite() || page.fract() != 0.0 {
        return false;
    }
    let Some(flipbook) = flipbook() else {
        return false;
    };
    flipbook.go_to_page(page as i64).is_ok()
}

/// Installs `jump_to_page` on `window` for the page documents.
pub(crate) fn expose_page_jump() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let jump = Closure::<dyn Fn(f64) -> bool>::wrap(Box::new(jump_to_page));
    Reflect::set(&window, &JsValue::from_str(PAGE_JUMP_GLOBAL), jump.as_ref())?;
    jump.forget();
    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use js_sys::Function;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn page_jump_is_a_window_global() {
        expose_page_jump().expect("expose");
        let window = web_sys::window().expect("window");
        let value = Reflect::get(&window, &JsValue::from_str(PAGE_JUMP_GLOBAL)).expect("get");
        let jump = value.dyn_into::<Function>().expect("function");
        let fractional = jump
            .call1(&JsValue::UNDEFINED, &JsValue::from_f64(2.5))
            .expect("call");
        assert_eq!(fractional.as_bool(), Some(false));
    }

    #[wasm_bindgen_test]
    fn jump_rejects_non_integers() {
        assert!(!jump_to_page(f64::NAN));
        assert!(!jump_to_page(1.5));
    }
}
