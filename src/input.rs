use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent, Touch, TouchEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PointerKind {
    Mouse,
    Touch,
}

/// Client-space position of a mouse or first-touch event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PointerSample {
    pub kind: PointerKind,
    pub x: f32,
    pub y: f32,
}

pub(crate) fn pointer_sample(event: &Event) -> Option<PointerSample> {
    if let Some(event) = event.dyn_ref::<MouseEvent>() {
        return Some(PointerSample {
            kind: PointerKind::Mouse,
            x: event.client_x() as f32,
            y: event.client_y() as f32,
        });
    }
    let event = event.dyn_ref::<TouchEvent>()?;
    let touch = first_touch(event)?;
    Some(PointerSample {
        kind: PointerKind::Touch,
        x: touch.client_x() as f32,
        y: touch.client_y() as f32,
    })
}

fn first_touch(event: &TouchEvent) -> Option<Touch> {
    event
        .touches()
        .get(0)
        .or_else(|| event.changed_touches().get(0))
}

/// Swipes are measured on screen coordinates of the first changed touch.
pub(crate) fn changed_touch_screen_x(event: &Event) -> Option<f32> {
    let event = event.dyn_ref::<TouchEvent>()?;
    let touch = event.changed_touches().get(0)?;
    Some(touch.screen_x() as f32)
}

/// Key presses typed into form fields are not reader commands.
pub(crate) fn is_editable_target(event: &Event) -> bool {
    let Some(target) = event.target() else {
        return false;
    };
    let Some(element) = target.dyn_ref::<web_sys::Element>() else {
        return false;
    };
    matches!(
        element.tag_name().to_ascii_lowercase().as_str(),
        "input" | "textarea" | "select"
    ) || element.get_attribute("contenteditable").is_some()
}
