use gloo::timers::callback::Timeout;

use kalandkonyv_core::notice::{NOTICE_FADE_IN_DELAY_MS, NOTICE_FADE_OUT_MS, NOTICE_VISIBLE_MS};
use kalandkonyv_core::Notice;

use crate::dom::{create_html, document, js_err, set_style, set_styles};

const NOTIFICATION_CLASS: &str = "flipbook-notification";

/// Shows a transient toast. It fades in, stays for a while, fades out and
/// removes itself.
pub(crate) fn show_notice(notice: &Notice) {
    show_message(&notice.to_string());
}

pub(crate) fn show_message(message: &str) {
    if let Err(err) = spawn_toast(message) {
        gloo::console::warn!("notification failed", js_err(err), message.to_string());
    }
}

fn spawn_toast(message: &str) -> Result<(), wasm_bindgen::JsValue> {
    let document = document()?;
    let Some(body) = document.body() else {
        return Ok(());
    };
    let toast = create_html(&document, "div", NOTIFICATION_CLASS)?;
    toast.set_text_content(Some(message));
    set_styles(
        &toast,
        &[
            ("position", "fixed"),
            ("top", "20px"),
            ("left", "50%"),
            ("transform", "translateX(-50%)"),
            ("background", "rgba(0, 0, 0, 0.8)"),
            ("color", "white"),
            ("padding", "10px 20px"),
            ("border-radius", "5px"),
            ("z-index", "1000"),
            ("opacity", "0"),
            ("transition", "opacity 0.3s"),
            ("pointer-events", "none"),
        ],
    );
    body.append_child(&toast)?;

    let fade_in = toast.clone();
    Timeout::new(NOTICE_FADE_IN_DELAY_MS, move || {
        set_style(&fade_in, "opacity", "1");
    })
    .forget();

    let fade_out = toast;
    Timeout::new(NOTICE_FADE_IN_DELAY_MS + NOTICE_VISIBLE_MS, move || {
        set_style(&fade_out, "opacity", "0");
        let removed = fade_out.clone();
        Timeout::new(NOTICE_FADE_OUT_MS, move || {
            removed.remove();
        })
        .forget();
    })
    .forget();
    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use gloo::timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn toast_count() -> u32 {
        document()
            .expect("document")
            .get_elements_by_class_name(NOTIFICATION_CLASS)
            .length()
    }

    #[wasm_bindgen_test]
    async fn toast_removes_itself() {
        let before = toast_count();
        show_notice(&Notice::BookmarkMissing);
        assert_eq!(toast_count(), before + 1);
        TimeoutFuture::new(NOTICE_FADE_IN_DELAY_MS + NOTICE_VISIBLE_MS + NOTICE_FADE_OUT_MS + 100)
            .await;
        assert_eq!(toast_count(), before);
    }
}
