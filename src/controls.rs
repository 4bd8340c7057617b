use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlElement};

use crate::dice_widget;
use crate::dom::{create_html, set_styles};
use crate::flipbook::Flipbook;
use crate::nav_menu::NavMenu;

const ICON_MENU: &str = "\u{2630}";
const ICON_FULLSCREEN: &str = "\u{26f6}";
const ICON_SOUND_ON: &str = "\u{1f50a}";
const ICON_SOUND_OFF: &str = "\u{1f507}";
const ICON_SAVE: &str = "\u{1f516}";
const ICON_LOAD: &str = "\u{1f4d6}";
const ICON_ZOOM: &str = "\u{1f50d}";
const ICON_DICE: &str = "\u{1f3b2}";

pub(crate) fn mute_icon(muted: bool) -> &'static str {
    if muted {
        ICON_SOUND_OFF
    } else {
        ICON_SOUND_ON
    }
}

/// Fixed bottom bar: chapter menu, fullscreen, mute, bookmark, zoom and dice.
pub(crate) struct ControlBar {
    bar: HtmlElement,
    menu: Rc<NavMenu>,
    listeners: RefCell<Vec<EventListener>>,
}

impl ControlBar {
    pub(crate) fn mount(document: &Document, flipbook: &Rc<Flipbook>) -> Result<Rc<Self>, JsValue> {
        let bar = create_html(document, "div", "flipbook-controls")?;
        set_styles(
            &bar,
            &[
                ("position", "fixed"),
                ("bottom", "0"),
                ("left", "0"),
                ("right", "0"),
                ("height", "50px"),
                ("display", "flex"),
                ("justify-content", "center"),
                ("align-items", "center"),
                ("gap", "8px"),
                ("background", "rgba(0, 0, 0, 0.7)"),
                ("z-index", "1000"),
            ],
        );
        let menu_button = control_button(document, &bar, ICON_MENU, "Fejezetek")?;
        let fullscreen = control_button(document, &bar, ICON_FULLSCREEN, "Teljes képernyő")?;
        let mute = control_button(document, &bar, mute_icon(flipbook.is_muted()), "Hang")?;
        let save = control_button(document, &bar, ICON_SAVE, "Könyvjelző mentése")?;
        let load = control_button(document, &bar, ICON_LOAD, "Könyvjelző betöltése")?;
        let zoom = control_button(document, &bar, ICON_ZOOM, "Nagyítás")?;
        let dice = control_button(document, &bar, ICON_DICE, "Kocka")?;
        if let Some(body) = document.body() {
            body.append_child(&bar)?;
        }
        let menu = NavMenu::create(document, &menu_button, flipbook)?;

        let mut listeners = Vec::new();
        {
            let menu = Rc::clone(&menu);
            listeners.push(EventListener::new(&menu_button, "click", move |_| {
                menu.toggle();
            }));
        }
        {
            let flipbook = Rc::downgrade(flipbook);
            listeners.push(EventListener::new(&fullscreen, "click", move |_| {
                if let Some(flipbook) = flipbook.upgrade() {
                    flipbook.toggle_fullscreen();
                }
            }));
        }
        {
            let flipbook = Rc::downgrade(flipbook);
            let icon = mute.clone();
            listeners.push(EventListener::new(&mute, "click", move |_| {
                if let Some(flipbook) = flipbook.upgrade() {
                    let muted = flipbook.toggle_mute();
                    icon.set_text_content(Some(mute_icon(muted)));
                }
            }));
        }
        {
            let flipbook = Rc::downgrade(flipbook);
            listeners.push(EventListener::new(&save, "click", move |_| {
                if let Some(flipbook) = flipbook.upgrade() {
                    flipbook.save_bookmark();
                }
            }));
        }
        {
            let flipbook = Rc::downgrade(flipbook);
            listeners.push(EventListener::new(&load, "click", move |_| {
                if let Some(flipbook) = flipbook.upgrade() {
                    flipbook.load_bookmark();
                }
            }));
        }
        {
            let flipbook = Rc::downgrade(flipbook);
            listeners.push(EventListener::new(&zoom, "click", move |_| {
                if let Some(flipbook) = flipbook.upgrade() {
                    flipbook.toggle_zoom();
                }
            }));
        }
        listeners.push(EventListener::new(&dice, "click", move |_| {
            dice_widget::toggle_dice_widget();
        }));

        Ok(Rc::new(Self {
            bar,
            menu,
            listeners: RefCell::new(listeners),
        }))
    }

    pub(crate) fn destroy(&self) {
        self.listeners.borrow_mut().clear();
        self.menu.destroy();
        self.bar.remove();
    }
}

fn control_button(
    document: &Document,
    bar: &HtmlElement,
    icon: &str,
    title: &str,
) -> Result<HtmlElement, JsValue> {
    let button = create_html(document, "button", "flipbook-control")?;
    button.set_attribute("type", "button")?;
    button.set_title(title);
    button.set_text_content(Some(icon));
    set_styles(
        &button,
        &[
            ("background", "transparent"),
            ("color", "white"),
            ("border", "none"),
            ("font-size", "1.4rem"),
            ("cursor", "pointer"),
            ("padding", "6px 10px"),
        ],
    );
    bar.append_child(&button)?;
    Ok(button)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn mute_icon_swaps() {
        assert_ne!(mute_icon(true), mute_icon(false));
        assert_eq!(mute_icon(false), ICON_SOUND_ON);
    }
}
