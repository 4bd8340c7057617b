use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, Node};

use kalandkonyv_core::catalog::{chapter_for_page, CHAPTERS};
use kalandkonyv_core::Chapter;

use crate::dice_widget;
use crate::dom::{create_html, set_style, set_styles};
use crate::flipbook::Flipbook;

const ACTIVE_BACKGROUND: &str = "rgba(255, 215, 0, 0.3)";

/// Chapter list opened from the control bar.
pub(crate) struct NavMenu {
    panel: HtmlElement,
    toggle: HtmlElement,
    entries: Vec<(&'static Chapter, HtmlElement)>,
    open: Cell<bool>,
    flipbook: Weak<Flipbook>,
    listeners: RefCell<Vec<EventListener>>,
}

impl NavMenu {
    pub(crate) fn create(
        document: &Document,
        toggle: &HtmlElement,
        flipbook: &Rc<Flipbook>,
    ) -> Result<Rc<Self>, JsValue> {
        let panel = create_html(document, "div", "flipbook-nav-menu")?;
        set_styles(
            &panel,
            &[
                ("position", "fixed"),
                ("bottom", "60px"),
                ("left", "10px"),
                ("display", "none"),
                ("flex-direction", "column"),
                ("min-width", "200px"),
                ("max-height", "60vh"),
                ("overflow-y", "auto"),
                ("background", "rgba(20, 20, 20, 0.95)"),
                ("border-radius", "6px"),
                ("padding", "6px 0"),
                ("z-index", "1001"),
            ],
        );
        let mut entries = Vec::with_capacity(CHAPTERS.len());
        for chapter in CHAPTERS {
            let item = create_html(document, "button", "flipbook-nav-item")?;
            item.set_attribute("type", "button")?;
            item.set_attribute("data-chapter", chapter.id)?;
            item.set_text_content(Some(chapter.title));
            set_styles(
                &item,
                &[
                    ("background", "transparent"),
                    ("color", "white"),
                    ("border", "none"),
                    ("text-align", "left"),
                    ("padding", "8px 16px"),
                    ("cursor", "pointer"),
                ],
            );
            panel.append_child(&item)?;
            entries.push((chapter, item));
        }
        if let Some(body) = document.body() {
            body.append_child(&panel)?;
        }

        let menu = Rc::new(Self {
            panel,
            toggle: toggle.clone(),
            entries,
            open: Cell::new(false),
            flipbook: Rc::downgrade(flipbook),
            listeners: RefCell::new(Vec::new()),
        });
        menu.attach_listeners(document);
        Ok(menu)
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open.get()
    }

    pub(crate) fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    fn open(&self) {
        dice_widget::hide_dice_widget();
        let current = self
            .flipbook
            .upgrade()
            .map(|flipbook| flipbook.current_page())
            .and_then(chapter_for_page);
        for (chapter, item) in &self.entries {
            let active = current.is_some_and(|current| current.id == chapter.id);
            set_style(
                item,
                "background",
                if active { ACTIVE_BACKGROUND } else { "transparent" },
            );
            let _ = item.class_list().toggle_with_force("active", active);
        }
        set_style(&self.panel, "display", "flex");
        self.open.set(true);
    }

    pub(crate) fn close(&self) {
        set_style(&self.panel, "display", "none");
        self.open.set(false);
    }

    fn attach_listeners(self: &Rc<Self>, document: &Document) {
        let mut listeners = Vec::new();
        for (chapter, item) in &self.entries {
            let page = i64::from(chapter.page);
            let menu = Rc::downgrade(self);
            listeners.push(EventListener::new(item, "click", move |_| {
                let Some(menu) = menu.upgrade() else {
                    return;
                };
                if let Some(flipbook) = menu.flipbook.upgrade() {
                    if let Err(err) = flipbook.go_to_page(page) {
                        gloo::console::log!("nav menu: jump refused", err.to_string());
                    }
                }
                menu.close();
            }));
        }

        let menu = Rc::downgrade(self);
        listeners.push(EventListener::new(document, "click", move |event| {
            let Some(menu) = menu.upgrade() else {
                return;
            };
            if !menu.is_open() {
                return;
            }
            let target = event
                .target()
                .and_then(|target| target.dyn_into::<Node>().ok());
            let inside = menu.panel.contains(target.as_ref())
                || menu.toggle.contains(target.as_ref());
            if !inside {
                menu.close();
            }
        }));
        *self.listeners.borrow_mut() = listeners;
    }

    pub(crate) fn destroy(&self) {
        self.listeners.borrow_mut().clear();
        self.panel.remove();
    }
}
