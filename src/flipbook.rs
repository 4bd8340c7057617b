use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, Event, HtmlAudioElement, HtmlElement, HtmlIFrameElement, KeyboardEvent};

use kalandkonyv_core::turn::{TURN_LOAD_DELAY_MS, TURN_SLIDE_MS};
use kalandkonyv_core::{
    key_command, page_path, restore_bookmark, save_bookmark, Direction, KeyCommand, NavError,
    Notice, PageTurner, SurfaceState, SwipeTracker, ZoomState,
};

use crate::bookmark_store::LocalStorageBookmarks;
use crate::config::FlipbookOptions;
use crate::dom::{create_html, document, js_err, set_style, set_styles};
use crate::input::{changed_touch_screen_x, is_editable_target, pointer_sample, PointerKind};
use crate::notify::show_notice;

const PAGE_BOTTOM_PADDING_CSS: &str = "body { padding-bottom: 70px !important; }";
const SLIDE_TRANSITION: &str = "transform 0.5s ease-in-out";
const DISABLED_OPACITY: &str = "0.3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FlipbookError {
    MissingContainer { id: String },
    Dom(String),
}

impl fmt::Display for FlipbookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlipbookError::MissingContainer { id } => {
                write!(f, "flipbook container #{id} not found")
            }
            FlipbookError::Dom(message) => write!(f, "flipbook dom error: {message}"),
        }
    }
}

impl std::error::Error for FlipbookError {}

impl From<JsValue> for FlipbookError {
    fn from(value: JsValue) -> Self {
        FlipbookError::Dom(js_err(value))
    }
}

/// One iframe surface. The slot element carries the slide offset, the
/// iframe itself carries the zoom transform.
struct Surface {
    slot: HtmlElement,
    frame: HtmlIFrameElement,
    loaded: Cell<Option<u32>>,
}

impl Surface {
    fn create(document: &Document, index: usize) -> Result<Self, JsValue> {
        let slot = create_html(document, "div", "flipbook-surface")?;
        slot.set_attribute("data-slot", &index.to_string())?;
        set_styles(
            &slot,
            &[
                ("position", "absolute"),
                ("inset", "0"),
                ("overflow", "hidden"),
            ],
        );
        let frame = document
            .create_element("iframe")?
            .dyn_into::<HtmlIFrameElement>()?;
        frame.set_class_name("flipbook-page");
        set_styles(
            &frame,
            &[
                ("width", "100%"),
                ("height", "100%"),
                ("border", "none"),
                ("transform-origin", "center center"),
            ],
        );
        slot.append_child(&frame)?;
        Ok(Self {
            slot,
            frame,
            loaded: Cell::new(None),
        })
    }

    fn apply(&self, state: &SurfaceState) {
        if let Some(page) = state.page {
            if self.loaded.get() != Some(page) {
                self.frame.set_src(&page_path(page));
                self.loaded.set(Some(page));
            }
        }
        // Transition goes first so disabling it takes effect before the jump.
        set_style(
            &self.slot,
            "transition",
            if state.animated { SLIDE_TRANSITION } else { "none" },
        );
        set_styles(
            &self.slot,
            &[
                ("display", if state.visible { "block" } else { "none" }),
                ("transform", state.offset.css_transform()),
                ("z-index", state.layer.z_index()),
            ],
        );
    }
}

pub(crate) struct Flipbook {
    container: HtmlElement,
    surfaces: [Surface; 2],
    left_button: HtmlElement,
    right_button: HtmlElement,
    audio: Option<HtmlAudioElement>,
    turner: RefCell<PageTurner>,
    zoom: RefCell<ZoomState>,
    swipe: RefCell<SwipeTracker>,
    bookmarks: RefCell<LocalStorageBookmarks>,
    listeners: RefCell<Vec<EventListener>>,
}

impl Flipbook {
    pub(crate) fn mount(options: &FlipbookOptions) -> Result<Rc<Self>, FlipbookError> {
        let document = document()?;
        let container = document
            .get_element_by_id(&options.container_id)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| FlipbookError::MissingContainer {
                id: options.container_id.clone(),
            })?;
        let options = options.clone().with_overrides(&container);
        container.set_inner_html("");
        set_styles(
            &container,
            &[("position", "relative"), ("overflow", "hidden")],
        );

        let surfaces = [Surface::create(&document, 0)?, Surface::create(&document, 1)?];
        for surface in &surfaces {
            container.append_child(&surface.slot)?;
        }
        let left_button = nav_button(&document, "flipbook-prev", "\u{2039}", "left")?;
        let right_button = nav_button(&document, "flipbook-next", "\u{203a}", "right")?;
        container.append_child(&left_button)?;
        container.append_child(&right_button)?;

        let audio = match HtmlAudioElement::new_with_src(&options.sound_path) {
            Ok(audio) => Some(audio),
            Err(err) => {
                gloo::console::warn!("flipbook: turn sound unavailable", js_err(err));
                None
            }
        };

        let view = Rc::new(Self {
            container,
            surfaces,
            left_button,
            right_button,
            audio,
            turner: RefCell::new(PageTurner::new(options.book)),
            zoom: RefCell::new(ZoomState::new()),
            swipe: RefCell::new(SwipeTracker::new()),
            bookmarks: RefCell::new(LocalStorageBookmarks::new()),
            listeners: RefCell::new(Vec::new()),
        });
        view.attach_listeners(&document);
        if let Err(err) = view.go_to_page(0) {
            gloo::console::error!("flipbook: initial page failed", err.to_string());
        }
        gloo::console::log!(
            "flipbook: mounted",
            options.book.total_pages,
            format!("{:?}", options.book.free_pages)
        );
        Ok(view)
    }

    pub(crate) fn current_page(&self) -> u32 {
        self.turner.borrow().current_page()
    }

    pub(crate) fn is_muted(&self) -> bool {
        self.turner.borrow().is_muted()
    }

    /// Jumps without animation. Out-of-range and busy requests are no-ops.
    /// The visible frame always reloads, even for the page it last showed,
    /// since links inside the frame may have navigated it elsewhere.
    pub(crate) fn go_to_page(&self, page: i64) -> Result<u32, NavError> {
        let page = self.turner.borrow_mut().go_to_page(page)?;
        self.show_jump();
        Ok(page)
    }

    fn show_jump(&self) {
        let active = self.turner.borrow().active_slot();
        self.surfaces[active].loaded.set(None);
        self.zoom.borrow_mut().reset();
        self.render();
    }

    pub(crate) fn turn(self: &Rc<Self>, direction: Direction) {
        let started = self.turner.borrow_mut().begin_turn(direction);
        if let Err(err) = started {
            if let Some(notice) = err.notice() {
                show_notice(&notice);
            }
            return;
        }
        self.zoom.borrow_mut().reset();
        self.render();

        let view = Rc::clone(self);
        spawn_local(async move {
            TimeoutFuture::new(TURN_LOAD_DELAY_MS).await;
            let step = view.turner.borrow_mut().slide();
            match step {
                Ok(step) => {
                    view.render();
                    if step.play_sound {
                        view.play_turn_sound();
                    }
                }
                Err(err) => {
                    gloo::console::error!("flipbook: turn stalled", err.to_string());
                    return;
                }
            }
            TimeoutFuture::new(TURN_SLIDE_MS).await;
            let settled = {
                let mut turner = view.turner.borrow_mut();
                turner.swap().and_then(|_| turner.settle())
            };
            if let Err(err) = settled {
                gloo::console::error!("flipbook: turn stalled", err.to_string());
            }
            view.render();
        });
    }

    pub(crate) fn toggle_mute(&self) -> bool {
        self.turner.borrow_mut().toggle_mute()
    }

    pub(crate) fn toggle_zoom(&self) -> bool {
        let zoomed = self.zoom.borrow_mut().toggle();
        self.apply_zoom();
        zoomed
    }

    pub(crate) fn save_bookmark(&self) {
        let notice = save_bookmark(&self.turner.borrow(), &mut *self.bookmarks.borrow_mut());
        show_notice(&notice);
    }

    pub(crate) fn load_bookmark(&self) {
        let notice = restore_bookmark(&mut self.turner.borrow_mut(), &*self.bookmarks.borrow());
        let Some(notice) = notice else {
            gloo::console::log!("flipbook: bookmark ignored during turn");
            return;
        };
        if matches!(notice, Notice::BookmarkLoaded { .. }) {
            self.show_jump();
        }
        show_notice(&notice);
    }

    pub(crate) fn toggle_fullscreen(&self) {
        let Ok(document) = document() else {
            return;
        };
        if document.fullscreen_element().is_some() {
            document.exit_fullscreen();
            return;
        }
        let Some(root) = document.document_element() else {
            return;
        };
        if let Err(err) = root.request_fullscreen() {
            show_notice(&Notice::FullscreenFailed {
                reason: js_err(err),
            });
        }
    }

    /// Drops listeners and empties the container.
    pub(crate) fn destroy(&self) {
        self.listeners.borrow_mut().clear();
        self.container.set_inner_html("");
    }

    fn render(&self) {
        let turner = self.turner.borrow();
        for (surface, state) in self.surfaces.iter().zip(turner.surfaces()) {
            surface.apply(state);
        }
        if turner.is_turning() {
            return;
        }
        let page = turner.current_page();
        update_button(&self.left_button, turner.can_turn(Direction::Backward));
        update_button(&self.right_button, turner.can_turn(Direction::Forward));
        drop(turner);
        self.apply_zoom();
        if let Ok(document) = document() {
            if let Some(body) = document.body() {
                let _ = body.set_attribute("data-page", &page.to_string());
            }
        }
    }

    fn apply_zoom(&self) {
        let active = self.turner.borrow().active_slot();
        let transform = self.zoom.borrow().css_transform();
        for (slot, surface) in self.surfaces.iter().enumerate() {
            let value = if slot == active { transform.as_str() } else { "none" };
            set_style(&surface.frame, "transform", value);
        }
        let cursor = if self.zoom.borrow().is_zoomed() { "grab" } else { "" };
        set_style(&self.container, "cursor", cursor);
    }

    fn play_turn_sound(&self) {
        let Some(audio) = self.audio.as_ref() else {
            return;
        };
        audio.set_current_time(0.0);
        match audio.play() {
            Ok(promise) => spawn_local(async move {
                if let Err(err) = JsFuture::from(promise).await {
                    gloo::console::warn!("flipbook: turn sound failed", js_err(err));
                }
            }),
            Err(err) => gloo::console::warn!("flipbook: turn sound failed", js_err(err)),
        }
    }

    fn attach_listeners(self: &Rc<Self>, document: &Document) {
        let mut listeners = Vec::new();

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(&self.left_button, "click", move |_| {
            with_view(&weak, |view| view.turn(Direction::Backward));
        }));
        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(&self.right_button, "click", move |_| {
            with_view(&weak, |view| view.turn(Direction::Forward));
        }));

        for surface in &self.surfaces {
            let frame = surface.frame.clone();
            listeners.push(EventListener::new(&surface.frame, "load", move |_| {
                pad_page_bottom(&frame);
            }));
        }

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new_with_options(
            document,
            "keydown",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if key_event.repeat() || is_editable_target(event) {
                    return;
                }
                let Some(command) = key_command(&key_event.key()) else {
                    return;
                };
                event.prevent_default();
                with_view(&weak, |view| match command {
                    KeyCommand::Turn(direction) => view.turn(direction),
                    KeyCommand::ToggleFullscreen => view.toggle_fullscreen(),
                    KeyCommand::ToggleZoom => {
                        view.toggle_zoom();
                    }
                });
            },
        ));

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(&self.container, "touchstart", move |event| {
            with_view(&weak, |view| {
                if view.zoom.borrow().is_zoomed() {
                    return;
                }
                if let Some(x) = changed_touch_screen_x(event) {
                    view.swipe.borrow_mut().start(x);
                }
            });
        }));
        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(&self.container, "touchend", move |event| {
            with_view(&weak, |view| {
                let Some(x) = changed_touch_screen_x(event) else {
                    return;
                };
                let direction = view.swipe.borrow_mut().finish(x);
                if let Some(direction) = direction {
                    view.turn(direction);
                }
            });
        }));

        for name in ["mousedown", "touchstart"] {
            let weak = Rc::downgrade(self);
            listeners.push(EventListener::new(&self.container, name, move |event| {
                with_view(&weak, |view| {
                    if !view.zoom.borrow().is_zoomed() {
                        return;
                    }
                    if let Some(sample) = pointer_sample(event) {
                        view.zoom.borrow_mut().begin_drag(sample.x, sample.y);
                        if sample.kind == PointerKind::Mouse {
                            set_style(&view.container, "cursor", "grabbing");
                        }
                    }
                });
            }));
        }
        if let Some(window) = web_sys::window() {
            for name in ["mousemove", "touchmove"] {
                let weak = Rc::downgrade(self);
                listeners.push(EventListener::new_with_options(
                    &window,
                    name,
                    EventListenerOptions::enable_prevent_default(),
                    move |event| {
                        with_view(&weak, |view| {
                            if !view.zoom.borrow().is_dragging() {
                                return;
                            }
                            let Some(sample) = pointer_sample(event) else {
                                return;
                            };
                            event.prevent_default();
                            let moved = view.zoom.borrow_mut().drag_to(sample.x, sample.y);
                            if moved {
                                view.apply_zoom();
                                set_style(&view.container, "cursor", "grabbing");
                            }
                        });
                    },
                ));
            }
            for name in ["mouseup", "touchend", "touchcancel"] {
                let weak = Rc::downgrade(self);
                listeners.push(EventListener::new(&window, name, move |_| {
                    with_view(&weak, |view| {
                        if view.zoom.borrow().is_dragging() {
                            view.zoom.borrow_mut().end_drag();
                            view.apply_zoom();
                        }
                    });
                }));
            }
        }

        *self.listeners.borrow_mut() = listeners;
    }
}

fn with_view(weak: &Weak<Flipbook>, f: impl FnOnce(&Rc<Flipbook>)) {
    if let Some(view) = weak.upgrade() {
        f(&view);
    }
}

fn update_button(button: &HtmlElement, enabled: bool) {
    set_styles(
        button,
        &[
            ("opacity", if enabled { "1" } else { DISABLED_OPACITY }),
            ("pointer-events", if enabled { "auto" } else { "none" }),
        ],
    );
}

fn nav_button(document: &Document, class: &str, label: &str, side: &str) -> Result<HtmlElement, JsValue> {
    let button = create_html(document, "button", class)?;
    button.set_attribute("type", "button")?;
    button.set_text_content(Some(label));
    set_styles(
        &button,
        &[
            ("position", "absolute"),
            ("top", "50%"),
            (side, "10px"),
            ("transform", "translateY(-50%)"),
            ("z-index", "10"),
            ("font-size", "2.5rem"),
            ("background", "rgba(0, 0, 0, 0.3)"),
            ("color", "white"),
            ("border", "none"),
            ("border-radius", "50%"),
            ("width", "48px"),
            ("height", "48px"),
            ("cursor", "pointer"),
            ("transition", "opacity 0.2s"),
        ],
    );
    Ok(button)
}

fn pad_page_bottom(frame: &HtmlIFrameElement) {
    let Some(page) = frame.content_document() else {
        gloo::console::log!("flipbook: page document not accessible", frame.src());
        return;
    };
    let result = (|| -> Result<(), JsValue> {
        let style = page.create_element("style")?;
        style.set_text_content(Some(PAGE_BOTTOM_PADDING_CSS));
        match page.head() {
            Some(head) => head.append_child(&style)?,
            None => page.append_child(&style)?,
        };
        Ok(())
    })();
    if let Err(err) = result {
        gloo::console::warn!("flipbook: page padding failed", js_err(err));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    use kalandkonyv_core::BookConfig;

    wasm_bindgen_test_configure!(run_in_browser);

    fn options_for(id: &str) -> FlipbookOptions {
        let document = document().expect("document");
        let container = document.create_element("div").expect("div");
        container.set_id(id);
        document
            .body()
            .expect("body")
            .append_child(&container)
            .expect("append");
        FlipbookOptions {
            container_id: id.to_string(),
            book: BookConfig::new(10, Some(3)),
            ..FlipbookOptions::default()
        }
    }

    fn visible_slots(view: &Flipbook) -> usize {
        view.surfaces
            .iter()
            .filter(|surface| surface.slot.style().get_property_value("display").ok().as_deref() == Some("block"))
            .count()
    }

    #[wasm_bindgen_test]
    fn missing_container_aborts() {
        let options = FlipbookOptions {
            container_id: "no-such-flipbook".to_string(),
            ..FlipbookOptions::default()
        };
        let result = Flipbook::mount(&options);
        assert!(matches!(
            result.err(),
            Some(FlipbookError::MissingContainer { .. })
        ));
    }

    #[wasm_bindgen_test]
    fn mount_shows_cover() {
        let view = Flipbook::mount(&options_for("flipbook-cover")).expect("mount");
        assert_eq!(view.current_page(), 0);
        assert_eq!(visible_slots(&view), 1);
        assert!(view.surfaces[0].frame.src().ends_with("pages/borito.html"));
        view.destroy();
    }

    #[wasm_bindgen_test]
    fn out_of_range_jump_is_ignored() {
        let view = Flipbook::mount(&options_for("flipbook-range")).expect("mount");
        assert!(view.go_to_page(99).is_err());
        assert!(view.go_to_page(-1).is_err());
        assert_eq!(view.current_page(), 0);
        view.destroy();
    }

    #[wasm_bindgen_test]
    fn jump_reloads_frame_navigated_away() {
        let view = Flipbook::mount(&options_for("flipbook-reload")).expect("mount");
        view.go_to_page(2).expect("jump");
        let active = view.turner.borrow().active_slot();
        let frame = &view.surfaces[active].frame;
        frame.set_src("pages/7.html");
        view.go_to_page(2).expect("same page again");
        assert!(frame.src().ends_with("pages/2.html"));
        view.destroy();
    }

    #[wasm_bindgen_test]
    fn forward_button_dims_at_free_limit() {
        let view = Flipbook::mount(&options_for("flipbook-gate")).expect("mount");
        let opacity = |view: &Flipbook| {
            view.right_button
                .style()
                .get_property_value("opacity")
                .unwrap_or_default()
        };
        view.go_to_page(2).expect("jump");
        assert_eq!(opacity(&view), "1");
        view.go_to_page(3).expect("jump");
        assert_eq!(opacity(&view), DISABLED_OPACITY);
        assert_eq!(
            view.right_button
                .style()
                .get_property_value("pointer-events")
                .unwrap_or_default(),
            "none"
        );
        view.destroy();
    }

    #[wasm_bindgen_test]
    async fn turn_settles_on_next_page() {
        let view = Flipbook::mount(&options_for("flipbook-turn")).expect("mount");
        view.turn(Direction::Forward);
        view.turn(Direction::Forward);
        TimeoutFuture::new(TURN_LOAD_DELAY_MS + TURN_SLIDE_MS + 100).await;
        assert_eq!(view.current_page(), 1);
        assert_eq!(visible_slots(&view), 1);
        view.destroy();
    }
}
