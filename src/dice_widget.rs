use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use yew::prelude::*;

use kalandkonyv_core::dice::{DEFAULT_DICE_COUNT, DEFAULT_SUCCESS_THRESHOLD};
use kalandkonyv_core::{face_image, DiceRoller};

use crate::dom::document;

const DEFAULT_TITLE: &str = "Kockadobás";
const DEFAULT_BUTTON_LABEL: &str = "Dobás";
const SUCCESS_BORDER: &str = "3px solid #2e7d32";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Visibility {
    Toggle,
    Hide,
}

thread_local! {
    static VISIBILITY_HOOK: RefCell<Option<Rc<dyn Fn(Visibility)>>> = RefCell::new(None);
}

fn apply_visibility(action: Visibility) {
    let hook = VISIBILITY_HOOK.with(|slot| slot.borrow().clone());
    match hook {
        Some(hook) => hook(action),
        None if action == Visibility::Toggle => gloo::console::warn!("dice widget: not mounted"),
        None => {}
    }
}

pub(crate) fn toggle_dice_widget() {
    apply_visibility(Visibility::Toggle);
}

pub(crate) fn hide_dice_widget() {
    apply_visibility(Visibility::Hide);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct PanelState {
    visible: bool,
}

impl Reducible for PanelState {
    type Action = Visibility;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let visible = match action {
            Visibility::Toggle => !self.visible,
            Visibility::Hide => false,
        };
        if visible == self.visible {
            return self;
        }
        Rc::new(PanelState { visible })
    }
}

#[derive(Properties, PartialEq, Clone)]
pub(crate) struct DiceWidgetProps {
    #[prop_or(AttrValue::Static(DEFAULT_TITLE))]
    pub title: AttrValue,
    #[prop_or(AttrValue::Static(DEFAULT_BUTTON_LABEL))]
    pub button_label: AttrValue,
    #[prop_or(DEFAULT_DICE_COUNT)]
    pub dice_count: usize,
    #[prop_or(DEFAULT_SUCCESS_THRESHOLD)]
    pub threshold: u8,
}

fn browser_seed() -> u64 {
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let clock = js_sys::Date::now() as u64;
    (noise << 32) ^ clock
}

#[function_component(DiceWidget)]
pub(crate) fn dice_widget(props: &DiceWidgetProps) -> Html {
    let panel = use_reducer(PanelState::default);
    let roller = use_mut_ref(DiceRoller::new);
    let rng = use_mut_ref(|| SmallRng::seed_from_u64(browser_seed()));
    let rolls = use_state(|| 0_u32);

    {
        let dispatcher = panel.dispatcher();
        use_effect_with((), move |_| {
            let hook: Rc<dyn Fn(Visibility)> = Rc::new(move |action| dispatcher.dispatch(action));
            VISIBILITY_HOOK.with(|slot| {
                *slot.borrow_mut() = Some(hook);
            });
            || {
                VISIBILITY_HOOK.with(|slot| {
                    slot.borrow_mut().take();
                });
            }
        });
    }

    let on_roll = {
        let roller = roller.clone();
        let rolls = rolls.clone();
        let count = props.dice_count;
        let threshold = props.threshold;
        Callback::from(move |_: MouseEvent| {
            roller
                .borrow_mut()
                .roll(&mut *rng.borrow_mut(), count, threshold);
            rolls.set(*rolls + 1);
        })
    };

    let roller = roller.borrow();
    let success_text = roller.success_text();
    let display = if panel.visible { "block" } else { "none" };
    let panel_style = format!(
        "display: {display}; position: fixed; bottom: 60px; right: 10px; z-index: 1002; \
         background: rgba(255, 255, 255, 0.95); padding: 12px; border-radius: 8px; \
         text-align: center;"
    );

    html! {
        <div class="dice-widget" style={panel_style}>
            <h3 class="dice-title">{ props.title.clone() }</h3>
            <button type="button" class="dice-roll" onclick={on_roll}>
                { props.button_label.clone() }
            </button>
            <div class="dice-results">
                { for roller.results().iter().map(|outcome| {
                    let border = if outcome.success { SUCCESS_BORDER } else { "3px solid transparent" };
                    html! {
                        <img
                            class={classes!("die", outcome.success.then_some("success"))}
                            src={face_image(outcome.value)}
                            alt={outcome.value.to_string()}
                            style={format!("width: 48px; height: 48px; margin: 4px; border: {border}; border-radius: 6px;")}
                        />
                    }
                }) }
            </div>
            if let Some(text) = success_text {
                <div class="dice-success">{ text }</div>
            }
        </div>
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DiceWidgetError {
    MissingContainer { id: String },
    Document,
}

impl fmt::Display for DiceWidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiceWidgetError::MissingContainer { id } => {
                write!(f, "dice widget container #{id} not found")
            }
            DiceWidgetError::Document => write!(f, "document unavailable"),
        }
    }
}

impl std::error::Error for DiceWidgetError {}

pub(crate) fn mount_dice_widget(container_id: &str) -> Result<(), DiceWidgetError> {
    let document = document().map_err(|_| DiceWidgetError::Document)?;
    let root = document
        .get_element_by_id(container_id)
        .ok_or_else(|| DiceWidgetError::MissingContainer {
            id: container_id.to_string(),
        })?;
    let _handle = yew::Renderer::<DiceWidget>::with_root_and_props(
        root,
        DiceWidgetProps {
            title: AttrValue::Static(DEFAULT_TITLE),
            button_label: AttrValue::Static(DEFAULT_BUTTON_LABEL),
            dice_count: DEFAULT_DICE_COUNT,
            threshold: DEFAULT_SUCCESS_THRESHOLD,
        },
    )
    .render();
    Ok(())
}
