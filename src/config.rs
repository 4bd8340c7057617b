use web_sys::Element;

use kalandkonyv_core::catalog;
use kalandkonyv_core::BookConfig;

pub(crate) const FLIPBOOK_CONTAINER_ID: &str = "flipbook";
pub(crate) const DICE_CONTAINER_ID: &str = "dice-widget-container";
pub(crate) const SERVICE_WORKER_PATH: &str = "sw.js";

const ATTR_TOTAL_PAGES: &str = "data-total-pages";
const ATTR_FREE_PAGES: &str = "data-free-pages";
const ATTR_SOUND: &str = "data-sound";
const FREE_PAGES_UNLIMITED: &str = "none";

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FlipbookOptions {
    pub(crate) container_id: String,
    pub(crate) book: BookConfig,
    pub(crate) sound_path: String,
}

impl Default for FlipbookOptions {
    fn default() -> Self {
        Self {
            container_id: FLIPBOOK_CONTAINER_ID.to_string(),
            book: BookConfig::from_catalog(),
            sound_path: catalog::TURN_SOUND.to_string(),
        }
    }
}

impl FlipbookOptions {
    /// Catalog defaults, overridden by `data-*` attributes on the container.
    pub(crate) fn with_overrides(mut self, container: &Element) -> Self {
        if let Some(total) = container
            .get_attribute(ATTR_TOTAL_PAGES)
            .and_then(|raw| raw.trim().parse::<u32>().ok())
        {
            self.book.total_pages = total;
            if let Some(limit) = self.book.free_pages {
                self.book.free_pages = Some(limit.min(total));
            }
        }
        if let Some(raw) = container.get_attribute(ATTR_FREE_PAGES) {
            let raw = raw.trim();
            if raw.eq_ignore_ascii_case(FREE_PAGES_UNLIMITED) {
                self.book.free_pages = None;
            } else if let Ok(limit) = raw.parse::<u32>() {
                self.book.free_pages = Some(limit.min(self.book.total_pages));
            } else {
                gloo::console::warn!("flipbook: ignoring invalid data-free-pages", raw.to_string());
            }
        }
        if let Some(sound) = container.get_attribute(ATTR_SOUND) {
            if !sound.trim().is_empty() {
                self.sound_path = sound.trim().to_string();
            }
        }
        self
    }
}
