use web_sys::Storage;

use kalandkonyv_core::{BookmarkStore, BOOKMARK_KEY};

use crate::dom::js_err;

/// Bookmark slot in `window.localStorage`.
pub(crate) struct LocalStorageBookmarks {
    key: &'static str,
}

impl LocalStorageBookmarks {
    pub(crate) fn new() -> Self {
        Self { key: BOOKMARK_KEY }
    }

    fn storage() -> Option<Storage> {
        web_sys::window().and_then(|window| window.local_storage().ok().flatten())
    }
}

impl BookmarkStore for LocalStorageBookmarks {
    fn load(&self) -> Option<String> {
        let storage = Self::storage()?;
        storage.get_item(self.key).ok().flatten()
    }

    fn save(&mut self, value: &str) -> Result<(), String> {
        let Some(storage) = Self::storage() else {
            return Err("localStorage unavailable".to_string());
        };
        storage.set_item(self.key, value).map_err(|err| {
            let message = js_err(err);
            gloo::console::warn!("bookmark: save failed", message.clone());
            message
        })
    }
}
