use std::fmt;

use crate::book::BookConfig;
use crate::notice::Notice;
use crate::turn::{NavError, PageTurner};

pub const BOOKMARK_KEY: &str = "flipbook_bookmark";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BookmarkError {
    Missing,
    Invalid { raw: String },
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkError::Missing => f.write_str("no bookmark saved"),
            BookmarkError::Invalid { raw } => write!(f, "invalid bookmark value '{raw}'"),
        }
    }
}

impl std::error::Error for BookmarkError {}

impl BookmarkError {
    pub fn notice(&self) -> Notice {
        match self {
            BookmarkError::Missing => Notice::BookmarkMissing,
            BookmarkError::Invalid { .. } => Notice::BookmarkInvalid,
        }
    }
}

/// Key/value storage holding one page index.
pub trait BookmarkStore {
    fn load(&self) -> Option<String>;
    fn save(&mut self, value: &str) -> Result<(), String>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryBookmarks {
    value: Option<String>,
}

impl MemoryBookmarks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
        }
    }
}

impl BookmarkStore for MemoryBookmarks {
    fn load(&self) -> Option<String> {
        self.value.clone()
    }

    fn save(&mut self, value: &str) -> Result<(), String> {
        self.value = Some(value.to_string());
        Ok(())
    }
}

pub fn parse_bookmark(raw: Option<&str>, config: &BookConfig) -> Result<u32, BookmarkError> {
    let Some(raw) = raw else {
        return Err(BookmarkError::Missing);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BookmarkError::Missing);
    }
    trimmed
        .parse::<i64>()
        .ok()
        .and_then(|page| config.checked_page(page))
        .ok_or_else(|| BookmarkError::Invalid {
            raw: raw.to_string(),
        })
}

pub fn save_bookmark(turner: &PageTurner, store: &mut dyn BookmarkStore) -> Notice {
    let page = turner.current_page();
    match store.save(&page.to_string()) {
        Ok(()) => Notice::BookmarkSaved { page },
        Err(_) => Notice::BookmarkSaveFailed,
    }
}

/// Jumps to the stored page. Invalid or absent values leave the page as is.
/// Returns `None` while a turn holds the lock; the request is dropped
/// without a message.
pub fn restore_bookmark(turner: &mut PageTurner, store: &dyn BookmarkStore) -> Option<Notice> {
    let raw = store.load();
    let page = match parse_bookmark(raw.as_deref(), &turner.config()) {
        Ok(page) => page,
        Err(err) => return Some(err.notice()),
    };
    match turner.go_to_page(i64::from(page)) {
        Ok(page) => Some(Notice::BookmarkLoaded { page }),
        Err(NavError::Busy) => None,
        Err(_) => Some(Notice::BookmarkInvalid),
    }
}
