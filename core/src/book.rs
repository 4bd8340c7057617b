use crate::catalog;

pub const COVER_PAGE_PATH: &str = "pages/borito.html";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BookConfig {
    pub total_pages: u32,
    /// Forward turning is refused once the current page reaches this index.
    pub free_pages: Option<u32>,
}

impl BookConfig {
    pub fn new(total_pages: u32, free_pages: Option<u32>) -> Self {
        Self {
            total_pages,
            free_pages,
        }
    }

    pub fn from_catalog() -> Self {
        Self::new(catalog::TOTAL_PAGES, catalog::FREE_PAGES)
    }

    pub fn contains(&self, page: i64) -> bool {
        page >= 0 && page <= i64::from(self.total_pages)
    }

    pub fn checked_page(&self, page: i64) -> Option<u32> {
        if !self.contains(page) {
            return None;
        }
        u32::try_from(page).ok()
    }

    pub fn is_gated(&self, page: u32) -> bool {
        self.free_pages.map(|limit| page >= limit).unwrap_or(false)
    }
}

impl Default for BookConfig {
    fn default() -> Self {
        Self::from_catalog()
    }
}

pub fn page_path(page: u32) -> String {
    if page == 0 {
        COVER_PAGE_PATH.to_string()
    } else {
        format!("pages/{page}.html")
    }
}

pub fn page_paths(total_pages: u32) -> Vec<String> {
    (0..=total_pages).map(page_path).collect()
}
