use crate::cache_policy::FetchPolicy;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chapter {
    pub id: &'static str,
    pub title: &'static str,
    pub page: u32,
}

include!(concat!(env!("OUT_DIR"), "/book_catalog.rs"));

pub fn chapter_by_id(id: &str) -> Option<&'static Chapter> {
    let trimmed = id.trim();
    CHAPTERS.iter().find(|chapter| chapter.id == trimmed)
}

/// Last chapter starting at or before `page`.
pub fn chapter_for_page(page: u32) -> Option<&'static Chapter> {
    CHAPTERS
        .iter()
        .filter(|chapter| chapter.page <= page)
        .max_by_key(|chapter| chapter.page)
}
