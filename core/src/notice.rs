use std::fmt;

pub const NOTICE_FADE_IN_DELAY_MS: u32 = 10;
pub const NOTICE_VISIBLE_MS: u32 = 2000;
pub const NOTICE_FADE_OUT_MS: u32 = 300;

/// Transient messages shown over the book.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    NavigationGated,
    BookmarkSaved { page: u32 },
    BookmarkLoaded { page: u32 },
    BookmarkInvalid,
    BookmarkMissing,
    BookmarkSaveFailed,
    FullscreenFailed { reason: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NavigationGated => {
                f.write_str("Ezen a ponton csak linkeken keresztül folytathatod az olvasást.")
            }
            Notice::BookmarkSaved { page } => write!(f, "Könyvjelző mentve: {page}. oldal"),
            Notice::BookmarkLoaded { page } => write!(f, "Könyvjelző betöltve: {page}. oldal"),
            Notice::BookmarkInvalid => f.write_str("Érvénytelen könyvjelző!"),
            Notice::BookmarkMissing => f.write_str("Nincs mentett könyvjelző!"),
            Notice::BookmarkSaveFailed => f.write_str("Nem sikerült menteni a könyvjelzőt!"),
            Notice::FullscreenFailed { reason } => write!(f, "Teljes képernyő hiba: {reason}"),
        }
    }
}
