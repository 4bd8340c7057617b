pub mod book;
pub mod bookmark;
pub mod cache_policy;
pub mod catalog;
pub mod dice;
pub mod gesture;
pub mod notice;
pub mod turn;

pub use book::{page_path, page_paths, BookConfig, COVER_PAGE_PATH};
pub use bookmark::{
    parse_bookmark, restore_bookmark, save_bookmark, BookmarkError, BookmarkStore,
    MemoryBookmarks, BOOKMARK_KEY,
};
pub use cache_policy::{classify, precache_list, stale_caches, CacheStrategy, FetchPolicy, RouteClass};
pub use catalog::Chapter;
pub use dice::{face_image, success_label, DiceRoller, DieOutcome};
pub use gesture::{key_command, KeyCommand, SwipeTracker, ZoomState};
pub use notice::Notice;
pub use turn::{Direction, Layer, NavError, Offset, PageTurner, SurfaceState, TurnPhase};
