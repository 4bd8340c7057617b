use kalandkonyv_core::{
    restore_bookmark, save_bookmark, BookConfig, BookmarkStore, Direction, MemoryBookmarks,
    Notice, PageTurner,
};

struct FailingStore;

impl BookmarkStore for FailingStore {
    fn load(&self) -> Option<String> {
        None
    }

    fn save(&mut self, _value: &str) -> Result<(), String> {
        Err("quota exceeded".to_string())
    }
}

fn turner() -> PageTurner {
    PageTurner::new(BookConfig::new(300, Some(3)))
}

#[test]
fn saved_page_is_restored() {
    let mut store = MemoryBookmarks::new();
    let mut turner = turner();
    turner.go_to_page(5).unwrap();
    assert_eq!(
        save_bookmark(&turner, &mut store),
        Notice::BookmarkSaved { page: 5 }
    );

    turner.go_to_page(0).unwrap();
    assert_eq!(
        restore_bookmark(&mut turner, &store),
        Some(Notice::BookmarkLoaded { page: 5 })
    );
    assert_eq!(turner.current_page(), 5);
}

#[test]
fn malformed_value_reports_invalid_and_keeps_page() {
    let store = MemoryBookmarks::with_value("abc");
    let mut turner = turner();
    turner.go_to_page(2).unwrap();
    assert_eq!(
        restore_bookmark(&mut turner, &store),
        Some(Notice::BookmarkInvalid)
    );
    assert_eq!(turner.current_page(), 2);
}

#[test]
fn absent_value_reports_missing() {
    let store = MemoryBookmarks::new();
    let mut turner = turner();
    assert_eq!(
        restore_bookmark(&mut turner, &store),
        Some(Notice::BookmarkMissing)
    );
    assert_eq!(turner.current_page(), 0);
}

#[test]
fn out_of_range_value_is_invalid() {
    let store = MemoryBookmarks::with_value("301");
    let mut turner = turner();
    assert_eq!(
        restore_bookmark(&mut turner, &store),
        Some(Notice::BookmarkInvalid)
    );
}

#[test]
fn restore_during_turn_is_dropped_silently() {
    let store = MemoryBookmarks::with_value("5");
    let mut turner = turner();
    turner.begin_turn(Direction::Forward).unwrap();
    assert_eq!(restore_bookmark(&mut turner, &store), None);
    assert_eq!(turner.current_page(), 0);
    assert!(turner.is_turning());
}

#[test]
fn storage_failure_is_reported() {
    let turner = turner();
    assert_eq!(
        save_bookmark(&turner, &mut FailingStore),
        Notice::BookmarkSaveFailed
    );
}
