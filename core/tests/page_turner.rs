use kalandkonyv_core::{BookConfig, Direction, NavError, Notice, PageTurner};

fn turner(total: u32, free: Option<u32>) -> PageTurner {
    PageTurner::new(BookConfig::new(total, free))
}

fn finish_turn(turner: &mut PageTurner) {
    turner.slide().expect("slide");
    turner.swap().expect("swap");
    turner.settle().expect("settle");
}

fn assert_single_visible(turner: &PageTurner) {
    let visible: Vec<_> = turner
        .surfaces()
        .iter()
        .enumerate()
        .filter(|(_, surface)| surface.visible)
        .collect();
    assert_eq!(visible.len(), 1, "exactly one surface should be visible");
    let (slot, surface) = visible[0];
    assert_eq!(slot, turner.active_slot());
    assert_eq!(surface.page, Some(turner.current_page()));
}

#[test]
fn go_to_page_ignores_out_of_range() {
    let mut turner = turner(20, None);
    turner.go_to_page(7).unwrap();
    for page in [-100, -1, 21, 1000] {
        assert!(matches!(
            turner.go_to_page(page),
            Err(NavError::OutOfRange { .. })
        ));
        assert_eq!(turner.current_page(), 7);
    }
}

#[test]
fn go_to_page_loads_active_surface() {
    let mut turner = turner(20, None);
    assert_eq!(turner.go_to_page(12), Ok(12));
    assert_single_visible(&turner);
}

#[test]
fn forward_blocked_while_locked() {
    let mut turner = turner(20, None);
    turner.begin_turn(Direction::Forward).unwrap();
    assert_eq!(turner.begin_turn(Direction::Forward), Err(NavError::Busy));
    assert!(!turner.can_turn(Direction::Forward));
}

#[test]
fn forward_blocked_at_free_limit_with_notice() {
    let mut turner = turner(20, Some(2));
    turner.go_to_page(2).unwrap();
    let err = turner.begin_turn(Direction::Forward).unwrap_err();
    assert_eq!(err, NavError::Gated { limit: 2 });
    assert_eq!(err.notice(), Some(Notice::NavigationGated));
    assert_eq!(turner.current_page(), 2);
    assert!(!turner.is_turning());

    turner.go_to_page(5).unwrap();
    assert!(matches!(
        turner.begin_turn(Direction::Forward),
        Err(NavError::Gated { .. })
    ));
}

#[test]
fn backward_is_noop_on_cover() {
    let mut turner = turner(20, None);
    assert_eq!(turner.begin_turn(Direction::Backward), Err(NavError::AtFirstPage));
    assert_eq!(turner.current_page(), 0);
    assert!(!turner.is_turning());
}

#[test]
fn forward_is_noop_on_last_page() {
    let mut turner = turner(4, None);
    turner.go_to_page(4).unwrap();
    assert_eq!(turner.begin_turn(Direction::Forward), Err(NavError::AtLastPage));
}

#[test]
fn completed_turns_leave_one_visible_surface() {
    let mut turner = turner(20, Some(10));
    for expected in 1..=5 {
        turner.begin_turn(Direction::Forward).unwrap();
        finish_turn(&mut turner);
        assert_eq!(turner.current_page(), expected);
        assert!(!turner.is_turning());
        assert_single_visible(&turner);
    }
    turner.begin_turn(Direction::Backward).unwrap();
    finish_turn(&mut turner);
    assert_eq!(turner.current_page(), 4);
    assert_single_visible(&turner);
}

#[test]
fn gate_still_allows_backward_turns() {
    let mut turner = turner(20, Some(2));
    turner.go_to_page(9).unwrap();
    assert!(turner.can_turn(Direction::Backward));
    assert!(!turner.can_turn(Direction::Forward));
    turner.begin_turn(Direction::Backward).unwrap();
    finish_turn(&mut turner);
    assert_eq!(turner.current_page(), 8);
}
