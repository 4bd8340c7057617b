use std::fmt;

use crate::book::BookConfig;
use crate::notice::Notice;

pub const TURN_LOAD_DELAY_MS: u32 = 50;
pub const TURN_SLIDE_MS: u32 = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn step(self, page: u32) -> Option<u32> {
        match self {
            Direction::Forward => page.checked_add(1),
            Direction::Backward => page.checked_sub(1),
        }
    }

    /// Where the incoming surface waits before sliding in.
    fn entry_offset(self) -> Offset {
        match self {
            Direction::Forward => Offset::Right,
            Direction::Backward => Offset::Left,
        }
    }

    /// Where the outgoing surface ends up.
    fn exit_offset(self) -> Offset {
        match self {
            Direction::Forward => Offset::Left,
            Direction::Backward => Offset::Right,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Offset {
    Left,
    Center,
    Right,
}

impl Offset {
    pub fn css_transform(self) -> &'static str {
        match self {
            Offset::Left => "translateX(-100%)",
            Offset::Center => "translateX(0)",
            Offset::Right => "translateX(100%)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    Front,
    Back,
}

impl Layer {
    pub fn z_index(self) -> &'static str {
        match self {
            Layer::Front => "1",
            Layer::Back => "0",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceState {
    pub page: Option<u32>,
    pub visible: bool,
    pub offset: Offset,
    pub layer: Layer,
    pub animated: bool,
}

impl SurfaceState {
    fn front() -> Self {
        Self {
            page: None,
            visible: true,
            offset: Offset::Center,
            layer: Layer::Front,
            animated: false,
        }
    }

    fn back() -> Self {
        Self {
            page: None,
            visible: false,
            offset: Offset::Center,
            layer: Layer::Back,
            animated: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    Idle,
    Loading { direction: Direction, target: u32 },
    Sliding { direction: Direction, target: u32 },
    Swapping { target: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavError {
    Busy,
    OutOfRange { page: i64, total_pages: u32 },
    AtFirstPage,
    AtLastPage,
    Gated { limit: u32 },
}

impl NavError {
    /// Only the gate is reported to the reader; the rest are silent no-ops.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            NavError::Gated { .. } => Some(Notice::NavigationGated),
            _ => None,
        }
    }
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::Busy => f.write_str("a page turn is already in progress"),
            NavError::OutOfRange { page, total_pages } => {
                write!(f, "page {page} is outside 0..={total_pages}")
            }
            NavError::AtFirstPage => f.write_str("already at the first page"),
            NavError::AtLastPage => f.write_str("already at the last page"),
            NavError::Gated { limit } => {
                write!(f, "forward turning is closed from page {limit}")
            }
        }
    }
}

impl std::error::Error for NavError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseError {
    pub expected: &'static str,
    pub found: TurnPhase,
}

impl fmt::Display for PhaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {} phase, found {:?}", self.expected, self.found)
    }
}

impl std::error::Error for PhaseError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlideStep {
    pub play_sound: bool,
}

/// Two page surfaces, the current page index and the turn phase.
///
/// The phase doubles as the animation lock: anything other than
/// [`TurnPhase::Idle`] rejects navigation.
#[derive(Clone, Debug)]
pub struct PageTurner {
    config: BookConfig,
    current_page: u32,
    active: usize,
    surfaces: [SurfaceState; 2],
    phase: TurnPhase,
    muted: bool,
}

impl PageTurner {
    pub fn new(config: BookConfig) -> Self {
        Self {
            config,
            current_page: 0,
            active: 0,
            surfaces: [SurfaceState::front(), SurfaceState::back()],
            phase: TurnPhase::Idle,
            muted: false,
        }
    }

    pub fn config(&self) -> BookConfig {
        self.config
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_turning(&self) -> bool {
        self.phase != TurnPhase::Idle
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn active_slot(&self) -> usize {
        self.active
    }

    pub fn surfaces(&self) -> &[SurfaceState; 2] {
        &self.surfaces
    }

    pub fn surface(&self, slot: usize) -> SurfaceState {
        self.surfaces[slot & 1]
    }

    /// Loads `page` into the visible surface without animation.
    pub fn go_to_page(&mut self, page: i64) -> Result<u32, NavError> {
        if self.is_turning() {
            return Err(NavError::Busy);
        }
        let Some(page) = self.config.checked_page(page) else {
            return Err(NavError::OutOfRange {
                page,
                total_pages: self.config.total_pages,
            });
        };
        let surface = &mut self.surfaces[self.active];
        surface.page = Some(page);
        surface.visible = true;
        surface.offset = Offset::Center;
        self.current_page = page;
        Ok(page)
    }

    pub fn can_turn(&self, direction: Direction) -> bool {
        self.check_turn(direction).is_ok()
    }

    fn check_turn(&self, direction: Direction) -> Result<u32, NavError> {
        if self.is_turning() {
            return Err(NavError::Busy);
        }
        match direction {
            Direction::Forward => {
                if self.current_page >= self.config.total_pages {
                    return Err(NavError::AtLastPage);
                }
                if let Some(limit) = self.config.free_pages {
                    if self.current_page >= limit {
                        return Err(NavError::Gated { limit });
                    }
                }
            }
            Direction::Backward => {
                if self.current_page == 0 {
                    return Err(NavError::AtFirstPage);
                }
            }
        }
        direction
            .step(self.current_page)
            .ok_or(NavError::AtFirstPage)
    }

    /// Idle -> Loading: the target page goes into the hidden surface, parked
    /// beside the current one.
    pub fn begin_turn(&mut self, direction: Direction) -> Result<u32, NavError> {
        let target = self.check_turn(direction)?;
        let incoming = self.incoming_slot();
        self.surfaces[incoming] = SurfaceState {
            page: Some(target),
            visible: true,
            offset: direction.entry_offset(),
            layer: Layer::Back,
            animated: false,
        };
        let current = &mut self.surfaces[self.active];
        current.offset = Offset::Center;
        current.animated = false;
        self.phase = TurnPhase::Loading { direction, target };
        Ok(target)
    }

    /// Loading -> Sliding: both surfaces move to their final offsets.
    pub fn slide(&mut self) -> Result<SlideStep, PhaseError> {
        let TurnPhase::Loading { direction, target } = self.phase else {
            return Err(PhaseError {
                expected: "loading",
                found: self.phase,
            });
        };
        let incoming = self.incoming_slot();
        self.surfaces[incoming].offset = Offset::Center;
        self.surfaces[incoming].animated = true;
        let current = &mut self.surfaces[self.active];
        current.offset = direction.exit_offset();
        current.animated = true;
        self.phase = TurnPhase::Sliding { direction, target };
        Ok(SlideStep {
            play_sound: !self.muted,
        })
    }

    /// Sliding -> Swapping: the incoming surface becomes the current one.
    pub fn swap(&mut self) -> Result<u32, PhaseError> {
        let TurnPhase::Sliding { target, .. } = self.phase else {
            return Err(PhaseError {
                expected: "sliding",
                found: self.phase,
            });
        };
        for surface in &mut self.surfaces {
            surface.animated = false;
        }
        self.active = self.incoming_slot();
        self.current_page = target;
        self.phase = TurnPhase::Swapping { target };
        Ok(target)
    }

    /// Swapping -> Idle: the outgoing surface is hidden and recentred behind
    /// the new one, and the lock is released.
    pub fn settle(&mut self) -> Result<u32, PhaseError> {
        let TurnPhase::Swapping { target } = self.phase else {
            return Err(PhaseError {
                expected: "swapping",
                found: self.phase,
            });
        };
        let hidden = self.incoming_slot();
        self.surfaces[self.active].layer = Layer::Front;
        self.surfaces[self.active].offset = Offset::Center;
        self.surfaces[hidden].layer = Layer::Back;
        self.surfaces[hidden].visible = false;
        self.surfaces[hidden].offset = Offset::Center;
        self.phase = TurnPhase::Idle;
        Ok(target)
    }

    fn incoming_slot(&self) -> usize {
        1 - self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turner() -> PageTurner {
        PageTurner::new(BookConfig::new(10, Some(3)))
    }

    fn complete(turner: &mut PageTurner, direction: Direction) {
        turner.begin_turn(direction).unwrap();
        turner.slide().unwrap();
        turner.swap().unwrap();
        turner.settle().unwrap();
    }

    #[test]
    fn starts_on_cover_with_one_visible_surface() {
        let turner = turner();
        assert_eq!(turner.current_page(), 0);
        let visible: Vec<_> = turner.surfaces().iter().filter(|s| s.visible).collect();
        assert_eq!(visible.len(), 1);
    }

    #[test]
    fn forward_turn_walks_every_phase() {
        let mut turner = turner();
        turner.go_to_page(0).unwrap();
        assert_eq!(turner.begin_turn(Direction::Forward), Ok(1));
        assert!(matches!(turner.phase(), TurnPhase::Loading { target: 1, .. }));
        let incoming = turner.surface(1);
        assert_eq!(incoming.offset, Offset::Right);
        assert!(incoming.visible);

        assert_eq!(turner.slide(), Ok(SlideStep { play_sound: true }));
        assert_eq!(turner.surface(0).offset, Offset::Left);
        assert_eq!(turner.surface(1).offset, Offset::Center);
        assert!(turner.surface(0).animated);

        assert_eq!(turner.swap(), Ok(1));
        assert_eq!(turner.active_slot(), 1);
        assert!(turner.is_turning());

        assert_eq!(turner.settle(), Ok(1));
        assert!(!turner.is_turning());
        assert_eq!(turner.current_page(), 1);
    }

    #[test]
    fn backward_turn_enters_from_the_left() {
        let mut turner = turner();
        turner.go_to_page(2).unwrap();
        turner.begin_turn(Direction::Backward).unwrap();
        assert_eq!(turner.surface(1).offset, Offset::Left);
        turner.slide().unwrap();
        assert_eq!(turner.surface(0).offset, Offset::Right);
    }

    #[test]
    fn out_of_order_steps_are_refused() {
        let mut turner = turner();
        assert!(turner.slide().is_err());
        assert!(turner.swap().is_err());
        assert!(turner.settle().is_err());
        turner.begin_turn(Direction::Forward).unwrap();
        assert!(turner.swap().is_err());
        assert!(turner.settle().is_err());
    }

    #[test]
    fn lock_rejects_navigation_mid_turn() {
        let mut turner = turner();
        turner.begin_turn(Direction::Forward).unwrap();
        assert_eq!(turner.begin_turn(Direction::Forward), Err(NavError::Busy));
        assert_eq!(turner.go_to_page(2), Err(NavError::Busy));
        turner.slide().unwrap();
        assert_eq!(turner.begin_turn(Direction::Backward), Err(NavError::Busy));
    }

    #[test]
    fn muted_slide_skips_sound() {
        let mut turner = turner();
        assert!(turner.toggle_mute());
        turner.begin_turn(Direction::Forward).unwrap();
        assert_eq!(turner.slide(), Ok(SlideStep { play_sound: false }));
    }

    #[test]
    fn surfaces_alternate_across_turns() {
        let mut turner = turner();
        complete(&mut turner, Direction::Forward);
        complete(&mut turner, Direction::Forward);
        assert_eq!(turner.active_slot(), 0);
        assert_eq!(turner.current_page(), 2);
        assert_eq!(turner.surface(0).page, Some(2));
        assert_eq!(turner.surface(0).layer, Layer::Front);
        assert_eq!(turner.surface(1).layer, Layer::Back);
    }

    #[test]
    fn gate_error_carries_notice() {
        let err = NavError::Gated { limit: 3 };
        assert_eq!(err.notice(), Some(Notice::NavigationGated));
        assert_eq!(NavError::AtFirstPage.notice(), None);
    }
}
