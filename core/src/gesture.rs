use crate::turn::Direction;

pub const SWIPE_THRESHOLD_PX: f32 = 50.0;
pub const ZOOM_SCALE: f32 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Turn(Direction),
    ToggleFullscreen,
    ToggleZoom,
}

pub fn key_command(key: &str) -> Option<KeyCommand> {
    match key {
        "ArrowLeft" => Some(KeyCommand::Turn(Direction::Backward)),
        "ArrowRight" => Some(KeyCommand::Turn(Direction::Forward)),
        "f" | "F" => Some(KeyCommand::ToggleFullscreen),
        "z" | "Z" => Some(KeyCommand::ToggleZoom),
        _ => None,
    }
}

/// Horizontal swipe: a leftward drag turns forward, a rightward one back.
#[derive(Clone, Copy, Debug, Default)]
pub struct SwipeTracker {
    start_x: Option<f32>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, screen_x: f32) {
        self.start_x = Some(screen_x);
    }

    pub fn finish(&mut self, screen_x: f32) -> Option<Direction> {
        let start_x = self.start_x.take()?;
        swipe_direction(start_x, screen_x)
    }
}

pub fn swipe_direction(start_x: f32, end_x: f32) -> Option<Direction> {
    if end_x < start_x - SWIPE_THRESHOLD_PX {
        Some(Direction::Forward)
    } else if end_x > start_x + SWIPE_THRESHOLD_PX {
        Some(Direction::Backward)
    } else {
        None
    }
}

#[derive(Clone, Copy, Debug)]
struct PanDrag {
    start: [f32; 2],
    origin: [f32; 2],
}

/// Zoom toggle with drag panning of the zoomed surface.
#[derive(Clone, Copy, Debug)]
pub struct ZoomState {
    zoomed: bool,
    pan: [f32; 2],
    drag: Option<PanDrag>,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoomState {
    pub fn new() -> Self {
        Self {
            zoomed: false,
            pan: [0.0, 0.0],
            drag: None,
        }
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    pub fn scale(&self) -> f32 {
        if self.zoomed {
            ZOOM_SCALE
        } else {
            1.0
        }
    }

    pub fn pan(&self) -> [f32; 2] {
        self.pan
    }

    pub fn toggle(&mut self) -> bool {
        if self.zoomed {
            self.reset();
        } else {
            self.zoomed = true;
        }
        self.zoomed
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn begin_drag(&mut self, x: f32, y: f32) {
        if !self.zoomed {
            return;
        }
        self.drag = Some(PanDrag {
            start: [x, y],
            origin: self.pan,
        });
    }

    /// Returns true when the pan offset changed.
    pub fn drag_to(&mut self, x: f32, y: f32) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        self.pan = [
            drag.origin[0] + (x - drag.start[0]),
            drag.origin[1] + (y - drag.start[1]),
        ];
        true
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn css_transform(&self) -> String {
        if !self.zoomed {
            return "scale(1)".to_string();
        }
        if self.pan == [0.0, 0.0] && self.drag.is_none() {
            return format!("scale({})", fmt_f32(ZOOM_SCALE));
        }
        format!(
            "scale({}) translate({}px, {}px)",
            fmt_f32(ZOOM_SCALE),
            fmt_f32(self.pan[0]),
            fmt_f32(self.pan[1])
        )
    }
}

fn fmt_f32(value: f32) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}
