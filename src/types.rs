use serde::{Deserialize, Serialize};

/// Represents a single hand landmark (x, y in video-pixel space, z relative depth)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Landmark indices, anatomical convention of the handpose model.
/// 0 = wrist/palm base, 1-4 thumb, 5-8 index, 9-12 middle, 13-16 ring, 17-20 pinky.
#[allow(dead_code)]
pub mod landmark {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_DIP: usize = 7;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP: usize = 13;
    pub const RING_PIP: usize = 14;
    pub const RING_DIP: usize = 15;
    pub const RING_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
    pub const COUNT: usize = 21;
}

/// One detected hand for one video frame. Produced fresh each frame by the
/// landmark source; the engine only derives values from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HandFrame {
    pub points: Vec<Point3>,
}

impl HandFrame {
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Largest side of the axis-aligned bounding box, in pixels.
    pub fn bounding_span(&self) -> f32 {
        if self.points.is_empty() {
            return 0.0;
        }
        let mut min_x = f32::MAX;
        let mut min_y = f32::MAX;
        let mut max_x = f32::MIN;
        let mut max_y = f32::MIN;
        for p in &self.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        (max_x - min_x).max(max_y - min_y)
    }
}

/// The single authoritative interaction mode. Sticky across brief tracking
/// gaps: hand loss resets transient gesture state but not the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Default,
    Selection,
}

/// Named gesture currently driving the session, for status overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Rotate,
    ZoomDrag,
    Grab,
    Throw,
    Highlight,
    Enter,
    SelectionToggle,
}

impl Gesture {
    pub fn label(&self) -> &'static str {
        match self {
            Gesture::Rotate => "rotate",
            Gesture::ZoomDrag => "zoom",
            Gesture::Grab => "grab",
            Gesture::Throw => "throw",
            Gesture::Highlight => "highlight",
            Gesture::Enter => "enter",
            Gesture::SelectionToggle => "selection",
        }
    }
}

/// Mode transition events, at most one per processed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    SelectionModeOn,
    SelectionModeOff,
}

/// External effect requested by the engine for this frame. Dispatched to the
/// scene/camera collaborator by the `ActionDispatcher`.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    RotateCamera { yaw: f32, pitch: f32 },
    DollyZoom { delta: f32 },
    Highlight { index: usize },
    Enter { index: usize },
    PickUp,
    Throw { velocity: Point3 },
}

/// What the engine decided about the raw detection before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameDecision {
    /// Detection passed the continuity threshold and the plausibility gate.
    Trusted,
    /// Detection present but not yet stable enough to classify.
    Warmup,
    /// No detection this frame, still within the loss tolerance.
    Gap,
    /// No detection for long enough that transient state was reset.
    Lost,
    /// Landmarks failed the plausibility gate; treated like a loss.
    Implausible,
}

/// Per-frame result of `GestureEngine::process`.
#[derive(Debug, Clone)]
pub struct EngineReport {
    pub decision: FrameDecision,
    pub mode: InteractionMode,
    pub gesture: Option<Gesture>,
    pub event: Option<ModeEvent>,
    pub actions: Vec<Action>,
}

impl EngineReport {
    pub fn idle(decision: FrameDecision, mode: InteractionMode) -> Self {
        Self {
            decision,
            mode,
            gesture: None,
            event: None,
            actions: Vec::new(),
        }
    }
}
