//! Per-frame gesture candidates. Each predicate is evaluated independently
//! over the trusted landmark frame; arbitration between simultaneously-true
//! candidates belongs to the interaction state machine, not here.

use crate::config::FingerConfig;
use crate::geometry;
use crate::types::{landmark, HandFrame, Point3};

#[derive(Debug, Clone, Copy)]
pub struct GestureCandidates {
    /// Index + middle only. Grab in default mode, exit trigger in selection.
    pub two_fingers: bool,
    /// Index + middle + ring. The "enter" trigger.
    pub three_fingers: bool,
    /// >= 3 of 4 non-thumb fingers, thumb folded. Mode toggle.
    pub four_fingers: bool,
    /// All five open. Rotation / throw-velocity check / highlight sweep.
    pub all_open: bool,
    /// Index + thumb only. Zoom drag.
    pub pinch: bool,
    /// Horizontal midpoint between index tip and thumb tip, pixels.
    pub pinch_midpoint_x: f32,
    /// Palm base landmark, pixels.
    pub palm: Point3,
}

pub fn classify(frame: &HandFrame, cfg: &FingerConfig) -> GestureCandidates {
    let index_tip = frame.points[landmark::INDEX_TIP];
    let thumb_tip = frame.points[landmark::THUMB_TIP];
    GestureCandidates {
        two_fingers: geometry::is_two_fingers_extended(frame, cfg),
        three_fingers: geometry::is_three_fingers_extended(frame, cfg),
        four_fingers: geometry::is_four_fingers_extended(frame, cfg),
        all_open: geometry::are_all_fingers_open(frame, cfg),
        pinch: geometry::is_index_thumb_only(frame, cfg),
        pinch_midpoint_x: (index_tip.x + thumb_tip.x) / 2.0,
        palm: frame.points[landmark::WRIST],
    }
}
