//! Synthetic hand poses for replay sessions and tests. The landmark model
//! is external, so offline tooling builds plausible 21-point frames
//! directly, the same way the viewer's dummy pipelines fake data when no
//! hardware is present.

use crate::types::{HandFrame, Point3};

/// Build a frontal hand pose centered near `(cx, cy)` in video pixels.
///
/// `scale` is the palm reference distance (wrist to middle-finger base) in
/// pixels; 60 is a typical hand at 640x480. `extended` selects per finger,
/// ordered thumb/index/middle/ring/pinky.
pub fn hand_pose(cx: f32, cy: f32, scale: f32, extended: [bool; 5]) -> HandFrame {
    let s = scale;
    let p = |x: f32, y: f32| Point3::new(cx + x * s, cy + y * s, 0.0);
    let mut points = Vec::with_capacity(21);

    // 0: wrist
    points.push(p(0.0, 1.0));

    // 1-4: thumb, radial from the palm
    if extended[0] {
        points.push(p(-0.7, 0.7));
        points.push(p(-1.0, 0.45));
        points.push(p(-1.4, 0.2));
        points.push(p(-1.8, -0.1));
    } else {
        points.push(p(-0.5, 0.8));
        points.push(p(-0.45, 0.65));
        points.push(p(-0.38, 0.55));
        points.push(p(-0.3, 0.5));
    }

    // 5-20: index/middle/ring/pinky chains, vertical from their bases
    let bases = [(-0.45, 0.0), (0.0, 0.0), (0.45, 0.0), (0.85, 0.15)];
    for (i, (bx, by)) in bases.iter().enumerate() {
        let open = extended[i + 1];
        points.push(p(*bx, *by));
        if open {
            points.push(p(*bx, by - 0.45));
            points.push(p(*bx, by - 0.8));
            points.push(p(*bx, by - 1.15));
        } else {
            points.push(p(*bx, by - 0.15));
            points.push(p(*bx, by + 0.1));
            points.push(p(*bx, by + 0.35));
        }
    }

    HandFrame::new(points)
}

/// All five fingers open: rotation / throw / highlight pose.
pub fn open_palm(cx: f32, cy: f32, scale: f32) -> HandFrame {
    hand_pose(cx, cy, scale, [true, true, true, true, true])
}

/// Four non-thumb fingers open, thumb folded: the selection toggle.
pub fn four_fingers(cx: f32, cy: f32, scale: f32) -> HandFrame {
    hand_pose(cx, cy, scale, [false, true, true, true, true])
}

/// Index + middle + ring: the enter trigger.
pub fn three_fingers(cx: f32, cy: f32, scale: f32) -> HandFrame {
    hand_pose(cx, cy, scale, [false, true, true, true, false])
}

/// Index + middle: grab / selection exit.
pub fn two_fingers(cx: f32, cy: f32, scale: f32) -> HandFrame {
    hand_pose(cx, cy, scale, [false, true, true, false, false])
}

/// Index + thumb only: zoom drag.
pub fn pinch(cx: f32, cy: f32, scale: f32) -> HandFrame {
    hand_pose(cx, cy, scale, [true, true, false, false, false])
}

/// Everything folded: matches no gesture.
pub fn fist(cx: f32, cy: f32, scale: f32) -> HandFrame {
    hand_pose(cx, cy, scale, [false, false, false, false, false])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::landmark;

    #[test]
    fn poses_have_21_points() {
        assert_eq!(open_palm(320.0, 240.0, 60.0).points.len(), landmark::COUNT);
        assert_eq!(fist(320.0, 240.0, 60.0).points.len(), landmark::COUNT);
    }

    #[test]
    fn palm_reference_matches_scale() {
        let frame = open_palm(320.0, 240.0, 60.0);
        let d = crate::geometry::palm_reference_distance(&frame);
        assert!((d - 60.0).abs() < 1e-3, "got {}", d);
    }
}
