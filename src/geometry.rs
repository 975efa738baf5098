//! Pure geometric predicates over a single landmark frame. No state, no
//! side effects; everything threshold-driven comes from `FingerConfig`.

use crate::config::{FingerConfig, FingerMultipliers};
use crate::types::{landmark, HandFrame, Point3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub fn base(&self) -> usize {
        match self {
            Finger::Thumb => landmark::THUMB_MCP,
            Finger::Index => landmark::INDEX_MCP,
            Finger::Middle => landmark::MIDDLE_MCP,
            Finger::Ring => landmark::RING_MCP,
            Finger::Pinky => landmark::PINKY_MCP,
        }
    }

    pub fn tip(&self) -> usize {
        match self {
            Finger::Thumb => landmark::THUMB_TIP,
            Finger::Index => landmark::INDEX_TIP,
            Finger::Middle => landmark::MIDDLE_TIP,
            Finger::Ring => landmark::RING_TIP,
            Finger::Pinky => landmark::PINKY_TIP,
        }
    }
}

impl FingerMultipliers {
    pub fn get(&self, finger: Finger) -> f32 {
        match finger {
            Finger::Thumb => self.thumb,
            Finger::Index => self.index,
            Finger::Middle => self.middle,
            Finger::Ring => self.ring,
            Finger::Pinky => self.pinky,
        }
    }
}

pub fn distance3(a: &Point3, b: &Point3) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Wrist to middle-finger base. Scales every per-hand-size threshold.
pub fn palm_reference_distance(frame: &HandFrame) -> f32 {
    distance3(
        &frame.points[landmark::WRIST],
        &frame.points[landmark::MIDDLE_MCP],
    )
}

/// Loose single-finger extension test.
///
/// The thumb extends radially from the palm, so it is extended when the
/// tip-to-palm distance beats the base-to-palm distance by a ratio. Other
/// fingers extend along the vertical screen axis for a frontal pose, so the
/// tip must clear the mid joint by a fraction of the base-to-mid span.
pub fn is_finger_extended(frame: &HandFrame, cfg: &FingerConfig, base_idx: usize, tip_idx: usize) -> bool {
    let palm = &frame.points[landmark::WRIST];
    let tip = &frame.points[tip_idx];

    if tip_idx == landmark::THUMB_TIP {
        let base = &frame.points[base_idx];
        return distance3(tip, palm) > cfg.thumb_radial_ratio * distance3(base, palm);
    }

    // Image y grows downward; "above" means smaller y.
    let base = &frame.points[base_idx];
    let mid = &frame.points[base_idx + 1];
    let span = base.y - mid.y;
    tip.y < mid.y - cfg.vertical_margin * span
}

/// Strict distance-ratio extension test used by the combination gestures.
/// `slack` < 1.0 loosens the requirement (pinch uses 0.8).
pub fn is_finger_really_extended(frame: &HandFrame, cfg: &FingerConfig, finger: Finger, slack: f32) -> bool {
    let reference = palm_reference_distance(frame);
    let tip_dist = distance3(
        &frame.points[finger.tip()],
        &frame.points[landmark::WRIST],
    );
    tip_dist > slack * cfg.extended.get(finger) * reference
}

/// Strict distance-ratio folded test.
pub fn is_finger_really_folded(frame: &HandFrame, cfg: &FingerConfig, finger: Finger, slack: f32) -> bool {
    let reference = palm_reference_distance(frame);
    let tip_dist = distance3(
        &frame.points[finger.tip()],
        &frame.points[landmark::WRIST],
    );
    tip_dist < slack * cfg.folded.get(finger) * reference
}

/// Index + middle only: grab in default mode, exit trigger in selection.
pub fn is_two_fingers_extended(frame: &HandFrame, cfg: &FingerConfig) -> bool {
    is_finger_really_extended(frame, cfg, Finger::Index, 1.0)
        && is_finger_really_extended(frame, cfg, Finger::Middle, 1.0)
        && is_finger_really_folded(frame, cfg, Finger::Ring, 1.0)
        && is_finger_really_folded(frame, cfg, Finger::Pinky, 1.0)
        && is_finger_really_folded(frame, cfg, Finger::Thumb, 1.0)
}

/// Index + middle + ring, thumb and pinky folded: the "enter" trigger.
pub fn is_three_fingers_extended(frame: &HandFrame, cfg: &FingerConfig) -> bool {
    is_finger_really_extended(frame, cfg, Finger::Index, 1.0)
        && is_finger_really_extended(frame, cfg, Finger::Middle, 1.0)
        && is_finger_really_extended(frame, cfg, Finger::Ring, 1.0)
        && is_finger_really_folded(frame, cfg, Finger::Pinky, 1.0)
        && is_finger_really_folded(frame, cfg, Finger::Thumb, 1.0)
}

/// Mode-toggle trigger. Requires `four_finger_min` of the 4 non-thumb
/// fingers (default 3 of 4, a deliberate one-finger slack that absorbs
/// landmark jitter) with the thumb folded.
pub fn is_four_fingers_extended(frame: &HandFrame, cfg: &FingerConfig) -> bool {
    let extended = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky]
        .iter()
        .filter(|f| is_finger_really_extended(frame, cfg, **f, 1.0))
        .count();
    extended >= cfg.four_finger_min && is_finger_really_folded(frame, cfg, Finger::Thumb, 1.0)
}

/// All five fingers open: rotation gesture / throw-velocity check.
pub fn are_all_fingers_open(frame: &HandFrame, cfg: &FingerConfig) -> bool {
    [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ]
    .iter()
    .all(|f| is_finger_really_extended(frame, cfg, *f, 1.0))
}

/// Index + thumb extended, everything else folded: the zoom-drag pose.
/// Extension gets the pinch slack so a part-curled pinch still registers.
pub fn is_index_thumb_only(frame: &HandFrame, cfg: &FingerConfig) -> bool {
    is_finger_really_extended(frame, cfg, Finger::Index, cfg.pinch_extend_slack)
        && is_finger_really_extended(frame, cfg, Finger::Thumb, cfg.pinch_extend_slack)
        && is_finger_really_folded(frame, cfg, Finger::Middle, cfg.pinch_fold_slack)
        && is_finger_really_folded(frame, cfg, Finger::Ring, cfg.pinch_fold_slack)
        && is_finger_really_folded(frame, cfg, Finger::Pinky, cfg.pinch_fold_slack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth;

    fn cfg() -> FingerConfig {
        FingerConfig::default()
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 4.0, 0.0);
        assert!((distance3(&a, &b) - 5.0).abs() < 1e-6);
        let c = Point3::new(1.0, 2.0, 2.0);
        assert!((distance3(&a, &c) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn open_palm_reads_as_all_open() {
        let frame = synth::open_palm(320.0, 240.0, 60.0);
        assert!(are_all_fingers_open(&frame, &cfg()));
        assert!(!is_two_fingers_extended(&frame, &cfg()));
        assert!(!is_four_fingers_extended(&frame, &cfg()), "thumb is open");
    }

    #[test]
    fn four_finger_pose_tolerates_one_misread() {
        let frame = synth::four_fingers(320.0, 240.0, 60.0);
        assert!(is_four_fingers_extended(&frame, &cfg()));

        // Curl the pinky: 3 of 4 still passes the slack.
        let frame = synth::hand_pose(320.0, 240.0, 60.0, [false, true, true, true, false]);
        assert!(is_four_fingers_extended(&frame, &cfg()));

        // 2 of 4 does not.
        let frame = synth::two_fingers(320.0, 240.0, 60.0);
        assert!(!is_four_fingers_extended(&frame, &cfg()));
    }

    #[test]
    fn two_and_three_finger_poses_are_distinct() {
        let two = synth::two_fingers(320.0, 240.0, 60.0);
        assert!(is_two_fingers_extended(&two, &cfg()));
        assert!(!is_three_fingers_extended(&two, &cfg()));

        let three = synth::three_fingers(320.0, 240.0, 60.0);
        assert!(is_three_fingers_extended(&three, &cfg()));
        assert!(!is_two_fingers_extended(&three, &cfg()));
    }

    #[test]
    fn pinch_pose_is_index_thumb_only() {
        let pinch = synth::pinch(320.0, 240.0, 60.0);
        assert!(is_index_thumb_only(&pinch, &cfg()));
        assert!(!are_all_fingers_open(&pinch, &cfg()));
        assert!(!is_four_fingers_extended(&pinch, &cfg()));
    }

    #[test]
    fn fist_matches_nothing() {
        let fist = synth::fist(320.0, 240.0, 60.0);
        assert!(!is_two_fingers_extended(&fist, &cfg()));
        assert!(!is_three_fingers_extended(&fist, &cfg()));
        assert!(!is_four_fingers_extended(&fist, &cfg()));
        assert!(!are_all_fingers_open(&fist, &cfg()));
        assert!(!is_index_thumb_only(&fist, &cfg()));
    }

    #[test]
    fn thumb_uses_radial_rule() {
        let open = synth::open_palm(320.0, 240.0, 60.0);
        assert!(is_finger_extended(&open, &cfg(), landmark::THUMB_MCP, landmark::THUMB_TIP));
        let fist = synth::fist(320.0, 240.0, 60.0);
        assert!(!is_finger_extended(&fist, &cfg(), landmark::THUMB_MCP, landmark::THUMB_TIP));
    }

    #[test]
    fn vertical_rule_for_index() {
        let open = synth::open_palm(320.0, 240.0, 60.0);
        assert!(is_finger_extended(&open, &cfg(), landmark::INDEX_MCP, landmark::INDEX_TIP));
        let fist = synth::fist(320.0, 240.0, 60.0);
        assert!(!is_finger_extended(&fist, &cfg(), landmark::INDEX_MCP, landmark::INDEX_TIP));
    }
}
