//! Rejects spurious single-frame detections before they reach the
//! classifiers. Landmarks are trusted only after a run of consecutive
//! detection frames, and transient state is dropped only after a run of
//! consecutive misses, so one bad frame in either direction is absorbed.

use crate::config::DetectionConfig;
use crate::geometry::distance3;
use crate::types::{landmark, FrameDecision, HandFrame};

pub struct FrameValidator {
    trust_frames: u32,
    loss_frames: u32,
    min_palm_index_dist: f32,
    min_bbox_span: f32,
    detect_count: u32,
    no_detect_count: u32,
}

impl FrameValidator {
    pub fn new(cfg: &DetectionConfig) -> Self {
        Self {
            trust_frames: cfg.trust_frames,
            loss_frames: cfg.loss_frames,
            min_palm_index_dist: cfg.min_palm_index_dist,
            min_bbox_span: cfg.min_bbox_span,
            detect_count: 0,
            no_detect_count: 0,
        }
    }

    /// Feed one raw per-frame detection result and get the gate decision.
    pub fn observe(&mut self, hand: Option<&HandFrame>) -> FrameDecision {
        match hand {
            Some(frame) => {
                if !self.validate(frame) {
                    // False positive from the landmark model; same path
                    // as a hand loss.
                    self.reset();
                    return FrameDecision::Implausible;
                }
                self.detect_count += 1;
                self.no_detect_count = 0;
                if self.detect_count >= self.trust_frames {
                    FrameDecision::Trusted
                } else {
                    FrameDecision::Warmup
                }
            }
            None => {
                self.no_detect_count += 1;
                self.detect_count = 0;
                if self.no_detect_count > self.loss_frames {
                    FrameDecision::Lost
                } else {
                    FrameDecision::Gap
                }
            }
        }
    }

    /// Plausibility gate: exactly 21 points, a believable palm-to-index-tip
    /// distance, and a bounding box that is not vanishingly small.
    pub fn validate(&self, frame: &HandFrame) -> bool {
        if frame.points.len() != landmark::COUNT {
            return false;
        }
        let palm_index = distance3(
            &frame.points[landmark::WRIST],
            &frame.points[landmark::INDEX_TIP],
        );
        if palm_index < self.min_palm_index_dist {
            return false;
        }
        frame.bounding_span() >= self.min_bbox_span
    }

    pub fn reset(&mut self) {
        self.detect_count = 0;
        self.no_detect_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth;
    use crate::types::Point3;

    fn validator(trust: u32) -> FrameValidator {
        let cfg = DetectionConfig {
            trust_frames: trust,
            ..DetectionConfig::default()
        };
        FrameValidator::new(&cfg)
    }

    #[test]
    fn wrong_landmark_count_is_implausible() {
        let v = validator(1);
        let mut frame = synth::open_palm(320.0, 240.0, 60.0);
        frame.points.pop();
        assert!(!v.validate(&frame));
        frame.points.push(Point3::default());
        frame.points.push(Point3::default());
        assert!(!v.validate(&frame));
    }

    #[test]
    fn tiny_hand_is_implausible() {
        let v = validator(1);
        // Scale of 2 px collapses both the palm-to-index distance and the
        // bounding box below the plausibility floor.
        let frame = synth::open_palm(320.0, 240.0, 2.0);
        assert!(!v.validate(&frame));

        let mut gate = validator(1);
        assert_eq!(gate.observe(Some(&frame)), FrameDecision::Implausible);
    }

    #[test]
    fn detections_trusted_only_after_threshold() {
        let mut v = validator(3);
        let frame = synth::open_palm(320.0, 240.0, 60.0);
        assert_eq!(v.observe(Some(&frame)), FrameDecision::Warmup);
        assert_eq!(v.observe(Some(&frame)), FrameDecision::Warmup);
        assert_eq!(v.observe(Some(&frame)), FrameDecision::Trusted);
        assert_eq!(v.observe(Some(&frame)), FrameDecision::Trusted);
    }

    #[test]
    fn miss_resets_detection_run() {
        let mut v = validator(3);
        let frame = synth::open_palm(320.0, 240.0, 60.0);
        v.observe(Some(&frame));
        v.observe(Some(&frame));
        assert_eq!(v.observe(None), FrameDecision::Gap);
        // Run starts over.
        assert_eq!(v.observe(Some(&frame)), FrameDecision::Warmup);
    }

    #[test]
    fn sustained_miss_reports_lost() {
        let mut v = validator(1);
        let frame = synth::open_palm(320.0, 240.0, 60.0);
        v.observe(Some(&frame));
        assert_eq!(v.observe(None), FrameDecision::Gap);
        assert_eq!(v.observe(None), FrameDecision::Gap);
        assert_eq!(v.observe(None), FrameDecision::Gap);
        assert_eq!(v.observe(None), FrameDecision::Lost);
    }
}
