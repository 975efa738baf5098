use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// All tunable thresholds for the tracker. These are empirically tuned
/// defaults, not physical constants, so everything is exposed here rather
/// than hard-coded in the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub detection: DetectionConfig,
    pub fingers: FingerConfig,
    pub gates: GateConfig,
    pub motion: MotionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Consecutive detection frames before landmarks are trusted.
    pub trust_frames: u32,
    /// Consecutive no-detection frames tolerated before transient state resets.
    pub loss_frames: u32,
    /// Minimum plausible palm-to-index-tip distance, pixels.
    pub min_palm_index_dist: f32,
    /// Minimum plausible landmark bounding-box span, pixels.
    pub min_bbox_span: f32,
    /// Internal frame-rate cap, independent of render rate.
    pub max_fps: f32,
    /// Delay before the tracking loop auto-restarts after a per-frame fault.
    pub restart_delay_ms: u64,
}

/// Per-finger tip-to-palm distance multipliers, relative to the palm
/// reference distance (wrist to middle-finger base). Different fingers have
/// different natural extension ratios relative to palm size.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerMultipliers {
    pub thumb: f32,
    pub index: f32,
    pub middle: f32,
    pub ring: f32,
    pub pinky: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerConfig {
    /// Thumb counts as extended when tip-to-palm exceeds this ratio of
    /// base-to-palm (the thumb extends radially, not vertically).
    pub thumb_radial_ratio: f32,
    /// Non-thumb fingers count as extended when the tip clears the mid joint
    /// by this fraction of the base-to-mid vertical span.
    pub vertical_margin: f32,
    /// Strict distance-ratio thresholds for "really extended".
    pub extended: FingerMultipliers,
    /// Strict distance-ratio thresholds for "really folded".
    pub folded: FingerMultipliers,
    /// Slack applied to the extended thresholds for the index+thumb pinch.
    pub pinch_extend_slack: f32,
    /// Slack applied to the folded thresholds for the index+thumb pinch.
    pub pinch_fold_slack: f32,
    /// Non-thumb fingers required for the four-finger gesture. 3 of 4
    /// tolerates one misclassified finger of landmark jitter.
    pub four_finger_min: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Stable frames of four-fingers before entering selection mode.
    pub selection_entry_frames: u32,
    /// Stable frames of two-fingers before leaving selection mode.
    pub selection_exit_frames: u32,
    /// Stable frames of three-fingers before the enter action fires.
    pub enter_frames: u32,
    /// Window after leaving selection during which re-entry is not evaluated.
    pub cooldown_ms: u64,
    /// Minimum interval between grab actions.
    pub grab_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// EMA factor for the palm screen position.
    pub palm_alpha: f32,
    /// EMA factor for the pinch midpoint.
    pub midpoint_alpha: f32,
    /// Palm NDC delta to camera yaw/pitch radians.
    pub rotate_gain: f32,
    /// Palm NDC delta below this is treated as zero motion.
    pub rotate_dead_zone: f32,
    /// Pinch midpoint pixel delta to dolly distance.
    pub zoom_gain: f32,
    /// Pinch midpoint pixel delta below this is ignored.
    pub zoom_dead_zone: f32,
    /// Palm NDC speed (per frame) that must be exceeded to throw.
    pub throw_threshold: f32,
    /// Moving-average window for the selection highlight position.
    pub highlight_window: usize,
    /// Majority-vote window for the open-palm flag.
    pub open_palm_votes: usize,
    /// Central fraction of the normalized range that maps to the full
    /// selection range; the extremes clamp.
    pub active_zone: f32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            trust_frames: 10,
            loss_frames: 3,
            min_palm_index_dist: 30.0,
            min_bbox_span: 60.0,
            max_fps: 30.0,
            restart_delay_ms: 2000,
        }
    }
}

impl Default for FingerConfig {
    fn default() -> Self {
        Self {
            thumb_radial_ratio: 1.3,
            vertical_margin: 0.3,
            extended: FingerMultipliers {
                thumb: 1.5,
                index: 1.7,
                middle: 1.8,
                ring: 1.5,
                pinky: 1.3,
            },
            folded: FingerMultipliers {
                thumb: 1.2,
                index: 1.3,
                middle: 1.35,
                ring: 1.25,
                pinky: 1.1,
            },
            pinch_extend_slack: 0.8,
            pinch_fold_slack: 1.0,
            four_finger_min: 3,
        }
    }
}

impl Default for FingerMultipliers {
    fn default() -> Self {
        FingerConfig::default().extended
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            selection_entry_frames: 2,
            selection_exit_frames: 3,
            enter_frames: 2,
            cooldown_ms: 1000,
            grab_interval_ms: 500,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            palm_alpha: 0.35,
            midpoint_alpha: 0.4,
            rotate_gain: 1.5,
            rotate_dead_zone: 0.008,
            zoom_gain: 0.05,
            zoom_dead_zone: 2.0,
            throw_threshold: 0.5,
            highlight_window: 8,
            open_palm_votes: 5,
            active_zone: 0.6,
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            detection: DetectionConfig::default(),
            fingers: FingerConfig::default(),
            gates: GateConfig::default(),
            motion: MotionConfig::default(),
        }
    }
}

impl TrackerConfig {
    const PATH: &'static str = "tracker_config.json";

    /// Load from `tracker_config.json`, falling back to defaults. The file is
    /// written back so new fields show up for tuning.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::PATH)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config = if path.exists() {
            let content = fs::read_to_string(path)?;
            match serde_json::from_str::<TrackerConfig>(&content) {
                Ok(c) => {
                    println!("Loaded tracker configuration from {}", path.display());
                    c
                }
                Err(e) => {
                    println!("Error parsing config: {}. Loading defaults.", e);
                    Self::default()
                }
            }
        } else {
            println!(
                "Configuration file not found. Creating default at {}",
                path.display()
            );
            Self::default()
        };

        config.save_to(path)?;
        Ok(config)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_survive_partial_json() {
        // Old config files with missing sections must still parse.
        let cfg: TrackerConfig =
            serde_json::from_str(r#"{ "gates": { "cooldown_ms": 250 } }"#).unwrap();
        assert_eq!(cfg.gates.cooldown_ms, 250);
        assert_eq!(cfg.detection.trust_frames, 10);
        assert_eq!(cfg.fingers.four_finger_min, 3);
    }

    #[test]
    fn round_trip() {
        let cfg = TrackerConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: TrackerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.motion.throw_threshold, cfg.motion.throw_threshold);
        assert_eq!(back.gates.grab_interval_ms, cfg.gates.grab_interval_ms);
    }
}
