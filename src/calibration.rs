use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;

use crate::types::Point3;

/// Maps raw video-pixel coordinates into normalized selection-space.
/// Set once at configuration time, read-only for the rest of the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    pub offset_x: f32,
    pub offset_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub video_width: f32,
    pub video_height: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            video_width: 640.0,
            video_height: 480.0,
        }
    }
}

impl Calibration {
    /// Pixel x to normalized [0, 1] selection-space.
    pub fn normalized_x(&self, px: f32) -> f32 {
        (((px + self.offset_x) * self.scale_x) / self.video_width).clamp(0.0, 1.0)
    }

    /// Pixel y to normalized [0, 1] selection-space.
    pub fn normalized_y(&self, py: f32) -> f32 {
        (((py + self.offset_y) * self.scale_y) / self.video_height).clamp(0.0, 1.0)
    }

    /// Pixel point to NDC, matching the viewer's screen-space convention:
    /// x right in [-1, 1], y up in [-1, 1].
    pub fn to_ndc(&self, p: &Point3) -> (f32, f32) {
        let x = (p.x / self.video_width) * 2.0 - 1.0;
        let y = -(p.y / self.video_height) * 2.0 + 1.0;
        (x, y)
    }
}

/// Loads a calibration profile from disk, falling back to the identity
/// mapping when no profile has been recorded yet.
pub struct CalibrationStore {
    path: String,
    pub calibration: Calibration,
}

impl CalibrationStore {
    pub fn new(data_dir: &str) -> Result<Self> {
        if !Path::new(data_dir).exists() {
            fs::create_dir_all(data_dir)?;
        }

        let path = format!("{}/calibration.json", data_dir);
        let calibration = if Path::new(&path).exists() {
            let file = File::open(&path)?;
            let cal = serde_json::from_reader(file).ok().unwrap_or_default();
            println!("Loaded calibration profile from {}", path);
            cal
        } else {
            Calibration::default()
        };

        Ok(Self { path, calibration })
    }

    pub fn save(&self) -> Result<()> {
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(file, &self.calibration)?;
        println!("Saved calibration profile to {}", self.path);
        Ok(())
    }
}
