//! Recorded landmark sessions. A session is the offline stand-in for the
//! live landmark model: timestamped frames, each with zero or more detected
//! hands, serialized as JSON so recordings can be inspected and replayed
//! while tuning thresholds.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::tracker::LandmarkSource;
use crate::types::HandFrame;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFrame {
    pub t_ms: u64,
    #[serde(default)]
    pub hands: Vec<HandFrame>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub video_width: f32,
    pub video_height: f32,
    pub frames: Vec<SessionFrame>,
}

impl Session {
    pub fn new(video_width: f32, video_height: f32) -> Self {
        Self {
            video_width,
            video_height,
            frames: Vec::new(),
        }
    }

    pub fn push(&mut self, t_ms: u64, hands: Vec<HandFrame>) {
        self.frames.push(SessionFrame { t_ms, hands });
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read session {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse session {}", path.display()))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("failed to write session {}", path.display()))
    }

    pub fn duration_ms(&self) -> u64 {
        self.frames.last().map(|f| f.t_ms).unwrap_or(0)
    }
}

/// A `LandmarkSource` that plays a recorded session back one frame per
/// call. Past the end it reports no detections, like a hand leaving the
/// camera view.
pub struct ReplaySource {
    name: String,
    frames: Vec<SessionFrame>,
    cursor: usize,
}

impl ReplaySource {
    pub fn new(name: &str, session: &Session) -> Self {
        Self {
            name: name.to_string(),
            frames: session.frames.clone(),
            cursor: 0,
        }
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}

impl LandmarkSource for ReplaySource {
    fn name(&self) -> String {
        format!("replay:{}", self.name)
    }

    fn open(&mut self) -> Result<()> {
        anyhow::ensure!(!self.frames.is_empty(), "session has no frames");
        Ok(())
    }

    fn estimate_hands(&mut self) -> Result<Vec<HandFrame>> {
        let hands = self
            .frames
            .get(self.cursor)
            .map(|f| f.hands.clone())
            .unwrap_or_default();
        self.cursor += 1;
        Ok(hands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth;

    #[test]
    fn session_round_trips_through_json() {
        let mut session = Session::new(640.0, 480.0);
        session.push(0, vec![synth::open_palm(320.0, 240.0, 60.0)]);
        session.push(33, vec![]);
        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back.frames.len(), 2);
        assert_eq!(back.frames[0].hands[0].points.len(), 21);
        assert!(back.frames[1].hands.is_empty());
        assert_eq!(back.duration_ms(), 33);
    }

    #[test]
    fn replay_runs_out_to_no_detection() {
        let mut session = Session::new(640.0, 480.0);
        session.push(0, vec![synth::fist(320.0, 240.0, 60.0)]);
        let mut source = ReplaySource::new("test", &session);
        assert_eq!(source.estimate_hands().unwrap().len(), 1);
        assert!(source.estimate_hands().unwrap().is_empty());
        assert!(source.estimate_hands().unwrap().is_empty());
    }
}
