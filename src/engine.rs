//! The interaction state machine. Owns all session-mutable tracking state
//! (mode, gates, smoothing buffers, cooldown) so a single engine instance
//! can be driven deterministically frame by frame.
//!
//! Modes: `Default` (camera control, grab/throw) and `Selection` (sweep and
//! pick a scene object). At most one mode transition happens per processed
//! frame, gated by stable-frame hysteresis and a cooldown that suppresses
//! immediate re-entry, because the entry and exit hand poses overlap while
//! the hand is changing shape.
//!
//! The mode deliberately survives hand loss: a brief occlusion resets the
//! transient gesture state but does not dump the user out of selection.

use anyhow::{ensure, Context, Result};

use crate::calibration::Calibration;
use crate::classifier::{classify, GestureCandidates};
use crate::config::TrackerConfig;
use crate::filters::{dead_zone, MajorityVote, MovingAverage, Smoothing, Smoothing2};
use crate::types::{
    landmark, Action, EngineReport, FrameDecision, Gesture, HandFrame, InteractionMode, ModeEvent,
    Point3,
};
use crate::validator::FrameValidator;

/// External facts the engine needs for one pass.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    pub now_ms: u64,
    /// Is the external held-object context currently holding something?
    pub holding: bool,
    /// Has the held object already been thrown?
    pub thrown: bool,
    /// Length of the scene's ordered selectable-object list.
    pub selectable_count: usize,
}

/// Debounce-via-counter: a condition must hold for `threshold` consecutive
/// advances before the gate fires. Any break resets the run. Reused for
/// mode entry, both exits, and anything else that needs stable frames.
#[derive(Debug, Clone)]
pub struct HysteresisGate {
    threshold: u32,
    count: u32,
}

impl HysteresisGate {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            count: 0,
        }
    }

    /// Advance one frame. Returns true exactly on the frame the condition
    /// has held for `threshold` consecutive frames, then starts over.
    pub fn advance(&mut self, active: bool) -> bool {
        if !active {
            self.count = 0;
            return false;
        }
        self.count += 1;
        if self.count >= self.threshold {
            self.count = 0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

/// Transient per-gesture state. Reset wholesale when tracking is lost.
struct GestureState {
    entry_gate: HysteresisGate,
    exit_gate: HysteresisGate,
    enter_gate: HysteresisGate,
    cooldown_until_ms: u64,
    last_grab_ms: Option<u64>,
    is_grabbing: bool,
    pinch_active: bool,
    pinch_x: Smoothing,
    last_pinch_x: Option<f32>,
    palm_ndc: Smoothing2,
    last_palm_ndc: Option<(f32, f32)>,
    open_vote: MajorityVote,
    highlight_avg: MovingAverage,
    last_highlight: Option<usize>,
}

impl GestureState {
    fn new(cfg: &TrackerConfig) -> Self {
        Self {
            entry_gate: HysteresisGate::new(cfg.gates.selection_entry_frames),
            exit_gate: HysteresisGate::new(cfg.gates.selection_exit_frames),
            enter_gate: HysteresisGate::new(cfg.gates.enter_frames),
            cooldown_until_ms: 0,
            last_grab_ms: None,
            is_grabbing: false,
            pinch_active: false,
            pinch_x: Smoothing::new(cfg.motion.midpoint_alpha),
            last_pinch_x: None,
            palm_ndc: Smoothing2::new(cfg.motion.palm_alpha),
            last_palm_ndc: None,
            open_vote: MajorityVote::new(cfg.motion.open_palm_votes),
            highlight_avg: MovingAverage::new(cfg.motion.highlight_window),
            last_highlight: None,
        }
    }
}

pub struct GestureEngine {
    cfg: TrackerConfig,
    calibration: Calibration,
    validator: FrameValidator,
    mode: InteractionMode,
    state: GestureState,
}

impl GestureEngine {
    pub fn new(cfg: TrackerConfig, calibration: Calibration) -> Self {
        let validator = FrameValidator::new(&cfg.detection);
        let state = GestureState::new(&cfg);
        Self {
            cfg,
            calibration,
            validator,
            mode: InteractionMode::Default,
            state,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.state.last_highlight
    }

    /// Drop transient gesture state. The mode and the detection continuity
    /// counters stay; this is the "hand lost" path.
    pub fn reset_transient(&mut self) {
        self.state = GestureState::new(&self.cfg);
    }

    /// Full reset to a safe idle baseline, used by the tracking loop after
    /// a per-frame fault before it schedules a restart.
    pub fn reset(&mut self) {
        self.reset_transient();
        self.validator.reset();
        self.mode = InteractionMode::Default;
    }

    /// One classification pass over the raw per-frame detection result.
    pub fn process(&mut self, hand: Option<&HandFrame>, ctx: &FrameContext) -> Result<EngineReport> {
        let decision = self.validator.observe(hand);
        match decision {
            FrameDecision::Trusted => {
                let frame = hand.context("trusted decision without a detection")?;
                ensure!(
                    frame.points.len() == landmark::COUNT,
                    "trusted frame with {} landmarks",
                    frame.points.len()
                );
                self.run_trusted(frame, ctx)
            }
            FrameDecision::Warmup | FrameDecision::Gap => {
                Ok(EngineReport::idle(decision, self.mode))
            }
            FrameDecision::Lost | FrameDecision::Implausible => {
                self.reset_transient();
                Ok(EngineReport::idle(decision, self.mode))
            }
        }
    }

    fn run_trusted(&mut self, frame: &HandFrame, ctx: &FrameContext) -> Result<EngineReport> {
        let candidates = classify(frame, &self.cfg.fingers);

        // Palm motion is tracked every trusted frame regardless of which
        // gesture wins, so velocity is always one frame deep.
        let ndc = self.calibration.to_ndc(&candidates.palm);
        let smoothed = self.state.palm_ndc.filter(ndc);
        let velocity = match self.state.last_palm_ndc {
            Some(prev) => (smoothed.0 - prev.0, smoothed.1 - prev.1),
            None => (0.0, 0.0),
        };
        self.state.last_palm_ndc = Some(smoothed);
        let open_voted = self.state.open_vote.push(candidates.all_open);

        let report = match self.mode {
            InteractionMode::Default => self.run_default(&candidates, velocity, open_voted, ctx),
            InteractionMode::Selection => self.run_selection(&candidates, ctx),
        };
        Ok(report)
    }

    fn run_default(
        &mut self,
        c: &GestureCandidates,
        velocity: (f32, f32),
        open_voted: bool,
        ctx: &FrameContext,
    ) -> EngineReport {
        let mut report = EngineReport::idle(FrameDecision::Trusted, self.mode);

        // Mode entry. Not evaluated at all during the cooldown window.
        if ctx.now_ms >= self.state.cooldown_until_ms {
            if self.state.entry_gate.advance(c.four_fingers) {
                self.mode = InteractionMode::Selection;
                self.state.exit_gate.reset();
                self.state.enter_gate.reset();
                self.state.open_vote.clear();
                self.state.highlight_avg.clear();
                self.state.last_highlight = None;
                report.mode = self.mode;
                report.event = Some(ModeEvent::SelectionModeOn);
                report.gesture = Some(Gesture::SelectionToggle);
                return report;
            }
        } else {
            self.state.entry_gate.reset();
        }

        // (1) Zoom drag: horizontal motion of the index/thumb midpoint.
        if c.pinch {
            if !self.state.pinch_active {
                self.state.pinch_active = true;
                self.state.pinch_x.reset();
                self.state.last_pinch_x = None;
            }
            let smoothed = self.state.pinch_x.filter(c.pinch_midpoint_x);
            let delta = match self.state.last_pinch_x {
                Some(prev) => dead_zone(smoothed - prev, self.cfg.motion.zoom_dead_zone),
                None => 0.0,
            };
            self.state.last_pinch_x = Some(smoothed);
            report.gesture = Some(Gesture::ZoomDrag);
            if delta != 0.0 {
                report.actions.push(Action::DollyZoom {
                    delta: delta * self.cfg.motion.zoom_gain,
                });
            }
            return report;
        } else if self.state.pinch_active {
            self.state.pinch_active = false;
            self.state.last_pinch_x = None;
        }

        // (2) Grab: rate-limited, only while nothing is held.
        if c.two_fingers && !ctx.holding {
            let ready = self
                .state
                .last_grab_ms
                .map_or(true, |t| ctx.now_ms.saturating_sub(t) >= self.cfg.gates.grab_interval_ms);
            if ready {
                self.state.last_grab_ms = Some(ctx.now_ms);
                self.state.is_grabbing = true;
                report.gesture = Some(Gesture::Grab);
                report.actions.push(Action::PickUp);
                return report;
            }
        }

        // (3) Throw: open hand moving fast while something is held.
        if ctx.holding && !ctx.thrown && c.all_open {
            let speed = (velocity.0 * velocity.0 + velocity.1 * velocity.1).sqrt();
            if speed > self.cfg.motion.throw_threshold {
                self.state.is_grabbing = false;
                report.gesture = Some(Gesture::Throw);
                report.actions.push(Action::Throw {
                    // Screen-space direction, launched forward into the scene.
                    velocity: Point3::new(velocity.0 / speed, velocity.1 / speed, -1.0),
                });
                return report;
            }
        }

        // (4) Rotation: smoothed palm delta to yaw/pitch.
        if open_voted && !ctx.holding {
            let dx = dead_zone(velocity.0, self.cfg.motion.rotate_dead_zone);
            let dy = dead_zone(velocity.1, self.cfg.motion.rotate_dead_zone);
            report.gesture = Some(Gesture::Rotate);
            if dx != 0.0 || dy != 0.0 {
                report.actions.push(Action::RotateCamera {
                    yaw: dx * self.cfg.motion.rotate_gain,
                    pitch: dy * self.cfg.motion.rotate_gain,
                });
            }
            return report;
        }

        report
    }

    fn run_selection(&mut self, c: &GestureCandidates, ctx: &FrameContext) -> EngineReport {
        let mut report = EngineReport::idle(FrameDecision::Trusted, self.mode);

        // Exit path A: two fingers held stable.
        if self.state.exit_gate.advance(c.two_fingers) {
            self.leave_selection(ctx);
            report.mode = self.mode;
            report.event = Some(ModeEvent::SelectionModeOff);
            report.gesture = Some(Gesture::SelectionToggle);
            return report;
        }

        // Exit path B: three fingers enters the highlighted object.
        if self.state.enter_gate.advance(c.three_fingers) {
            let entered = self.state.last_highlight;
            self.leave_selection(ctx);
            report.mode = self.mode;
            report.gesture = Some(Gesture::Enter);
            if let Some(index) = entered {
                report.actions.push(Action::Enter { index });
            }
            return report;
        }

        // Highlight sweep: continuous, not stable-frame gated. The central
        // active zone of the normalized range maps to the whole list so the
        // screen edges are not over-sensitive.
        if c.all_open && ctx.selectable_count > 0 {
            let nx = self.calibration.normalized_x(c.palm.x);
            let averaged = self.state.highlight_avg.push(nx);
            let t = self.remap_active_zone(averaged);
            let index = (t * (ctx.selectable_count - 1) as f32).round() as usize;
            report.gesture = Some(Gesture::Highlight);
            if self.state.last_highlight != Some(index) {
                self.state.last_highlight = Some(index);
                report.actions.push(Action::Highlight { index });
            }
            return report;
        }

        report
    }

    fn leave_selection(&mut self, ctx: &FrameContext) {
        self.mode = InteractionMode::Default;
        self.state.cooldown_until_ms = ctx.now_ms + self.cfg.gates.cooldown_ms;
        self.state.entry_gate.reset();
        self.state.exit_gate.reset();
        self.state.enter_gate.reset();
        self.state.open_vote.clear();
        self.state.highlight_avg.clear();
        self.state.last_highlight = None;
    }

    fn remap_active_zone(&self, nx: f32) -> f32 {
        let zone = self.cfg.motion.active_zone;
        if zone <= 0.0 || zone > 1.0 {
            return nx.clamp(0.0, 1.0);
        }
        let margin = (1.0 - zone) / 2.0;
        ((nx - margin) / zone).clamp(0.0, 1.0)
    }
}
