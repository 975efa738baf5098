//! The tracking loop. One classification pass per scheduled tick, single
//! threaded; nothing here overlaps with itself. Setup failures propagate
//! out of `start`; everything after that is absorbed and the loop restarts
//! itself after a short delay, matching how the viewer recovers when the
//! landmark model hiccups mid-session.

use anyhow::{Context, Result};
use colored::*;

use crate::calibration::Calibration;
use crate::config::TrackerConfig;
use crate::dispatch::{ActionDispatcher, HeldObjectContext, SceneCamera};
use crate::engine::{FrameContext, GestureEngine};
use crate::types::{EngineReport, FrameDecision, HandFrame, InteractionMode};

/// The external landmark model, treated as a black box that hands back
/// zero or more 21-point hands per video frame.
pub trait LandmarkSource {
    fn name(&self) -> String;

    /// Called once from `start`. Fail here for unrecoverable setup problems
    /// (model unavailable, no stream supplied).
    fn open(&mut self) -> Result<()> {
        Ok(())
    }

    /// Detection result for the current frame. The tracker only consumes
    /// the first hand.
    fn estimate_hands(&mut self) -> Result<Vec<HandFrame>>;

    /// Release any held media resources. Called from `stop`.
    fn release(&mut self) {}
}

pub type StatusCallback = Box<dyn FnMut(Option<&str>)>;
pub type ProgressCallback<'a> = &'a mut dyn FnMut(u32, &str);

pub struct HandTracker<S: LandmarkSource> {
    source: S,
    engine: GestureEngine,
    dispatcher: ActionDispatcher,
    scene: Box<dyn SceneCamera>,
    held: Box<dyn HeldObjectContext>,
    status: Option<StatusCallback>,
    enabled: bool,
    restart_delay_ms: u64,
    restart_at_ms: Option<u64>,
    min_interval_ms: u64,
    last_pass_ms: Option<u64>,
}

impl<S: LandmarkSource> HandTracker<S> {
    pub fn new(
        source: S,
        config: TrackerConfig,
        calibration: Calibration,
        scene: Box<dyn SceneCamera>,
        held: Box<dyn HeldObjectContext>,
    ) -> Self {
        let min_interval_ms = if config.detection.max_fps > 0.0 {
            (1000.0 / config.detection.max_fps) as u64
        } else {
            0
        };
        let restart_delay_ms = config.detection.restart_delay_ms;
        let engine = GestureEngine::new(config, calibration);
        Self {
            source,
            engine,
            dispatcher: ActionDispatcher::new(),
            scene,
            held,
            status: None,
            enabled: false,
            restart_delay_ms,
            restart_at_ms: None,
            min_interval_ms,
            last_pass_ms: None,
        }
    }

    /// Status-overlay hook, called with the live gesture name or `None`.
    /// Purely presentational; the tracker works the same without it.
    pub fn set_status_callback(&mut self, cb: StatusCallback) {
        self.status = Some(cb);
    }

    /// Access to the dispatcher for pick-up/throw overrides.
    pub fn dispatcher_mut(&mut self) -> &mut ActionDispatcher {
        &mut self.dispatcher
    }

    pub fn is_tracking(&self) -> bool {
        self.enabled
    }

    pub fn mode(&self) -> InteractionMode {
        self.engine.mode()
    }

    /// Open the landmark source and begin accepting ticks. Setup failures
    /// come back to the caller; nothing after this call does.
    pub fn start(&mut self, mut progress: Option<ProgressCallback>) -> Result<()> {
        if let Some(cb) = progress.as_deref_mut() {
            cb(10, "opening landmark source");
        }
        self.source
            .open()
            .with_context(|| format!("landmark source '{}' unavailable", self.source.name()))?;
        if let Some(cb) = progress.as_deref_mut() {
            cb(100, "tracking ready");
        }
        println!(
            "{}",
            format!("Hand tracking started ({})", self.source.name()).green()
        );
        self.enabled = true;
        Ok(())
    }

    /// Pause tracking and release the source. Internal counters are kept;
    /// a later `start` resumes from whatever state persisted in memory.
    pub fn stop(&mut self) {
        self.enabled = false;
        self.source.release();
        self.emit_status(None);
        println!("{}", "Hand tracking stopped".yellow());
    }

    /// One scheduled tick of the tracking loop. Returns the engine report
    /// when a pass actually ran; `None` when stopped, rate-capped, or
    /// waiting out a fault restart.
    pub fn step(&mut self, now_ms: u64) -> Option<EngineReport> {
        if !self.enabled {
            return None;
        }
        if let Some(at) = self.restart_at_ms {
            if now_ms < at {
                return None;
            }
            self.restart_at_ms = None;
            println!("{}", "[tracker] restarting after fault".yellow());
        }
        if let Some(last) = self.last_pass_ms {
            if now_ms.saturating_sub(last) < self.min_interval_ms {
                return None;
            }
        }
        self.last_pass_ms = Some(now_ms);

        match self.pass(now_ms) {
            Ok(report) => {
                let label = report.gesture.map(|g| g.label());
                self.emit_status(label);
                Some(report)
            }
            Err(e) => {
                println!("{}", format!("[tracker] frame fault: {:#}", e).red());
                self.engine.reset();
                self.scene.clear_highlight();
                self.emit_status(None);
                self.restart_at_ms = Some(now_ms + self.restart_delay_ms);
                None
            }
        }
    }

    fn pass(&mut self, now_ms: u64) -> Result<EngineReport> {
        let hands = self.source.estimate_hands()?;
        let ctx = FrameContext {
            now_ms,
            holding: self.held.is_held(),
            thrown: self.held.is_thrown(),
            selectable_count: self.scene.selectable_ids().len(),
        };
        let report = self.engine.process(hands.first(), &ctx)?;

        if matches!(
            report.decision,
            FrameDecision::Lost | FrameDecision::Implausible
        ) {
            // Hand gone: clear visual feedback. The mode itself is sticky.
            self.scene.clear_highlight();
        }
        for action in &report.actions {
            self.dispatcher
                .dispatch(action, self.scene.as_mut(), self.held.as_mut());
        }
        Ok(report)
    }

    fn emit_status(&mut self, label: Option<&str>) {
        if let Some(cb) = &mut self.status {
            cb(label);
        }
    }
}
