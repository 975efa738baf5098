use anyhow::Result;
use clap::Parser;
use colored::*;

mod args;

use args::Args;
use rusty_hands::calibration::CalibrationStore;
use rusty_hands::config::TrackerConfig;
use rusty_hands::dispatch::{HeldObjectContext, SceneCamera};
use rusty_hands::session::{ReplaySource, Session};
use rusty_hands::tracker::HandTracker;
use rusty_hands::types::Point3;

/// Console stand-in for the 3D solar-system scene: actions print instead of
/// moving a camera, which is all the replay tool needs for tuning thresholds.
struct ConsoleScene {
    planets: Vec<String>,
    yaw: f32,
    pitch: f32,
    dolly: f32,
    highlighted: Option<String>,
}

impl ConsoleScene {
    fn new() -> Self {
        let planets = [
            "mercury", "venus", "earth", "mars", "jupiter", "saturn", "uranus", "neptune",
        ];
        Self {
            planets: planets.iter().map(|p| p.to_string()).collect(),
            yaw: 0.0,
            pitch: 0.0,
            dolly: 0.0,
            highlighted: None,
        }
    }
}

impl SceneCamera for ConsoleScene {
    fn rotate_camera(&mut self, yaw: f32, pitch: f32) {
        self.yaw += yaw;
        self.pitch += pitch;
    }

    fn dolly_zoom(&mut self, delta: f32) {
        self.dolly += delta;
    }

    fn selectable_ids(&self) -> Vec<String> {
        self.planets.clone()
    }

    fn highlight(&mut self, id: &str) {
        self.highlighted = Some(id.to_string());
        println!("{}", format!("  highlight -> {}", id).cyan());
    }

    fn clear_highlight(&mut self) {
        if self.highlighted.take().is_some() {
            println!("{}", "  highlight cleared".cyan());
        }
    }

    fn enter(&mut self, id: &str) {
        println!("{}", format!("  ENTER {}", id).cyan().bold());
    }
}

struct ConsoleHeld {
    held: bool,
    thrown: bool,
}

impl HeldObjectContext for ConsoleHeld {
    fn is_held(&self) -> bool {
        self.held
    }

    fn is_thrown(&self) -> bool {
        self.thrown
    }

    fn pick_up(&mut self) {
        self.held = true;
        self.thrown = false;
        println!("{}", "  picked up".magenta());
    }

    fn throw(&mut self, velocity: Point3) {
        self.held = false;
        self.thrown = true;
        println!(
            "{}",
            format!(
                "  thrown ({:.2}, {:.2}, {:.2})",
                velocity.x, velocity.y, velocity.z
            )
            .magenta()
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = TrackerConfig::load_from(&args.config)?;
    let session = Session::load(&args.session)?;
    println!(
        "Replaying {} ({} frames, {} ms)",
        args.session,
        session.frames.len(),
        session.duration_ms()
    );

    let mut store = CalibrationStore::new(&args.calibration_dir)?;
    // Selection-space mapping must match the recording's video geometry.
    store.calibration.video_width = session.video_width;
    store.calibration.video_height = session.video_height;

    let source = ReplaySource::new(&args.session, &session);
    let mut tracker = HandTracker::new(
        source,
        config,
        store.calibration.clone(),
        Box::new(ConsoleScene::new()),
        Box::new(ConsoleHeld {
            held: false,
            thrown: false,
        }),
    );
    tracker.set_status_callback(Box::new(|label| {
        if let Some(label) = label {
            println!("{}", format!("  gesture: {}", label).dimmed());
        }
    }));

    let mut progress = |pct: u32, msg: &str| println!("[{:>3}%] {}", pct, msg);
    tracker.start(Some(&mut progress))?;

    let mut passes = 0u32;
    for frame in &session.frames {
        let Some(report) = tracker.step(frame.t_ms) else {
            continue;
        };
        passes += 1;
        if args.verbose {
            println!(
                "t={:<6} {:?} mode={:?} gesture={:?} actions={}",
                frame.t_ms,
                report.decision,
                report.mode,
                report.gesture,
                report.actions.len()
            );
        }
        if let Some(event) = report.event {
            println!("{}", format!("t={} {:?}", frame.t_ms, event).green().bold());
        }
    }
    tracker.stop();

    println!(
        "Done: {} of {} frames classified, final mode {:?}",
        passes,
        session.frames.len(),
        tracker.mode()
    );
    Ok(())
}
