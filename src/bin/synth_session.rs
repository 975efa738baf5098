//! Generates a scripted landmark session that walks through every gesture
//! the engine recognizes: rotation, pinch zoom, grab and throw, selection
//! entry, highlight sweep, and the three-finger enter. Useful for driving
//! the replay viewer without a recording.

use anyhow::Result;
use chrono::Local;
use clap::Parser;

use rusty_hands::session::Session;
use rusty_hands::synth;
use rusty_hands::types::HandFrame;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output path; defaults to a timestamped file in the working directory
    #[arg(short, long)]
    output: Option<String>,

    /// Milliseconds between frames
    #[arg(long, default_value_t = 33)]
    interval_ms: u64,

    /// Hand scale in pixels
    #[arg(long, default_value_t = 60.0)]
    scale: f32,
}

struct Script {
    session: Session,
    t_ms: u64,
    interval_ms: u64,
}

impl Script {
    fn hold(&mut self, frames: u32, hand: HandFrame) {
        for _ in 0..frames {
            self.session.push(self.t_ms, vec![hand.clone()]);
            self.t_ms += self.interval_ms;
        }
    }

    fn sweep<F: Fn(f32) -> HandFrame>(&mut self, frames: u32, from_x: f32, to_x: f32, make: F) {
        for i in 0..frames {
            let t = i as f32 / (frames - 1).max(1) as f32;
            let cx = from_x + (to_x - from_x) * t;
            self.session.push(self.t_ms, vec![make(cx)]);
            self.t_ms += self.interval_ms;
        }
    }

    fn gap(&mut self, frames: u32) {
        for _ in 0..frames {
            self.session.push(self.t_ms, vec![]);
            self.t_ms += self.interval_ms;
        }
    }

    fn pause_ms(&mut self, ms: u64) {
        // Advance the clock without frames, e.g. to ride out a cooldown.
        self.t_ms += ms;
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let s = args.scale;
    let cy = 240.0;

    let mut script = Script {
        session: Session::new(640.0, 480.0),
        t_ms: 0,
        interval_ms: args.interval_ms,
    };

    // Detection warm-up: a still open hand until landmarks are trusted.
    script.hold(12, synth::open_palm(320.0, cy, s));

    // Camera rotation: open palm drifting right, then back.
    script.sweep(15, 320.0, 400.0, |cx| synth::open_palm(cx, cy, s));
    script.sweep(15, 400.0, 280.0, |cx| synth::open_palm(cx, cy, s));

    // Pinch zoom drag in both directions.
    script.sweep(12, 280.0, 380.0, |cx| synth::pinch(cx, cy, s));
    script.sweep(12, 380.0, 300.0, |cx| synth::pinch(cx, cy, s));

    // Grab, then an open-handed flick fast enough to throw.
    script.hold(4, synth::two_fingers(300.0, cy, s));
    script.hold(1, synth::open_palm(120.0, cy, s));
    script.hold(2, synth::open_palm(600.0, cy, s));

    // Brief occlusion: transient state resets, nothing else should.
    script.gap(5);
    script.hold(12, synth::open_palm(320.0, cy, s));

    // Selection mode: four fingers in, sweep the highlight, three fingers
    // to enter whatever ends up highlighted.
    script.hold(4, synth::four_fingers(320.0, cy, s));
    script.sweep(20, 140.0, 500.0, |cx| synth::open_palm(cx, cy, s));
    script.hold(4, synth::three_fingers(320.0, cy, s));

    // Cooldown blocks re-entry; wait it out and toggle once more.
    script.pause_ms(1100);
    script.hold(12, synth::open_palm(320.0, cy, s));
    script.hold(4, synth::four_fingers(320.0, cy, s));
    script.hold(5, synth::two_fingers(320.0, cy, s));

    let path = args.output.unwrap_or_else(|| {
        format!("synth_session_{}.json", Local::now().format("%Y%m%d_%H%M%S"))
    });
    script.session.save(&path)?;
    println!(
        "Wrote {} frames ({} ms) to {}",
        script.session.frames.len(),
        script.session.duration_ms(),
        path
    );
    Ok(())
}
