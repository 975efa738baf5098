//! rusty_hands: hand-gesture interaction core for a 3D solar-system viewer.
//!
//! Turns the noisy per-frame stream of 21 hand landmarks from an external
//! detection model into stable, debounced gestures (rotate, zoom, grab,
//! throw, select, enter) and drives camera/scene actions through small
//! capability traits. The pipeline per frame:
//!
//! landmark source -> validator/debouncer -> geometry + filters ->
//! classifiers -> interaction state machine -> action dispatcher

pub mod calibration;
pub mod classifier;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod filters;
pub mod geometry;
pub mod session;
pub mod synth;
pub mod tracker;
pub mod types;
pub mod validator;
