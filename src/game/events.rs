//! Discrete game events
//!
//! These are the only inputs the state machine consumes. The platform (or the
//! `signals` layer) derives them from taps, drags, accelerometer samples, and
//! microphone levels; debouncing happens before an event is emitted.

use serde::{Deserialize, Serialize};

use super::state::BallId;

/// Coarse tilt reading derived from the accelerometer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TiltDirection {
    #[default]
    None,
    Left,
    Right,
}

/// A single discrete event, handled one at a time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Discrete tap on a ball
    Tap(BallId),
    /// Continuous drag currently over a ball (fires repeatedly)
    Rub(BallId),
    /// Shake pulse (already debounced)
    Shake,
    /// Tilt reading changed
    Tilt(TiltDirection),
    /// Blow detected, with normalized strength in 0..=1
    Blow { strength: f32 },
    /// Clap detected (already debounced)
    Clap,
    /// Device returned to the upright orientation
    DeviceUpright,
}
