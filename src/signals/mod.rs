//! Signal derivation layer
//!
//! Turns raw, continuous sensor/audio samples into the discrete events the
//! game core consumes. Debouncing (shake cooldown, clap cooldown) happens
//! here, never in the state machine. Detectors are fed on the platform's
//! sampling cadence (~10 Hz); a sensor that never produces samples simply
//! means that class of event never arrives.

pub mod audio;
pub mod motion;

pub use audio::{AudioSignal, MicMonitor};
pub use motion::{ShakeDetector, TiltTracker, tilt_from_acceleration};

/// Expected sampling cadence for all detectors (samples per second)
pub const SAMPLE_HZ: u32 = 10;
