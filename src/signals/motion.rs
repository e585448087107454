//! Shake and tilt derivation from accelerometer samples

use glam::Vec3;

use crate::game::TiltDirection;

/// Total acceleration above this reads as a shake (in g)
pub const SHAKE_THRESHOLD: f32 = 2.0;
/// Samples to ignore after a shake fires (0.5 s at 10 Hz)
pub const SHAKE_COOLDOWN_SAMPLES: u32 = 5;
/// X acceleration past this reads as a tilt (in g)
pub const TILT_THRESHOLD: f32 = 0.5;

/// Coarse tilt from the x-axis acceleration
pub fn tilt_from_acceleration(x: f32) -> TiltDirection {
    if x > TILT_THRESHOLD {
        TiltDirection::Right
    } else if x < -TILT_THRESHOLD {
        TiltDirection::Left
    } else {
        TiltDirection::None
    }
}

/// Debounced shake detection over accelerometer samples
#[derive(Debug, Default)]
pub struct ShakeDetector {
    cooldown: u32,
}

impl ShakeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one accelerometer sample (in g). Returns true when a shake pulse
    /// should be emitted.
    pub fn sample(&mut self, accel: Vec3) -> bool {
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return false;
        }
        if accel.length() > SHAKE_THRESHOLD {
            self.cooldown = SHAKE_COOLDOWN_SAMPLES;
            true
        } else {
            false
        }
    }
}

/// Tilt tracking that reports only changes in direction
#[derive(Debug, Default)]
pub struct TiltTracker {
    last: TiltDirection,
}

impl TiltTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> TiltDirection {
        self.last
    }

    /// Feed the x-axis acceleration (in g). Returns the new direction when it
    /// changed, None while it holds steady.
    pub fn sample(&mut self, x: f32) -> Option<TiltDirection> {
        let direction = tilt_from_acceleration(x);
        if direction != self.last {
            self.last = direction;
            Some(direction)
        } else {
            None
        }
    }
}
