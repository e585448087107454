//! Blow and clap derivation from microphone level metering
//!
//! The platform meters average power in dBFS (silence around -160, clipping
//! at 0) on its sampling cadence and feeds the readings here.

/// Sustained level above this reads as blowing into the mic
pub const BLOW_LEVEL_DB: f32 = -30.0;
/// A spike above this reads as a clap
pub const CLAP_LEVEL_DB: f32 = -10.0;
/// Samples to ignore after a clap fires (0.3 s at 10 Hz)
pub const CLAP_COOLDOWN_SAMPLES: u32 = 3;
/// Metering floor used to normalize blow strength
pub const SILENCE_FLOOR_DB: f32 = -160.0;

/// Derived reading for one metering sample
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AudioSignal {
    /// Blow strength in 0..=1 when a blow is detected
    pub blow: Option<f32>,
    /// A debounced clap fired on this sample
    pub clap: bool,
}

/// Debounced blow/clap detection over mic level samples
#[derive(Debug, Default)]
pub struct MicMonitor {
    clap_cooldown: u32,
}

impl MicMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one average-power reading in dBFS
    pub fn sample(&mut self, level_db: f32) -> AudioSignal {
        let blow = (level_db > BLOW_LEVEL_DB)
            .then(|| ((level_db - SILENCE_FLOOR_DB) / -SILENCE_FLOOR_DB).clamp(0.0, 1.0));

        let mut clap = false;
        if self.clap_cooldown > 0 {
            self.clap_cooldown -= 1;
        } else if level_db > CLAP_LEVEL_DB {
            self.clap_cooldown = CLAP_COOLDOWN_SAMPLES;
            clap = true;
        }

        AudioSignal { blow, clap }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_room_is_silent() {
        let mut mic = MicMonitor::new();
        let signal = mic.sample(-60.0);
        assert_eq!(signal, AudioSignal::default());
    }

    #[test]
    fn test_blow_strength_normalized() {
        let mut mic = MicMonitor::new();

        let gentle = mic.sample(-25.0);
        let strength = gentle.blow.expect("blow above threshold");
        assert!((strength - 135.0 / 160.0).abs() < 0.001);
        assert!(!gentle.clap);

        let strong = mic.sample(-12.0);
        assert!(strong.blow.unwrap() > strength);

        // At the threshold exactly: not a blow
        assert!(mic.sample(BLOW_LEVEL_DB).blow.is_none());
    }

    #[test]
    fn test_clap_cooldown() {
        let mut mic = MicMonitor::new();
        assert!(mic.sample(-5.0).clap);
        for _ in 0..CLAP_COOLDOWN_SAMPLES {
            assert!(!mic.sample(-5.0).clap);
        }
        assert!(mic.sample(-5.0).clap);
    }

    #[test]
    fn test_clap_is_also_a_blow() {
        // A clap-level spike still meters as a blow; the scene decides which
        // interpretation matters
        let mut mic = MicMonitor::new();
        let signal = mic.sample(-5.0);
        assert!(signal.clap);
        assert!(signal.blow.is_some());
    }
}
