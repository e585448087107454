//! Balls High - a scene-scripted interactive ball toy
//!
//! Core modules:
//! - `game`: Deterministic core (scene state machine, ball collection, layouts)
//! - `signals`: Derivation of discrete game events from raw sensor/audio samples
//!
//! The core consumes only coarse derived events ("shake happened", "tilt is
//! left", "blow detected") and decides what to do with them. Rendering and raw
//! sensor sampling are the platform's job.

pub mod game;
pub mod signals;

pub use game::{Game, GameEvent, GameState, Scene, TiltDirection};

use glam::Vec2;

/// Gameplay constants
pub mod consts {
    /// Logical clock rate for deferred effects (ticks per second)
    pub const TICK_HZ: u32 = 60;

    /// Default screen bounds when the platform has not reported any
    pub const DEFAULT_WIDTH: f32 = 390.0;
    pub const DEFAULT_HEIGHT: f32 = 844.0;

    /// Rendered ball diameter
    pub const BALL_DIAMETER: f32 = 60.0;

    /// Horizontal spacing for the tap-to-spawn scenes
    pub const SPAWN_SPACING: f32 = 100.0;

    /// Five-ball fan-out
    pub const FAN_COUNT: usize = 5;
    pub const FAN_SPACING: f32 = 70.0;

    /// Presses required to complete each press-counting scene
    pub const PRESS_TARGET: u32 = 5;

    /// Grid lattice
    pub const GRID_COLUMNS: usize = 5;
    pub const GRID_ROWS: usize = 3;
    pub const GRID_SPACING: f32 = 70.0;

    /// Ball population for the multi-ball scenes
    pub const FLOCK_SIZE: usize = 15;

    /// Screen margins for random placement
    pub const EDGE_MARGIN: f32 = 50.0;
    pub const TOP_MARGIN: f32 = 100.0;

    /// Tilt columns: per-ball jitter width and right column inset
    pub const SIDE_JITTER: f32 = 50.0;
    pub const RIGHT_INSET: f32 = 100.0;

    /// Shake nudge amplitude (scene 8) and clap overlap jitter (scene 21)
    pub const SHAKE_JITTER: f32 = 20.0;
    pub const CLAP_JITTER: f32 = 30.0;

    /// Blow displacement (scene 17) and scatter half-widths
    pub const BLOW_RISE: f32 = 50.0;
    pub const BLOW_SCATTER: f32 = 50.0;
    pub const STRONG_BLOW_SCATTER: f32 = 100.0;
    /// Strong blow rise as a fraction of screen height
    pub const STRONG_BLOW_RISE_MIN: f32 = 0.6;
    pub const STRONG_BLOW_RISE_MAX: f32 = 0.9;

    /// Settle band for balls falling back after the blow scenes
    /// (fractions of screen height)
    pub const SETTLE_BAND_TOP: f32 = 0.3;
    pub const SETTLE_BAND_BOTTOM: f32 = 0.8;

    /// Delay before the scene-16 circle bloom fires (0.5 s)
    pub const CIRCLE_BLOOM_DELAY_TICKS: u64 = TICK_HZ as u64 / 2;
    /// Maximum per-ball stagger when balls settle back down (0.3 s)
    pub const SETTLE_STAGGER_TICKS: u64 = (TICK_HZ as u64 * 3) / 10;

    /// Finale balls
    pub const FINALE_YELLOW_SCALE: f32 = 5.0;
    pub const FINALE_WHITE_SCALE: f32 = 0.5;
}

/// Position of the single starting ball
#[inline]
pub fn start_position(width: f32, height: f32) -> Vec2 {
    Vec2::new(width / 3.0, height / 2.0)
}
