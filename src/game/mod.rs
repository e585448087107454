//! Deterministic game core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (insertion order of balls)
//! - One event handled at a time, deferred effects through the same path
//! - No rendering or platform dependencies

pub mod events;
pub mod handlers;
pub mod layout;
pub mod scene;
pub mod session;
pub mod setup;
pub mod state;
pub mod tick;

pub use events::{GameEvent, TiltDirection};
pub use handlers::apply;
pub use scene::Scene;
pub use session::Game;
pub use setup::jump_to_scene;
pub use state::{
    Ball, BallAlignment, BallColor, BallId, Balls, Background, BackgroundTone, Bounds, GameState,
};
pub use tick::{Deferred, DeferredEffect, tick};
