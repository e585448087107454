//! Logical clock and deferred mutations
//!
//! Some scene effects fire after a delay: the scene-16 circle bloom and the
//! per-ball staggered settling after the blow scenes. They are queued as
//! scheduled tasks inside the state and applied here, through the same
//! serialized mutation path as live events. Reset and teardown clear the
//! queue, so a stale task can never fire into a fresh game.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::layout;
use super::scene::Scene;
use super::state::{BallColor, BallId, GameState};

/// A mutation scheduled for a future tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deferred {
    pub due_tick: u64,
    pub effect: DeferredEffect,
}

/// The deferrable mutations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DeferredEffect {
    /// Scene 16: coin-flip recolor, then bloom into a circle and advance
    CircleBloom,
    /// Scene 19: one ball falls back to the settle band
    Settle { ball: BallId },
}

/// Advance the logical clock one tick and fire any due deferred effects
pub fn tick(state: &mut GameState) {
    state.time_ticks += 1;
    if state.pending.is_empty() {
        return;
    }

    let now = state.time_ticks;
    let mut due = Vec::new();
    state.pending.retain(|d| {
        if d.due_tick <= now {
            due.push(d.effect);
            false
        } else {
            true
        }
    });

    for effect in due {
        apply_deferred(state, effect);
    }
}

fn apply_deferred(state: &mut GameState, effect: DeferredEffect) {
    match effect {
        DeferredEffect::CircleBloom => {
            if state.scene != Scene::ShakeToCircle {
                return;
            }
            const PALETTE: [BallColor; 3] = [BallColor::Yellow, BallColor::Red, BallColor::Blue];
            for id in state.balls.ids() {
                if state.rng.random_bool(0.5) {
                    let color = *PALETTE.choose(&mut state.rng).unwrap_or(&BallColor::Yellow);
                    if let Some(ball) = state.balls.get_mut(id) {
                        ball.color = color;
                    }
                }
            }
            layout::arrange_circle(&mut state.balls, state.bounds);
            state.scene = Scene::GentleBlow;
            log::debug!("circle bloom fired, scene -> {}", state.scene.number());
        }
        DeferredEffect::Settle { ball } => {
            let bounds = state.bounds;
            let pos = layout::settle_position(bounds, &mut state.rng);
            // Stale id from an already-replaced collection: silent no-op
            if let Some(ball) = state.balls.get_mut(ball) {
                ball.pos = pos;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use glam::Vec2;

    #[test]
    fn test_deferred_fires_once_after_delay() {
        let mut state = GameState::new(1);
        let id = state.spawn_ball(Vec2::new(5.0, 5.0));
        state.schedule(3, DeferredEffect::Settle { ball: id });

        tick(&mut state);
        tick(&mut state);
        assert_eq!(state.balls.get(id).unwrap().pos, Vec2::new(5.0, 5.0));
        assert_eq!(state.pending.len(), 1);

        tick(&mut state);
        assert_ne!(state.balls.get(id).unwrap().pos, Vec2::new(5.0, 5.0));
        assert!(state.pending.is_empty());

        // Nothing left to fire
        let settled = state.balls.get(id).unwrap().pos;
        tick(&mut state);
        assert_eq!(state.balls.get(id).unwrap().pos, settled);
    }

    #[test]
    fn test_settle_lands_in_band() {
        let mut state = GameState::new(9);
        let id = state.spawn_ball(Vec2::new(0.0, -500.0));
        state.schedule(1, DeferredEffect::Settle { ball: id });
        tick(&mut state);

        let pos = state.balls.get(id).unwrap().pos;
        let b = state.bounds;
        assert!(pos.x >= EDGE_MARGIN && pos.x <= b.width - EDGE_MARGIN);
        assert!(pos.y >= b.height * SETTLE_BAND_TOP && pos.y <= b.height * SETTLE_BAND_BOTTOM);
    }

    #[test]
    fn test_reset_cancels_pending() {
        let mut state = GameState::new(2);
        let id = state.spawn_ball(Vec2::ZERO);
        state.schedule(1, DeferredEffect::Settle { ball: id });
        state.reset();
        assert!(state.pending.is_empty());

        tick(&mut state);
        // The reset collection is untouched
        assert_eq!(state.balls.len(), 1);
    }

    #[test]
    fn test_settle_for_removed_ball_is_noop() {
        let mut state = GameState::new(3);
        let id = state.spawn_ball(Vec2::ZERO);
        state.schedule(1, DeferredEffect::Settle { ball: id });
        state.balls.remove(id);
        tick(&mut state);
        assert!(!state.balls.contains(id));
    }

    #[test]
    fn test_circle_bloom_advances_and_arranges() {
        let mut state = GameState::new(4);
        for i in 0..5 {
            state.spawn_ball(Vec2::new(i as f32, 0.0));
        }
        state.scene = Scene::ShakeToCircle;
        state.schedule(CIRCLE_BLOOM_DELAY_TICKS, DeferredEffect::CircleBloom);

        for _ in 0..CIRCLE_BLOOM_DELAY_TICKS {
            tick(&mut state);
        }
        assert_eq!(state.scene, Scene::GentleBlow);

        let b = state.bounds;
        let center = Vec2::new(b.width / 2.0, b.height / 2.0);
        let radius = b.width.min(b.height) / 3.0;
        for ball in state.balls.iter() {
            assert!((ball.pos.distance(center) - radius).abs() < 0.001);
        }
    }

    #[test]
    fn test_circle_bloom_is_noop_outside_its_scene() {
        let mut state = GameState::new(5);
        let start = state.balls.iter().next().unwrap().pos;
        state.schedule(1, DeferredEffect::CircleBloom);
        tick(&mut state);
        assert_eq!(state.scene, Scene::FirstTap);
        assert_eq!(state.balls.iter().next().unwrap().pos, start);
    }
}
