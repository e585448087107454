//! Debug scene jump
//!
//! Deterministically replays the setup side effects of every scene from 1 to
//! the target (ball counts, colors, layouts) without requiring the actual
//! gestures. Development and testing only; also serves as a test oracle for
//! scene-setup state. Does not reconstruct the scene-13 snapshot, so the
//! spot-the-difference gate still needs real play to be meaningful.

use super::layout;
use super::scene::Scene;
use super::state::{Background, BallColor, GameState};
use crate::consts::*;

/// Reset and fast-forward to scene `n` (1..=27). Returns false and leaves the
/// state untouched for numbers outside that range.
pub fn jump_to_scene(state: &mut GameState, n: u8) -> bool {
    let target = match Scene::from_number(n) {
        Some(scene) if n <= 27 => scene,
        _ => {
            log::warn!("jump to scene {n} rejected");
            return false;
        }
    };

    state.reset();
    for number in 1..=n {
        match number {
            // Second ball spawned by the first tap
            2 => {
                let last_x = state.balls.last().map(|b| b.pos.x).unwrap_or(0.0);
                let y = state
                    .balls
                    .iter()
                    .next()
                    .map(|b| b.pos.y)
                    .unwrap_or(state.bounds.height / 2.0);
                state.spawn_ball(glam::Vec2::new(last_x + SPAWN_SPACING, y));
            }

            // The press scenes want a ball of their color on screen
            5..=7 => {
                let color = match number {
                    5 => BallColor::Yellow,
                    6 => BallColor::Red,
                    _ => BallColor::Blue,
                };
                if let Some(ball) = state.balls.iter_mut().next() {
                    ball.color = color;
                }
            }

            // The shake/tilt scenes act on a whole flock
            8..=12 => {
                if state.balls.len() < FLOCK_SIZE {
                    for _ in 0..FLOCK_SIZE {
                        let pos = layout::random_position(state.bounds, &mut state.rng);
                        state.spawn_ball(pos);
                    }
                }
            }

            // Fresh yellow flock on the grid
            13 => {
                state.balls.clear();
                for _ in 0..FLOCK_SIZE {
                    let pos = layout::random_position(state.bounds, &mut state.rng);
                    state.spawn_ball(pos);
                }
                layout::arrange_grid(&mut state.balls, state.bounds, &mut state.rng);
            }

            // Lights out: only yellows stay visible
            14 => {
                state.background = Background::black();
                for ball in state.balls.iter_mut() {
                    ball.active = ball.color == BallColor::Yellow;
                }
            }

            _ => {}
        }
    }

    state.scene = target;
    log::debug!("jumped to scene {n}");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::BackgroundTone;

    #[test]
    fn test_jump_rejects_out_of_range() {
        let mut state = GameState::new(1);
        assert!(!jump_to_scene(&mut state, 0));
        assert!(!jump_to_scene(&mut state, 28));
        assert!(!jump_to_scene(&mut state, 99));
        assert_eq!(state.scene, Scene::FirstTap);
    }

    #[test]
    fn test_jump_to_scene_2_spawns_second_ball() {
        let mut state = GameState::new(2);
        assert!(jump_to_scene(&mut state, 2));
        assert_eq!(state.scene, Scene::SecondTap);
        assert_eq!(state.balls.len(), 2);
        let xs: Vec<f32> = state.balls.iter().map(|b| b.pos.x).collect();
        assert_eq!(xs[1], xs[0] + SPAWN_SPACING);
    }

    #[test]
    fn test_jump_to_press_scenes_colors_first_ball() {
        let mut state = GameState::new(3);
        jump_to_scene(&mut state, 6);
        assert_eq!(state.scene, Scene::PressRed);
        assert_eq!(
            state.balls.iter().next().unwrap().color,
            BallColor::Red
        );

        jump_to_scene(&mut state, 7);
        assert_eq!(
            state.balls.iter().next().unwrap().color,
            BallColor::Blue
        );
    }

    #[test]
    fn test_jump_to_shake_scenes_populates_flock() {
        let mut state = GameState::new(4);
        jump_to_scene(&mut state, 9);
        assert_eq!(state.scene, Scene::ShakeScatter);
        assert!(state.balls.len() >= FLOCK_SIZE);
    }

    #[test]
    fn test_jump_to_13_builds_yellow_grid() {
        let mut state = GameState::new(5);
        jump_to_scene(&mut state, 13);
        assert_eq!(state.scene, Scene::LightsOut);
        assert_eq!(state.balls.len(), FLOCK_SIZE);
        assert!(state.balls.iter().all(|b| b.color == BallColor::Yellow));

        let lattice = layout::grid_points(state.bounds);
        for ball in state.balls.iter() {
            assert!(lattice.iter().any(|p| p.distance(ball.pos) < 0.001));
        }
    }

    #[test]
    fn test_jump_to_14_turns_lights_out() {
        let mut state = GameState::new(6);
        jump_to_scene(&mut state, 14);
        assert_eq!(state.scene, Scene::LightsOn);
        assert_eq!(state.background.tone, BackgroundTone::Black);
        // The replayed flock is all yellow, so everything stays visible
        assert!(state.balls.iter().all(|b| b.active));
    }

    #[test]
    fn test_jump_resets_between_jumps() {
        let mut state = GameState::new(7);
        jump_to_scene(&mut state, 13);
        jump_to_scene(&mut state, 1);
        assert_eq!(state.scene, Scene::FirstTap);
        assert_eq!(state.balls.len(), 1);
    }
}
