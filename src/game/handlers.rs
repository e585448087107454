//! Event handlers: the scene transition tables
//!
//! One handler per event type, each switching on the current scene. The same
//! physical gesture means different things - or nothing - depending on the
//! scene, so every handler carries an explicit no-op default arm. At most one
//! transition fires per event.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::BTreeSet;

use super::events::{GameEvent, TiltDirection};
use super::layout;
use super::scene::Scene;
use super::state::{Background, Ball, BallAlignment, BallColor, BallId, GameState};
use super::tick::DeferredEffect;
use crate::consts::*;

/// Apply one event to the state. Unmatched (scene, event) pairs leave the
/// state untouched.
pub fn apply(state: &mut GameState, event: GameEvent) {
    match event {
        GameEvent::Tap(id) => handle_tap(state, id),
        GameEvent::Rub(id) => handle_rub(state, id),
        GameEvent::Shake => handle_shake(state),
        GameEvent::Tilt(direction) => handle_tilt(state, direction),
        GameEvent::Blow { strength } => handle_blow(state, strength),
        GameEvent::Clap => handle_clap(state),
        GameEvent::DeviceUpright => handle_upright(state),
    }
}

/// Move the script forward one scene
fn advance(state: &mut GameState) {
    if let Some(next) = state.scene.next() {
        log::debug!("scene {} -> {}", state.scene.number(), next.number());
        state.scene = next;
    }
}

fn handle_tap(state: &mut GameState, id: BallId) {
    // Stale taps on removed balls are silent no-ops
    let Some(ball) = state.balls.get(id) else {
        return;
    };
    let (color, active, pos) = (ball.color, ball.active, ball.pos);

    match state.scene {
        Scene::FirstTap | Scene::SecondTap => {
            if color == BallColor::Yellow && active {
                let last_x = state.balls.last().map(|b| b.pos.x).unwrap_or(0.0);
                state.spawn_ball(Vec2::new(last_x + SPAWN_SPACING, pos.y));
                advance(state);
            }
        }

        Scene::PressYellow | Scene::PressRed | Scene::PressBlue => {
            handle_five_press(state, id);
        }

        Scene::LightsOut => {
            if color == BallColor::Yellow && active {
                if let Some(ball) = state.balls.get_mut(id) {
                    ball.active = false;
                }
                if !state.balls.any_active(BallColor::Yellow) {
                    // Checkpoint: remember the full layout before the lights
                    // go out, then keep only the yellows visible
                    state.capture_snapshot();
                    for ball in state.balls.iter_mut() {
                        ball.active = ball.color == BallColor::Yellow;
                    }
                    state.background = Background::black();
                    advance(state);
                }
            }
        }

        Scene::LightsOn => {
            if color == BallColor::Yellow && active {
                if let Some(ball) = state.balls.get_mut(id) {
                    ball.active = false;
                }
                if !state.balls.any_active(BallColor::Yellow) {
                    state.background = Background::white();
                    prepare_changed_balls(state);
                    advance(state);
                }
            }
        }

        Scene::SpotTheSwap => {
            if state.changed.contains(&id) {
                state.found.insert(id);
                // Set equality, not insertion order
                if state.found == state.changed {
                    state.restore_snapshot();
                    state.background = Background::black();
                    advance(state);
                }
            }
        }

        Scene::PressWhite => {
            if color == BallColor::White {
                state.completed = true;
                advance(state);
            }
        }

        Scene::StartOver => {
            if color == BallColor::Yellow {
                log::debug!("starting over");
                state.reset();
            }
        }

        _ => {}
    }
}

fn handle_five_press(state: &mut GameState, id: BallId) {
    let Some(required) = state.scene.press_color() else {
        return;
    };
    let Some(ball) = state.balls.get_mut(id) else {
        return;
    };
    if !ball.active || ball.color != required {
        return;
    }
    ball.press_count += 1;
    state.press_count += 1;

    if state.press_count >= PRESS_TARGET {
        fan_out_from(state, id, required);
        state.press_count = 0;
        advance(state);
    }
}

/// Replace the pressed ball with five balls of its color in a vertical line
/// centered on its position
fn fan_out_from(state: &mut GameState, id: BallId, color: BallColor) {
    let Some(origin) = state.balls.remove(id) else {
        return;
    };
    for pos in layout::fan_out_line(origin.pos, FAN_COUNT, FAN_SPACING, BallAlignment::Vertical) {
        let new_id = state.next_ball_id();
        state.balls.push(Ball {
            color,
            alignment: BallAlignment::Vertical,
            ..Ball::new(new_id, pos)
        });
    }
}

fn handle_rub(state: &mut GameState, id: BallId) {
    match state.scene {
        Scene::RubToRed => {
            let Some(ball) = state.balls.get_mut(id) else {
                return;
            };
            if ball.active && ball.color == BallColor::Yellow {
                ball.color = BallColor::Red;
                state.last_rubbed = Some(id);
                advance(state);
            }
        }

        Scene::RubToBlue => {
            // Must be a different ball than the one rubbed red
            if state.last_rubbed == Some(id) {
                return;
            }
            let Some(ball) = state.balls.get_mut(id) else {
                return;
            };
            if ball.active && ball.color == BallColor::Yellow {
                ball.color = BallColor::Blue;
                advance(state);
            }
        }

        _ => {}
    }
}

fn handle_shake(state: &mut GameState) {
    match state.scene {
        Scene::ShakeNudge => {
            jitter_all(state, SHAKE_JITTER);
            advance(state);
        }

        Scene::ShakeScatter => {
            layout::scatter(&mut state.balls, state.bounds, &mut state.rng);
            advance(state);
        }

        Scene::ShakeToGrid => {
            layout::arrange_grid(&mut state.balls, state.bounds, &mut state.rng);
            advance(state);
        }

        Scene::ShakeToCircle => {
            // Grid now; recolor and circle after a short beat. The scene
            // advances when the bloom fires.
            layout::arrange_grid(&mut state.balls, state.bounds, &mut state.rng);
            state.schedule(CIRCLE_BLOOM_DELAY_TICKS, DeferredEffect::CircleBloom);
        }

        _ => {}
    }
}

fn handle_tilt(state: &mut GameState, direction: TiltDirection) {
    let expected = match state.scene {
        Scene::TiltLeft => TiltDirection::Left,
        Scene::TiltRight => TiltDirection::Right,
        _ => return,
    };
    if direction != expected {
        return;
    }

    for id in state.balls.ids() {
        let Some(x) = layout::side_x(direction, state.bounds, &mut state.rng) else {
            continue;
        };
        if let Some(ball) = state.balls.get_mut(id) {
            ball.pos.x = x;
        }
    }
    advance(state);
}

fn handle_blow(state: &mut GameState, strength: f32) {
    log::trace!("blow, strength {strength:.2}");
    match state.scene {
        Scene::GentleBlow => {
            for id in state.balls.ids() {
                let dx = state.rng.random_range(-BLOW_SCATTER..=BLOW_SCATTER);
                if let Some(ball) = state.balls.get_mut(id) {
                    ball.pos.y -= BLOW_RISE;
                    ball.pos.x += dx;
                }
            }
            state.background.fade(0.3);
            advance(state);
        }

        Scene::StrongBlow => {
            let height = state.bounds.height;
            for id in state.balls.ids() {
                let dx = state
                    .rng
                    .random_range(-STRONG_BLOW_SCATTER..=STRONG_BLOW_SCATTER);
                let rise =
                    height * state.rng.random_range(STRONG_BLOW_RISE_MIN..=STRONG_BLOW_RISE_MAX);
                if let Some(ball) = state.balls.get_mut(id) {
                    ball.pos.y -= rise;
                    ball.pos.x += dx;
                }
            }
            state.background.fade(0.8);
            advance(state);
        }

        // In the escalation run a blow counts the same as a clap
        s if s.growth_factor().is_some() => grow(state),

        _ => {}
    }
}

fn handle_clap(state: &mut GameState) {
    match state.scene {
        s if s.growth_factor().is_some() => grow(state),
        _ => {}
    }
}

/// Scenes 20-26: every ball grows by the scene's factor; the final step
/// collapses the collection into the finale pair instead
fn grow(state: &mut GameState) {
    let Some(factor) = state.scene.growth_factor() else {
        return;
    };
    for ball in state.balls.iter_mut() {
        ball.scale *= factor;
    }
    if state.scene == Scene::GrowBlow {
        jitter_all(state, CLAP_JITTER);
    }
    if state.scene == Scene::MoreApplause {
        build_finale(state);
    } else {
        advance(state);
    }
}

/// Exactly two centered balls: a huge yellow one and a small white one
fn build_finale(state: &mut GameState) {
    let center = Vec2::new(state.bounds.width / 2.0, state.bounds.height / 2.0);
    state.balls.clear();

    let yellow_id = state.next_ball_id();
    state.balls.push(Ball {
        scale: FINALE_YELLOW_SCALE,
        ..Ball::new(yellow_id, center)
    });

    let white_id = state.next_ball_id();
    state.balls.push(Ball {
        color: BallColor::White,
        scale: FINALE_WHITE_SCALE,
        ..Ball::new(white_id, center)
    });

    state.scene = Scene::PressWhite;
    log::debug!("finale pair built, scene -> {}", state.scene.number());
}

fn handle_upright(state: &mut GameState) {
    if state.scene != Scene::HoldUpright {
        return;
    }
    // Each ball falls back on its own randomized delay so the drop reads as
    // a shower rather than a synchronized snap
    for id in state.balls.ids() {
        let delay = state.rng.random_range(0..=SETTLE_STAGGER_TICKS);
        state.schedule(delay, DeferredEffect::Settle { ball: id });
    }
    state.background = Background::white();
    advance(state);
}

/// Nudge every ball by an independent uniform offset in both axes
fn jitter_all(state: &mut GameState, amplitude: f32) {
    for id in state.balls.ids() {
        let dx = state.rng.random_range(-amplitude..=amplitude);
        let dy = state.rng.random_range(-amplitude..=amplitude);
        if let Some(ball) = state.balls.get_mut(id) {
            ball.pos += Vec2::new(dx, dy);
        }
    }
}

/// Restore the checkpoint, then swap the positions of one random yellow ball
/// and one random non-yellow ball (reds preferred, else blues) and record the
/// pair as the changed-set
fn prepare_changed_balls(state: &mut GameState) {
    state.restore_snapshot();

    let pick = |color: BallColor, state: &GameState| -> Vec<BallId> {
        state
            .balls
            .iter()
            .filter(|b| b.color == color)
            .map(|b| b.id)
            .collect()
    };
    let yellows = pick(BallColor::Yellow, state);
    let mut others = pick(BallColor::Red, state);
    if others.is_empty() {
        others = pick(BallColor::Blue, state);
    }

    let (Some(&a), Some(&b)) = (
        yellows.choose(&mut state.rng),
        others.choose(&mut state.rng),
    ) else {
        // Nothing to swap; the changed-set stays empty
        return;
    };

    let Some(pos_a) = state.balls.get(a).map(|ball| ball.pos) else {
        return;
    };
    let Some(pos_b) = state.balls.get(b).map(|ball| ball.pos) else {
        return;
    };
    if let Some(ball) = state.balls.get_mut(a) {
        ball.pos = pos_b;
    }
    if let Some(ball) = state.balls.get_mut(b) {
        ball.pos = pos_a;
    }

    state.changed = BTreeSet::from([a, b]);
    state.found.clear();
}
