//! Ball layout algorithms
//!
//! Pure functions of (balls, screen bounds, random source) -> new positions.
//! None of these change the ball count; spawning and collection replacement
//! are handler concerns.

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;

use super::events::TiltDirection;
use super::state::{BallAlignment, Balls, Bounds};
use crate::consts::*;

/// Centered grid lattice points, row-major
pub fn grid_points(bounds: Bounds) -> Vec<Vec2> {
    let start_x = (bounds.width - (GRID_COLUMNS - 1) as f32 * GRID_SPACING) / 2.0;
    let start_y = (bounds.height - (GRID_ROWS - 1) as f32 * GRID_SPACING) / 2.0;

    let mut points = Vec::with_capacity(GRID_COLUMNS * GRID_ROWS);
    for row in 0..GRID_ROWS {
        for col in 0..GRID_COLUMNS {
            points.push(Vec2::new(
                start_x + col as f32 * GRID_SPACING,
                start_y + row as f32 * GRID_SPACING,
            ));
        }
    }
    points
}

/// Place balls on the grid lattice via a shuffled point assignment
///
/// Assigns min(ball count, lattice size) balls to distinct points; any
/// overflow balls keep their positions.
pub fn arrange_grid<R: Rng>(balls: &mut Balls, bounds: Bounds, rng: &mut R) {
    let mut points = grid_points(bounds);
    points.shuffle(rng);

    for (ball, point) in balls.iter_mut().zip(points) {
        ball.pos = point;
    }
}

/// Evenly space all balls on a circle, angle by insertion index
pub fn arrange_circle(balls: &mut Balls, bounds: Bounds) {
    let count = balls.len();
    if count == 0 {
        return;
    }
    let center = Vec2::new(bounds.width / 2.0, bounds.height / 2.0);
    let radius = bounds.width.min(bounds.height) / 3.0;

    for (i, ball) in balls.iter_mut().enumerate() {
        let angle = std::f32::consts::TAU * i as f32 / count as f32;
        ball.pos = center + radius * Vec2::new(angle.cos(), angle.sin());
    }
}

/// Independent uniform position within screen-minus-margin bounds
pub fn random_position<R: Rng>(bounds: Bounds, rng: &mut R) -> Vec2 {
    Vec2::new(
        rng.random_range(EDGE_MARGIN..=bounds.width - EDGE_MARGIN),
        rng.random_range(TOP_MARGIN..=bounds.height - TOP_MARGIN),
    )
}

/// Relocate every ball to an independent uniform on-screen position
pub fn scatter<R: Rng>(balls: &mut Balls, bounds: Bounds, rng: &mut R) {
    for ball in balls.iter_mut() {
        ball.pos = random_position(bounds, rng);
    }
}

/// Symmetric line of `count` points centered on `origin`
pub fn fan_out_line(origin: Vec2, count: usize, spacing: f32, axis: BallAlignment) -> Vec<Vec2> {
    let half_span = spacing * (count.saturating_sub(1)) as f32 / 2.0;
    (0..count)
        .map(|i| {
            let offset = i as f32 * spacing - half_span;
            match axis {
                BallAlignment::Horizontal => origin + Vec2::new(offset, 0.0),
                // A fan with no axis falls back to vertical
                BallAlignment::Vertical | BallAlignment::None => origin + Vec2::new(0.0, offset),
            }
        })
        .collect()
}

/// X coordinate at the tilted-to side, with independent per-ball jitter
pub fn side_x<R: Rng>(side: TiltDirection, bounds: Bounds, rng: &mut R) -> Option<f32> {
    match side {
        TiltDirection::Left => Some(EDGE_MARGIN + rng.random_range(0.0..=SIDE_JITTER)),
        TiltDirection::Right => {
            Some(bounds.width - RIGHT_INSET + rng.random_range(0.0..=SIDE_JITTER))
        }
        TiltDirection::None => None,
    }
}

/// Uniform position within the lower/central settle band
pub fn settle_position<R: Rng>(bounds: Bounds, rng: &mut R) -> Vec2 {
    Vec2::new(
        rng.random_range(EDGE_MARGIN..=bounds.width - EDGE_MARGIN),
        rng.random_range(bounds.height * SETTLE_BAND_TOP..=bounds.height * SETTLE_BAND_BOTTOM),
    )
}
