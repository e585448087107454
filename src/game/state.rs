//! Game state and core types
//!
//! Everything the scene state machine mutates lives here. State is
//! deterministic and serializable: randomized behaviors draw from the
//! state-owned seeded RNG.

use std::collections::{BTreeSet, HashMap};

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::scene::Scene;
use super::tick::{Deferred, DeferredEffect};
use crate::consts::*;
use crate::start_position;

/// Stable ball identity
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BallId(pub u32);

impl std::fmt::Display for BallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ball#{}", self.0)
    }
}

/// The small fixed palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallColor {
    #[default]
    Yellow,
    Red,
    Blue,
    White,
}

/// Records how a ball was spawned (fan-out axis)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallAlignment {
    #[default]
    None,
    Vertical,
    Horizontal,
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: BallId,
    pub pos: Vec2,
    pub color: BallColor,
    /// Visible and interactable
    pub active: bool,
    pub alignment: BallAlignment,
    pub scale: f32,
    pub press_count: u32,
}

impl Ball {
    pub fn new(id: BallId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            color: BallColor::Yellow,
            active: true,
            alignment: BallAlignment::None,
            scale: 1.0,
            press_count: 0,
        }
    }
}

/// Insertion-ordered ball arena with O(1) lookup by id
///
/// The presentation layer renders the ordered slice; handlers address balls
/// by id. Serialized as the plain ball list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Ball>", into = "Vec<Ball>")]
pub struct Balls {
    slots: Vec<Ball>,
    index: HashMap<BallId, usize>,
}

impl Balls {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, id: BallId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: BallId) -> Option<&Ball> {
        self.index.get(&id).map(|&i| &self.slots[i])
    }

    pub fn get_mut(&mut self, id: BallId) -> Option<&mut Ball> {
        match self.index.get(&id) {
            Some(&i) => Some(&mut self.slots[i]),
            None => None,
        }
    }

    /// Append a ball, preserving insertion order
    pub fn push(&mut self, ball: Ball) {
        self.index.insert(ball.id, self.slots.len());
        self.slots.push(ball);
    }

    /// Remove by id, preserving the order of the remaining balls
    pub fn remove(&mut self, id: BallId) -> Option<Ball> {
        let i = self.index.remove(&id)?;
        let ball = self.slots.remove(i);
        self.rebuild_index();
        Some(ball)
    }

    /// Replace the whole collection (scene-boundary swaps)
    pub fn replace_all(&mut self, balls: Vec<Ball>) {
        self.slots = balls;
        self.rebuild_index();
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
    }

    pub fn last(&self) -> Option<&Ball> {
        self.slots.last()
    }

    /// Balls in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Ball> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Ball> {
        self.slots.iter_mut()
    }

    pub fn as_slice(&self) -> &[Ball] {
        &self.slots
    }

    pub fn ids(&self) -> Vec<BallId> {
        self.slots.iter().map(|b| b.id).collect()
    }

    /// Any active ball of the given color left?
    pub fn any_active(&self, color: BallColor) -> bool {
        self.slots.iter().any(|b| b.active && b.color == color)
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .slots
            .iter()
            .enumerate()
            .map(|(i, b)| (b.id, i))
            .collect();
    }
}

impl From<Vec<Ball>> for Balls {
    fn from(slots: Vec<Ball>) -> Self {
        let mut balls = Self {
            slots,
            index: HashMap::new(),
        };
        balls.rebuild_index();
        balls
    }
}

impl From<Balls> for Vec<Ball> {
    fn from(balls: Balls) -> Self {
        balls.slots
    }
}

/// Background tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BackgroundTone {
    #[default]
    White,
    Black,
}

/// Background color state: a tone plus an opacity the blow scenes fade out
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub tone: BackgroundTone,
    pub opacity: f32,
}

impl Default for Background {
    fn default() -> Self {
        Self::white()
    }
}

impl Background {
    pub fn white() -> Self {
        Self {
            tone: BackgroundTone::White,
            opacity: 1.0,
        }
    }

    pub fn black() -> Self {
        Self {
            tone: BackgroundTone::Black,
            opacity: 1.0,
        }
    }

    /// Fade the current tone toward transparent; 0 = opaque, 1 = gone
    pub fn fade(&mut self, amount: f32) {
        self.opacity = (1.0 - amount).clamp(0.0, 1.0);
    }
}

/// Screen bounds reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current scene, sole driver of event meaning
    pub scene: Scene,
    pub balls: Balls,
    pub background: Background,
    pub bounds: Bounds,
    /// Shared press counter for the five-press scenes
    pub press_count: u32,
    /// Ball recolored in the first rub scene; the second rub must differ
    pub last_rubbed: Option<BallId>,
    /// Ids of the two balls swapped for spot-the-difference
    pub changed: BTreeSet<BallId>,
    /// Ids the player has correctly flagged so far
    pub found: BTreeSet<BallId>,
    /// Deep copy of the collection taken at the scene-13 boundary
    pub snapshot: Vec<Ball>,
    /// Set once the white finale ball has been tapped
    pub completed: bool,
    /// Logical clock (ticks)
    pub time_ticks: u64,
    /// Scheduled future mutations, fired by `tick` in due order
    pub pending: Vec<Deferred>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new game with the default bounds
    pub fn new(seed: u64) -> Self {
        Self::with_bounds(seed, Bounds::default())
    }

    pub fn with_bounds(seed: u64, bounds: Bounds) -> Self {
        let mut state = Self {
            seed,
            scene: Scene::FirstTap,
            balls: Balls::default(),
            background: Background::white(),
            bounds,
            press_count: 0,
            last_rubbed: None,
            changed: BTreeSet::new(),
            found: BTreeSet::new(),
            snapshot: Vec::new(),
            completed: false,
            time_ticks: 0,
            pending: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        state.spawn_start_ball();
        state
    }

    /// Allocate a new ball id
    pub fn next_ball_id(&mut self) -> BallId {
        let id = BallId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn a ball at the given position, default color
    pub fn spawn_ball(&mut self, pos: Vec2) -> BallId {
        let id = self.next_ball_id();
        self.balls.push(Ball::new(id, pos));
        id
    }

    fn spawn_start_ball(&mut self) {
        let pos = start_position(self.bounds.width, self.bounds.height);
        self.spawn_ball(pos);
    }

    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.bounds = Bounds { width, height };
    }

    /// Scheduled-effect entry point; fired by `tick` after `delay_ticks`
    pub fn schedule(&mut self, delay_ticks: u64, effect: DeferredEffect) {
        self.pending.push(Deferred {
            due_tick: self.time_ticks + delay_ticks,
            effect,
        });
    }

    /// Deep-copy the collection, forcing every ball active
    pub fn capture_snapshot(&mut self) {
        self.snapshot = self
            .balls
            .iter()
            .map(|b| Ball {
                active: true,
                ..b.clone()
            })
            .collect();
    }

    /// Restore the snapshot verbatim; every restored ball is active
    /// regardless of its state at capture time
    pub fn restore_snapshot(&mut self) {
        let balls: Vec<Ball> = self
            .snapshot
            .iter()
            .map(|b| Ball {
                active: true,
                ..b.clone()
            })
            .collect();
        self.balls.replace_all(balls);
    }

    /// Full reset to the initial state: single yellow ball, scene 1, all
    /// counters and sets cleared, pending effects canceled
    pub fn reset(&mut self) {
        self.scene = Scene::FirstTap;
        self.balls.clear();
        self.background = Background::white();
        self.press_count = 0;
        self.last_rubbed = None;
        self.changed.clear();
        self.found.clear();
        self.snapshot.clear();
        self.completed = false;
        self.pending.clear();
        self.spawn_start_ball();
    }
}
