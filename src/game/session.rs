//! Game session
//!
//! Serializes everything that can mutate the game - taps, rubs, derived
//! sensor events, and the logical clock - into one queue consumed a single
//! event at a time. No handler is ever interrupted mid-mutation, which keeps
//! the (scene, changed-set, snapshot) triple consistent.

use std::collections::VecDeque;

use super::events::GameEvent;
use super::scene::Scene;
use super::setup;
use super::state::{Background, Ball, Bounds, GameState};
use super::{handlers, tick};

/// A running game: state plus the serialized event queue
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    queue: VecDeque<GameEvent>,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::new(seed),
            queue: VecDeque::new(),
        }
    }

    pub fn with_bounds(seed: u64, bounds: Bounds) -> Self {
        Self {
            state: GameState::with_bounds(seed, bounds),
            queue: VecDeque::new(),
        }
    }

    /// Queue an event for the next pump
    pub fn push(&mut self, event: GameEvent) {
        self.queue.push_back(event);
    }

    /// Drain the queue, applying events one at a time in arrival order.
    /// Returns the number of events applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.queue.pop_front() {
            handlers::apply(&mut self.state, event);
            applied += 1;
        }
        applied
    }

    /// Queue and immediately pump a single event
    pub fn handle(&mut self, event: GameEvent) {
        self.push(event);
        self.pump();
    }

    /// Advance the logical clock one tick, firing due deferred effects
    /// through the same serialized path
    pub fn tick(&mut self) {
        tick::tick(&mut self.state);
    }

    /// Advance several ticks at once
    pub fn advance_ticks(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// Leaving the screen: drop queued events, cancel pending deferred
    /// mutations, and reset the game so nothing stale can fire later
    pub fn teardown(&mut self) {
        self.queue.clear();
        self.state.pending.clear();
        self.state.reset();
    }

    /// Debug-only: replay scene setups up to scene `n`
    pub fn jump_to_scene(&mut self, n: u8) -> bool {
        self.queue.clear();
        setup::jump_to_scene(&mut self.state, n)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scene(&self) -> Scene {
        self.state.scene
    }

    pub fn scene_number(&self) -> u8 {
        self.state.scene.number()
    }

    /// Instruction text for the current scene
    pub fn instruction(&self) -> &'static str {
        self.state.scene.instruction()
    }

    /// Live balls in insertion order, for rendering
    pub fn balls(&self) -> &[Ball] {
        self.state.balls.as_slice()
    }

    pub fn background(&self) -> Background {
        self.state.background
    }

    pub fn press_count(&self) -> u32 {
        self.state.press_count
    }

    pub fn completed(&self) -> bool {
        self.state.completed
    }

    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.state.set_bounds(width, height);
    }
}
