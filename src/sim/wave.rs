//! Wave director: when enemies arrive, how many, and where

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Difficulty, PlayArea};
use crate::consts::TIMER_EPSILON;
use crate::tuning::WaveTuning;

/// A wave that is due this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveSpawn {
    pub wave: u32,
    pub count: u32,
}

/// Spawn timer and wave counter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveDirector {
    pub spawn_timer: f32,
    /// Waves spawned so far this run
    pub wave: u32,
}

impl WaveDirector {
    /// Accumulate Playing time. Returns the next wave once the interval elapses.
    ///
    /// Rounding in the summed deltas is absorbed, so 150 steps of 1/60 s
    /// reach a 2.5 s interval on the 150th step.
    pub fn advance(&mut self, dt: f32, difficulty: Difficulty, tuning: &WaveTuning) -> Option<WaveSpawn> {
        self.spawn_timer += dt;
        if self.spawn_timer + TIMER_EPSILON < difficulty.spawn_interval(tuning) {
            return None;
        }
        self.spawn_timer = 0.0;
        self.wave += 1;
        Some(WaveSpawn {
            wave: self.wave,
            count: spawn_count(difficulty, self.wave, tuning),
        })
    }
}

/// Enemies in a wave: base count plus one per three waves
pub fn spawn_count(difficulty: Difficulty, wave: u32, tuning: &WaveTuning) -> u32 {
    difficulty.base_count(tuning) + wave / 3
}

/// Random point `margin` units outside one of the four arena edges
pub fn spawn_position<R: Rng>(rng: &mut R, area: &PlayArea, margin: f32) -> Vec2 {
    let edge = rng.random_range(0..4u32);
    match edge {
        0 => Vec2::new(area.min.x - margin, rng.random_range(area.min.y..=area.max.y)),
        1 => Vec2::new(area.max.x + margin, rng.random_range(area.min.y..=area.max.y)),
        2 => Vec2::new(rng.random_range(area.min.x..=area.max.x), area.min.y - margin),
        _ => Vec2::new(rng.random_range(area.min.x..=area.max.x), area.max.y + margin),
    }
}
