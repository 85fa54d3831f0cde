//! Game state and core simulation types
//!
//! Everything a running session owns lives in [`GameState`]: the player, the
//! entity pools, the wave director, session counters and the seeded RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::combat::DamageLedger;
use super::enemy::Enemy;
use super::events::GameEvent;
use super::orb::XpOrb;
use super::player::Player;
use super::pool::{EntityId, Pool};
use super::projectile::Projectile;
use super::upgrade::UpgradeKind;
use super::wave::WaveDirector;
use crate::consts::MAX_PENDING_EVENTS;
use crate::tuning::{Tuning, TuningError, WaveTuning};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, no run in progress
    #[default]
    MainMenu,
    /// Active gameplay
    Playing,
    /// Waiting for an upgrade choice
    LevelUp,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// Difficulty selected at game start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
}

impl Difficulty {
    /// Seconds between waves
    pub fn spawn_interval(&self, tuning: &WaveTuning) -> f32 {
        match self {
            Difficulty::Easy => tuning.spawn_interval * tuning.easy_interval_factor,
            Difficulty::Normal => tuning.spawn_interval,
        }
    }

    /// Enemies in every wave before the wave bonus
    pub fn base_count(&self, tuning: &WaveTuning) -> u32 {
        match self {
            Difficulty::Easy => tuning.easy_base_count,
            Difficulty::Normal => tuning.normal_base_count,
        }
    }

    pub fn enemy_health_factor(&self, tuning: &WaveTuning) -> f32 {
        match self {
            Difficulty::Easy => tuning.easy_health_factor,
            Difficulty::Normal => 1.0,
        }
    }
}

/// Axis-aligned arena bounds, fixed for a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for PlayArea {
    fn default() -> Self {
        Self {
            min: Vec2::new(-18.0, -10.0),
            max: Vec2::new(18.0, 10.0),
        }
    }
}

impl PlayArea {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Clamp a point to the area shrunk by `inset` on every side
    pub fn clamp_inside(&self, p: Vec2, inset: f32) -> Vec2 {
        p.clamp(self.min + Vec2::splat(inset), self.max - Vec2::splat(inset))
    }
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    /// Multiplies every tick delta (0 while paused)
    pub time_scale: f32,

    /// Seconds of Playing time this run
    pub elapsed: f32,
    pub score: u32,
    pub money: u32,
    pub flags: u32,
    pub waves: WaveDirector,

    /// None outside a run
    pub player: Option<Player>,
    pub enemies: Pool<Enemy>,
    pub projectiles: Pool<Projectile>,
    pub orbs: Pool<XpOrb>,
    pub ledger: DamageLedger,

    /// Upgrades on offer while in LevelUp
    pub offered_upgrades: Vec<UpgradeKind>,
    /// Outgoing notifications, drained by the presentation layer
    pub(crate) events: Vec<GameEvent>,
    /// Last dash/shield ratios pushed out (change detection)
    pub(crate) last_dash_ratio: f32,
    pub(crate) last_shield_ratio: f32,

    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state at the main menu with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a game state with custom tuning, rejecting out-of-range values
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::MainMenu,
            difficulty: Difficulty::Normal,
            time_scale: 1.0,
            elapsed: 0.0,
            score: 0,
            money: 0,
            flags: 0,
            waves: WaveDirector::default(),
            player: None,
            enemies: Pool::new(),
            projectiles: Pool::new(),
            orbs: Pool::new(),
            ledger: DamageLedger::default(),
            offered_upgrades: Vec::new(),
            events: Vec::new(),
            last_dash_ratio: -1.0,
            last_shield_ratio: -1.0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        EntityId(id)
    }

    pub fn play_area(&self) -> PlayArea {
        self.tuning.play_area
    }

    /// Queue an outgoing notification.
    ///
    /// The queue holds at most `MAX_PENDING_EVENTS`; when full, the older half
    /// is dropped so hosts that only poll [`GameState::hud`] stay bounded.
    pub(crate) fn emit(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            let dropped = MAX_PENDING_EVENTS / 2;
            self.events.drain(..dropped);
            log::warn!("Event queue full, dropped {} undrained events", dropped);
        }
        self.events.push(event);
    }

    /// Take every notification produced since the last drain.
    ///
    /// Push-driven hosts should call this once per frame; events left
    /// undrained past the queue limit are lost oldest-first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pending notifications without draining them
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Destroy every pooled entity. Returns how many were removed.
    pub fn clear_entities(&mut self) -> usize {
        self.enemies.clear() + self.projectiles.clear() + self.orbs.clear()
    }

    /// Reset run counters, pools and ledger (phase and player untouched)
    pub(crate) fn reset_run(&mut self) {
        let cleared = self.clear_entities();
        if cleared > 0 {
            log::debug!("Cleared {} entities", cleared);
        }
        self.elapsed = 0.0;
        self.score = 0;
        self.money = 0;
        self.flags = 0;
        self.waves = WaveDirector::default();
        self.ledger.clear();
        self.offered_upgrades.clear();
        self.time_scale = 1.0;
        self.last_dash_ratio = -1.0;
        self.last_shield_ratio = -1.0;
    }
}
