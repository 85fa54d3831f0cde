//! Enemy archetypes and the chase-and-bite enemy record

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pool::{EntityId, Pooled};
use super::state::Difficulty;
use crate::consts::ENEMY_MELEE_RANGE;
use crate::tuning::WaveTuning;

/// Enemy strength tiers, unlocked as waves progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyTier {
    Infantry,
    Armored,
    Elite,
}

impl EnemyTier {
    /// Tier for a wave: 1 for waves 0-4, 2 for 5-9, 3 from wave 10 on
    pub fn for_wave(wave: u32) -> Self {
        match (1 + wave / 5).clamp(1, 3) {
            1 => EnemyTier::Infantry,
            2 => EnemyTier::Armored,
            _ => EnemyTier::Elite,
        }
    }

    pub fn number(&self) -> u32 {
        match self {
            EnemyTier::Infantry => 1,
            EnemyTier::Armored => 2,
            EnemyTier::Elite => 3,
        }
    }
}

/// Stat row used to spawn an enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnemyArchetype {
    pub tier: EnemyTier,
    pub name: &'static str,
    pub health: f32,
    pub speed: f32,
    pub damage: f32,
    pub xp_reward: f32,
    pub score_reward: u32,
}

impl EnemyArchetype {
    /// Base row for a tier (Normal difficulty)
    pub fn for_tier(tier: EnemyTier) -> Self {
        match tier {
            EnemyTier::Infantry => Self {
                tier,
                name: "Infantry",
                health: 25.0,
                speed: 2.6,
                damage: 8.0,
                xp_reward: 10.0,
                score_reward: 25,
            },
            EnemyTier::Armored => Self {
                tier,
                name: "Armored",
                health: 60.0,
                speed: 2.2,
                damage: 12.0,
                xp_reward: 18.0,
                score_reward: 45,
            },
            EnemyTier::Elite => Self {
                tier,
                name: "Elite",
                health: 120.0,
                speed: 1.8,
                damage: 18.0,
                xp_reward: 30.0,
                score_reward: 75,
            },
        }
    }

    /// Row for the given wave. Difficulty scales health only.
    pub fn sample(difficulty: Difficulty, wave: u32, tuning: &WaveTuning) -> Self {
        let mut row = Self::for_tier(EnemyTier::for_wave(wave));
        row.health *= difficulty.enemy_health_factor(tuning);
        row
    }

    /// Seconds between bites; tougher enemies bite faster
    pub fn attack_cooldown(&self) -> f32 {
        (1.1 - 0.02 * self.score_reward as f32).max(0.6)
    }
}

/// A live enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub tier: EnemyTier,
    pub pos: Vec2,
    pub health: f32,
    pub speed: f32,
    pub damage: f32,
    pub xp_reward: f32,
    pub score_reward: u32,
    pub attack_cooldown: f32,
    /// Counts down; the enemy may bite once this is <= 0
    pub attack_timer: f32,
}

impl Pooled for Enemy {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Enemy {
    pub fn spawn(id: EntityId, archetype: &EnemyArchetype, pos: Vec2) -> Self {
        Self {
            id,
            tier: archetype.tier,
            pos,
            health: archetype.health,
            speed: archetype.speed,
            damage: archetype.damage,
            xp_reward: archetype.xp_reward,
            score_reward: archetype.score_reward,
            attack_cooldown: archetype.attack_cooldown(),
            attack_timer: 0.0,
        }
    }

    /// Chase the target. Returns the bite damage if the enemy attacks this frame.
    pub fn update(&mut self, target: Vec2, dt: f32) -> Option<f32> {
        self.attack_timer -= dt;
        let dir = (target - self.pos).normalize_or_zero();
        self.pos += dir * self.speed * dt;

        if self.pos.distance_squared(target) <= ENEMY_MELEE_RANGE * ENEMY_MELEE_RANGE {
            self.try_attack()
        } else {
            None
        }
    }

    fn try_attack(&mut self) -> Option<f32> {
        if self.attack_timer > 0.0 {
            return None;
        }
        self.attack_timer = self.attack_cooldown;
        Some(self.damage)
    }

    /// Apply damage. Returns true if this hit took the enemy to zero.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.health -= amount;
        if self.health <= 0.0 {
            self.health = 0.0;
            true
        } else {
            false
        }
    }
}
