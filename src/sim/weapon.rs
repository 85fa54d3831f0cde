//! Weapon catalog
//!
//! Four archetypes with fixed base stats. Picking up a weapon the player
//! already owns levels the existing instance instead of adding a copy.

use serde::{Deserialize, Serialize};

/// Weapon archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeaponKind {
    DefaultGun,
    Railgun,
    Shotgun,
    Laser,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 4] = [
        WeaponKind::DefaultGun,
        WeaponKind::Railgun,
        WeaponKind::Shotgun,
        WeaponKind::Laser,
    ];

    /// Stable key used for cooldowns and damage attribution
    pub fn id(&self) -> &'static str {
        match self {
            WeaponKind::DefaultGun => "defaultGun",
            WeaponKind::Railgun => "railgun",
            WeaponKind::Shotgun => "shotgun",
            WeaponKind::Laser => "laser",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WeaponKind::DefaultGun => "Main Gun",
            WeaponKind::Railgun => "Armor Piercer",
            WeaponKind::Shotgun => "Scattergun",
            WeaponKind::Laser => "Laser",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WeaponKind::DefaultGun => "🔫",
            WeaponKind::Railgun => "➡️",
            WeaponKind::Shotgun => "🔥",
            WeaponKind::Laser => "〰",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }
}

/// A weapon instance owned by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub damage: f32,
    /// Shots per second
    pub fire_rate: f32,
    pub range: f32,
    pub projectile_speed: f32,
    pub projectiles_per_shot: u32,
    /// Total fan angle in degrees
    pub spread: f32,
    pub piercing: bool,
    pub level: u32,
}

impl Weapon {
    /// Level 1 instance of an archetype
    pub fn new(kind: WeaponKind) -> Self {
        let (damage, fire_rate, range, projectile_speed, projectiles_per_shot, spread, piercing) =
            match kind {
                WeaponKind::DefaultGun => (14.0, 2.8, 6.0, 12.0, 1, 0.0, false),
                WeaponKind::Railgun => (42.0, 1.2, 9.0, 18.0, 1, 0.0, true),
                WeaponKind::Shotgun => (8.0, 1.8, 4.5, 11.0, 5, 25.0, false),
                WeaponKind::Laser => (6.0, 6.0, 8.0, 20.0, 1, 0.0, true),
            };
        Self {
            kind,
            damage,
            fire_rate,
            range,
            projectile_speed,
            projectiles_per_shot,
            spread,
            piercing,
            level: 1,
        }
    }

    /// Stack another copy onto this weapon
    pub fn level_up(&mut self) {
        self.level += 1;
        self.damage *= 1.25;
        self.fire_rate *= 1.1;
        self.range *= 1.05;
    }

    /// Damage per projectile after the player's multiplier
    pub fn damage_with(&self, multiplier: f32) -> f32 {
        self.damage * multiplier
    }

    /// Seconds between shots
    pub fn cooldown(&self) -> f32 {
        1.0 / self.fire_rate
    }
}
