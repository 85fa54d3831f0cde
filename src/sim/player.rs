//! The player: movement, vitals, dash/shield resources, XP and weapons

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::PlayArea;
use super::weapon::{Weapon, WeaponKind};
use crate::consts::{DASH_SPEED_FACTOR, PLAY_AREA_INSET};
use crate::tuning::PlayerTuning;

/// What happened when damage was applied to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Player is already dead
    Ignored,
    /// Shield soaked the hit
    Shielded,
    Hurt,
    /// This hit took health to zero
    Killed,
}

/// The player's full resource economy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub velocity: Vec2,

    pub health: f32,
    pub max_health: f32,
    pub xp: f32,
    pub level: u32,

    /// 0-1
    pub dash_fuel: f32,
    pub dashing: bool,
    pub dash_timer: f32,

    /// 0-1, shield can only be raised when full
    pub shield_charge: f32,
    pub shield_active: bool,
    pub shield_timer: f32,

    /// Applied to every projectile at fire time; only ever grows
    pub damage_multiplier: f32,
    pub input_enabled: bool,

    pub move_speed: f32,
    pub dash_cost: f32,
    pub dash_duration: f32,
    pub dash_recovery_rate: f32,
    pub shield_duration: f32,
    pub shield_recovery_rate: f32,
    xp_base: f32,
    xp_per_level: f32,

    /// Insertion order is display order
    weapons: Vec<Weapon>,
    cooldowns: HashMap<WeaponKind, f32>,
}

impl Player {
    /// Fresh level-1 player holding the default gun
    pub fn new(pos: Vec2, tuning: &PlayerTuning) -> Self {
        let mut player = Self {
            pos,
            velocity: Vec2::ZERO,
            health: tuning.max_health,
            max_health: tuning.max_health,
            xp: 0.0,
            level: 1,
            dash_fuel: 1.0,
            dashing: false,
            dash_timer: 0.0,
            shield_charge: 1.0,
            shield_active: false,
            shield_timer: 0.0,
            damage_multiplier: 1.0,
            input_enabled: true,
            move_speed: tuning.move_speed,
            dash_cost: tuning.dash_cost,
            dash_duration: tuning.dash_duration,
            dash_recovery_rate: tuning.dash_recovery_rate,
            shield_duration: tuning.shield_duration,
            shield_recovery_rate: tuning.shield_recovery_rate,
            xp_base: tuning.xp_base,
            xp_per_level: tuning.xp_per_level,
            weapons: Vec::new(),
            cooldowns: HashMap::new(),
        };
        player.add_weapon(Weapon::new(WeaponKind::DefaultGun));
        player
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn health_ratio(&self) -> f32 {
        if self.max_health <= 0.0 {
            0.0
        } else {
            (self.health / self.max_health).clamp(0.0, 1.0)
        }
    }

    /// XP needed to go from `level` to `level + 1`
    pub fn xp_requirement(&self, level: u32) -> f32 {
        self.xp_base + level.saturating_sub(1) as f32 * self.xp_per_level
    }

    pub fn xp_required(&self) -> f32 {
        self.xp_requirement(self.level)
    }

    // === Movement ===

    /// Integrate the movement intent and keep the player inside the arena
    pub fn apply_movement(&mut self, intent: Vec2, dt: f32, area: &PlayArea) {
        let intent = intent.clamp_length_max(1.0);
        let speed = if self.dashing {
            self.move_speed * DASH_SPEED_FACTOR
        } else {
            self.move_speed
        };
        self.velocity = intent * speed;
        self.pos = area.clamp_inside(self.pos + self.velocity * dt, PLAY_AREA_INSET);
    }

    // === Abilities ===

    /// Start a dash if not already dashing and enough fuel is left
    pub fn try_dash(&mut self) -> bool {
        if self.dashing || self.dash_fuel < self.dash_cost {
            return false;
        }
        self.dash_fuel = (self.dash_fuel - self.dash_cost).clamp(0.0, 1.0);
        self.dash_timer = self.dash_duration;
        self.dashing = true;
        true
    }

    /// Raise the shield if it is down and fully charged
    pub fn try_shield(&mut self) -> bool {
        if self.shield_active || self.shield_charge < 1.0 {
            return false;
        }
        self.shield_charge = 0.0;
        self.shield_timer = self.shield_duration;
        self.shield_active = true;
        true
    }

    /// Handle ability presses and count down active dash/shield
    pub fn update_abilities(&mut self, dash_pressed: bool, shield_pressed: bool, dt: f32) {
        if dash_pressed {
            self.try_dash();
        }
        if self.dashing {
            self.dash_timer -= dt;
            if self.dash_timer <= 0.0 {
                self.dash_timer = 0.0;
                self.dashing = false;
            }
        }

        if shield_pressed {
            self.try_shield();
        }
        if self.shield_active {
            self.shield_timer -= dt;
            if self.shield_timer <= 0.0 {
                self.shield_timer = 0.0;
                self.shield_active = false;
                self.shield_charge = 0.0;
            }
        }
    }

    /// Refill dash fuel and shield charge. Runs even with input disabled.
    pub fn regenerate(&mut self, dt: f32) {
        if !self.dashing {
            self.dash_fuel = (self.dash_fuel + self.dash_recovery_rate * dt).clamp(0.0, 1.0);
        }
        if !self.shield_active {
            self.shield_charge =
                (self.shield_charge + self.shield_recovery_rate * dt).clamp(0.0, 1.0);
        }
    }

    // === Vitals and XP ===

    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if !self.is_alive() {
            return DamageOutcome::Ignored;
        }
        if self.shield_active {
            return DamageOutcome::Shielded;
        }

        self.health -= amount.max(0.0);
        if self.health <= 0.0 {
            self.health = 0.0;
            self.input_enabled = false;
            return DamageOutcome::Killed;
        }
        DamageOutcome::Hurt
    }

    /// Add XP. Returns true if the player levelled up.
    ///
    /// At most one level is gained per call, however much XP arrives. Any
    /// surplus stays banked and counts toward the next collection.
    pub fn collect_xp(&mut self, amount: f32) -> bool {
        self.xp += amount.max(0.0);
        let required = self.xp_required();
        if self.xp >= required {
            self.xp -= required;
            self.level += 1;
            return true;
        }
        false
    }

    // === Weapons ===

    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    pub fn owns(&self, kind: WeaponKind) -> bool {
        self.weapons.iter().any(|w| w.kind == kind)
    }

    /// Add a weapon, or level up the owned copy. Returns true if it levelled.
    pub fn add_weapon(&mut self, weapon: Weapon) -> bool {
        let kind = weapon.kind;
        let levelled = match self.weapons.iter_mut().find(|w| w.kind == kind) {
            Some(existing) => {
                existing.level_up();
                true
            }
            None => {
                self.weapons.push(weapon);
                false
            }
        };
        self.cooldowns.insert(kind, 0.0);
        levelled
    }

    pub fn cooldown(&self, kind: WeaponKind) -> f32 {
        self.cooldowns.get(&kind).copied().unwrap_or(0.0)
    }

    /// Count down weapon cooldowns and pick the weapons that fire this frame.
    ///
    /// A weapon fires when its cooldown has run out and the target is within
    /// its range. Returns indices into [`Player::weapons`].
    pub fn ready_weapons(&mut self, dt: f32, target_distance: Option<f32>) -> Vec<usize> {
        let mut firing = Vec::new();
        for (i, weapon) in self.weapons.iter().enumerate() {
            let timer = self.cooldowns.entry(weapon.kind).or_insert(0.0);
            *timer -= dt;
            if *timer > 0.0 {
                continue;
            }
            match target_distance {
                Some(distance) if distance <= weapon.range => {
                    firing.push(i);
                    *timer = weapon.cooldown();
                }
                _ => {}
            }
        }
        firing
    }

    // === Upgrade hooks ===

    pub fn modify_damage_multiplier(&mut self, additive: f32) {
        self.damage_multiplier *= 1.0 + additive.max(0.0);
    }

    pub fn modify_max_health(&mut self, amount: f32) {
        self.max_health += amount;
        self.health = (self.health + amount).clamp(0.0, self.max_health);
    }

    pub fn buff_dash_recovery(&mut self, bonus: f32) {
        self.dash_recovery_rate *= 1.0 + bonus;
    }

    pub fn buff_shield_duration(&mut self, bonus: f32) {
        self.shield_duration *= 1.0 + bonus;
    }
}
