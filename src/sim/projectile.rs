//! Player projectiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pool::{EntityId, Pooled};
use super::weapon::{Weapon, WeaponKind};
use crate::consts::{MUZZLE_OFFSET, PROJECTILE_HIT_RADIUS, PROJECTILE_LIFETIME};

/// A projectile in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    /// Firing weapon, for damage attribution
    pub weapon: WeaponKind,
    pub piercing: bool,
    pub pos: Vec2,
    /// Unit direction of travel
    pub dir: Vec2,
    pub speed: f32,
    pub damage: f32,
    /// Seconds left before the projectile fizzles
    pub lifetime: f32,
    /// Enemies already hit (piercing projectiles only)
    #[serde(default)]
    pub hit: Vec<EntityId>,
}

impl Pooled for Projectile {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Projectile {
    /// Fire from `origin` along `dir`, spawning slightly ahead of the shooter
    pub fn fire(id: EntityId, weapon: &Weapon, origin: Vec2, dir: Vec2, damage: f32) -> Self {
        let dir = dir.normalize_or_zero();
        Self {
            id,
            weapon: weapon.kind,
            piercing: weapon.piercing,
            pos: origin + dir * MUZZLE_OFFSET,
            dir,
            speed: weapon.projectile_speed,
            damage,
            lifetime: PROJECTILE_LIFETIME,
            hit: Vec::new(),
        }
    }

    /// Move and age the projectile. Returns false once it has expired.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.pos += self.dir * self.speed * dt;
        self.lifetime -= dt;
        self.lifetime > 0.0
    }

    /// Whether `enemy_pos` is close enough to be struck
    pub fn touches(&self, enemy_pos: Vec2) -> bool {
        self.pos.distance_squared(enemy_pos) <= PROJECTILE_HIT_RADIUS * PROJECTILE_HIT_RADIUS
    }

    pub fn has_hit(&self, enemy: EntityId) -> bool {
        self.hit.contains(&enemy)
    }
}
