//! Level-up upgrades
//!
//! Upgrades are plain data: each [`UpgradeKind`] has a static definition, a
//! pure eligibility check against the player, and an effect dispatched by
//! [`UpgradeKind::apply`].

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::player::Player;
use super::weapon::{Weapon, WeaponKind};

/// Every upgrade that can be offered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    Railgun,
    Shotgun,
    Laser,
    DamageBoost,
    MaxHealth,
    DashFuel,
    ShieldDuration,
}

/// Display data for an upgrade card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpgradeDefinition {
    pub id: &'static str,
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// The effect an upgrade has when chosen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpgradeEffect {
    UnlockWeapon(WeaponKind),
    DamageMultiplier(f32),
    MaxHealth(f32),
    DashRecovery(f32),
    ShieldDuration(f32),
}

/// Highest level at which extra max health is still offered
const MAX_HEALTH_LEVEL_CAP: u32 = 10;

impl UpgradeKind {
    /// The full pool, in catalog order
    pub const POOL: [UpgradeKind; 7] = [
        UpgradeKind::Railgun,
        UpgradeKind::Shotgun,
        UpgradeKind::Laser,
        UpgradeKind::DamageBoost,
        UpgradeKind::MaxHealth,
        UpgradeKind::DashFuel,
        UpgradeKind::ShieldDuration,
    ];

    pub fn definition(&self) -> UpgradeDefinition {
        let (id, icon, title, description) = match self {
            UpgradeKind::Railgun => (
                "railgun",
                "➡️",
                "Armor Piercer",
                "Adds a piercing shot that deals heavy single-target damage.",
            ),
            UpgradeKind::Shotgun => (
                "shotgun",
                "🔥",
                "Scattergun",
                "Fires a wide spread of pellets at close range.",
            ),
            UpgradeKind::Laser => (
                "laser",
                "〰",
                "Laser Beam",
                "Precise, rapid-firing energy weapon.",
            ),
            UpgradeKind::DamageBoost => (
                "damageBoost",
                "💥",
                "Ammo Supply",
                "+20% damage for all weapons.",
            ),
            UpgradeKind::MaxHealth => ("maxHealth", "🛡️", "Extra Armor", "+30 maximum armor."),
            UpgradeKind::DashFuel => (
                "dashFuel",
                "💨",
                "Fuel Boost",
                "Dash fuel refills faster.",
            ),
            UpgradeKind::ShieldDuration => (
                "shield",
                "🛡",
                "Shield Upgrade",
                "Shield lasts longer.",
            ),
        };
        UpgradeDefinition {
            id,
            icon,
            title,
            description,
        }
    }

    pub fn id(&self) -> &'static str {
        self.definition().id
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::POOL.into_iter().find(|u| u.id() == id)
    }

    pub fn effect(&self) -> UpgradeEffect {
        match self {
            UpgradeKind::Railgun => UpgradeEffect::UnlockWeapon(WeaponKind::Railgun),
            UpgradeKind::Shotgun => UpgradeEffect::UnlockWeapon(WeaponKind::Shotgun),
            UpgradeKind::Laser => UpgradeEffect::UnlockWeapon(WeaponKind::Laser),
            UpgradeKind::DamageBoost => UpgradeEffect::DamageMultiplier(0.2),
            UpgradeKind::MaxHealth => UpgradeEffect::MaxHealth(30.0),
            UpgradeKind::DashFuel => UpgradeEffect::DashRecovery(0.25),
            UpgradeKind::ShieldDuration => UpgradeEffect::ShieldDuration(0.25),
        }
    }

    /// Whether this upgrade may be offered to `player` right now
    pub fn is_eligible(&self, player: &Player) -> bool {
        match self.effect() {
            UpgradeEffect::UnlockWeapon(kind) => !player.owns(kind),
            UpgradeEffect::MaxHealth(_) => player.level < MAX_HEALTH_LEVEL_CAP,
            _ => true,
        }
    }

    /// Apply the effect. Returns true if the weapon list changed.
    pub fn apply(&self, player: &mut Player) -> bool {
        apply_effect(self.effect(), player)
    }
}

/// Mutate the player according to an effect
pub fn apply_effect(effect: UpgradeEffect, player: &mut Player) -> bool {
    match effect {
        UpgradeEffect::UnlockWeapon(kind) => {
            player.add_weapon(Weapon::new(kind));
            return true;
        }
        UpgradeEffect::DamageMultiplier(bonus) => player.modify_damage_multiplier(bonus),
        UpgradeEffect::MaxHealth(amount) => player.modify_max_health(amount),
        UpgradeEffect::DashRecovery(bonus) => player.buff_dash_recovery(bonus),
        UpgradeEffect::ShieldDuration(bonus) => player.buff_shield_duration(bonus),
    }
    false
}

/// Draw up to `count` distinct eligible upgrades, uniformly at random.
///
/// Uses a partial Fisher-Yates shuffle over the eligible set. Fewer than
/// `count` eligible upgrades yields all of them.
pub fn draw_choices<R: Rng>(rng: &mut R, player: &Player, count: usize) -> Vec<UpgradeKind> {
    let mut eligible: Vec<UpgradeKind> = UpgradeKind::POOL
        .into_iter()
        .filter(|u| u.is_eligible(player))
        .collect();
    let take = count.min(eligible.len());
    let (chosen, _) = eligible.partial_shuffle(rng, take);
    chosen.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::PlayerTuning;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    fn player() -> Player {
        Player::new(Vec2::ZERO, &PlayerTuning::default())
    }

    #[test]
    fn test_draw_three_distinct() {
        let mut rng = Pcg32::seed_from_u64(1);
        let p = player();
        for _ in 0..50 {
            let choices = draw_choices(&mut rng, &p, 3);
            assert_eq!(choices.len(), 3);
            let unique: HashSet<_> = choices.iter().collect();
            assert_eq!(unique.len(), 3);
        }
    }

    #[test]
    fn test_draw_with_few_eligible_returns_all() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut p = player();
        for kind in [WeaponKind::Railgun, WeaponKind::Shotgun, WeaponKind::Laser] {
            p.add_weapon(Weapon::new(kind));
        }
        p.level = 10;
        // Only damage, dash and shield buffs remain
        let choices = draw_choices(&mut rng, &p, 5);
        assert_eq!(choices.len(), 3);
        let unique: HashSet<_> = choices.iter().copied().collect();
        assert_eq!(
            unique,
            HashSet::from([
                UpgradeKind::DamageBoost,
                UpgradeKind::DashFuel,
                UpgradeKind::ShieldDuration
            ])
        );
    }

    #[test]
    fn test_draw_from_empty_pool() {
        let mut rng = Pcg32::seed_from_u64(3);
        assert!(draw_choices(&mut rng, &player(), 0).is_empty());
    }

    #[test]
    fn test_weapon_unlocks_gated_by_ownership() {
        let mut p = player();
        assert!(UpgradeKind::Laser.is_eligible(&p));
        assert!(UpgradeKind::Laser.apply(&mut p));
        assert!(!UpgradeKind::Laser.is_eligible(&p));
        assert!(p.owns(WeaponKind::Laser));
    }

    #[test]
    fn test_max_health_gated_by_level() {
        let mut p = player();
        p.level = 9;
        assert!(UpgradeKind::MaxHealth.is_eligible(&p));
        p.level = 10;
        assert!(!UpgradeKind::MaxHealth.is_eligible(&p));
    }

    #[test]
    fn test_stat_effects() {
        let mut p = player();
        assert!(!UpgradeKind::DamageBoost.apply(&mut p));
        assert!((p.damage_multiplier - 1.2).abs() < 1e-6);
        UpgradeKind::DashFuel.apply(&mut p);
        assert!((p.dash_recovery_rate - 0.4375).abs() < 1e-6);
        UpgradeKind::ShieldDuration.apply(&mut p);
        assert!((p.shield_duration - 3.125).abs() < 1e-6);
        UpgradeKind::MaxHealth.apply(&mut p);
        assert_eq!(p.max_health, 150.0);
        assert_eq!(p.health, 150.0);
    }

    #[test]
    fn test_id_lookup() {
        for kind in UpgradeKind::POOL {
            assert_eq!(UpgradeKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(UpgradeKind::from_id("nope"), None);
    }
}
