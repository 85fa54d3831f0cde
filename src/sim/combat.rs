//! Combat resolution
//!
//! Targeting, weapon fire, projectile hits, enemy bites and kill rewards.
//! Every step walks the pools in id order so a seeded run replays exactly.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::events::GameEvent;
use super::orb::XpOrb;
use super::player::DamageOutcome;
use super::pool::{EntityId, Pool};
use super::projectile::Projectile;
use super::state::{GamePhase, GameState};
use super::weapon::WeaponKind;
use crate::consts::FLAG_DROP_CHANCE;
use crate::rotate_degrees;

/// Damage dealt per weapon during the current run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageLedger {
    /// First-hit order
    totals: Vec<(WeaponKind, f32)>,
}

impl DamageLedger {
    pub fn record(&mut self, weapon: WeaponKind, amount: f32) {
        match self.totals.iter_mut().find(|(k, _)| *k == weapon) {
            Some((_, total)) => *total += amount,
            None => self.totals.push((weapon, amount)),
        }
    }

    pub fn total(&self, weapon: WeaponKind) -> f32 {
        self.totals
            .iter()
            .find(|(k, _)| *k == weapon)
            .map(|(_, t)| *t)
            .unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn clear(&mut self) {
        self.totals.clear();
    }

    /// (display name, damage) pairs, highest damage first
    pub fn by_display_name(&self) -> Vec<(String, f32)> {
        let mut rows: Vec<(String, f32)> = self
            .totals
            .iter()
            .map(|(k, t)| (k.display_name().to_string(), *t))
            .collect();
        rows.sort_by(|a, b| b.1.total_cmp(&a.1));
        rows
    }
}

/// Nearest enemy to `from`. Ties go to the first enemy in pool order.
pub fn acquire_target(from: Vec2, enemies: &Pool<Enemy>) -> Option<(EntityId, Vec2)> {
    let mut best: Option<(EntityId, Vec2)> = None;
    let mut best_sqr = f32::INFINITY;
    for enemy in enemies.iter() {
        let sqr = enemy.pos.distance_squared(from);
        if sqr < best_sqr {
            best_sqr = sqr;
            best = Some((enemy.id, enemy.pos));
        }
    }
    best
}

/// Directions for one shot: `count` projectiles fanned evenly across `spread` degrees
pub fn shot_directions(base: Vec2, count: u32, spread: f32) -> Vec<Vec2> {
    (0..count)
        .map(|i| {
            let angle = if count > 1 {
                spread * (i as f32 / (count - 1) as f32 - 0.5)
            } else {
                0.0
            };
            rotate_degrees(base, angle)
        })
        .collect()
}

impl GameState {
    /// Aim at the nearest enemy and fire every weapon that is ready
    pub(crate) fn fire_weapons(&mut self, dt: f32) {
        let target = match &self.player {
            Some(player) => acquire_target(player.pos, &self.enemies),
            None => return,
        };
        let Some(player) = self.player.as_mut() else {
            return;
        };

        let origin = player.pos;
        let distance = target.map(|(_, pos)| origin.distance(pos));
        let firing = player.ready_weapons(dt, distance);
        let Some((_, target_pos)) = target else {
            return;
        };

        let base = (target_pos - origin).normalize_or_zero();
        let multiplier = player.damage_multiplier;
        let shots: Vec<_> = firing
            .into_iter()
            .map(|i| player.weapons()[i].clone())
            .collect();

        for weapon in shots {
            let damage = weapon.damage_with(multiplier);
            for dir in shot_directions(base, weapon.projectiles_per_shot, weapon.spread) {
                let id = self.next_entity_id();
                self.projectiles
                    .register(Projectile::fire(id, &weapon, origin, dir, damage));
            }
            log::trace!("{} fired", weapon.kind.id());
        }
    }

    /// Move every enemy toward the player and resolve bites
    pub(crate) fn update_enemies(&mut self, dt: f32) {
        let Some(target) = self.player.as_ref().map(|p| p.pos) else {
            return;
        };
        for id in self.enemies.ids() {
            let Some(enemy) = self.enemies.get_mut(id) else {
                continue;
            };
            if let Some(damage) = enemy.update(target, dt) {
                self.damage_player(damage);
                if self.phase != GamePhase::Playing {
                    break;
                }
            }
        }
    }

    /// Apply damage to the player, ending the run on a lethal hit
    pub fn damage_player(&mut self, amount: f32) -> DamageOutcome {
        let Some(player) = self.player.as_mut() else {
            return DamageOutcome::Ignored;
        };
        let outcome = player.take_damage(amount);
        match outcome {
            DamageOutcome::Hurt => self.emit_health(),
            DamageOutcome::Killed => {
                self.emit_health();
                log::info!("Player died");
                self.end_game(false);
            }
            DamageOutcome::Shielded | DamageOutcome::Ignored => {}
        }
        outcome
    }

    /// Move projectiles, expire old ones and resolve hits
    pub(crate) fn update_projectiles(&mut self, dt: f32) {
        for pid in self.projectiles.ids() {
            let Some(projectile) = self.projectiles.get_mut(pid) else {
                continue;
            };
            if !projectile.advance(dt) {
                self.projectiles.unregister(pid);
                continue;
            }

            let mut killed = Vec::new();
            let mut consumed = false;
            for enemy in self.enemies.iter_mut() {
                if enemy.health <= 0.0
                    || projectile.has_hit(enemy.id)
                    || !projectile.touches(enemy.pos)
                {
                    continue;
                }
                if enemy.take_damage(projectile.damage) {
                    killed.push(enemy.id);
                }
                self.ledger.record(projectile.weapon, projectile.damage);

                if projectile.piercing {
                    projectile.hit.push(enemy.id);
                } else {
                    consumed = true;
                    break;
                }
            }

            if consumed {
                self.projectiles.unregister(pid);
            }
            for eid in killed {
                if let Some(enemy) = self.enemies.unregister(eid) {
                    self.on_enemy_killed(enemy);
                }
            }
        }
    }

    /// Pay out rewards for a dead enemy and drop its XP orb
    pub(crate) fn on_enemy_killed(&mut self, enemy: Enemy) {
        let reward = enemy.score_reward;
        self.score += reward;
        self.money += (reward / 2).max(1);
        let flag_dropped = self.rng.random_bool(FLAG_DROP_CHANCE);
        if flag_dropped {
            self.flags += 1;
            log::info!("Flag captured ({} total)", self.flags);
        }

        let id = self.next_entity_id();
        self.orbs.register(XpOrb::new(id, enemy.pos, enemy.xp_reward));

        self.emit(GameEvent::EnemyKilled {
            score_reward: reward,
            flag_dropped,
        });
        self.emit_hud();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::{EnemyArchetype, EnemyTier};
    use crate::sim::state::Difficulty;
    use crate::sim::weapon::Weapon;

    fn playing_state() -> GameState {
        let mut state = GameState::new(99);
        state.start_game(Difficulty::Normal);
        state.drain_events();
        state
    }

    fn add_enemy(state: &mut GameState, pos: Vec2, tier: EnemyTier) -> EntityId {
        let id = state.next_entity_id();
        let row = EnemyArchetype::for_tier(tier);
        state.enemies.register(Enemy::spawn(id, &row, pos));
        id
    }

    fn add_projectile(state: &mut GameState, kind: WeaponKind, pos: Vec2, damage: f32) -> EntityId {
        let id = state.next_entity_id();
        let weapon = Weapon::new(kind);
        let mut p = Projectile::fire(id, &weapon, Vec2::ZERO, Vec2::X, damage);
        p.pos = pos;
        p.speed = 0.0;
        state.projectiles.register(p);
        id
    }

    #[test]
    fn test_acquire_nearest_first_wins_ties() {
        let mut state = playing_state();
        let a = add_enemy(&mut state, Vec2::new(3.0, 0.0), EnemyTier::Infantry);
        add_enemy(&mut state, Vec2::new(-3.0, 0.0), EnemyTier::Infantry);
        let c = add_enemy(&mut state, Vec2::new(0.0, 2.0), EnemyTier::Infantry);
        assert_eq!(acquire_target(Vec2::ZERO, &state.enemies).map(|t| t.0), Some(c));
        state.enemies.unregister(c);
        assert_eq!(acquire_target(Vec2::ZERO, &state.enemies).map(|t| t.0), Some(a));
    }

    #[test]
    fn test_no_enemies_no_target() {
        let state = playing_state();
        assert!(acquire_target(Vec2::ZERO, &state.enemies).is_none());
    }

    #[test]
    fn test_shot_directions_fan() {
        let dirs = shot_directions(Vec2::X, 5, 25.0);
        assert_eq!(dirs.len(), 5);
        let angles: Vec<f32> = dirs.iter().map(|d| d.y.atan2(d.x).to_degrees()).collect();
        let expected = [-12.5, -6.25, 0.0, 6.25, 12.5];
        for (a, e) in angles.iter().zip(expected) {
            assert!((a - e).abs() < 1e-3, "{a} vs {e}");
        }
        let single = shot_directions(Vec2::Y, 1, 25.0);
        assert!((single[0] - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn test_non_piercing_hits_only_first() {
        let mut state = playing_state();
        let first = add_enemy(&mut state, Vec2::new(5.0, 0.0), EnemyTier::Elite);
        let second = add_enemy(&mut state, Vec2::new(5.1, 0.0), EnemyTier::Elite);
        add_projectile(&mut state, WeaponKind::DefaultGun, Vec2::new(5.05, 0.0), 14.0);

        state.update_projectiles(0.01);

        assert_eq!(state.enemies.get(first).unwrap().health, 106.0);
        assert_eq!(state.enemies.get(second).unwrap().health, 120.0);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.ledger.total(WeaponKind::DefaultGun), 14.0);
    }

    #[test]
    fn test_piercing_hits_all_and_survives() {
        let mut state = playing_state();
        let first = add_enemy(&mut state, Vec2::new(5.0, 0.0), EnemyTier::Elite);
        let second = add_enemy(&mut state, Vec2::new(5.1, 0.0), EnemyTier::Elite);
        let pid = add_projectile(&mut state, WeaponKind::Railgun, Vec2::new(5.05, 0.0), 42.0);

        state.update_projectiles(0.01);
        assert_eq!(state.enemies.get(first).unwrap().health, 78.0);
        assert_eq!(state.enemies.get(second).unwrap().health, 78.0);
        assert!(state.projectiles.contains(pid));

        // Already-hit enemies are not hit again
        state.update_projectiles(0.01);
        assert_eq!(state.enemies.get(first).unwrap().health, 78.0);
        assert_eq!(state.ledger.total(WeaponKind::Railgun), 84.0);
    }

    #[test]
    fn test_kill_pays_out_once_and_drops_orb() {
        let mut state = playing_state();
        let eid = add_enemy(&mut state, Vec2::new(5.0, 0.0), EnemyTier::Infantry);
        add_projectile(&mut state, WeaponKind::Laser, Vec2::new(5.0, 0.0), 30.0);
        add_projectile(&mut state, WeaponKind::Laser, Vec2::new(5.0, 0.0), 30.0);

        state.update_projectiles(0.01);

        assert!(!state.enemies.contains(eid));
        assert_eq!(state.score, 25);
        assert_eq!(state.money, 12);
        assert_eq!(state.orbs.len(), 1);
        let orb = state.orbs.iter().next().unwrap();
        assert_eq!(orb.value, 10.0);
        assert_eq!(orb.pos, Vec2::new(5.0, 0.0));
        // Second projectile found nothing to hit
        assert_eq!(state.ledger.total(WeaponKind::Laser), 30.0);
        let kills = state
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyKilled { .. }))
            .count();
        assert_eq!(kills, 1);
    }

    #[test]
    fn test_ledger_counts_lethal_overkill() {
        let mut state = playing_state();
        add_enemy(&mut state, Vec2::new(5.0, 0.0), EnemyTier::Infantry);
        add_projectile(&mut state, WeaponKind::Railgun, Vec2::new(5.0, 0.0), 42.0);
        state.update_projectiles(0.01);
        assert_eq!(state.ledger.total(WeaponKind::Railgun), 42.0);
    }

    #[test]
    fn test_projectile_expires() {
        let mut state = playing_state();
        let pid = add_projectile(&mut state, WeaponKind::DefaultGun, Vec2::new(5.0, 0.0), 14.0);
        state.update_projectiles(2.0);
        assert!(state.projectiles.contains(pid));
        state.update_projectiles(0.5);
        assert!(!state.projectiles.contains(pid));
    }

    #[test]
    fn test_fire_weapons_spawns_projectiles_in_range() {
        let mut state = playing_state();
        add_enemy(&mut state, Vec2::new(4.0, 0.0), EnemyTier::Infantry);
        state.player.as_mut().unwrap().add_weapon(Weapon::new(WeaponKind::Shotgun));

        state.fire_weapons(0.016);
        // Default gun (1) + shotgun (5)
        assert_eq!(state.projectiles.len(), 6);

        state.fire_weapons(0.016);
        assert_eq!(state.projectiles.len(), 6);
    }

    #[test]
    fn test_fire_weapons_out_of_range() {
        let mut state = playing_state();
        add_enemy(&mut state, Vec2::new(10.0, 0.0), EnemyTier::Infantry);
        state.fire_weapons(0.016);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_damage_multiplier_applies_at_fire_time() {
        let mut state = playing_state();
        add_enemy(&mut state, Vec2::new(4.0, 0.0), EnemyTier::Infantry);
        state.player.as_mut().unwrap().modify_damage_multiplier(0.5);
        state.fire_weapons(0.016);
        let p = state.projectiles.iter().next().unwrap();
        assert!((p.damage - 21.0).abs() < 1e-5);
    }

    #[test]
    fn test_enemy_bite_and_shield() {
        let mut state = playing_state();
        let eid = add_enemy(&mut state, Vec2::new(0.3, 0.0), EnemyTier::Infantry);
        state.enemies.get_mut(eid).unwrap().speed = 0.0;

        state.update_enemies(0.01);
        assert_eq!(state.player.as_ref().unwrap().health, 112.0);

        state.player.as_mut().unwrap().try_shield();
        state.enemies.get_mut(eid).unwrap().attack_timer = 0.0;
        state.update_enemies(0.01);
        assert_eq!(state.player.as_ref().unwrap().health, 112.0);
    }

    #[test]
    fn test_lethal_bite_ends_game_once() {
        let mut state = playing_state();
        for _ in 0..3 {
            let eid = add_enemy(&mut state, Vec2::new(0.2, 0.0), EnemyTier::Elite);
            state.enemies.get_mut(eid).unwrap().speed = 0.0;
        }
        state.player.as_mut().unwrap().health = 10.0;
        state.update_enemies(0.01);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.as_ref().unwrap().health, 0.0);
        let overs = state
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn test_ledger_sorted_by_damage() {
        let mut ledger = DamageLedger::default();
        ledger.record(WeaponKind::DefaultGun, 10.0);
        ledger.record(WeaponKind::Railgun, 50.0);
        ledger.record(WeaponKind::DefaultGun, 5.0);
        let rows = ledger.by_display_name();
        assert_eq!(rows[0], ("Armor Piercer".to_string(), 50.0));
        assert_eq!(rows[1], ("Main Gun".to_string(), 15.0));
    }
}
