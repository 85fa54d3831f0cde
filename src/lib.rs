//! Siege Survivor - a top-down wave survival shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, combat, economy, game state)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, UI widgets and device input live outside this crate. They feed
//! [`sim::TickInput`] and session intents in, and read [`sim::GameEvent`]s and
//! [`sim::HudSnapshot`]s back out.

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Slack for timers fed by summed f32 frame deltas
    pub const TIMER_EPSILON: f32 = 1e-4;
    /// Undrained events kept before the oldest are dropped
    pub const MAX_PENDING_EVENTS: usize = 512;

    /// Projectile vs enemy hit radius
    pub const PROJECTILE_HIT_RADIUS: f32 = 0.4;
    /// Projectile time to live (seconds)
    pub const PROJECTILE_LIFETIME: f32 = 2.5;
    /// Projectiles leave the player this far along their direction
    pub const MUZZLE_OFFSET: f32 = 0.6;

    /// Enemy bite range (center to center)
    pub const ENEMY_MELEE_RANGE: f32 = 0.6;
    /// Enemies appear this far outside the play area
    pub const SPAWN_MARGIN: f32 = 2.0;

    /// Player stays this far inside the play area edges
    pub const PLAY_AREA_INSET: f32 = 0.5;
    /// Dash speed multiplier
    pub const DASH_SPEED_FACTOR: f32 = 2.5;

    /// XP orbs start drifting toward the player inside this radius
    pub const XP_ATTRACT_RADIUS: f32 = 3.0;
    /// XP orbs are collected inside this radius
    pub const XP_PICKUP_RADIUS: f32 = 0.5;
    /// Orb drift speed at the edge / center of the attraction radius
    pub const XP_DRIFT_MIN_SPEED: f32 = 1.5;
    pub const XP_DRIFT_MAX_SPEED: f32 = 6.0;

    /// Chance that a kill drops a flag
    pub const FLAG_DROP_CHANCE: f64 = 0.05;
    /// Flags shown as the HUD goal ("n/4")
    pub const FLAG_TARGET: u32 = 4;

    /// Upgrades offered per level-up
    pub const UPGRADE_CHOICES: usize = 3;
}

/// Rotate a vector counter-clockwise by `degrees`
#[inline]
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_degrees_quarter_turn() {
        let v = rotate_degrees(Vec2::X, 90.0);
        assert!((v - Vec2::Y).length() < 1e-5);
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let v = Vec2::new(0.6, -0.8);
        assert!((rotate_degrees(v, 0.0) - v).length() < 1e-6);
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(1.5, 6.0, 0.0), 1.5);
        assert_eq!(lerp(1.5, 6.0, 1.0), 6.0);
    }
}
