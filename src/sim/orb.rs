//! XP orbs dropped by dead enemies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pool::{EntityId, Pooled};
use crate::consts::{XP_ATTRACT_RADIUS, XP_DRIFT_MAX_SPEED, XP_DRIFT_MIN_SPEED, XP_PICKUP_RADIUS};
use crate::lerp;

/// A floating XP pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpOrb {
    pub id: EntityId,
    pub pos: Vec2,
    pub value: f32,
    /// Seconds alive, drives the hover wobble
    pub hover_phase: f32,
}

impl Pooled for XpOrb {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl XpOrb {
    pub fn new(id: EntityId, pos: Vec2, value: f32) -> Self {
        Self {
            id,
            pos,
            value,
            hover_phase: 0.0,
        }
    }

    /// Cosmetic scale wobble for renderers
    pub fn hover_scale(&self) -> Vec2 {
        let base = 0.75;
        let wobble = 0.08;
        Vec2::new(
            base + (self.hover_phase * 3.0).sin() * wobble,
            base + (self.hover_phase * 3.0 + 1.0).sin() * wobble,
        )
    }

    /// Drift toward the player. Returns true when the orb is picked up.
    pub fn update(&mut self, player_pos: Vec2, dt: f32) -> bool {
        self.hover_phase += dt;
        let to_player = player_pos - self.pos;
        let distance = to_player.length();

        if distance < XP_ATTRACT_RADIUS {
            let pull = (1.0 - distance / XP_ATTRACT_RADIUS).clamp(0.0, 1.0);
            let speed = lerp(XP_DRIFT_MIN_SPEED, XP_DRIFT_MAX_SPEED, pull);
            self.pos += to_player.normalize_or_zero() * speed * dt;
        }

        distance < XP_PICKUP_RADIUS
    }
}
