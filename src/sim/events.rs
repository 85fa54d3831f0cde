//! Notifications from the simulation to the presentation layer
//!
//! The simulation pushes [`GameEvent`]s into a queue that the UI drains once
//! per frame. [`HudSnapshot`] is the pull-side equivalent for UIs that prefer
//! to redraw from current state.

use serde::Serialize;

use super::state::{GamePhase, GameState};
use super::upgrade::UpgradeKind;
use super::weapon::{Weapon, WeaponKind};

/// One weapon slot as shown in the HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeaponSlot {
    pub kind: WeaponKind,
    pub name: &'static str,
    pub icon: &'static str,
    pub level: u32,
}

impl From<&Weapon> for WeaponSlot {
    fn from(weapon: &Weapon) -> Self {
        Self {
            kind: weapon.kind,
            name: weapon.kind.display_name(),
            icon: weapon.kind.icon(),
            level: weapon.level,
        }
    }
}

/// Events emitted by the simulation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    PhaseChanged {
        from: GamePhase,
        to: GamePhase,
    },
    HudChanged {
        elapsed: f32,
        score: u32,
        money: u32,
        flags: u32,
    },
    HealthChanged {
        current: f32,
        max: f32,
    },
    XpChanged {
        current: f32,
        required: f32,
        level: u32,
    },
    DashFuelChanged(f32),
    ShieldChargeChanged(f32),
    WeaponsChanged(Vec<WeaponSlot>),
    WaveSpawned {
        wave: u32,
        count: u32,
    },
    EnemyKilled {
        score_reward: u32,
        flag_dropped: bool,
    },
    LevelUpOffered(Vec<UpgradeKind>),
    UpgradeApplied(UpgradeKind),
    GameOver {
        did_win: bool,
        score: u32,
        elapsed: f32,
        /// (weapon display name, total damage), highest first
        damage: Vec<(String, f32)>,
    },
}

/// Everything a HUD needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub phase: GamePhase,
    pub elapsed: f32,
    pub score: u32,
    pub money: u32,
    pub flags: u32,
    pub wave: u32,
    pub health: f32,
    pub max_health: f32,
    pub health_ratio: f32,
    pub xp: f32,
    pub xp_required: f32,
    pub xp_ratio: f32,
    pub level: u32,
    pub dash_ratio: f32,
    pub shield_ratio: f32,
    pub shield_active: bool,
    pub weapons: Vec<WeaponSlot>,
}

impl GameState {
    /// Current HUD values (zeros for vitals when no run is active)
    pub fn hud(&self) -> HudSnapshot {
        let mut hud = HudSnapshot {
            phase: self.phase,
            elapsed: self.elapsed,
            score: self.score,
            money: self.money,
            flags: self.flags,
            wave: self.waves.wave,
            health: 0.0,
            max_health: 0.0,
            health_ratio: 0.0,
            xp: 0.0,
            xp_required: 0.0,
            xp_ratio: 0.0,
            level: 0,
            dash_ratio: 0.0,
            shield_ratio: 0.0,
            shield_active: false,
            weapons: Vec::new(),
        };
        if let Some(player) = &self.player {
            let required = player.xp_required();
            hud.health = player.health;
            hud.max_health = player.max_health;
            hud.health_ratio = player.health_ratio();
            hud.xp = player.xp;
            hud.xp_required = required;
            hud.xp_ratio = if required > 0.0 {
                (player.xp / required).clamp(0.0, 1.0)
            } else {
                0.0
            };
            hud.level = player.level;
            hud.dash_ratio = player.dash_fuel;
            hud.shield_ratio = player.shield_charge;
            hud.shield_active = player.shield_active;
            hud.weapons = player.weapons().iter().map(WeaponSlot::from).collect();
        }
        hud
    }

    pub(crate) fn emit_hud(&mut self) {
        let event = GameEvent::HudChanged {
            elapsed: self.elapsed,
            score: self.score,
            money: self.money,
            flags: self.flags,
        };
        self.emit(event);
    }

    pub(crate) fn emit_health(&mut self) {
        if let Some(p) = &self.player {
            let event = GameEvent::HealthChanged {
                current: p.health,
                max: p.max_health,
            };
            self.emit(event);
        }
    }

    pub(crate) fn emit_xp(&mut self) {
        if let Some(p) = &self.player {
            let event = GameEvent::XpChanged {
                current: p.xp,
                required: p.xp_required(),
                level: p.level,
            };
            self.emit(event);
        }
    }

    pub(crate) fn emit_weapons(&mut self) {
        if let Some(p) = &self.player {
            let slots = p.weapons().iter().map(WeaponSlot::from).collect();
            self.emit(GameEvent::WeaponsChanged(slots));
        }
    }

    /// Push dash/shield ratios, only when they moved since the last push
    pub(crate) fn emit_resources(&mut self) {
        let Some(p) = &self.player else {
            return;
        };
        let (dash, shield) = (p.dash_fuel, p.shield_charge);
        if dash != self.last_dash_ratio {
            self.last_dash_ratio = dash;
            self.emit(GameEvent::DashFuelChanged(dash));
        }
        if shield != self.last_shield_ratio {
            self.last_shield_ratio = shield;
            self.emit(GameEvent::ShieldChargeChanged(shield));
        }
    }

    pub(crate) fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        log::debug!("Phase {:?} -> {:?}", from, to);
        self.emit(GameEvent::PhaseChanged { from, to });
    }
}
