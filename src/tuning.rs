//! Game balance knobs
//!
//! Every number here can be overridden from a JSON file. Missing fields keep
//! their defaults, so a tuning file only needs to name what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::PlayArea;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning value `{field}` out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },
}

/// Player movement, vitals and ability tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub move_speed: f32,
    pub max_health: f32,
    pub dash_cost: f32,
    pub dash_duration: f32,
    /// Dash fuel regained per second while not dashing
    pub dash_recovery_rate: f32,
    pub shield_duration: f32,
    /// Shield charge regained per second while the shield is down
    pub shield_recovery_rate: f32,
    /// XP needed for level 1 -> 2
    pub xp_base: f32,
    /// Extra XP needed per level after the first
    pub xp_per_level: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 6.0,
            max_health: 120.0,
            dash_cost: 0.35,
            dash_duration: 0.25,
            dash_recovery_rate: 0.35,
            shield_duration: 2.5,
            shield_recovery_rate: 0.25,
            xp_base: 70.0,
            xp_per_level: 30.0,
        }
    }
}

/// Wave timing and size tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    /// Seconds between waves on Normal
    pub spawn_interval: f32,
    /// Interval multiplier on Easy
    pub easy_interval_factor: f32,
    pub normal_base_count: u32,
    pub easy_base_count: u32,
    /// Enemy health multiplier on Easy
    pub easy_health_factor: f32,
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            spawn_interval: 2.5,
            easy_interval_factor: 1.4,
            normal_base_count: 3,
            easy_base_count: 2,
            easy_health_factor: 0.8,
        }
    }
}

/// Complete balance sheet for a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub waves: WaveTuning,
    pub play_area: PlayArea,
}

impl Tuning {
    /// Parse and validate tuning from a JSON string
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        let p = &self.player;
        positive("player.move_speed", p.move_speed)?;
        positive("player.max_health", p.max_health)?;
        unit_interval("player.dash_cost", p.dash_cost)?;
        positive("player.dash_duration", p.dash_duration)?;
        non_negative("player.dash_recovery_rate", p.dash_recovery_rate)?;
        positive("player.shield_duration", p.shield_duration)?;
        non_negative("player.shield_recovery_rate", p.shield_recovery_rate)?;
        positive("player.xp_base", p.xp_base)?;
        non_negative("player.xp_per_level", p.xp_per_level)?;

        let w = &self.waves;
        positive("waves.spawn_interval", w.spawn_interval)?;
        positive("waves.easy_interval_factor", w.easy_interval_factor)?;
        positive("waves.easy_health_factor", w.easy_health_factor)?;

        let a = &self.play_area;
        // Player clamp needs room on both sides of the inset
        positive("play_area.width", a.width() - 2.0 * crate::consts::PLAY_AREA_INSET)?;
        positive("play_area.height", a.height() - 2.0 * crate::consts::PLAY_AREA_INSET)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::OutOfRange { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::OutOfRange { field, value })
    }
}

fn unit_interval(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TuningError::OutOfRange { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "player": { "move_speed": 8.0 } }"#).unwrap();
        assert_eq!(tuning.player.move_speed, 8.0);
        assert_eq!(tuning.player.max_health, 120.0);
        assert_eq!(tuning.waves, WaveTuning::default());
    }

    #[test]
    fn test_rejects_bad_dash_cost() {
        let err = Tuning::from_json(r#"{ "player": { "dash_cost": 1.5 } }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::OutOfRange {
                field: "player.dash_cost",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::load("/definitely/not/here/tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::Io(_)));
    }
}
