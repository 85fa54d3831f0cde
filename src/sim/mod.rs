//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, input devices or platform dependencies

pub mod combat;
pub mod enemy;
pub mod events;
pub mod orb;
pub mod player;
pub mod pool;
pub mod projectile;
pub mod session;
pub mod state;
pub mod tick;
pub mod upgrade;
pub mod wave;
pub mod weapon;

pub use combat::{DamageLedger, acquire_target, shot_directions};
pub use enemy::{Enemy, EnemyArchetype, EnemyTier};
pub use events::{GameEvent, HudSnapshot, WeaponSlot};
pub use orb::XpOrb;
pub use player::{DamageOutcome, Player};
pub use pool::{EntityId, Pool, Pooled};
pub use projectile::Projectile;
pub use state::{Difficulty, GamePhase, GameState, PlayArea};
pub use tick::{TickInput, tick};
pub use upgrade::{UpgradeDefinition, UpgradeEffect, UpgradeKind, draw_choices};
pub use wave::{WaveDirector, WaveSpawn, spawn_count, spawn_position};
pub use weapon::{Weapon, WeaponKind};
