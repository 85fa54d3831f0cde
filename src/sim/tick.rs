//! Per-frame simulation tick
//!
//! Frame order while Playing: session clock and wave director, player
//! (movement, abilities, weapons, regeneration), enemies, projectiles, XP orbs,
//! then HUD notifications. Entities removed mid-frame are skipped by later
//! steps; nothing in a frame can fault.

use glam::Vec2;

use super::enemy::{Enemy, EnemyArchetype};
use super::events::GameEvent;
use super::state::{GamePhase, GameState};
use super::wave::{WaveSpawn, spawn_position};
use crate::consts::SPAWN_MARGIN;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement axis; vectors longer than 1 are normalized
    pub movement: Vec2,
    /// Dash pressed this frame
    pub dash: bool,
    /// Shield pressed this frame
    pub shield: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause {
        state.toggle_pause();
    }

    let dt = dt.max(0.0) * state.time_scale;
    match state.phase {
        GamePhase::Playing => {}
        GamePhase::LevelUp => {
            // The overlay freezes the world, but dash/shield keep refilling
            if let Some(player) = state.player.as_mut() {
                player.regenerate(dt);
            }
            state.emit_resources();
            return;
        }
        GamePhase::MainMenu | GamePhase::Paused | GamePhase::GameOver => return,
    }
    if dt <= 0.0 {
        return;
    }

    state.elapsed += dt;
    let difficulty = state.difficulty;
    if let Some(spawn) = state.waves.advance(dt, difficulty, &state.tuning.waves) {
        spawn_wave(state, spawn);
    }

    update_player(state, input, dt);
    if state.phase == GamePhase::Playing {
        state.update_enemies(dt);
    }
    if state.phase == GamePhase::Playing {
        state.update_projectiles(dt);
    }
    if state.phase == GamePhase::Playing {
        update_orbs(state, dt);
    }

    state.emit_resources();
    state.emit_hud();
}

fn spawn_wave(state: &mut GameState, spawn: WaveSpawn) {
    let area = state.play_area();
    let row = EnemyArchetype::sample(state.difficulty, spawn.wave, &state.tuning.waves);
    for _ in 0..spawn.count {
        let pos = spawn_position(&mut state.rng, &area, SPAWN_MARGIN);
        let id = state.next_entity_id();
        state.enemies.register(Enemy::spawn(id, &row, pos));
    }
    log::info!(
        "Wave {}: {} x tier {} {} ({} alive)",
        spawn.wave,
        spawn.count,
        row.tier.number(),
        row.name,
        state.enemies.len()
    );
    state.emit(GameEvent::WaveSpawned {
        wave: spawn.wave,
        count: spawn.count,
    });
}

fn update_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let area = state.play_area();
    let Some(player) = state.player.as_mut() else {
        return;
    };
    let input_enabled = player.input_enabled;
    if input_enabled {
        player.apply_movement(input.movement, dt, &area);
        player.update_abilities(input.dash, input.shield, dt);
    }
    if input_enabled {
        state.fire_weapons(dt);
    }
    if let Some(player) = state.player.as_mut() {
        player.regenerate(dt);
    }
}

fn update_orbs(state: &mut GameState, dt: f32) {
    let Some(target) = state.player.as_ref().map(|p| p.pos) else {
        return;
    };
    for id in state.orbs.ids() {
        // A level-up from an earlier orb freezes the rest
        if state.phase != GamePhase::Playing {
            break;
        }
        let Some(orb) = state.orbs.get_mut(id) else {
            continue;
        };
        if !orb.update(target, dt) {
            continue;
        }
        if let Some(orb) = state.orbs.unregister(id) {
            state.collect_xp(orb.value);
        }
    }
}
