//! Siege Survivor headless runner
//!
//! Drives one seeded run at the fixed simulation step with a simple autopilot
//! (circle the arena, dash and shield when ready, take the first upgrade on
//! offer) and prints a JSON summary when the run ends.
//!
//! Usage: `siege-survivor [seed] [tuning.json]`

use glam::Vec2;
use serde::Serialize;

use siege_survivor::Tuning;
use siege_survivor::consts::{FLAG_TARGET, MAX_SUBSTEPS, SIM_DT};
use siege_survivor::sim::{Difficulty, GameEvent, GamePhase, GameState, TickInput, tick};

/// Longest run the autopilot plays before giving up (seconds)
const MAX_RUN_SECONDS: f32 = 600.0;
/// Host frame length fed into the fixed-step accumulator
const FRAME_DT: f32 = 1.0 / 30.0;

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    survived_seconds: f32,
    score: u32,
    money: u32,
    flags: String,
    waves: u32,
    level: u32,
    weapons: Vec<String>,
    damage: Vec<(String, f32)>,
}

fn autopilot(state: &GameState, time: f32) -> TickInput {
    let Some(player) = state.player.as_ref() else {
        return TickInput::default();
    };
    // Orbit the arena center, steering toward the orbit when off it
    let orbit = Vec2::from_angle(time * 0.4) * 6.0;
    let tangent = Vec2::from_angle(time * 0.4 + std::f32::consts::FRAC_PI_2);
    let movement = (tangent + (orbit - player.pos) * 0.3).clamp_length_max(1.0);
    let threatened = state
        .enemies
        .iter()
        .any(|e| e.pos.distance_squared(player.pos) < 2.0);
    TickInput {
        movement,
        dash: threatened && player.dash_fuel >= player.dash_cost,
        shield: threatened,
        pause: false,
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5eed);
    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::error!("{err}; falling back to default tuning");
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    log::info!("Siege Survivor (headless) starting, seed {seed}");
    let mut state = match GameState::with_tuning(seed, tuning) {
        Ok(state) => state,
        Err(err) => {
            log::error!("{err}; falling back to default tuning");
            GameState::new(seed)
        }
    };
    state.start_game(Difficulty::Normal);

    let mut accumulator = 0.0;
    let mut time = 0.0;
    let mut damage = Vec::new();
    while state.phase != GamePhase::GameOver && time < MAX_RUN_SECONDS {
        accumulator += FRAME_DT;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = autopilot(&state, time);
            tick(&mut state, &input, SIM_DT);
            accumulator -= SIM_DT;
            time += SIM_DT;
            substeps += 1;
        }

        for event in state.drain_events() {
            match event {
                GameEvent::LevelUpOffered(choices) => {
                    if let Some(first) = choices.first() {
                        state.apply_upgrade(*first);
                    } else {
                        state.skip_upgrade();
                    }
                }
                GameEvent::GameOver { damage: ledger, .. } => damage = ledger,
                _ => {}
            }
        }
    }

    if state.phase != GamePhase::GameOver {
        state.end_game(true);
        for event in state.drain_events() {
            if let GameEvent::GameOver { damage: ledger, .. } = event {
                damage = ledger;
            }
        }
    }

    let hud = state.hud();
    let summary = RunSummary {
        seed,
        survived_seconds: hud.elapsed,
        score: hud.score,
        money: hud.money,
        flags: format!("{}/{}", hud.flags, FLAG_TARGET),
        waves: hud.wave,
        level: hud.level,
        weapons: hud
            .weapons
            .iter()
            .map(|w| format!("{} {} (lv {})", w.icon, w.name, w.level))
            .collect(),
        damage,
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Failed to encode run summary: {err}"),
    }
}
