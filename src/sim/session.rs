//! Session state machine
//!
//! MainMenu -> Playing -> {LevelUp, Paused} -> Playing -> GameOver, then
//! restart (-> Playing) or return to menu (-> MainMenu). Requests that do not
//! fit the current phase are ignored and report `false`.

use super::events::GameEvent;
use super::player::Player;
use super::state::{Difficulty, GamePhase, GameState};
use super::upgrade::{UpgradeKind, draw_choices};
use crate::consts::UPGRADE_CHOICES;

impl GameState {
    /// Start a new run from the main menu or the game-over screen
    pub fn start_game(&mut self, difficulty: Difficulty) -> bool {
        match self.phase {
            GamePhase::MainMenu | GamePhase::GameOver => {
                self.begin_run(difficulty);
                true
            }
            _ => {
                log::debug!("Ignoring start_game in {:?}", self.phase);
                false
            }
        }
    }

    /// Throw away the current run and start another at the same difficulty
    pub fn restart_game(&mut self) -> bool {
        if self.phase == GamePhase::MainMenu {
            log::debug!("Ignoring restart_game from the main menu");
            return false;
        }
        self.dispose();
        self.begin_run(self.difficulty);
        true
    }

    /// Abandon any run and go back to the title screen
    pub fn return_to_main_menu(&mut self) -> bool {
        if self.phase == GamePhase::MainMenu {
            return false;
        }
        self.dispose();
        self.set_phase(GamePhase::MainMenu);
        log::info!("Returned to main menu");
        true
    }

    /// Destroy the player and every pooled entity, and reset run counters
    pub fn dispose(&mut self) {
        self.player = None;
        self.reset_run();
    }

    fn begin_run(&mut self, difficulty: Difficulty) {
        self.reset_run();
        self.difficulty = difficulty;
        let area = self.play_area();
        self.player = Some(Player::new(area.center(), &self.tuning.player));
        self.set_phase(GamePhase::Playing);
        log::info!("Run started ({:?}, seed {})", difficulty, self.seed);

        self.emit_hud();
        self.emit_health();
        self.emit_xp();
        self.emit_resources();
        self.emit_weapons();
    }

    /// Pause from Playing, or resume from Paused
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => {
                self.set_phase(GamePhase::Paused);
                self.time_scale = 0.0;
                log::info!("Paused");
                true
            }
            GamePhase::Paused => {
                self.resume_gameplay();
                log::info!("Resumed");
                true
            }
            _ => {
                log::debug!("Ignoring pause toggle in {:?}", self.phase);
                false
            }
        }
    }

    fn resume_gameplay(&mut self) {
        self.offered_upgrades.clear();
        self.set_phase(GamePhase::Playing);
        self.time_scale = 1.0;
        if let Some(player) = self.player.as_mut() {
            player.input_enabled = player.is_alive();
        }
    }

    /// Add XP to the player, opening the upgrade offer on a level-up
    pub fn collect_xp(&mut self, amount: f32) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        let levelled = player.collect_xp(amount);
        self.emit_xp();
        if levelled {
            self.on_player_level_up();
        }
    }

    fn on_player_level_up(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let Some(player) = self.player.as_mut() else {
            return;
        };
        player.input_enabled = false;
        let level = player.level;
        let choices = draw_choices(&mut self.rng, player, UPGRADE_CHOICES);

        self.set_phase(GamePhase::LevelUp);
        log::info!("Level {} reached, offering {:?}", level, choices);
        self.offered_upgrades = choices.clone();
        self.emit(GameEvent::LevelUpOffered(choices));
    }

    /// Apply one of the offered upgrades and resume play
    pub fn apply_upgrade(&mut self, upgrade: UpgradeKind) -> bool {
        if self.phase != GamePhase::LevelUp || !self.offered_upgrades.contains(&upgrade) {
            log::debug!("Ignoring upgrade {:?} in {:?}", upgrade, self.phase);
            return false;
        }
        let Some(player) = self.player.as_mut() else {
            return false;
        };

        let weapons_changed = upgrade.apply(player);
        log::info!("Applied upgrade {}", upgrade.id());
        self.emit(GameEvent::UpgradeApplied(upgrade));
        if weapons_changed {
            self.emit_weapons();
        }
        if upgrade == UpgradeKind::MaxHealth {
            self.emit_health();
        }
        self.resume_gameplay();
        true
    }

    /// Apply an offered upgrade by its string id
    pub fn apply_upgrade_id(&mut self, id: &str) -> bool {
        match UpgradeKind::from_id(id) {
            Some(upgrade) => self.apply_upgrade(upgrade),
            None => false,
        }
    }

    /// Decline the offered upgrades and resume play
    pub fn skip_upgrade(&mut self) -> bool {
        if self.phase != GamePhase::LevelUp {
            return false;
        }
        self.resume_gameplay();
        true
    }

    /// End the run. A second call is a no-op.
    pub fn end_game(&mut self, did_win: bool) -> bool {
        if matches!(self.phase, GamePhase::GameOver | GamePhase::MainMenu) {
            return false;
        }
        self.set_phase(GamePhase::GameOver);
        self.time_scale = 1.0;
        self.offered_upgrades.clear();
        if let Some(player) = self.player.as_mut() {
            player.input_enabled = false;
        }
        log::info!(
            "Game over: score {} after {:.1}s, wave {}",
            self.score,
            self.elapsed,
            self.waves.wave
        );
        let event = GameEvent::GameOver {
            did_win,
            score: self.score,
            elapsed: self.elapsed,
            damage: self.ledger.by_display_name(),
        };
        self.emit(event);
        true
    }
}
