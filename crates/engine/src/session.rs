//! Session coordinator
//!
//! Owns the game state, the preferences store and the notification sink.
//! Every command goes through here so that high scores are written through
//! to storage the moment they are beaten, and notifications go out after
//! each state change.

use tracing::{info, warn};

use crate::core::{GameSnapshot, GameState};
use crate::sink::EventSink;
use crate::store::{KeyValueStore, Preferences, Settings};
use crate::types::{CoreEvent, Difficulty, GameCommand, PowerUpKind, ThemeName};

pub struct Session<S, E> {
    game: GameState,
    prefs: Preferences<S>,
    settings: Settings,
    theme: ThemeName,
    sink: E,
}

impl<S: KeyValueStore, E: EventSink> Session<S, E> {
    /// Load preferences and start a session at the saved difficulty
    pub fn new(store: S, sink: E, seed: u64) -> Self {
        let prefs = Preferences::new(store);
        let settings = prefs.settings();
        let theme = prefs.theme();
        let high_score = prefs.high_score(settings.difficulty);
        let game = GameState::new(settings.difficulty, high_score, seed);

        info!(
            difficulty = settings.difficulty.as_str(),
            high_score,
            theme = theme.as_str(),
            seed,
            "session started"
        );

        Self {
            game,
            prefs,
            settings,
            theme,
            sink,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn theme(&self) -> ThemeName {
        self.theme
    }

    pub fn prefs(&self) -> &Preferences<S> {
        &self.prefs
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut E {
        &mut self.sink
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.game.snapshot_into(out);
    }

    /// Dispatch a command; returns whether it was accepted
    pub fn apply(&mut self, command: GameCommand) -> bool {
        match command {
            GameCommand::Place { piece_id, row, col } => self.attempt_place(piece_id, row, col),
            GameCommand::SetHint { piece_id, row, col } => {
                self.set_hint(piece_id, row, col);
                true
            }
            GameCommand::ClearHint => {
                self.clear_hint();
                true
            }
            GameCommand::ArmPowerUp(kind) => self.arm_power_up(kind),
            GameCommand::ApplyPowerUpAt { row, col } => self.apply_power_up_at(row, col),
            GameCommand::Reshuffle => self.reshuffle(),
            GameCommand::Reset(difficulty) => {
                self.reset_session(difficulty);
                true
            }
        }
    }

    pub fn attempt_place(&mut self, piece_id: u32, row: i8, col: i8) -> bool {
        let accepted = self.game.attempt_place(piece_id, row, col);
        self.flush_events();
        accepted
    }

    pub fn set_hint(&mut self, piece_id: Option<u32>, row: i8, col: i8) {
        self.game.set_hint(piece_id, row, col);
    }

    pub fn clear_hint(&mut self) {
        self.game.clear_hint();
    }

    pub fn flash_rejection(&mut self, piece_id: u32, row: i8, col: i8) {
        self.game.flash_rejection(piece_id, row, col);
    }

    pub fn arm_power_up(&mut self, kind: PowerUpKind) -> bool {
        let accepted = self.game.arm_power_up(kind);
        self.flush_events();
        accepted
    }

    pub fn apply_power_up_at(&mut self, row: i8, col: i8) -> bool {
        let accepted = self.game.apply_power_up_at(row, col);
        self.flush_events();
        accepted
    }

    pub fn reshuffle(&mut self) -> bool {
        let accepted = self.game.reshuffle();
        self.flush_events();
        accepted
    }

    /// Start over at `difficulty`, with that difficulty's stored best score
    ///
    /// The difficulty choice is persisted with the other settings.
    pub fn reset_session(&mut self, difficulty: Difficulty) {
        self.flush_events();
        let high_score = self.prefs.high_score(difficulty);
        self.game.reset(difficulty, high_score);
        if self.settings.difficulty != difficulty {
            self.settings.difficulty = difficulty;
            self.save_settings();
        }
    }

    /// Advance timers; returns true if anything visible changed
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let changed = self.game.tick(elapsed_ms);
        self.flush_events();
        changed
    }

    pub fn toggle_sfx(&mut self) -> bool {
        self.settings.sfx_enabled = !self.settings.sfx_enabled;
        self.save_settings();
        self.settings.sfx_enabled
    }

    pub fn toggle_music(&mut self) -> bool {
        self.settings.music_enabled = !self.settings.music_enabled;
        self.save_settings();
        self.settings.music_enabled
    }

    pub fn set_theme(&mut self, theme: ThemeName) {
        self.theme = theme;
        if let Err(err) = self.prefs.set_theme(theme) {
            warn!(error = %err, "failed to persist theme");
        }
    }

    pub fn cycle_theme(&mut self) -> ThemeName {
        self.set_theme(self.theme.next());
        self.theme
    }

    fn save_settings(&mut self) {
        if let Err(err) = self.prefs.save_settings(&self.settings) {
            warn!(error = %err, "failed to persist settings");
        }
    }

    /// Persist and forward pending notifications
    fn flush_events(&mut self) {
        for event in self.game.take_events() {
            if let CoreEvent::NewHighScore { difficulty, score } = event {
                if let Err(err) = self.prefs.set_high_score(difficulty, score) {
                    warn!(error = %err, score, "failed to persist high score");
                }
            }
            self.sink.notify(&event);
        }
    }
}
