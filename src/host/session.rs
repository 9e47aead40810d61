//! Hosting Session
//!
//! The hosting screen's own state around one [`Game`]: hearts, a coin
//! wallet that survives runs, and score readouts. The core never touches
//! any of it; the session applies the core's events after each tick.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::game::config::{ConfigError, GameConfig, HostConfig};
use crate::game::engine::Game;
use crate::game::entity::PowerUpKind;
use crate::game::events::{dispatch, EventSink};
use crate::game::state::Snapshot;
use crate::game::tick::TickResult;
use crate::host::hearts::HeartEconomy;

/// Session errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A run needs at least one heart.
    #[error("No hearts left")]
    OutOfHearts {
        /// Time until the next heart regenerates, if one is queued
        retry_in_ms: Option<u64>,
    },
}

/// Host-owned state wrapped around a running game.
#[derive(Debug)]
pub struct HostSession {
    game: Game,
    hearts: HeartEconomy,
    now_ms: u64,
    last_frame_ms: u64,
    coin_wallet: u64,
    last_score: u32,
    best_score: u32,
}

impl HostSession {
    /// Create a session whose clock currently reads `now_ms`.
    pub fn new(
        game_config: GameConfig,
        host_config: &HostConfig,
        seed: u64,
        now_ms: u64,
    ) -> Result<Self, ConfigError> {
        host_config.validate()?;
        Ok(Self::with_game(Game::new(game_config, seed)?, host_config, now_ms))
    }

    /// Wrap an existing game (e.g. one that is recording).
    pub fn with_game(game: Game, host_config: &HostConfig, now_ms: u64) -> Self {
        Self {
            game,
            hearts: HeartEconomy::new(host_config),
            now_ms,
            last_frame_ms: now_ms,
            coin_wallet: 0,
            last_score: 0,
            best_score: 0,
        }
    }

    /// Run one frame at clock time `now_ms` and apply its events.
    pub fn frame(&mut self, now_ms: u64) -> TickResult {
        let delta_ms = now_ms.saturating_sub(self.last_frame_ms) as f64;
        self.last_frame_ms = now_ms;
        self.now_ms = self.now_ms.max(now_ms);

        let result = self.game.tick(delta_ms);
        dispatch(&result.events, self);
        self.hearts.regenerate(self.now_ms);
        result
    }

    /// Periodic regeneration check. Returns hearts gained.
    pub fn regenerate(&mut self, now_ms: u64) -> u8 {
        self.now_ms = self.now_ms.max(now_ms);
        self.hearts.regenerate(self.now_ms)
    }

    /// Forward a jump.
    pub fn jump(&mut self) -> bool {
        self.game.handle_jump_input()
    }

    /// Forward a duck press or release.
    pub fn duck(&mut self, active: bool) -> bool {
        self.game.handle_duck_input(active)
    }

    /// Start a new run if a heart is available.
    ///
    /// The frame clock restarts at `now_ms` so time spent on the game-over
    /// screen does not become one huge first delta.
    pub fn start_run(&mut self, now_ms: u64) -> Result<(), SessionError> {
        self.regenerate(now_ms);
        if self.hearts.is_empty() {
            let retry_in_ms = self.hearts.next_regeneration_in(self.now_ms);
            warn!(?retry_in_ms, "run refused, no hearts left");
            return Err(SessionError::OutOfHearts { retry_in_ms });
        }

        let events = self.game.reset();
        dispatch(&events, self);
        self.last_frame_ms = now_ms;
        Ok(())
    }

    /// Grant a heart outright (capped).
    pub fn grant_heart(&mut self) -> bool {
        self.hearts.grant_heart()
    }

    /// Time until the next heart regenerates.
    pub fn next_regeneration_in(&self) -> Option<u64> {
        self.hearts.next_regeneration_in(self.now_ms)
    }

    /// The running game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Mutable access to the running game.
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    /// Heart state.
    pub fn hearts(&self) -> &HeartEconomy {
        &self.hearts
    }

    /// Coins collected across all runs.
    pub fn coin_wallet(&self) -> u64 {
        self.coin_wallet
    }

    /// Score last reported by the game.
    pub fn last_score(&self) -> u32 {
        self.last_score
    }

    /// Best score this session.
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Latest clock reading.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Render snapshot of the game.
    pub fn snapshot(&self) -> Snapshot {
        self.game.snapshot()
    }
}

impl EventSink for HostSession {
    fn on_score_change(&mut self, score: u32) {
        self.last_score = score;
        self.best_score = self.best_score.max(score);
    }

    fn on_coin_collected(&mut self, count: u32) {
        self.coin_wallet += u64::from(count);
    }

    fn on_power_up_collected(&mut self, kind: &PowerUpKind) {
        debug!(%kind, "power-up collected");
    }

    fn on_heart_lost(&mut self) {
        self.hearts.lose_heart(self.now_ms);
    }

    fn on_game_over(&mut self) {
        info!(
            score = self.last_score,
            best = self.best_score,
            hearts = self.hearts.hearts,
            "game over"
        );
    }
}
