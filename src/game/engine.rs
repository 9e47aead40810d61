//! Game Facade
//!
//! The surface a hosting screen talks to: one `tick` per redraw, the
//! jump/duck/reset controls, and read-only accessors for rendering.
//!
//! Controls take effect immediately. They are also folded into the
//! pending [`InputFrame`] so a recording replays them at the start of the
//! next tick, which lands on the same state.

use tracing::debug;

use crate::core::hash::StateHash;
use crate::game::config::{ConfigError, GameConfig};
use crate::game::entity::{Coin, Obstacle, PowerUp};
use crate::game::events::GameEvent;
use crate::game::input::{InputFrame, Recording};
use crate::game::player::Posture;
use crate::game::state::{GameState, Snapshot};
use crate::game::tick::{self, TickResult};

/// One simulation core instance.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    state: GameState,
    pending_input: InputFrame,
    recording: Option<Recording>,
}

impl Game {
    /// Create a game with validated configuration.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new(seed, &config);
        Ok(Self {
            config,
            state,
            pending_input: InputFrame::new(),
            recording: None,
        })
    }

    /// Create a game that records every tick from its first.
    pub fn with_recording(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let mut game = Self::new(config, seed)?;
        game.recording = Some(Recording::new(seed));
        Ok(game)
    }

    /// Stop recording and hand back what was captured.
    pub fn take_recording(&mut self) -> Option<Recording> {
        self.recording.take()
    }

    // =========================================================================
    // Frame and controls
    // =========================================================================

    /// Advance one frame.
    pub fn tick(&mut self, delta_ms: f64) -> TickResult {
        let input = std::mem::take(&mut self.pending_input);
        if let Some(recording) = &mut self.recording {
            recording.push(delta_ms, input);
        }
        // Controls were already applied when they arrived
        tick::tick(&mut self.state, &InputFrame::new(), delta_ms, &self.config)
    }

    /// Jump. Returns false if ignored (airborne or run over).
    pub fn handle_jump_input(&mut self) -> bool {
        self.pending_input.merge(InputFrame::jump());
        let accepted = tick::handle_jump(&mut self.state);
        if !accepted {
            debug!(tick = self.state.tick, "jump ignored");
        }
        accepted
    }

    /// Press or release duck. Returns true if posture changed.
    pub fn handle_duck_input(&mut self, active: bool) -> bool {
        self.pending_input.merge(InputFrame::duck(active));
        tick::handle_duck(&mut self.state, active)
    }

    /// Start a fresh run. Returns the events the reset produced.
    pub fn reset(&mut self) -> Vec<GameEvent> {
        self.pending_input.merge(InputFrame::reset());
        tick::reset(&mut self.state, &self.config);
        self.state.take_events()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Active configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Underlying state, read-only.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Underlying state, mutable. For staging scenarios and tooling; the
    /// frame loop itself only goes through `tick` and the controls.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Live hazards.
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.state.obstacles
    }

    /// Live coins.
    pub fn coins(&self) -> &[Coin] {
        &self.state.coins
    }

    /// Live power-ups.
    pub fn power_ups(&self) -> &[PowerUp] {
        &self.state.power_ups
    }

    /// Player posture.
    pub fn posture(&self) -> Posture {
        self.state.player.posture
    }

    /// Player is airborne.
    pub fn is_jumping(&self) -> bool {
        self.state.player.is_jumping()
    }

    /// Player is crouched.
    pub fn is_ducking(&self) -> bool {
        self.state.player.is_ducking()
    }

    /// Height of the player above the ground line.
    pub fn jump_offset(&self) -> f32 {
        self.state.player.jump_offset(&self.config)
    }

    /// Shield is up.
    pub fn has_shield(&self) -> bool {
        self.state.player.has_shield()
    }

    /// Remaining shield in [0, 1].
    pub fn shield_fraction(&self) -> f32 {
        self.state.player.shield_fraction(&self.config)
    }

    /// Current score.
    pub fn score(&self) -> u32 {
        self.state.run.score
    }

    /// Current scroll speed.
    pub fn speed(&self) -> f32 {
        self.state.run.speed
    }

    /// Speed escalations + 1.
    pub fn level(&self) -> u32 {
        self.state.run.level
    }

    /// Ground texture offset.
    pub fn ground_offset(&self) -> f32 {
        self.state.run.ground_offset
    }

    /// Run has ended.
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Copy of everything a renderer needs.
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot(&self.config)
    }

    /// State hash for determinism checks.
    pub fn compute_hash(&self) -> StateHash {
        self.state.compute_hash()
    }
}
