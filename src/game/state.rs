//! Game State Definitions
//!
//! All state owned by the simulation core for one run.
//! Entity collections are plain `Vec`s; list order is the processing order.

use serde::{Serialize, Deserialize};

use crate::core::rng::DeterministicRng;
use crate::core::hash::{StateHash, compute_state_hash};
use crate::game::config::GameConfig;
use crate::game::entity::{Coin, Obstacle, PowerUp};
use crate::game::events::GameEvent;
use crate::game::player::{PlayerStatus, Posture};
use crate::game::spawner::SpawnTimers;

// =============================================================================
// RUN STATE
// =============================================================================

/// Score, pace and lifecycle of the current run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    /// Accumulated score
    pub score: u32,

    /// Scroll speed in pixels per frame
    pub speed: f32,

    /// Number of speed escalations so far, plus one
    pub level: u32,

    /// Terminal flag; nothing advances until reset
    pub is_over: bool,

    /// Ground texture offset in [0, ground_period)
    pub ground_offset: f32,

    /// Coins picked up this run
    pub coins_collected: u32,
}

impl RunState {
    /// Fresh run at base speed.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            speed: config.base_speed,
            level: 1,
            is_over: false,
            ground_offset: 0.0,
            coins_collected: 0,
        }
    }
}

// =============================================================================
// GAME STATE
// =============================================================================

/// Complete state of a run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// Running ticks since the last reset
    pub tick: u64,

    /// RNG seed (for verification)
    pub rng_seed: u64,

    /// Deterministic RNG state
    #[serde(skip)]
    pub rng: DeterministicRng,

    /// Score, speed and lifecycle
    pub run: RunState,

    /// Posture and shield
    pub player: PlayerStatus,

    /// Live hazards, oldest first
    pub obstacles: Vec<Obstacle>,

    /// Live coins, oldest first
    pub coins: Vec<Coin>,

    /// Live power-ups, oldest first
    pub power_ups: Vec<PowerUp>,

    /// Per-category spawn timers
    pub spawn: SpawnTimers,

    /// Events generated this tick (cleared each tick)
    #[serde(skip)]
    pub pending_events: Vec<GameEvent>,
}

impl GameState {
    /// Create the initial state of a run.
    pub fn new(rng_seed: u64, config: &GameConfig) -> Self {
        let mut rng = DeterministicRng::new(rng_seed);
        let spawn = SpawnTimers::new(&mut rng, config);

        Self {
            tick: 0,
            rng_seed,
            rng,
            run: RunState::new(config),
            player: PlayerStatus::new(),
            obstacles: Vec::new(),
            coins: Vec::new(),
            power_ups: Vec::new(),
            spawn,
            pending_events: Vec::new(),
        }
    }

    /// Return to the initial state of a run.
    ///
    /// The RNG keeps its stream so consecutive runs differ; everything else
    /// (collections, timers, score, speed, posture, shield) starts over.
    pub fn reset(&mut self, config: &GameConfig) {
        self.tick = 0;
        self.run = RunState::new(config);
        self.player = PlayerStatus::new();
        self.obstacles.clear();
        self.coins.clear();
        self.power_ups.clear();
        self.spawn = SpawnTimers::new(&mut self.rng, config);
        self.pending_events.clear();
    }

    /// Is the run over?
    #[inline]
    pub fn is_over(&self) -> bool {
        self.run.is_over
    }

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, self.rng_seed, |hasher| {
            let [s0, s1] = self.rng.state();
            hasher.update_u64(s0);
            hasher.update_u64(s1);

            hasher.update_u32(self.run.score);
            hasher.update_f32(self.run.speed);
            hasher.update_u32(self.run.level);
            hasher.update_bool(self.run.is_over);
            hasher.update_f32(self.run.ground_offset);
            hasher.update_u32(self.run.coins_collected);

            self.player.hash_into(hasher);

            hasher.update_u32(self.obstacles.len() as u32);
            for obstacle in &self.obstacles {
                hasher.update_u8(obstacle.kind as u8);
                hasher.update_f32(obstacle.x);
            }

            hasher.update_u32(self.coins.len() as u32);
            for coin in &self.coins {
                hasher.update_f32(coin.x);
                hasher.update_bool(coin.collected);
            }

            hasher.update_u32(self.power_ups.len() as u32);
            for power_up in &self.power_ups {
                hasher.update_str(power_up.kind.name());
                hasher.update_f32(power_up.x);
                hasher.update_bool(power_up.collected);
            }

            self.spawn.hash_into(hasher);
        })
    }

    /// Read-only view for renderers.
    pub fn snapshot(&self, config: &GameConfig) -> Snapshot {
        Snapshot {
            tick: self.tick,
            obstacles: self.obstacles.clone(),
            coins: self.coins.clone(),
            power_ups: self.power_ups.clone(),
            posture: self.player.posture,
            is_jumping: self.player.is_jumping(),
            is_ducking: self.player.is_ducking(),
            jump_offset: self.player.jump_offset(config),
            has_shield: self.player.has_shield(),
            shield_fraction: self.player.shield_fraction(config),
            score: self.run.score,
            speed: self.run.speed,
            level: self.run.level,
            ground_offset: self.run.ground_offset,
            is_over: self.run.is_over,
        }
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Everything a renderer needs for one frame, copied out after a tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Ticks since the run started
    pub tick: u64,
    /// Live hazards, in list order
    pub obstacles: Vec<Obstacle>,
    /// Live coins, collected ones included until purged
    pub coins: Vec<Coin>,
    /// Live power-ups, collected ones included until purged
    pub power_ups: Vec<PowerUp>,
    /// Player posture
    pub posture: Posture,
    /// Player is airborne
    pub is_jumping: bool,
    /// Player is crouched
    pub is_ducking: bool,
    /// Height above the ground line
    pub jump_offset: f32,
    /// Shield is up
    pub has_shield: bool,
    /// Remaining shield in [0, 1]
    pub shield_fraction: f32,
    /// Current score
    pub score: u32,
    /// Current scroll speed
    pub speed: f32,
    /// Speed escalations + 1
    pub level: u32,
    /// Ground texture offset in [0, ground_period)
    pub ground_offset: f32,
    /// Run has ended
    pub is_over: bool,
}

// =============================================================================
// TESTS
// =============================================================================
