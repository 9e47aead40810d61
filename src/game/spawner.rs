//! Entity Spawning
//!
//! Each category runs its own timer against a threshold drawn uniformly
//! from the category's window. Crossing the threshold spawns one entity at
//! the right edge of the field and restarts the timer with a fresh draw.
//! Categories never coordinate; they may all fire on the same frame.

use serde::{Serialize, Deserialize};
use tracing::{debug, warn};

use crate::core::hash::StateHasher;
use crate::core::rng::DeterministicRng;
use crate::game::config::{GameConfig, SpawnWindow};
use crate::game::entity::{Coin, Obstacle, ObstacleKind, PowerUp, PowerUpKind};
use crate::game::state::GameState;

/// Timer for one spawn category.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    /// Time since this category last spawned (or since reset)
    pub since_last_ms: f64,
    /// Gap that must be exceeded before the next spawn
    pub threshold_ms: f64,
}

impl SpawnTimer {
    /// Start a timer at zero with a fresh threshold.
    pub fn new(window: SpawnWindow, rng: &mut DeterministicRng) -> Self {
        Self {
            since_last_ms: 0.0,
            threshold_ms: rng.next_range(window.min_ms, window.max_ms),
        }
    }

    /// Add elapsed time. Returns true if the threshold is now exceeded.
    #[inline]
    pub fn advance(&mut self, delta_ms: f64) -> bool {
        self.since_last_ms += delta_ms;
        self.since_last_ms > self.threshold_ms
    }

    /// Restart after a spawn.
    #[inline]
    pub fn restart(&mut self, window: SpawnWindow, rng: &mut DeterministicRng) {
        *self = Self::new(window, rng);
    }
}

/// Timers for all categories.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimers {
    /// Hazard cadence
    pub obstacle: SpawnTimer,
    /// Coin cadence
    pub coin: SpawnTimer,
    /// Power-up cadence
    pub power_up: SpawnTimer,
}

impl SpawnTimers {
    /// Fresh timers. Draws thresholds in a fixed order: obstacle, coin, power-up.
    pub fn new(rng: &mut DeterministicRng, config: &GameConfig) -> Self {
        Self {
            obstacle: SpawnTimer::new(config.obstacle_window, rng),
            coin: SpawnTimer::new(config.coin_window, rng),
            power_up: SpawnTimer::new(config.power_up_window, rng),
        }
    }

    /// Hash timer state for verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        for timer in [&self.obstacle, &self.coin, &self.power_up] {
            hasher.update_f64(timer.since_last_ms);
            hasher.update_f64(timer.threshold_ms);
        }
    }
}

/// Pick a hazard kind.
fn random_obstacle_kind(rng: &mut DeterministicRng, config: &GameConfig) -> ObstacleKind {
    if rng.next_chance(config.flying_chance) {
        ObstacleKind::FlyingHazard
    } else {
        ObstacleKind::GroundHazard
    }
}

/// Pick a power-up kind from the configured names.
fn random_power_up_kind(rng: &mut DeterministicRng, config: &GameConfig) -> Option<PowerUpKind> {
    rng.choose(&config.power_up_kinds)
        .map(|name| PowerUpKind::from_name(name))
}

/// Advance all spawn timers and append whatever became due.
pub fn maybe_spawn(state: &mut GameState, delta_ms: f64, config: &GameConfig) {
    let x = config.field_width;

    if state.spawn.obstacle.advance(delta_ms) {
        let kind = random_obstacle_kind(&mut state.rng, config);
        state.obstacles.push(Obstacle::new(kind, x));
        state.spawn.obstacle.restart(config.obstacle_window, &mut state.rng);
        debug!(tick = state.tick, ?kind, "obstacle spawned");
    }

    if state.spawn.coin.advance(delta_ms) {
        state.coins.push(Coin::new(x));
        state.spawn.coin.restart(config.coin_window, &mut state.rng);
        debug!(tick = state.tick, "coin spawned");
    }

    if state.spawn.power_up.advance(delta_ms) {
        match random_power_up_kind(&mut state.rng, config) {
            Some(kind) => {
                debug!(tick = state.tick, %kind, "power-up spawned");
                state.power_ups.push(PowerUp::new(kind, x));
            }
            None => warn!("power-up due but no power-up kinds are configured"),
        }
        state.spawn.power_up.restart(config.power_up_window, &mut state.rng);
    }
}
