//! Game Logic Module
//!
//! The simulation core. Given the same seed, config and inputs, it
//! produces the same run.
//!
//! ## Module Structure
//!
//! - `config`: Tunable constants and config loading
//! - `entity`: Hazards, coins, power-ups and their bounding boxes
//! - `player`: Posture, jump arc, shield
//! - `spawner`: Per-category spawn timers
//! - `motion`: Scrolling
//! - `collision`: Collision detection and resolution
//! - `score`: Score and speed escalation
//! - `events`: Outcome events and the host callback sink
//! - `input`: Control frames and recordings
//! - `state`: Run state and snapshots
//! - `tick`: Per-frame pipeline
//! - `engine`: Facade used by the hosting screen

pub mod config;
pub mod entity;
pub mod player;
pub mod spawner;
pub mod motion;
pub mod collision;
pub mod score;
pub mod events;
pub mod input;
pub mod state;
pub mod tick;
pub mod engine;

// Re-export key types
pub use config::{AppConfig, ConfigError, GameConfig, HostConfig};
pub use engine::Game;
pub use entity::{Coin, Obstacle, ObstacleKind, PowerUp, PowerUpKind};
pub use events::{dispatch, EventSink, GameEvent, GameEventData};
pub use input::{InputFrame, Recording};
pub use player::{PlayerStatus, Posture};
pub use state::{GameState, Snapshot};
pub use tick::TickResult;
