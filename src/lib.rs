//! # Arcade Runner
//!
//! Simulation core for a side-scrolling obstacle-dodging arcade mini-game,
//! plus the hosting layer that drives it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ARCADE RUNNER                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Primitives                                │
//! │  ├── rng.rs      - Seeded Xorshift128+ PRNG                  │
//! │  ├── clock.rs    - Injectable time sources                   │
//! │  ├── geom.rs     - Axis-aligned boxes                        │
//! │  └── hash.rs     - State hashing for verification            │
//! │                                                              │
//! │  game/           - Simulation core (deterministic)           │
//! │  ├── config.rs   - Tunables and config loading               │
//! │  ├── entity.rs   - Hazards, coins, power-ups                 │
//! │  ├── player.rs   - Posture, jump arc, shield                 │
//! │  ├── spawner.rs  - Per-category spawn timers                 │
//! │  ├── motion.rs   - Scrolling                                 │
//! │  ├── collision.rs- Collision detection                       │
//! │  ├── score.rs    - Score and speed escalation                │
//! │  ├── events.rs   - Outcome events, host callbacks            │
//! │  ├── input.rs    - Control frames, recordings                │
//! │  ├── state.rs    - Run state, snapshots                      │
//! │  ├── tick.rs     - Per-frame pipeline                        │
//! │  └── engine.rs   - Facade for the hosting screen             │
//! │                                                              │
//! │  host/           - Hosting screen (reads the clock)          │
//! │  ├── hearts.rs   - Heart economy                             │
//! │  ├── session.rs  - Host-owned state, event application       │
//! │  └── driver.rs   - Async frame loop                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! The `game/` modules never read the clock or an ambient RNG:
//! - Elapsed time is passed into every tick
//! - All randomness comes from the seeded Xorshift128+ in the state
//! - Entity collections are processed in list order
//!
//! Given the same seed, config and recorded inputs, a run replays to the
//! same state hash.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod host;

// Re-export commonly used types
pub use core::clock::{Clock, ManualClock, MonotonicClock};
pub use core::rng::DeterministicRng;
pub use game::config::{AppConfig, ConfigError, GameConfig, HostConfig};
pub use game::engine::Game;
pub use game::events::{dispatch, EventSink, GameEvent, GameEventData};
pub use game::input::{InputFrame, Recording};
pub use game::state::Snapshot;
pub use game::tick::{replay, tick, TickResult};
pub use host::{Control, DriverHandle, FrameDriver, HeartEconomy, HostSession, SessionError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default redraw rate (Hz)
pub const TICK_RATE: u32 = 60;
