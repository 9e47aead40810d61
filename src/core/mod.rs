//! Core primitives.
//!
//! Injectable randomness and time, box geometry, and state hashing.

pub mod rng;
pub mod clock;
pub mod geom;
pub mod hash;

// Re-export core types
pub use rng::DeterministicRng;
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use geom::Aabb;
pub use hash::{compute_state_hash, StateHash, StateHasher};
