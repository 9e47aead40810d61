//! State Digest
//!
//! SHA-256 over the run state in a fixed field order. Live play and a
//! replay of its recording must land on the same digest.

use sha2::{Digest, Sha256};

/// 32-byte SHA-256 digest of a run.
pub type StateHash = [u8; 32];

/// Domain tag prefixed to every run digest.
const RUN_DOMAIN: &[u8] = b"ARCADE_RUNNER_STATE_V1";

/// Incremental digest builder.
///
/// Numbers go in little-endian, floats by bit pattern, so `-0.0` and
/// `0.0` hash differently. Callers feed fields in a fixed order.
pub struct StateHasher {
    inner: Sha256,
}

impl StateHasher {
    /// Start a digest tagged with `domain`.
    pub fn new(domain: &[u8]) -> Self {
        let mut inner = Sha256::new();
        inner.update(domain);
        Self { inner }
    }

    /// Start a run-state digest.
    pub fn for_run_state() -> Self {
        Self::new(RUN_DOMAIN)
    }

    /// Feed a byte.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.inner.update([value]);
    }

    /// Feed a u32.
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.inner.update(value.to_le_bytes());
    }

    /// Feed a u64.
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.inner.update(value.to_le_bytes());
    }

    /// Feed an f32.
    #[inline]
    pub fn update_f32(&mut self, value: f32) {
        self.update_u32(value.to_bits());
    }

    /// Feed an f64.
    #[inline]
    pub fn update_f64(&mut self, value: f64) {
        self.update_u64(value.to_bits());
    }

    /// Feed a flag as one byte.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(u8::from(value));
    }

    /// Length-prefixed so adjacent strings cannot run together.
    #[inline]
    pub fn update_str(&mut self, value: &str) {
        self.update_u32(value.len() as u32);
        self.inner.update(value.as_bytes());
    }

    /// Consume the builder.
    pub fn finalize(self) -> StateHash {
        self.inner.finalize().into()
    }
}

/// Digest a run: tick and seed first, then whatever `add_state` feeds.
pub fn compute_state_hash<F>(tick: u64, rng_seed: u64, add_state: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_run_state();
    hasher.update_u64(tick);
    hasher.update_u64(rng_seed);
    add_state(&mut hasher);
    hasher.finalize()
}
