//! Heart Economy
//!
//! Hearts are the hosting screen's lives. Each hazard hit costs one heart
//! and queues a regeneration timestamp; a periodic check turns every due
//! timestamp back into a heart, capped at the maximum.

use std::collections::VecDeque;

use serde::{Serialize, Deserialize};
use tracing::{debug, info};

use crate::game::config::HostConfig;

/// Bounded hearts plus a FIFO of regeneration deadlines (absolute ms).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeartEconomy {
    /// Hearts available now
    pub hearts: u8,

    /// Heart cap
    pub max_hearts: u8,

    /// Pending regeneration deadlines, oldest first
    pub cooldown: VecDeque<u64>,

    /// Delay from loss to regeneration
    pub regen_ms: u64,
}

impl HeartEconomy {
    /// Create from host settings.
    pub fn new(config: &HostConfig) -> Self {
        Self {
            hearts: config.starting_hearts.min(config.max_hearts),
            max_hearts: config.max_hearts,
            cooldown: VecDeque::new(),
            regen_ms: config.regen_cooldown_ms,
        }
    }

    /// Spend one heart at `now_ms`.
    ///
    /// Returns false (and queues nothing) if there were no hearts left.
    pub fn lose_heart(&mut self, now_ms: u64) -> bool {
        if self.hearts == 0 {
            debug!("heart lost with none left, ignored");
            return false;
        }
        self.hearts -= 1;
        let due = now_ms.saturating_add(self.regen_ms);
        self.cooldown.push_back(due);
        debug!(hearts = self.hearts, due, "heart lost");
        true
    }

    /// Convert every deadline at or before `now_ms` into a heart.
    ///
    /// Due deadlines are consumed even when the cap absorbs them.
    /// Returns the number of hearts actually gained.
    pub fn regenerate(&mut self, now_ms: u64) -> u8 {
        let before = self.hearts;

        // Deadlines are queued in loss order with a fixed delay, so the due
        // ones are always at the front.
        while let Some(&due) = self.cooldown.front() {
            if due > now_ms {
                break;
            }
            self.cooldown.pop_front();
            self.hearts = self.hearts.saturating_add(1).min(self.max_hearts);
        }

        let gained = self.hearts - before;
        if gained > 0 {
            info!(gained, hearts = self.hearts, "hearts regenerated");
        }
        gained
    }

    /// Grant a heart outright (capped). Returns false at the cap.
    pub fn grant_heart(&mut self) -> bool {
        if self.hearts >= self.max_hearts {
            return false;
        }
        self.hearts += 1;
        true
    }

    /// Time until the next queued heart, if any.
    pub fn next_regeneration_in(&self, now_ms: u64) -> Option<u64> {
        self.cooldown.front().map(|&due| due.saturating_sub(now_ms))
    }

    /// Check if no hearts are left.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hearts == 0
    }
}
