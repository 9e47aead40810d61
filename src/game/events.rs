//! Game Events
//!
//! Outcomes produced by a tick. The core never calls into the host while a
//! tick is running; it returns these and the host applies them afterwards
//! through [`dispatch`].

use serde::{Serialize, Deserialize};

use crate::game::entity::{ObstacleKind, PowerUpKind};

/// Priority for event processing order.
///
/// Lower value = processed first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum EventPriority {
    /// Hazard hits (heart loss, game over, shield absorption)
    Collision = 0,
    /// Coin and power-up pickups
    Pickup = 1,
    /// Score and speed changes
    Progress = 2,
    /// Status bookkeeping and diagnostics
    Other = 255,
}

/// Game event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// Score changed this tick (coalesced, carries the final value)
    ScoreChanged {
        /// Score after the tick
        score: u32,
    },

    /// Coins picked up
    CoinCollected {
        /// Coins picked up at once
        count: u32,
    },

    /// A power-up was picked up
    PowerUpCollected {
        /// Kind picked up
        kind: PowerUpKind,
    },

    /// Unshielded hazard hit; the host should take a heart
    HeartLost,

    /// The run ended
    GameOver {
        /// Score at the moment of the hit
        final_score: u32,
    },

    /// The shield soaked up a hazard, which was destroyed
    ShieldAbsorbed {
        /// Kind of hazard destroyed
        obstacle: ObstacleKind,
    },

    /// The shield timed out
    ShieldExpired,

    /// Scroll speed went up at a score milestone
    SpeedIncreased {
        /// New scroll speed
        speed: f32,
    },

    /// A picked-up power-up had no effect to apply
    PowerUpEffectSkipped {
        /// Configured kind name
        kind: String,
    },
}

impl GameEventData {
    fn priority(&self) -> EventPriority {
        match self {
            GameEventData::HeartLost
            | GameEventData::GameOver { .. }
            | GameEventData::ShieldAbsorbed { .. } => EventPriority::Collision,
            GameEventData::CoinCollected { .. } | GameEventData::PowerUpCollected { .. } => {
                EventPriority::Pickup
            }
            GameEventData::ScoreChanged { .. } | GameEventData::SpeedIncreased { .. } => {
                EventPriority::Progress
            }
            GameEventData::ShieldExpired | GameEventData::PowerUpEffectSkipped { .. } => {
                EventPriority::Other
            }
        }
    }
}

/// A game event with timing and priority.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when event occurred
    pub tick: u64,

    /// Processing priority
    pub priority: EventPriority,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event; priority follows from the data.
    pub fn new(tick: u64, data: GameEventData) -> Self {
        Self {
            tick,
            priority: data.priority(),
            data,
        }
    }

    /// Create score changed event.
    pub fn score_changed(tick: u64, score: u32) -> Self {
        Self::new(tick, GameEventData::ScoreChanged { score })
    }

    /// Create coin collected event.
    pub fn coin_collected(tick: u64, count: u32) -> Self {
        Self::new(tick, GameEventData::CoinCollected { count })
    }

    /// Create power-up collected event.
    pub fn power_up_collected(tick: u64, kind: PowerUpKind) -> Self {
        Self::new(tick, GameEventData::PowerUpCollected { kind })
    }

    /// Create heart lost event.
    pub fn heart_lost(tick: u64) -> Self {
        Self::new(tick, GameEventData::HeartLost)
    }

    /// Create game over event.
    pub fn game_over(tick: u64, final_score: u32) -> Self {
        Self::new(tick, GameEventData::GameOver { final_score })
    }

    /// Create shield absorbed event.
    pub fn shield_absorbed(tick: u64, obstacle: ObstacleKind) -> Self {
        Self::new(tick, GameEventData::ShieldAbsorbed { obstacle })
    }

    /// Create shield expired event.
    pub fn shield_expired(tick: u64) -> Self {
        Self::new(tick, GameEventData::ShieldExpired)
    }

    /// Create speed increased event.
    pub fn speed_increased(tick: u64, speed: f32) -> Self {
        Self::new(tick, GameEventData::SpeedIncreased { speed })
    }

    /// Create power-up effect skipped event.
    pub fn power_up_effect_skipped(tick: u64, kind: &str) -> Self {
        Self::new(tick, GameEventData::PowerUpEffectSkipped { kind: kind.to_string() })
    }
}

impl GameEvent {
    /// Processing order: tick, then priority. Events that share a key keep
    /// their emission order under a stable sort.
    pub fn order_key(&self) -> (u64, EventPriority) {
        (self.tick, self.priority)
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Host-side receiver for the outbound callbacks.
///
/// Every method defaults to a no-op so hosts implement only what they use.
pub trait EventSink {
    /// Score changed.
    fn on_score_change(&mut self, _score: u32) {}

    /// Coins were collected.
    fn on_coin_collected(&mut self, _count: u32) {}

    /// A power-up was collected.
    fn on_power_up_collected(&mut self, _kind: &PowerUpKind) {}

    /// A hazard hit the unshielded player.
    fn on_heart_lost(&mut self) {}

    /// The run is over.
    fn on_game_over(&mut self) {}
}

/// Apply a completed tick's events to a sink, in emission order.
///
/// Diagnostic events have no callback and are skipped.
pub fn dispatch<S: EventSink + ?Sized>(events: &[GameEvent], sink: &mut S) {
    for event in events {
        match &event.data {
            GameEventData::ScoreChanged { score } => sink.on_score_change(*score),
            GameEventData::CoinCollected { count } => sink.on_coin_collected(*count),
            GameEventData::PowerUpCollected { kind } => sink.on_power_up_collected(kind),
            GameEventData::HeartLost => sink.on_heart_lost(),
            GameEventData::GameOver { .. } => sink.on_game_over(),
            GameEventData::ShieldAbsorbed { .. }
            | GameEventData::ShieldExpired
            | GameEventData::SpeedIncreased { .. }
            | GameEventData::PowerUpEffectSkipped { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Tally {
        calls: Vec<String>,
    }

    impl EventSink for Tally {
        fn on_score_change(&mut self, score: u32) {
            self.calls.push(format!("score:{}", score));
        }
        fn on_coin_collected(&mut self, count: u32) {
            self.calls.push(format!("coin:{}", count));
        }
        fn on_power_up_collected(&mut self, kind: &PowerUpKind) {
            self.calls.push(format!("power:{}", kind));
        }
        fn on_heart_lost(&mut self) {
            self.calls.push("heart".into());
        }
        fn on_game_over(&mut self) {
            self.calls.push("over".into());
        }
    }

    #[test]
    fn test_event_ordering() {
        let later = GameEvent::heart_lost(11);
        let score = GameEvent::score_changed(10, 60);
        let coin = GameEvent::coin_collected(10, 1);
        let hit = GameEvent::heart_lost(10);

        let mut events = vec![later.clone(), score.clone(), coin.clone(), hit.clone()];
        events.sort_by_key(GameEvent::order_key);
        assert_eq!(events, vec![hit, coin, score, later]);
    }

    #[test]
    fn test_equality_includes_data() {
        assert_eq!(GameEvent::heart_lost(3).priority, GameEvent::game_over(3, 10).priority);
        assert_ne!(GameEvent::heart_lost(3), GameEvent::game_over(3, 10));
        assert_ne!(GameEvent::score_changed(3, 1), GameEvent::score_changed(3, 2));
        assert_eq!(GameEvent::coin_collected(3, 1), GameEvent::coin_collected(3, 1));
    }

    #[test]
    fn test_dispatch_preserves_order_and_skips_diagnostics() {
        let events = vec![
            GameEvent::coin_collected(3, 1),
            GameEvent::shield_expired(3),
            GameEvent::power_up_collected(3, PowerUpKind::Shield),
            GameEvent::power_up_effect_skipped(3, "magnet"),
            GameEvent::heart_lost(3),
            GameEvent::game_over(3, 120),
            GameEvent::score_changed(3, 120),
        ];

        let mut tally = Tally::default();
        dispatch(&events, &mut tally);

        assert_eq!(
            tally.calls,
            vec!["coin:1", "power:shield", "heart", "over", "score:120"]
        );
    }

    #[test]
    fn test_default_sink_is_noop() {
        struct Nothing;
        impl EventSink for Nothing {}

        dispatch(&[GameEvent::heart_lost(0)], &mut Nothing);
    }
}
