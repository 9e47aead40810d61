//! Simulation Tick
//!
//! One frame of the run: move → spawn → player status → collision → score.
//! A tick either runs to completion or, when the run is over, changes
//! nothing. Its outcomes come back as a list of events.

use tracing::{debug, info};

use crate::game::collision::process_collisions;
use crate::game::config::GameConfig;
use crate::game::events::GameEvent;
use crate::game::input::{InputFrame, Recording};
use crate::game::motion::advance_entities;
use crate::game::score::add_points;
use crate::game::spawner::maybe_spawn;
use crate::game::state::GameState;

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick, in emission order
    pub events: Vec<GameEvent>,
    /// Whether the run is over after this tick
    pub game_over: bool,
    /// Score after this tick
    pub score: u32,
}

/// Clamp a host-supplied frame delta into `[0, max_frame_delta_ms]`.
///
/// Non-finite and negative deltas count as zero.
pub fn sanitize_delta(delta_ms: f64, config: &GameConfig) -> f64 {
    if !delta_ms.is_finite() || delta_ms < 0.0 {
        return 0.0;
    }
    delta_ms.min(config.max_frame_delta_ms)
}

/// Run one simulation tick.
///
/// # Arguments
///
/// * `state` - The run state (will be mutated)
/// * `input` - Controls to apply before advancing
/// * `delta_ms` - Time since the previous tick
/// * `config` - Game configuration
pub fn tick(
    state: &mut GameState,
    input: &InputFrame,
    delta_ms: f64,
    config: &GameConfig,
) -> TickResult {
    let mut result = TickResult::default();

    // The tick's own score report covers the reset
    let restarted = input.reset_requested();
    if restarted {
        state.reset(config);
        info!("run reset");
    }

    if state.run.is_over {
        // Frozen until reset
        result.game_over = true;
        result.score = state.run.score;
        result.events = state.take_events();
        return result;
    }

    apply_input(state, input);

    let delta_ms = sanitize_delta(delta_ms, config);
    let score_before = state.run.score;

    // 0. Advance tick counter
    state.tick += 1;

    #[cfg(feature = "debug-tracing")]
    tracing::trace!(tick = state.tick, delta_ms, "tick");

    // 1. Scroll entities and ground
    advance_entities(state, config);

    // 2. Spawn due entities at the right edge
    maybe_spawn(state, delta_ms, config);

    // 3. Jump progress and shield decay
    if state.player.advance(delta_ms, config) {
        debug!(tick = state.tick, "shield expired");
        state.push_event(GameEvent::shield_expired(state.tick));
    }

    // 4. Collisions and purge
    process_collisions(state, config);

    // 5. Baseline score while still running
    if !state.run.is_over {
        if let Some(speed) = add_points(&mut state.run, config.points_per_frame, config) {
            state.push_event(GameEvent::speed_increased(state.tick, speed));
        }
    }

    if restarted || state.run.score != score_before {
        state.push_event(GameEvent::score_changed(state.tick, state.run.score));
    }

    result.game_over = state.run.is_over;
    result.score = state.run.score;
    result.events = state.take_events();
    result
}

/// Apply controls in a fixed order: duck, then jump.
fn apply_input(state: &mut GameState, input: &InputFrame) {
    if input.duck_pressed() {
        handle_duck(state, true);
    }
    if input.duck_released() {
        handle_duck(state, false);
    }
    if input.jump_pressed() {
        handle_jump(state);
    }
}

/// Start a jump. No-op if the run is over or already airborne.
pub fn handle_jump(state: &mut GameState) -> bool {
    if state.run.is_over {
        debug!("jump ignored: run is over");
        return false;
    }
    state.player.try_jump()
}

/// Press or release duck. No-op if the run is over or airborne.
pub fn handle_duck(state: &mut GameState, active: bool) -> bool {
    if state.run.is_over {
        debug!("duck ignored: run is over");
        return false;
    }
    state.player.set_ducking(active)
}

/// Start a fresh run. Queues a score change to zero.
pub fn reset(state: &mut GameState, config: &GameConfig) {
    state.reset(config);
    info!("run reset");
    state.push_event(GameEvent::score_changed(0, 0));
}

/// Replay a recorded run from its seed.
///
/// Returns final state and all events.
pub fn replay(config: &GameConfig, recording: &Recording) -> (GameState, Vec<GameEvent>) {
    let mut state = GameState::new(recording.seed, config);
    let mut all_events = Vec::new();

    for frame in &recording.frames {
        let result = tick(&mut state, &frame.input, frame.delta_ms, config);
        all_events.extend(result.events);
    }

    (state, all_events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entity::{Coin, Obstacle, ObstacleKind};
    use crate::game::events::GameEventData;

    fn quiet_config() -> GameConfig {
        use crate::game::config::SpawnWindow;
        // Nothing spawns within a test's horizon
        GameConfig {
            obstacle_window: SpawnWindow::new(1e9, 1e9),
            coin_window: SpawnWindow::new(1e9, 1e9),
            power_up_window: SpawnWindow::new(1e9, 1e9),
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_tick_determinism() {
        let config = GameConfig::default();
        let mut state1 = GameState::new(12345, &config);
        let mut state2 = GameState::new(12345, &config);

        for t in 0..2_000u32 {
            let input = if t % 40 == 0 { InputFrame::jump() } else { InputFrame::new() };
            let input = if t % 997 == 0 { InputFrame::reset() } else { input };
            tick(&mut state1, &input, 16.0, &config);
            tick(&mut state2, &input, 16.0, &config);
        }

        assert_eq!(state1.tick, state2.tick);
        assert_eq!(state1.compute_hash(), state2.compute_hash());
    }

    #[test]
    fn test_score_and_speed_after_500_ticks() {
        let config = quiet_config();
        let mut state = GameState::new(1, &config);

        for _ in 0..500 {
            tick(&mut state, &InputFrame::new(), 16.0, &config);
        }

        assert_eq!(state.run.score, 500);
        assert_eq!(state.run.speed, 6.0);
    }

    #[test]
    fn test_one_score_event_per_tick() {
        let config = quiet_config();
        let mut state = GameState::new(1, &config);
        state.coins.push(Coin::new(config.player_x + config.base_speed));
        state.player.try_jump();
        state.player.advance(config.jump_duration_ms / 2.0 - 16.0, &config);

        let result = tick(&mut state, &InputFrame::new(), 16.0, &config);

        let scores: Vec<_> = result
            .events
            .iter()
            .filter_map(|e| match e.data {
                GameEventData::ScoreChanged { score } => Some(score),
                _ => None,
            })
            .collect();
        assert_eq!(scores, vec![config.coin_bonus + 1]);
        assert_eq!(result.score, config.coin_bonus + 1);
    }

    #[test]
    fn test_frozen_after_game_over() {
        let config = GameConfig::default();
        let mut state = GameState::new(1, &config);
        state.obstacles.push(Obstacle::new(ObstacleKind::GroundHazard, config.player_x + config.base_speed));

        let result = tick(&mut state, &InputFrame::new(), 16.0, &config);
        assert!(result.game_over);
        assert_eq!(result.events.len(), 2);

        let hash = state.compute_hash();
        for _ in 0..100 {
            let result = tick(&mut state, &InputFrame::jump(), 250.0, &config);
            assert!(result.game_over);
            assert!(result.events.is_empty());
        }
        assert_eq!(hash, state.compute_hash());
        assert!(!state.player.is_jumping());
    }

    #[test]
    fn test_reset_flag_restarts_run() {
        let config = quiet_config();
        let mut state = GameState::new(1, &config);
        state.run.is_over = true;
        state.run.score = 777;

        let result = tick(&mut state, &InputFrame::reset(), 16.0, &config);

        assert!(!result.game_over);
        assert_eq!(result.score, 1);
        let scores: Vec<_> = result
            .events
            .iter()
            .filter(|e| matches!(e.data, GameEventData::ScoreChanged { .. }))
            .collect();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].data, GameEventData::ScoreChanged { score: 1 });
    }

    #[test]
    fn test_reset_flag_reports_score_even_when_unchanged() {
        let config = GameConfig {
            points_per_frame: 0,
            ..quiet_config()
        };
        let mut state = GameState::new(1, &config);

        let result = tick(&mut state, &InputFrame::reset(), 16.0, &config);

        assert_eq!(result.events.len(), 1);
        assert_eq!(result.events[0].data, GameEventData::ScoreChanged { score: 0 });
    }

    #[test]
    fn test_jump_lasts_600ms_of_ticks() {
        let config = quiet_config();
        let mut state = GameState::new(1, &config);

        tick(&mut state, &InputFrame::jump(), 20.0, &config);
        for _ in 0..28 {
            tick(&mut state, &InputFrame::new(), 20.0, &config);
        }
        assert!(state.player.is_jumping());

        tick(&mut state, &InputFrame::new(), 20.0, &config);
        assert!(!state.player.is_jumping());
    }

    #[test]
    fn test_shield_expiry_event() {
        let config = quiet_config();
        let mut state = GameState::new(1, &config);
        state.player.activate_shield(30.0);

        let first = tick(&mut state, &InputFrame::new(), 16.0, &config);
        assert!(!first.events.iter().any(|e| e.data == GameEventData::ShieldExpired));

        let second = tick(&mut state, &InputFrame::new(), 16.0, &config);
        assert!(second.events.iter().any(|e| e.data == GameEventData::ShieldExpired));
        assert!(!state.player.has_shield());
    }

    #[test]
    fn test_bad_deltas_sanitized() {
        let config = GameConfig::default();
        assert_eq!(sanitize_delta(f64::NAN, &config), 0.0);
        assert_eq!(sanitize_delta(-5.0, &config), 0.0);
        assert_eq!(sanitize_delta(f64::INFINITY, &config), 0.0);
        assert_eq!(sanitize_delta(10_000.0, &config), config.max_frame_delta_ms);
        assert_eq!(sanitize_delta(16.7, &config), 16.7);
    }

    #[test]
    fn test_replay_matches_live_run() {
        let config = GameConfig::default();
        let mut live = GameState::new(99999, &config);
        let mut recording = Recording::new(99999);
        let mut live_events = 0;

        for t in 0..1_500u32 {
            let input = match t % 90 {
                0 => InputFrame::jump(),
                45 => InputFrame::duck(true),
                60 => InputFrame::duck(false),
                _ => InputFrame::new(),
            };
            let input = if live.is_over() { InputFrame::reset() } else { input };
            recording.push(16.0, input);
            live_events += tick(&mut live, &input, 16.0, &config).events.len();
        }

        let (replayed, events) = replay(&config, &recording);
        assert_eq!(replayed.compute_hash(), live.compute_hash());
        assert_eq!(events.len(), live_events);
    }
}
