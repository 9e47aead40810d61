//! Score and Difficulty
//!
//! Score only grows within a run. Each multiple of the milestone crossed
//! raises speed by one step, up to the ceiling.

use tracing::debug;

use crate::game::config::GameConfig;
use crate::game::state::RunState;

/// Add points and escalate speed for every milestone crossed.
///
/// Returns the new speed if it changed.
pub fn add_points(run: &mut RunState, points: u32, config: &GameConfig) -> Option<f32> {
    if points == 0 {
        return None;
    }

    let old_score = run.score;
    run.score = run.score.saturating_add(points);

    let crossed = run.score / config.speed_milestone - old_score / config.speed_milestone;
    if crossed == 0 || run.speed >= config.max_speed {
        return None;
    }

    let old_speed = run.speed;
    run.speed = (run.speed + config.speed_step * crossed as f32).min(config.max_speed);
    if run.speed > old_speed {
        run.level += 1;
        debug!(score = run.score, speed = run.speed, "speed increased");
        Some(run.speed)
    } else {
        None
    }
}
