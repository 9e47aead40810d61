//! Scrolling
//!
//! Everything moves left by the current speed once per frame, regardless
//! of kind. Motion is per frame, not per millisecond.

use crate::game::config::GameConfig;
use crate::game::state::GameState;

/// Shift every live entity and the ground texture.
pub fn advance_entities(state: &mut GameState, config: &GameConfig) {
    let speed = state.run.speed;

    for obstacle in &mut state.obstacles {
        obstacle.x -= speed;
    }
    for coin in &mut state.coins {
        coin.x -= speed;
    }
    for power_up in &mut state.power_ups {
        power_up.x -= speed;
    }

    state.run.ground_offset = (state.run.ground_offset - speed).rem_euclid(config.ground_period);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entity::{Coin, Obstacle, ObstacleKind, PowerUp, PowerUpKind};

    #[test]
    fn test_entities_shift_by_speed() {
        let config = GameConfig::default();
        let mut state = GameState::new(1, &config);
        state.obstacles.push(Obstacle::new(ObstacleKind::GroundHazard, 800.0));
        state.obstacles.push(Obstacle::new(ObstacleKind::FlyingHazard, 400.0));
        state.coins.push(Coin::new(500.0));
        state.power_ups.push(PowerUp::new(PowerUpKind::Shield, 600.0));

        advance_entities(&mut state, &config);

        assert_eq!(state.obstacles[0].x, 795.0);
        assert_eq!(state.obstacles[1].x, 395.0);
        assert_eq!(state.coins[0].x, 495.0);
        assert_eq!(state.power_ups[0].x, 595.0);
    }

    #[test]
    fn test_ground_offset_wraps() {
        let config = GameConfig::default();
        let mut state = GameState::new(1, &config);

        advance_entities(&mut state, &config);
        assert_eq!(state.run.ground_offset, 95.0);

        for _ in 0..19 {
            advance_entities(&mut state, &config);
        }
        assert_eq!(state.run.ground_offset, 0.0);

        state.run.speed = 7.0;
        for _ in 0..100 {
            advance_entities(&mut state, &config);
            assert!((0.0..config.ground_period).contains(&state.run.ground_offset));
        }
    }

    #[test]
    fn test_motion_independent_of_kind() {
        let config = GameConfig::default();
        let mut state = GameState::new(1, &config);
        state.run.speed = 12.0;
        state.obstacles.push(Obstacle::new(ObstacleKind::GroundHazard, 300.0));
        state.obstacles.push(Obstacle::new(ObstacleKind::FlyingHazard, 300.0));
        state.coins.push(Coin::new(300.0));

        for _ in 0..10 {
            advance_entities(&mut state, &config);
        }

        assert_eq!(state.obstacles[0].x, state.obstacles[1].x);
        assert_eq!(state.obstacles[0].x, state.coins[0].x);
        assert_eq!(state.coins[0].x, 180.0);
    }
}
