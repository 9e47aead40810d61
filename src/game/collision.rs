//! Collision Detection
//!
//! One pass per collection: every live entity is checked against the
//! player's hitbox once, and entities whose right edge has left the field
//! are purged in that same pass. Collections are processed in list order.

use tracing::{debug, info, warn};

use crate::core::geom::Aabb;
use crate::game::config::GameConfig;
use crate::game::entity::{Coin, Obstacle, PowerUp, PowerUpKind};
use crate::game::events::GameEvent;
use crate::game::player::PlayerStatus;
use crate::game::score::add_points;
use crate::game::state::GameState;

/// Check if the player touches an obstacle.
#[inline]
pub fn check_obstacle_collision(hitbox: &Aabb, obstacle: &Obstacle, config: &GameConfig) -> bool {
    hitbox.overlaps(&obstacle.bounds(config))
}

/// Check if the player picks up a coin. Collected coins never match.
#[inline]
pub fn check_coin_collision(hitbox: &Aabb, coin: &Coin, config: &GameConfig) -> bool {
    !coin.collected && hitbox.overlaps(&coin.bounds(config))
}

/// Check if the player picks up a power-up. Collected power-ups never match.
#[inline]
pub fn check_power_up_collision(hitbox: &Aabb, power_up: &PowerUp, config: &GameConfig) -> bool {
    !power_up.collected && hitbox.overlaps(&power_up.bounds(config))
}

/// Run the obstacle, coin and power-up passes against the current hitbox.
pub fn process_collisions(state: &mut GameState, config: &GameConfig) {
    let hitbox = state.player.hitbox(config);

    process_obstacle_collisions(state, &hitbox, config);
    process_coin_collisions(state, &hitbox, config);
    process_power_up_collisions(state, &hitbox, config);
}

/// Hazards: shield absorbs one and destroys it, otherwise the run ends.
///
/// Once the run is over within this pass, remaining hazards are only purged.
fn process_obstacle_collisions(state: &mut GameState, hitbox: &Aabb, config: &GameConfig) {
    let tick = state.tick;
    let run = &mut state.run;
    let player = &mut state.player;
    let events = &mut state.pending_events;

    state.obstacles.retain(|obstacle| {
        if obstacle.is_off_screen(config) {
            return false;
        }
        if run.is_over || !check_obstacle_collision(hitbox, obstacle, config) {
            return true;
        }

        if player.absorb_hit() {
            debug!(tick, kind = ?obstacle.kind, "shield absorbed hazard");
            events.push(GameEvent::shield_absorbed(tick, obstacle.kind));
            return false;
        }

        run.is_over = true;
        info!(tick, score = run.score, kind = ?obstacle.kind, "hazard hit, game over");
        events.push(GameEvent::heart_lost(tick));
        events.push(GameEvent::game_over(tick, run.score));
        true
    });
}

/// Coins: first overlap collects and awards the bonus.
fn process_coin_collisions(state: &mut GameState, hitbox: &Aabb, config: &GameConfig) {
    let tick = state.tick;
    let run = &mut state.run;
    let events = &mut state.pending_events;

    state.coins.retain_mut(|coin| {
        if coin.is_off_screen(config) {
            return false;
        }
        if !run.is_over && check_coin_collision(hitbox, coin, config) {
            coin.collected = true;
            run.coins_collected += 1;
            events.push(GameEvent::coin_collected(tick, 1));
            if let Some(speed) = add_points(run, config.coin_bonus, config) {
                events.push(GameEvent::speed_increased(tick, speed));
            }
        }
        true
    });
}

/// Power-ups: first overlap collects and applies the effect.
fn process_power_up_collisions(state: &mut GameState, hitbox: &Aabb, config: &GameConfig) {
    let tick = state.tick;
    let run = &state.run;
    let player = &mut state.player;
    let events = &mut state.pending_events;

    state.power_ups.retain_mut(|power_up| {
        if power_up.is_off_screen(config) {
            return false;
        }
        if !run.is_over && check_power_up_collision(hitbox, power_up, config) {
            power_up.collected = true;
            apply_power_up(player, &power_up.kind, tick, events, config);
            events.push(GameEvent::power_up_collected(tick, power_up.kind.clone()));
        }
        true
    });
}

/// Apply a power-up's effect. Kinds without an effect are reported and skipped.
fn apply_power_up(
    player: &mut PlayerStatus,
    kind: &PowerUpKind,
    tick: u64,
    events: &mut Vec<GameEvent>,
    config: &GameConfig,
) {
    match kind {
        PowerUpKind::Shield => {
            player.activate_shield(config.shield_duration_ms);
            debug!(tick, "shield raised");
        }
        PowerUpKind::Unrecognized(name) => {
            warn!(tick, kind = %name, "unrecognized power-up kind, effect skipped");
            events.push(GameEvent::power_up_effect_skipped(tick, name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entity::ObstacleKind;
    use crate::game::events::GameEventData;

    fn fresh() -> (GameState, GameConfig) {
        let config = GameConfig::default();
        (GameState::new(12345, &config), config)
    }

    #[test]
    fn test_ground_hazard_ends_run() {
        let (mut state, config) = fresh();
        state.obstacles.push(Obstacle::new(ObstacleKind::GroundHazard, config.player_x));

        process_collisions(&mut state, &config);

        assert!(state.is_over());
        let events = state.take_events();
        let hearts = events.iter().filter(|e| e.data == GameEventData::HeartLost).count();
        let overs = events
            .iter()
            .filter(|e| matches!(e.data, GameEventData::GameOver { .. }))
            .count();
        assert_eq!(hearts, 1);
        assert_eq!(overs, 1);
        // Fatal hazard stays on screen
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_two_hazards_one_game_over() {
        let (mut state, config) = fresh();
        state.obstacles.push(Obstacle::new(ObstacleKind::GroundHazard, config.player_x));
        state.obstacles.push(Obstacle::new(ObstacleKind::GroundHazard, config.player_x + 5.0));

        process_collisions(&mut state, &config);

        let hearts = state
            .take_events()
            .iter()
            .filter(|e| e.data == GameEventData::HeartLost)
            .count();
        assert_eq!(hearts, 1);
    }

    #[test]
    fn test_shield_absorbs_one_hazard() {
        let (mut state, config) = fresh();
        state.player.activate_shield(config.shield_duration_ms);
        state.obstacles.push(Obstacle::new(ObstacleKind::GroundHazard, config.player_x));
        state.obstacles.push(Obstacle::new(ObstacleKind::GroundHazard, 500.0));

        process_collisions(&mut state, &config);

        assert!(!state.is_over());
        assert!(!state.player.has_shield());
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].x, 500.0);

        let events = state.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].data,
            GameEventData::ShieldAbsorbed { obstacle: ObstacleKind::GroundHazard }
        );
    }

    #[test]
    fn test_shield_then_second_hazard_same_frame() {
        let (mut state, config) = fresh();
        state.player.activate_shield(config.shield_duration_ms);
        state.obstacles.push(Obstacle::new(ObstacleKind::GroundHazard, config.player_x));
        state.obstacles.push(Obstacle::new(ObstacleKind::GroundHazard, config.player_x + 2.0));

        process_collisions(&mut state, &config);

        assert!(state.is_over());
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_duck_clears_flying_hazard() {
        let (mut state, config) = fresh();
        state.obstacles.push(Obstacle::new(ObstacleKind::FlyingHazard, config.player_x));
        state.player.set_ducking(true);

        process_collisions(&mut state, &config);
        assert!(!state.is_over());

        state.player.set_ducking(false);
        process_collisions(&mut state, &config);
        assert!(state.is_over());
    }

    #[test]
    fn test_jump_clears_ground_hazard() {
        let (mut state, config) = fresh();
        state.obstacles.push(Obstacle::new(ObstacleKind::GroundHazard, config.player_x));
        state.player.try_jump();
        state.player.advance(config.jump_duration_ms / 2.0, &config);

        process_collisions(&mut state, &config);
        assert!(!state.is_over());
    }

    #[test]
    fn test_coin_collected_once() {
        let (mut state, config) = fresh();
        state.coins.push(Coin::new(config.player_x));
        state.player.try_jump();
        state.player.advance(config.jump_duration_ms / 2.0, &config);

        process_collisions(&mut state, &config);
        assert!(state.coins[0].collected);
        assert_eq!(state.run.score, config.coin_bonus);
        assert_eq!(state.take_events().len(), 1);

        // Still overlapping next frame: nothing more
        process_collisions(&mut state, &config);
        assert_eq!(state.run.score, config.coin_bonus);
        assert_eq!(state.run.coins_collected, 1);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_grounded_player_misses_coin() {
        let (mut state, config) = fresh();
        state.coins.push(Coin::new(config.player_x));

        process_collisions(&mut state, &config);
        assert!(!state.coins[0].collected);
    }

    #[test]
    fn test_shield_power_up_applies() {
        let (mut state, config) = fresh();
        state.power_ups.push(PowerUp::new(PowerUpKind::Shield, config.player_x));
        state.player.try_jump();
        state.player.advance(config.jump_duration_ms / 2.0, &config);

        process_collisions(&mut state, &config);

        assert!(state.power_ups[0].collected);
        assert!(state.player.has_shield());
        assert_eq!(state.player.shield_remaining_ms, config.shield_duration_ms);
        let events = state.take_events();
        assert_eq!(
            events[0].data,
            GameEventData::PowerUpCollected { kind: PowerUpKind::Shield }
        );
    }

    #[test]
    fn test_unrecognized_power_up_reported() {
        let (mut state, config) = fresh();
        state.power_ups.push(PowerUp::new(PowerUpKind::from_name("magnet"), config.player_x));
        state.player.try_jump();
        state.player.advance(config.jump_duration_ms / 2.0, &config);

        process_collisions(&mut state, &config);

        assert!(state.power_ups[0].collected);
        assert!(!state.player.has_shield());
        let events = state.take_events();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0].data,
            GameEventData::PowerUpEffectSkipped { kind: "magnet".into() }
        );
        assert!(matches!(events[1].data, GameEventData::PowerUpCollected { .. }));
    }

    #[test]
    fn test_off_screen_purged_regardless_of_collected() {
        let (mut state, config) = fresh();
        let mut collected = Coin::new(-100.0);
        collected.collected = true;
        state.coins.push(collected);
        state.coins.push(Coin::new(-100.0));
        state.coins.push(Coin::new(300.0));
        state.obstacles.push(Obstacle::new(ObstacleKind::FlyingHazard, -31.0));
        state.power_ups.push(PowerUp::new(PowerUpKind::Shield, -21.0));

        process_collisions(&mut state, &config);

        assert_eq!(state.coins.len(), 1);
        assert_eq!(state.coins[0].x, 300.0);
        assert!(state.obstacles.is_empty());
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_no_pickups_after_game_over() {
        let (mut state, config) = fresh();
        state.run.is_over = true;
        state.coins.push(Coin::new(config.player_x));
        state.player.try_jump();
        state.player.advance(config.jump_duration_ms / 2.0, &config);

        process_collisions(&mut state, &config);
        assert!(!state.coins[0].collected);
        assert_eq!(state.run.score, 0);
    }
}
