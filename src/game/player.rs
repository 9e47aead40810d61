//! Player Status Machine
//!
//! Two independent axes:
//!
//! ```text
//! posture:  Grounded ──jump──▶ Jumping ──(jump_duration elapsed)──▶ Grounded
//!           Grounded ──duck press──▶ Ducking ──duck release──▶ Grounded
//!           (duck requests while Jumping are ignored)
//!
//! shield:   Unshielded ──shield pickup──▶ Shielded
//!           Shielded ──(time runs out | one hazard absorbed)──▶ Unshielded
//! ```
//!
//! Jump height comes from the machine's own progress counter, never from
//! whatever is animating the sprite.

use serde::{Serialize, Deserialize};

use crate::core::geom::Aabb;
use crate::core::hash::StateHasher;
use crate::game::config::GameConfig;

/// Mutually exclusive body posture.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Posture {
    /// Standing on the ground
    Grounded,
    /// Airborne; `elapsed_ms` counts up to the jump duration
    Jumping {
        /// Time spent in the air so far
        elapsed_ms: f64,
    },
    /// Crouched; half height
    Ducking,
}

/// Player posture and shield.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatus {
    /// Current posture
    pub posture: Posture,

    /// Shield time left; the shield is up iff this is above zero
    pub shield_remaining_ms: f64,
}

impl Default for PlayerStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerStatus {
    /// Grounded, unshielded.
    pub const fn new() -> Self {
        Self {
            posture: Posture::Grounded,
            shield_remaining_ms: 0.0,
        }
    }

    /// Airborne.
    #[inline]
    pub fn is_jumping(&self) -> bool {
        matches!(self.posture, Posture::Jumping { .. })
    }

    /// Crouched.
    #[inline]
    pub fn is_ducking(&self) -> bool {
        matches!(self.posture, Posture::Ducking)
    }

    /// Shield time remains.
    #[inline]
    pub fn has_shield(&self) -> bool {
        self.shield_remaining_ms > 0.0
    }

    /// Start a jump. Returns false if already airborne.
    ///
    /// Jumping out of a crouch is allowed and ends the crouch.
    pub fn try_jump(&mut self) -> bool {
        if self.is_jumping() {
            return false;
        }
        self.posture = Posture::Jumping { elapsed_ms: 0.0 };
        true
    }

    /// Press or release duck. Returns true if posture changed.
    pub fn set_ducking(&mut self, active: bool) -> bool {
        match (self.posture, active) {
            (Posture::Jumping { .. }, _) => false,
            (Posture::Grounded, true) => {
                self.posture = Posture::Ducking;
                true
            }
            (Posture::Ducking, false) => {
                self.posture = Posture::Grounded;
                true
            }
            _ => false,
        }
    }

    /// Raise the shield for its full duration. Refreshes a running shield.
    pub fn activate_shield(&mut self, duration_ms: f64) {
        self.shield_remaining_ms = duration_ms;
    }

    /// Spend the shield on one hazard. Returns false if there was none.
    pub fn absorb_hit(&mut self) -> bool {
        if !self.has_shield() {
            return false;
        }
        self.shield_remaining_ms = 0.0;
        true
    }

    /// Advance jump progress and shield decay by one frame.
    ///
    /// Returns true if the shield ran out during this frame.
    pub fn advance(&mut self, delta_ms: f64, config: &GameConfig) -> bool {
        if let Posture::Jumping { elapsed_ms } = self.posture {
            let elapsed_ms = elapsed_ms + delta_ms;
            self.posture = if elapsed_ms >= config.jump_duration_ms {
                Posture::Grounded
            } else {
                Posture::Jumping { elapsed_ms }
            };
        }

        if self.has_shield() {
            self.shield_remaining_ms -= delta_ms;
            if self.shield_remaining_ms <= 0.0 {
                self.shield_remaining_ms = 0.0;
                return true;
            }
        }
        false
    }

    /// Normalized jump progress in [0, 1), or None when not jumping.
    pub fn jump_progress(&self, config: &GameConfig) -> Option<f32> {
        match self.posture {
            Posture::Jumping { elapsed_ms } => {
                Some((elapsed_ms / config.jump_duration_ms).clamp(0.0, 1.0) as f32)
            }
            _ => None,
        }
    }

    /// Height above the ground: `4·H·p·(1−p)` while jumping, else 0.
    pub fn jump_offset(&self, config: &GameConfig) -> f32 {
        match self.jump_progress(config) {
            Some(p) => 4.0 * config.jump_height * p * (1.0 - p),
            None => 0.0,
        }
    }

    /// Remaining shield as a fraction of the full duration.
    pub fn shield_fraction(&self, config: &GameConfig) -> f32 {
        (self.shield_remaining_ms / config.shield_duration_ms).clamp(0.0, 1.0) as f32
    }

    /// Collision box for the current posture.
    pub fn hitbox(&self, config: &GameConfig) -> Aabb {
        let size = config.player_size;
        let height = if self.is_ducking() { size.height / 2.0 } else { size.height };
        let bottom = config.ground_y - self.jump_offset(config);
        Aabb::resting_on(config.player_x, bottom, size.width, height)
    }

    /// Hash this player's state for verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        match self.posture {
            Posture::Grounded => hasher.update_u8(0),
            Posture::Jumping { elapsed_ms } => {
                hasher.update_u8(1);
                hasher.update_f64(elapsed_ms);
            }
            Posture::Ducking => hasher.update_u8(2),
        }
        hasher.update_f64(self.shield_remaining_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_lands_after_duration() {
        let config = GameConfig::default();
        let mut player = PlayerStatus::new();

        assert!(player.try_jump());
        assert!(!player.try_jump(), "double jump must be ignored");

        player.advance(599.0, &config);
        assert!(player.is_jumping());

        player.advance(1.0, &config);
        assert_eq!(player.posture, Posture::Grounded);
    }

    #[test]
    fn test_duck_ignored_while_jumping() {
        let config = GameConfig::default();
        let mut player = PlayerStatus::new();

        player.try_jump();
        assert!(!player.set_ducking(true));
        assert!(player.is_jumping());

        player.advance(config.jump_duration_ms, &config);
        assert!(!player.is_ducking());
    }

    #[test]
    fn test_duck_press_and_release() {
        let mut player = PlayerStatus::new();

        assert!(player.set_ducking(true));
        assert!(player.is_ducking());
        assert!(!player.set_ducking(true));
        assert!(player.set_ducking(false));
        assert_eq!(player.posture, Posture::Grounded);
        assert!(!player.set_ducking(false));
    }

    #[test]
    fn test_jump_from_crouch_ends_crouch() {
        let mut player = PlayerStatus::new();
        player.set_ducking(true);
        assert!(player.try_jump());
        assert!(!player.is_ducking());
    }

    #[test]
    fn test_jump_arc_peaks_mid_flight() {
        let config = GameConfig::default();
        let mut player = PlayerStatus::new();
        assert_eq!(player.jump_offset(&config), 0.0);

        player.try_jump();
        player.advance(config.jump_duration_ms / 2.0, &config);
        assert!((player.jump_offset(&config) - config.jump_height).abs() < 1e-3);

        player.advance(config.jump_duration_ms / 4.0, &config);
        let three_quarters = 4.0 * config.jump_height * 0.75 * 0.25;
        assert!((player.jump_offset(&config) - three_quarters).abs() < 1e-3);
    }

    #[test]
    fn test_hitbox_geometry() {
        let config = GameConfig::default();
        let mut player = PlayerStatus::new();

        let standing = player.hitbox(&config);
        assert_eq!(standing.bottom(), config.ground_y);
        assert_eq!(standing.height, config.player_size.height);

        player.set_ducking(true);
        let ducking = player.hitbox(&config);
        assert_eq!(ducking.height, config.player_size.height / 2.0);
        assert_eq!(ducking.bottom(), config.ground_y);
        assert_eq!(ducking.width, standing.width);

        player.set_ducking(false);
        player.try_jump();
        player.advance(config.jump_duration_ms / 2.0, &config);
        let airborne = player.hitbox(&config);
        assert!(airborne.bottom() < config.ground_y);
    }

    #[test]
    fn test_shield_decays() {
        let config = GameConfig::default();
        let mut player = PlayerStatus::new();

        player.activate_shield(config.shield_duration_ms);
        assert!(player.has_shield());
        assert_eq!(player.shield_fraction(&config), 1.0);

        assert!(!player.advance(5_000.0, &config));
        assert!((player.shield_fraction(&config) - 0.5).abs() < 1e-6);

        assert!(player.advance(5_000.0, &config));
        assert!(!player.has_shield());
        assert_eq!(player.shield_remaining_ms, 0.0);
    }

    #[test]
    fn test_shield_single_use() {
        let mut player = PlayerStatus::new();
        assert!(!player.absorb_hit());

        player.activate_shield(10_000.0);
        assert!(player.absorb_hit());
        assert!(!player.has_shield());
        assert!(!player.absorb_hit());
    }
}
