//! Scrolling Entities
//!
//! Obstacles, coins and power-ups. Entities have no identity beyond their
//! position in the owning collection.

use serde::{Serialize, Deserialize};

use crate::core::geom::Aabb;
use crate::game::config::{BoxSize, GameConfig, SHIELD_KIND};

// =============================================================================
// OBSTACLES
// =============================================================================

/// Hazard variety.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ObstacleKind {
    /// Sits on the ground; jump over it
    GroundHazard = 0,
    /// Hovers above the ground; duck under it
    FlyingHazard = 1,
}

/// A hazard scrolling toward the player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Hazard variety
    pub kind: ObstacleKind,
    /// Left edge in pixels
    pub x: f32,
}

impl Obstacle {
    /// Create a new obstacle.
    pub fn new(kind: ObstacleKind, x: f32) -> Self {
        Self { kind, x }
    }

    /// Bounding box size for this kind.
    pub fn size(&self, config: &GameConfig) -> BoxSize {
        match self.kind {
            ObstacleKind::GroundHazard => config.ground_hazard_size,
            ObstacleKind::FlyingHazard => config.flying_hazard_size,
        }
    }

    /// Bounding box at the current position.
    pub fn bounds(&self, config: &GameConfig) -> Aabb {
        let size = self.size(config);
        let bottom = match self.kind {
            ObstacleKind::GroundHazard => config.ground_y,
            ObstacleKind::FlyingHazard => config.ground_y - config.flying_hazard_elevation,
        };
        Aabb::resting_on(self.x, bottom, size.width, size.height)
    }

    /// Right edge has scrolled past the left edge of the field.
    pub fn is_off_screen(&self, config: &GameConfig) -> bool {
        off_screen(self.x, self.size(config).width)
    }
}

// =============================================================================
// COINS
// =============================================================================

/// A coin pickup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    /// Left edge in pixels
    pub x: f32,
    /// Has this coin been picked up?
    pub collected: bool,
}

impl Coin {
    /// Create a new uncollected coin.
    pub fn new(x: f32) -> Self {
        Self { x, collected: false }
    }

    /// Bounding box at the current position.
    pub fn bounds(&self, config: &GameConfig) -> Aabb {
        pickup_bounds(self.x, config.coin_size, config)
    }

    /// Right edge has scrolled past the left edge of the field.
    pub fn is_off_screen(&self, config: &GameConfig) -> bool {
        off_screen(self.x, config.coin_size.width)
    }
}

// =============================================================================
// POWER-UPS
// =============================================================================

/// Power-up variety.
///
/// Only the shield has an effect. Other names can still be configured for
/// spawning; picking one up is reported but applies nothing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Absorbs one hazard hit for a limited time
    Shield,
    /// A kind this build has no effect for
    Unrecognized(String),
}

impl PowerUpKind {
    /// Map a configured kind name.
    pub fn from_name(name: &str) -> Self {
        if name == SHIELD_KIND {
            PowerUpKind::Shield
        } else {
            PowerUpKind::Unrecognized(name.to_string())
        }
    }

    /// Kind name as reported to the host.
    pub fn name(&self) -> &str {
        match self {
            PowerUpKind::Shield => SHIELD_KIND,
            PowerUpKind::Unrecognized(name) => name,
        }
    }
}

impl std::fmt::Display for PowerUpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A power-up pickup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    /// Effect granted on pickup
    pub kind: PowerUpKind,
    /// Left edge in pixels
    pub x: f32,
    /// Has this power-up been picked up?
    pub collected: bool,
}

impl PowerUp {
    /// Create a new uncollected power-up.
    pub fn new(kind: PowerUpKind, x: f32) -> Self {
        Self { kind, x, collected: false }
    }

    /// Bounding box at the current position.
    pub fn bounds(&self, config: &GameConfig) -> Aabb {
        pickup_bounds(self.x, config.power_up_size, config)
    }

    /// Right edge has scrolled past the left edge of the field.
    pub fn is_off_screen(&self, config: &GameConfig) -> bool {
        off_screen(self.x, config.power_up_size.width)
    }
}

#[inline]
fn pickup_bounds(x: f32, size: BoxSize, config: &GameConfig) -> Aabb {
    Aabb::resting_on(x, config.ground_y - config.pickup_elevation, size.width, size.height)
}

#[inline]
fn off_screen(x: f32, width: f32) -> bool {
    x < -width
}
