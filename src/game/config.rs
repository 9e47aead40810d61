//! Game Configuration
//!
//! Every tunable constant of the simulation and the hosting screen.
//! Defaults reproduce the stock arcade balance; any field may be
//! overridden from a JSON file.

use std::path::Path;

use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Power-up kind name that activates the shield.
pub const SHIELD_KIND: &str = "shield";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Values parsed but are inconsistent.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Randomized spawn window in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnWindow {
    /// Shortest gap between two spawns of a category
    pub min_ms: f64,
    /// Longest gap between two spawns of a category
    pub max_ms: f64,
}

impl SpawnWindow {
    /// Create a window.
    pub const fn new(min_ms: f64, max_ms: f64) -> Self {
        Self { min_ms, max_ms }
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if !(self.min_ms.is_finite() && self.max_ms.is_finite()) || self.min_ms <= 0.0 {
            return Err(ConfigError::Invalid(format!("{name}: window must be positive")));
        }
        if self.min_ms > self.max_ms {
            return Err(ConfigError::Invalid(format!(
                "{name}: min_ms {} exceeds max_ms {}",
                self.min_ms, self.max_ms
            )));
        }
        Ok(())
    }
}

/// Width/height pair for an entity's bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxSize {
    /// Horizontal extent in pixels
    pub width: f32,
    /// Vertical extent in pixels
    pub height: f32,
}

impl BoxSize {
    /// Create a size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Simulation core configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // =========================================================================
    // Play field
    // =========================================================================

    /// Right edge of the play field; new entities appear here
    pub field_width: f32,

    /// Y coordinate of the ground line (y grows downward)
    pub ground_y: f32,

    /// Ground texture period in pixels
    pub ground_period: f32,

    // =========================================================================
    // Speed & score
    // =========================================================================

    /// Starting scroll speed (pixels per frame)
    pub base_speed: f32,

    /// Speed ceiling
    pub max_speed: f32,

    /// Speed gained at each score milestone
    pub speed_step: f32,

    /// Score interval between speed milestones
    pub speed_milestone: u32,

    /// Points awarded every running frame
    pub points_per_frame: u32,

    /// Points awarded per coin
    pub coin_bonus: u32,

    // =========================================================================
    // Spawning
    // =========================================================================

    /// Obstacle spawn gap
    pub obstacle_window: SpawnWindow,

    /// Coin spawn gap
    pub coin_window: SpawnWindow,

    /// Power-up spawn gap
    pub power_up_window: SpawnWindow,

    /// Share of obstacles that are flying hazards
    pub flying_chance: f64,

    /// Power-up kind names drawn uniformly at spawn
    pub power_up_kinds: Vec<String>,

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Player's left edge
    pub player_x: f32,

    /// Standing player box (height halves while ducking)
    pub player_size: BoxSize,

    /// Ground hazard box
    pub ground_hazard_size: BoxSize,

    /// Flying hazard box
    pub flying_hazard_size: BoxSize,

    /// Flying hazard clearance: gap between its bottom edge and the ground
    pub flying_hazard_elevation: f32,

    /// Coin box
    pub coin_size: BoxSize,

    /// Power-up box
    pub power_up_size: BoxSize,

    /// Gap between a pickup's bottom edge and the ground
    pub pickup_elevation: f32,

    // =========================================================================
    // Player status
    // =========================================================================

    /// Jump duration in ms
    pub jump_duration_ms: f64,

    /// Apex of the jump arc in pixels
    pub jump_height: f32,

    /// Shield duration in ms
    pub shield_duration_ms: f64,

    /// Frame deltas above this are clamped
    pub max_frame_delta_ms: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            ground_y: 160.0,
            ground_period: 100.0,

            base_speed: 5.0,
            max_speed: 15.0,
            speed_step: 1.0,
            speed_milestone: 500,
            points_per_frame: 1,
            coin_bonus: 50,

            obstacle_window: SpawnWindow::new(1500.0, 2500.0),
            coin_window: SpawnWindow::new(2000.0, 4000.0),
            power_up_window: SpawnWindow::new(10_000.0, 20_000.0),
            flying_chance: 0.3,
            power_up_kinds: vec![SHIELD_KIND.to_string()],

            player_x: 40.0,
            player_size: BoxSize::new(24.0, 24.0),
            ground_hazard_size: BoxSize::new(20.0, 30.0),
            flying_hazard_size: BoxSize::new(30.0, 20.0),
            flying_hazard_elevation: 20.0,
            coin_size: BoxSize::new(16.0, 16.0),
            power_up_size: BoxSize::new(20.0, 20.0),
            pickup_elevation: 70.0,

            jump_duration_ms: 600.0,
            jump_height: 80.0,
            shield_duration_ms: 10_000.0,
            max_frame_delta_ms: 250.0,
        }
    }
}

impl GameConfig {
    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.obstacle_window.validate("obstacle_window")?;
        self.coin_window.validate("coin_window")?;
        self.power_up_window.validate("power_up_window")?;

        if !(0.0..=1.0).contains(&self.flying_chance) {
            return Err(ConfigError::Invalid(format!(
                "flying_chance {} outside [0, 1]",
                self.flying_chance
            )));
        }
        if self.base_speed <= 0.0 || self.max_speed < self.base_speed {
            return Err(ConfigError::Invalid(format!(
                "speed range {}..{} is empty",
                self.base_speed, self.max_speed
            )));
        }
        if !self.speed_step.is_finite() || self.speed_step < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "speed_step {} must be a non-negative number",
                self.speed_step
            )));
        }
        if self.speed_milestone == 0 {
            return Err(ConfigError::Invalid("speed_milestone must be nonzero".into()));
        }
        if self.jump_duration_ms <= 0.0 || self.shield_duration_ms <= 0.0 {
            return Err(ConfigError::Invalid("effect durations must be positive".into()));
        }
        if self.max_frame_delta_ms <= 0.0 {
            return Err(ConfigError::Invalid("max_frame_delta_ms must be positive".into()));
        }
        if self.ground_period <= 0.0 {
            return Err(ConfigError::Invalid("ground_period must be positive".into()));
        }
        Ok(())
    }
}

/// Highest accepted redraw rate (Hz). Keeps the frame period at 1 ms or more.
pub const MAX_FRAME_RATE: u32 = 1_000;

/// Hosting screen configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Hearts at session start
    pub starting_hearts: u8,

    /// Heart cap
    pub max_hearts: u8,

    /// Delay before a lost heart regenerates
    pub regen_cooldown_ms: u64,

    /// Redraw rate of the frame driver
    pub frame_rate: u32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            starting_hearts: 3,
            max_hearts: 5,
            regen_cooldown_ms: 10 * 60 * 1000,
            frame_rate: 60,
        }
    }
}

impl HostConfig {
    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_hearts > self.max_hearts {
            return Err(ConfigError::Invalid(format!(
                "starting_hearts {} exceeds max_hearts {}",
                self.starting_hearts, self.max_hearts
            )));
        }
        if !(1..=MAX_FRAME_RATE).contains(&self.frame_rate) {
            return Err(ConfigError::Invalid(format!(
                "frame_rate {} outside 1..={}",
                self.frame_rate, MAX_FRAME_RATE
            )));
        }
        Ok(())
    }
}

/// Top-level configuration file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Simulation core settings
    pub game: GameConfig,
    /// Hosting screen settings
    pub host: HostConfig,
    /// RNG seed for spawn cadence
    pub seed: u64,
}

impl AppConfig {
    /// Parse from a JSON string and validate.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Validate both sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()?;
        self.host.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = AppConfig::from_json(r#"{ "seed": 7, "game": { "base_speed": 6.0 } }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.game.base_speed, 6.0);
        assert_eq!(config.game.max_speed, 15.0);
        assert_eq!(config.host.max_hearts, 5);
    }

    #[test]
    fn test_inverted_window_rejected() {
        let json = r#"{ "game": { "coin_window": { "min_ms": 4000.0, "max_ms": 2000.0 } } }"#;
        assert!(matches!(AppConfig::from_json(json), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_bad_probability_rejected() {
        let json = r#"{ "game": { "flying_chance": 1.5 } }"#;
        assert!(matches!(AppConfig::from_json(json), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_negative_speed_step_rejected() {
        let json = r#"{ "game": { "speed_step": -1.0 } }"#;
        assert!(matches!(AppConfig::from_json(json), Err(ConfigError::Invalid(_))));

        let config = GameConfig {
            speed_step: f32::NAN,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let flat = r#"{ "game": { "speed_step": 0.0 } }"#;
        assert!(AppConfig::from_json(flat).is_ok());
    }

    #[test]
    fn test_frame_rate_bounds() {
        for rate in [0, MAX_FRAME_RATE + 1, 2_000_000] {
            let json = format!(r#"{{ "host": {{ "frame_rate": {} }} }}"#, rate);
            assert!(
                matches!(AppConfig::from_json(&json), Err(ConfigError::Invalid(_))),
                "frame_rate {} accepted",
                rate
            );
        }
        let json = format!(r#"{{ "host": {{ "frame_rate": {} }} }}"#, MAX_FRAME_RATE);
        assert!(AppConfig::from_json(&json).is_ok());
    }

    #[test]
    fn test_hearts_over_cap_rejected() {
        let json = r#"{ "host": { "starting_hearts": 9, "max_hearts": 5 } }"#;
        assert!(matches!(AppConfig::from_json(json), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(AppConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = AppConfig::load("/definitely/not/here.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
