//! Game constants configuration

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable game constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub roll: RollConstants,
    #[serde(default)]
    pub seeding: SeedingConstants,
    #[serde(default)]
    pub map: MapConstants,
}

impl GameConstants {
    /// Constants shipped with the crate, falling back to the built-in defaults
    pub fn bundled() -> Self {
        let toml = include_str!("../../config/constants.toml");
        super::parse_toml::<GameConstants>(toml)
            .ok()
            .filter(|constants| constants.validate().is_ok())
            .unwrap_or_else(|| {
                tracing::warn!("bundled constants.toml rejected, using defaults");
                GameConstants::default()
            })
    }

    /// Load constants from a TOML file and validate them
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let constants: GameConstants = super::load_toml(path)?;
        constants.validate()?;
        tracing::debug!(path = %path.display(), "game constants loaded");
        Ok(constants)
    }

    /// Reject configurations the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::ValidationError(msg));

        if self.roll.default_lower_bound < 1 {
            return invalid(format!(
                "roll.default_lower_bound must be at least 1, got {}",
                self.roll.default_lower_bound
            ));
        }
        if self.roll.critical_ratio <= 1.0 {
            return invalid(format!(
                "roll.critical_ratio must exceed 1.0, got {}",
                self.roll.critical_ratio
            ));
        }
        if self.seeding.upper_bound < 1 {
            return invalid(format!(
                "seeding.upper_bound must be at least 1, got {}",
                self.seeding.upper_bound
            ));
        }
        if self.seeding.window_max - self.seeding.window_min < 2 {
            return invalid(format!(
                "seeding window ({}, {}) contains no integers",
                self.seeding.window_min, self.seeding.window_max
            ));
        }
        if self.seeding.reserve < 0 {
            return invalid(format!("seeding.reserve must not be negative, got {}", self.seeding.reserve));
        }
        if self.seeding.max_attempts == 0 {
            return invalid("seeding.max_attempts must be positive".to_string());
        }
        if self.map.height < 3 || self.map.width < 3 {
            return invalid(format!(
                "map must be at least 3x3, got {}x{}",
                self.map.height, self.map.width
            ));
        }
        if !(0.0..=1.0).contains(&self.map.hallway_density) {
            return invalid(format!(
                "map.hallway_density must be within [0, 1], got {}",
                self.map.hallway_density
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollConstants {
    /// Modifier used when a roll checks no attribute
    #[serde(default = "default_unseeded_modifier")]
    pub unseeded_modifier: f64,
    /// Floor applied to the upper-bound modifier
    #[serde(default = "default_min_upper_modifier")]
    pub min_upper_modifier: f64,
    /// Result / goal ratio above which an attack is critical
    #[serde(default = "default_critical_ratio")]
    pub critical_ratio: f64,
    /// Lower-bound base when none is given
    #[serde(default = "default_lower_bound")]
    pub default_lower_bound: i32,
}

impl Default for RollConstants {
    fn default() -> Self {
        RollConstants {
            unseeded_modifier: 2.0,
            min_upper_modifier: 2.0,
            critical_ratio: 1.25,
            default_lower_bound: 1,
        }
    }
}

fn default_unseeded_modifier() -> f64 {
    2.0
}
fn default_min_upper_modifier() -> f64 {
    2.0
}
fn default_critical_ratio() -> f64 {
    1.25
}
fn default_lower_bound() -> i32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedingConstants {
    /// Upper-bound base of each seed roll
    #[serde(default = "default_seed_upper_bound")]
    pub upper_bound: i32,
    /// Free points after seeding must be strictly above this
    #[serde(default = "default_window_min")]
    pub window_min: i32,
    /// Free points after seeding must be strictly below this
    #[serde(default = "default_window_max")]
    pub window_max: i32,
    /// Points left for the player after class-biased distribution
    #[serde(default = "default_reserve")]
    pub reserve: i32,
    /// Rejection-sampling attempts before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for SeedingConstants {
    fn default() -> Self {
        SeedingConstants {
            upper_bound: 7,
            window_min: 10,
            window_max: 16,
            reserve: 5,
            max_attempts: 200_000,
        }
    }
}

fn default_seed_upper_bound() -> i32 {
    7
}
fn default_window_min() -> i32 {
    10
}
fn default_window_max() -> i32 {
    16
}
fn default_reserve() -> i32 {
    5
}
fn default_max_attempts() -> u32 {
    200_000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConstants {
    #[serde(default = "default_map_height")]
    pub height: usize,
    #[serde(default = "default_map_width")]
    pub width: usize,
    /// Share of interior tiles the hallway walk tries to carve
    #[serde(default = "default_hallway_density")]
    pub hallway_density: f64,
}

impl Default for MapConstants {
    fn default() -> Self {
        MapConstants {
            height: 30,
            width: 74,
            hallway_density: 0.35,
        }
    }
}

fn default_map_height() -> usize {
    30
}
fn default_map_width() -> usize {
    74
}
fn default_hallway_density() -> f64 {
    0.35
}
