//! Tuning knobs for a playthrough, loadable from TOML.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::{DEFAULT_END_MINUTES, DEFAULT_START_MINUTES};
use crate::resources::{Resources, RESOURCE_MAX};

/// Errors raised while loading a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse game config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Starting values, timings and capture odds.
///
/// Every field has a default, so a TOML document only needs to name what it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Resources at the start of the night.
    pub starting: Resources,

    /// Clock reading when the night begins, in minutes past midnight.
    pub start_minutes: u32,

    /// Clock reading at which the player survives.
    pub end_minutes: u32,

    /// Real milliseconds between clock ticks. Each tick is one minute.
    pub clock_interval_ms: u64,

    /// Delay before an empty tank sends the player out on foot.
    pub stranded_delay_ms: u64,

    /// Chance of capture when hiding in the car.
    pub hide_capture_chance: f64,

    /// Chance of capture on approaching any location.
    pub explore_capture_chance: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting: Resources::default(),
            start_minutes: DEFAULT_START_MINUTES,
            end_minutes: DEFAULT_END_MINUTES,
            clock_interval_ms: 3_000,
            stranded_delay_ms: 3_000,
            hide_capture_chance: 0.50,
            explore_capture_chance: 0.25,
        }
    }
}

impl GameConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(source)?;
        config.validate()?;
        log::debug!("loaded game config: {:?}", config);
        Ok(config)
    }

    /// Check that the values describe a playable night.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let starting = [
            ("starting.sanity", self.starting.sanity),
            ("starting.fuel", self.starting.fuel),
            ("starting.car_condition", self.starting.car_condition),
        ];
        for (field, value) in starting {
            if value == 0 || value > RESOURCE_MAX {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be between 1 and {RESOURCE_MAX} (got {value})"),
                });
            }
        }

        if self.start_minutes >= self.end_minutes {
            return Err(ConfigError::Invalid {
                field: "start_minutes",
                reason: format!(
                    "must be before end_minutes ({} >= {})",
                    self.start_minutes, self.end_minutes
                ),
            });
        }

        if self.clock_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "clock_interval_ms",
                reason: "must be positive".to_string(),
            });
        }

        let chances = [
            ("hide_capture_chance", self.hide_capture_chance),
            ("explore_capture_chance", self.explore_capture_chance),
        ];
        for (field, chance) in chances {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be between 0 and 1 (got {chance})"),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.starting, Resources::new(100, 80, 100));
        assert_eq!(config.start_minutes, 137);
        assert_eq!(config.end_minutes, 284);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = GameConfig::from_toml_str("").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = GameConfig::from_toml_str(
            r#"
            clock_interval_ms = 500
            hide_capture_chance = 0.1

            [starting]
            fuel = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.clock_interval_ms, 500);
        assert!((config.hide_capture_chance - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.starting, Resources::new(100, 20, 100));
    }

    #[test]
    fn test_rejects_out_of_range_chance() {
        let err = GameConfig::from_toml_str("explore_capture_chance = 1.5").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "explore_capture_chance",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_inverted_night() {
        let err = GameConfig::from_toml_str("start_minutes = 300").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "start_minutes", .. }));
    }

    #[test]
    fn test_rejects_resource_above_max() {
        let err = GameConfig::from_toml_str("[starting]\nsanity = 120").unwrap_err();
        assert!(err.to_string().contains("starting.sanity"));
    }

    #[test]
    fn test_parse_error() {
        let err = GameConfig::from_toml_str("clock_interval_ms = \"fast\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
