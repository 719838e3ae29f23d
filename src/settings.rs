//! Game settings
//!
//! Every field has a default, so partial JSON is accepted.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::Grid;

/// Cells that must be distinct at round start: player, box and apple
const ROUND_START_CELLS: usize = 3;

/// Game configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Placement area width (cells)
    pub grid_width: u32,
    /// Placement area height (cells)
    pub grid_height: u32,
    /// Maximum buffered commands
    pub input_queue_capacity: usize,
    /// Cool-down after each applied command
    pub tick_interval_ms: u32,
    /// Drag samples closer together than this are ignored (0 = no throttle)
    pub gesture_interval_ms: u32,
    /// Deliveries that finish the round
    pub target_deliveries: u32,
    /// Fixed RNG seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            input_queue_capacity: INPUT_QUEUE_CAPACITY,
            tick_interval_ms: TICK_INTERVAL_MS,
            gesture_interval_ms: GESTURE_INTERVAL_MS,
            target_deliveries: TARGET_DELIVERIES,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject configurations a round cannot be played with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_queue_capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.target_deliveries == 0 {
            return Err(ConfigError::ZeroTargetDeliveries);
        }
        self.grid()?;
        Ok(())
    }

    /// The placement grid, checked to hold every round-start entity on its own cell
    pub fn grid(&self) -> Result<Grid, ConfigError> {
        Grid::new(self.grid_width, self.grid_height, ROUND_START_CELLS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let settings = Settings::default();
        assert_eq!(settings.grid_width, 5);
        assert_eq!(settings.grid_height, 10);
        assert_eq!(settings.input_queue_capacity, 3);
        assert_eq!(settings.tick_interval_ms, 200);
        assert_eq!(settings.target_deliveries, 4);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "target_deliveries": 2, "seed": 7 }"#).unwrap();
        assert_eq!(settings.target_deliveries, 2);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.grid_width, GRID_WIDTH);
        assert_eq!(settings.tick_interval_ms, TICK_INTERVAL_MS);
    }

    #[test]
    fn test_degenerate_grid_rejected() {
        let settings = Settings {
            grid_width: 1,
            grid_height: 1,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::GridTooSmall { width: 1, height: 1, .. })
        ));

        // 1x3 is the smallest grid that fits player, box and apple
        let settings = Settings {
            grid_width: 1,
            grid_height: 3,
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_values_rejected() {
        let zero_capacity = Settings {
            input_queue_capacity: 0,
            ..Default::default()
        };
        assert!(matches!(zero_capacity.validate(), Err(ConfigError::ZeroQueueCapacity)));

        let zero_tick = Settings {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(zero_tick.validate(), Err(ConfigError::ZeroTickInterval)));

        let zero_target = Settings {
            target_deliveries: 0,
            ..Default::default()
        };
        assert!(matches!(zero_target.validate(), Err(ConfigError::ZeroTargetDeliveries)));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(ConfigError::InvalidJson(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "grid_width": 0 }"#),
            Err(ConfigError::GridTooSmall { .. })
        ));
    }
}
