// Engine configuration: defaults applied when hotels and rooms are created

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hard ceiling on rooms per hotel. A config may lower it but never raise it.
pub const MAX_ROOMS_LIMIT: usize = 50;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Invalid default room price: {0}")]
    InvalidDefaultPrice(f64),

    #[error("Invalid minimum room price: {0}")]
    InvalidMinimumPrice(f64),

    #[error("Invalid default room number: {0}")]
    InvalidDefaultRoomNumber(u32),

    #[error("Max rooms per hotel must be between 1 and 50, got {0}")]
    InvalidMaxRooms(usize),
}

// Engine configuration options
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    pub default_room_price: f64,
    pub default_room_number: u32,
    pub max_rooms_per_hotel: usize,
    pub min_room_price: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_room_price: 1299.0,
            default_room_number: 101,
            max_rooms_per_hotel: MAX_ROOMS_LIMIT,
            min_room_price: 100.0,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_room_price.is_finite() || self.min_room_price < 0.0 {
            return Err(ConfigError::InvalidMinimumPrice(self.min_room_price));
        }
        if !self.default_room_price.is_finite() || self.default_room_price < self.min_room_price
        {
            return Err(ConfigError::InvalidDefaultPrice(self.default_room_price));
        }
        if self.default_room_number == 0 {
            return Err(ConfigError::InvalidDefaultRoomNumber(
                self.default_room_number,
            ));
        }
        if self.max_rooms_per_hotel == 0 || self.max_rooms_per_hotel > MAX_ROOMS_LIMIT {
            return Err(ConfigError::InvalidMaxRooms(self.max_rooms_per_hotel));
        }
        Ok(())
    }

    // Parse a JSON document; missing keys fall back to the defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn is_valid_price(&self, price: f64) -> bool {
        price.is_finite() && price >= self.min_room_price
    }
}
