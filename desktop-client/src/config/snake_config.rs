use std::time::Duration;

use common::config::Validate;
use common::games::snake::SnakeSessionSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct SnakeConfig {
    pub grid_size: u32,
    pub reversal_food_probability: f64,
    pub tick_interval_ms: u32,
    pub auto_restart: bool,
}

impl SnakeConfig {
    pub fn to_settings(&self) -> SnakeSessionSettings {
        SnakeSessionSettings {
            grid_size: self.grid_size as usize,
            reversal_food_probability: self.reversal_food_probability,
            tick_interval: Duration::from_millis(self.tick_interval_ms as u64),
            auto_restart: self.auto_restart,
        }
    }
}

impl Validate for SnakeConfig {
    fn validate(&self) -> Result<(), String> {
        if self.grid_size < 4 {
            return Err("grid_size must be at least 4".to_string());
        }
        if self.grid_size > 50 {
            return Err("grid_size must not exceed 50".to_string());
        }
        if !(0.0..=1.0).contains(&self.reversal_food_probability) {
            return Err("reversal_food_probability must be between 0 and 1".to_string());
        }
        if self.tick_interval_ms < 50 {
            return Err("tick_interval_ms must be at least 50".to_string());
        }
        if self.tick_interval_ms > 1000 {
            return Err("tick_interval_ms must not exceed 1000".to_string());
        }
        Ok(())
    }
}

impl Default for SnakeConfig {
    fn default() -> Self {
        let settings = SnakeSessionSettings::default();
        Self {
            grid_size: settings.grid_size as u32,
            reversal_food_probability: settings.reversal_food_probability,
            tick_interval_ms: settings.tick_interval.as_millis() as u32,
            auto_restart: settings.auto_restart,
        }
    }
}
