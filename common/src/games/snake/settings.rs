use std::time::Duration;

use crate::config::Validate;

pub const DEFAULT_GRID_SIZE: usize = 15;
pub const DEFAULT_REVERSAL_FOOD_PROBABILITY: f64 = 0.3;
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(150);

#[derive(Clone, Debug, PartialEq)]
pub struct SnakeSessionSettings {
    pub grid_size: usize,
    pub reversal_food_probability: f64,
    pub tick_interval: Duration,
    /// Start the next round on the following tick instead of waiting for a restart.
    pub auto_restart: bool,
}

impl Default for SnakeSessionSettings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            reversal_food_probability: DEFAULT_REVERSAL_FOOD_PROBABILITY,
            tick_interval: DEFAULT_TICK_INTERVAL,
            auto_restart: true,
        }
    }
}

impl Validate for SnakeSessionSettings {
    fn validate(&self) -> Result<(), String> {
        if !(1..=100).contains(&self.grid_size) {
            return Err("Grid size must be between 1 and 100".to_string());
        }
        if !(0.0..=1.0).contains(&self.reversal_food_probability) {
            return Err("Reversal food probability must be between 0.0 and 1.0".to_string());
        }
        let tick_ms = self.tick_interval.as_millis();
        if !(50..=5000).contains(&tick_ms) {
            return Err("Tick interval must be between 50ms and 5000ms".to_string());
        }
        Ok(())
    }
}
