use crate::error::{Result, TaskdeckError};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};
use tokio::fs;

/// Tunables for the card gesture recognizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureConfig {
    /// How long a press must be held before the card enters edit mode
    #[serde(default = "default_long_press_ms")]
    pub long_press_ms: u64,

    /// Distance a pending press may drift before it counts as a scroll.
    /// `None` cancels the long-press on any movement at all.
    #[serde(default)]
    pub move_tolerance: Option<f64>,

    /// Whether movement events are marked `prevent_default` while a drag is armed
    #[serde(default = "default_true")]
    pub suppress_scroll_while_dragging: bool,
}

fn default_long_press_ms() -> u64 {
    GestureConfig::DEFAULT_LONG_PRESS_MS
}

fn default_true() -> bool {
    true
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press_ms: Self::DEFAULT_LONG_PRESS_MS,
            move_tolerance: None,
            suppress_scroll_while_dragging: true,
        }
    }
}

impl GestureConfig {
    pub const DEFAULT_LONG_PRESS_MS: u64 = 500;

    pub fn long_press(&self) -> Duration {
        Duration::from_millis(self.long_press_ms)
    }

    /// Builder-style override of the long-press threshold
    pub fn with_long_press(mut self, delay: Duration) -> Result<Self> {
        self.long_press_ms = u64::try_from(delay.as_millis()).map_err(|_| {
            TaskdeckError::ConfigError(format!("long_press delay {:?} is out of range", delay))
        })?;
        self.validate()?;
        Ok(self)
    }

    pub fn with_move_tolerance(mut self, tolerance: f64) -> Result<Self> {
        self.move_tolerance = Some(tolerance);
        self.validate()?;
        Ok(self)
    }

    /// Parses and validates a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GestureConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration from a JSON file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).await?;
        Self::from_json(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.long_press_ms == 0 {
            return Err(TaskdeckError::ConfigError(
                "long_press_ms must be greater than zero".to_string(),
            ));
        }
        if let Some(tolerance) = self.move_tolerance {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(TaskdeckError::ConfigError(format!(
                    "move_tolerance must be a non-negative number, got {}",
                    tolerance
                )));
            }
        }
        Ok(())
    }
}
