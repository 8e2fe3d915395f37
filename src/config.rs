//! Planner tuning parsed from environment variables or supplied by the host.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{GRID_CM, MAX_ZOOM, MIN_ZOOM, ZOOM_SENSITIVITY};
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Snap unit for dropped items, in centimeters.
    pub grid_cm: f64,
    /// Lower zoom bound.
    pub min_zoom: f64,
    /// Upper zoom bound.
    pub max_zoom: f64,
    /// Zoom change per pixel of wheel delta.
    pub zoom_sensitivity: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self { grid_cm: GRID_CM, min_zoom: MIN_ZOOM, max_zoom: MAX_ZOOM, zoom_sensitivity: ZOOM_SENSITIVITY }
    }
}

impl PlannerConfig {
    /// Build typed planner config from environment variables.
    ///
    /// Optional:
    /// - `PLANNER_GRID_CM`: default 10
    /// - `PLANNER_MIN_ZOOM`: default 0.2
    /// - `PLANNER_MAX_ZOOM`: default 2.0
    /// - `PLANNER_ZOOM_SENSITIVITY`: default 0.001
    ///
    /// Unparsable values fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the resulting values are inconsistent.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            grid_cm: env_parse_f64("PLANNER_GRID_CM", GRID_CM),
            min_zoom: env_parse_f64("PLANNER_MIN_ZOOM", MIN_ZOOM),
            max_zoom: env_parse_f64("PLANNER_MAX_ZOOM", MAX_ZOOM),
            zoom_sensitivity: env_parse_f64("PLANNER_ZOOM_SENSITIVITY", ZOOM_SENSITIVITY),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is finite and positive and the zoom bounds are
    /// ordered.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGrid`], [`ConfigError::NonPositive`], or
    /// [`ConfigError::InvertedZoomBounds`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.grid_cm) {
            return Err(ConfigError::InvalidGrid(self.grid_cm));
        }
        for (field, value) in [
            ("min_zoom", self.min_zoom),
            ("max_zoom", self.max_zoom),
            ("zoom_sensitivity", self.zoom_sensitivity),
        ] {
            if !is_positive(value) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::InvertedZoomBounds { min: self.min_zoom, max: self.max_zoom });
        }
        Ok(())
    }

    /// Round a room-space coordinate to the nearest grid multiple.
    #[must_use]
    pub fn snap(&self, value: f64) -> f64 {
        (value / self.grid_cm).round() * self.grid_cm
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn env_parse_f64(key: &str, default: f64) -> f64 {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<f64>().unwrap_or(default),
        Err(_) => default,
    }
}
