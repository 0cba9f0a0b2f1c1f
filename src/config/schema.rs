//! Configuration schema types for `pxs.toml`
//!
//! Defines the structure and validation rules for pixelsmooth configuration.

use crate::pipeline::SmoothingConfig;
use serde::{Deserialize, Serialize};

/// Animated GIF output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GifConfig {
    /// Duration of each frame in milliseconds
    #[serde(default = "default_frame_duration_ms")]
    pub frame_duration_ms: u32,
    /// Loop the animation forever
    #[serde(default = "default_true")]
    pub loop_forever: bool,
}

fn default_frame_duration_ms() -> u32 {
    75
}

fn default_true() -> bool {
    true
}

impl Default for GifConfig {
    fn default() -> Self {
        Self { frame_duration_ms: default_frame_duration_ms(), loop_forever: true }
    }
}

/// Complete pxs.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PxsConfig {
    /// Pipeline tolerances and border/overflow policies
    #[serde(default)]
    pub smoothing: SmoothingConfig,
    /// Animated GIF settings
    #[serde(default)]
    pub gif: GifConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "smoothing.low_corner_tolerance")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pxs.toml: '{}' {}", self.field, self.message)
    }
}

impl PxsConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        // A zero tolerance can never pass its strict comparison
        let tolerances = [
            ("smoothing.low_corner_tolerance", self.smoothing.low_corner_tolerance),
            ("smoothing.low_average_tolerance", self.smoothing.low_average_tolerance),
            ("smoothing.extra_corner_tolerance", self.smoothing.extra_corner_tolerance),
            ("smoothing.extra_average_tolerance", self.smoothing.extra_average_tolerance),
        ];
        for (field, value) in tolerances {
            if value == 0 {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: "must be a positive integer".to_string(),
                });
            }
        }

        if self.gif.frame_duration_ms == 0 {
            errors.push(ConfigValidationError {
                field: "gif.frame_duration_ms".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
