//! Shared configuration for the signature pad
//!
//! This crate is the single source of truth for the options the hosting
//! page can pass to the pad (`lineColor`, `lineWidth`, surface size) and
//! for the tuning constants of the smoothing and width-dynamics stages.

mod color;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use color::Rgba;

/// Default surface width in CSS pixels
pub const DEFAULT_WIDTH: u32 = 800;

/// Default surface height in CSS pixels
pub const DEFAULT_HEIGHT: u32 = 200;

/// Default stroke color
pub const DEFAULT_LINE_COLOR: &str = "#000000";

/// Default base stroke width, before pressure/velocity modulation
pub const DEFAULT_LINE_WIDTH: f32 = 2.0;

/// Pressure reported when the device gives none
pub const DEFAULT_PRESSURE: f32 = 0.5;

/// Multiplier applied to raw device pressure
pub const PRESSURE_AMPLIFICATION: f32 = 1.5;

/// Upper bound for amplified pressure
pub const MAX_PRESSURE: f32 = 1.5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid color {0:?}: expected #rgb, #rrggbb or #rrggbbaa")]
    InvalidColor(String),

    #[error("Invalid line width: {0}")]
    InvalidLineWidth(f32),

    #[error("Invalid smoothing factor: {0} (must be in [0, 1))")]
    InvalidSmoothingFactor(f32),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Options supplied by the surrounding page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PadConfig {
    /// Stroke color as a CSS hex string
    pub line_color: String,
    /// Base stroke width in CSS pixels
    pub line_width: f32,
    /// Initial surface width in CSS pixels
    pub width: u32,
    /// Initial surface height in CSS pixels
    pub height: u32,
    pub smoothing: SmoothingConfig,
    pub dynamics: DynamicsConfig,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            line_color: DEFAULT_LINE_COLOR.to_string(),
            line_width: DEFAULT_LINE_WIDTH,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            smoothing: SmoothingConfig::default(),
            dynamics: DynamicsConfig::default(),
        }
    }
}

impl PadConfig {
    /// Parse a configuration from JSON; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check option ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.color()?;
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(ConfigError::InvalidLineWidth(self.line_width));
        }
        let factor = self.smoothing.smoothing_factor;
        if !(0.0..1.0).contains(&factor) {
            return Err(ConfigError::InvalidSmoothingFactor(factor));
        }
        Ok(())
    }

    /// Parsed stroke color
    pub fn color(&self) -> Result<Rgba, ConfigError> {
        Rgba::from_hex(&self.line_color)
    }
}

/// Tuning for the path smoother
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SmoothingConfig {
    /// Pull strength of the Bézier handles toward neighboring points, in [0, 1)
    pub smoothing_factor: f32,
    /// Samples emitted per fitted segment
    pub curve_steps: u32,
    /// Minimum turn (radians) for an interior point to survive pruning
    pub angle_threshold: f32,
    /// Chord length (surface units) past which a point survives pruning
    pub distance_threshold: f32,
    /// Depth of the mid-segment pressure swell on interpolated samples
    pub pressure_taper: f32,
    /// Raw samples kept for live re-smoothing
    pub live_buffer_cap: usize,
    /// Newest smoothed samples appended per move
    pub live_append_count: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            smoothing_factor: 0.85,
            curve_steps: 8,
            angle_threshold: 0.1,
            distance_threshold: 10.0,
            pressure_taper: 0.08,
            live_buffer_cap: 10,
            live_append_count: 3,
        }
    }
}

/// Pressure and velocity response of the stroke width
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DynamicsConfig {
    pub default_pressure: f32,
    pub pressure_amplification: f32,
    pub max_pressure: f32,
    /// Width lost per px/ms of pointer speed
    pub velocity_sensitivity: f32,
    /// Floor of the velocity factor
    pub min_velocity_factor: f32,
}

impl Default for DynamicsConfig {
    fn default() -> Self {
        Self {
            default_pressure: DEFAULT_PRESSURE,
            pressure_amplification: PRESSURE_AMPLIFICATION,
            max_pressure: MAX_PRESSURE,
            velocity_sensitivity: 0.05,
            min_velocity_factor: 0.2,
        }
    }
}

impl DynamicsConfig {
    /// Amplify a raw device pressure, falling back to the default when the
    /// device reports none (or zero)
    pub fn amplify(&self, raw: Option<f32>) -> f32 {
        let raw = raw
            .filter(|p| p.is_finite() && *p > 0.0)
            .unwrap_or(self.default_pressure);
        (raw * self.pressure_amplification).clamp(0.0, self.max_pressure)
    }

    /// Width multiplier for a pointer speed in px/ms
    ///
    /// Non-increasing in `velocity`, never below `min_velocity_factor`.
    pub fn velocity_factor(&self, velocity: f32) -> f32 {
        let velocity = if velocity.is_finite() { velocity.max(0.0) } else { 0.0 };
        (1.0 - velocity * self.velocity_sensitivity).max(self.min_velocity_factor)
    }
}
