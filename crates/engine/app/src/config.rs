//! Animation tuning
//!
//! Every constant the object animator and camera controller use lives in
//! [`AnimationConfig`]. All fields have defaults, so a TOML file only needs
//! the values it overrides:
//!
//! ```toml
//! floating = false
//! zoom_scale = 2.0
//!
//! [camera]
//! zoom_distance = 3.0
//! ```

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use showcase_core::Viewport;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the expected schema
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is outside its allowed range
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Camera tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Resting camera position, looking at the origin
    pub base_position: Vec3,
    /// Distance in front of an anchor (along +Z) when zoomed in
    pub zoom_distance: f32,
    /// Horizontal sway while holding on an anchor
    pub parallax_amplitude: f32,
    /// Per-frame smoothing factor while anchors are available
    pub smoothing: f32,
    /// Per-frame smoothing factor while no anchors exist yet
    pub idle_smoothing: f32,
    /// Vertical field of view in degrees
    pub vfov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            base_position: Vec3::new(0.0, 0.0, 6.0),
            zoom_distance: 2.5,
            parallax_amplitude: 0.15,
            smoothing: 0.06,
            idle_smoothing: 0.08,
            vfov_degrees: 45.0,
            near: 0.01,
            far: 1000.0,
        }
    }
}

/// Object animation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Scroll distance in pixels covered by the arrival zoom-in
    pub arrival_distance: f32,
    /// Scale at the very top of the page
    pub arrival_scale: f32,
    /// Scale at the end of the arrival and at the start of each segment
    pub rest_scale: f32,
    /// Scale reached halfway through a segment
    pub zoom_scale: f32,
    /// Amplitude of the scale pulse while holding
    pub pulse_amplitude: f32,
    /// Lower bound for the target scale while hovered
    pub hover_min_scale: f32,
    /// Scale before the first frame
    pub initial_scale: f32,
    /// Per-frame smoothing factor for scale, position and rotation reset
    pub object_smoothing: f32,
    /// Spin rate around the vertical axis in radians per second
    pub spin_rate: f32,
    /// Scroll offset in pixels above which the object spins
    pub spin_threshold: u32,
    /// Add a vertical floating oscillation
    pub floating: bool,
    pub float_amplitude: f32,
    /// Angular frequency of the float in radians per second
    pub float_frequency: f32,
    /// Arrival start position (x, y) on wide viewports
    pub desktop_start: Vec2,
    /// Arrival start position (x, y) on narrow viewports
    pub mobile_start: Vec2,
    /// Widest viewport, in logical pixels, treated as mobile
    pub mobile_breakpoint: u32,
    /// Peak emissive multiplier
    pub glow_amplitude: f32,
    pub camera: CameraConfig,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            arrival_distance: 500.0,
            arrival_scale: 0.2,
            rest_scale: 1.0,
            zoom_scale: 1.8,
            pulse_amplitude: 0.05,
            hover_min_scale: 0.3,
            initial_scale: 0.5,
            object_smoothing: 0.08,
            spin_rate: 0.4,
            spin_threshold: 5,
            floating: true,
            float_amplitude: 0.08,
            float_frequency: 0.5,
            desktop_start: Vec2::new(-1.8, 2.1),
            mobile_start: Vec2::new(0.0, 1.5),
            mobile_breakpoint: showcase_core::page::MOBILE_BREAKPOINT,
            glow_amplitude: 0.4,
            camera: CameraConfig::default(),
        }
    }
}

impl AnimationConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn smoothing(name: &str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value <= 1.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!(
                    "{name} must be in (0, 1], got {value}"
                )))
            }
        }

        if !(self.arrival_distance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "arrival_distance must be positive, got {}",
                self.arrival_distance
            )));
        }
        smoothing("object_smoothing", self.object_smoothing)?;
        smoothing("camera.smoothing", self.camera.smoothing)?;
        smoothing("camera.idle_smoothing", self.camera.idle_smoothing)?;

        if !(self.camera.near > 0.0 && self.camera.far > self.camera.near) {
            return Err(ConfigError::Invalid(format!(
                "camera clip planes must satisfy 0 < near < far, got near={} far={}",
                self.camera.near, self.camera.far
            )));
        }
        if !(self.camera.vfov_degrees > 0.0 && self.camera.vfov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.vfov_degrees must be in (0, 180), got {}",
                self.camera.vfov_degrees
            )));
        }
        Ok(())
    }

    /// Whether a viewport uses the mobile arrival layout
    pub fn is_mobile(&self, viewport: Viewport) -> bool {
        viewport.is_mobile(self.mobile_breakpoint)
    }

    /// Arrival start position (x, y) for a viewport
    pub fn start_position(&self, viewport: Viewport) -> Vec2 {
        if self.is_mobile(viewport) {
            self.mobile_start
        } else {
            self.desktop_start
        }
    }
}
