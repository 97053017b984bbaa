//! Viewer configuration.
//!
//! Settings are plain serde structs so hosts can ship them as JSON next to
//! their other preferences. Every field has a default, so partial files load.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_COMMIT_DELAY, DEFAULT_DOUBLE_TAP_FACTOR, DEFAULT_MAX_SCALE_FACTOR,
    DEFAULT_PINCH_UNDERSHOOT, DEFAULT_ZOOM_STEP,
};
use crate::error::{ConfigError, ViewerError};
use crate::scroll::RenderMode;

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Log level setting for the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including per-gesture trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Behaviour settings for one image viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Fit the image into the viewport on load; otherwise the base scale is 1
    pub auto_fit: bool,

    /// Maximum scale as a multiple of the base scale
    pub max_scale_factor: f64,

    /// Whether double tap toggles zoom
    pub double_tap_enabled: bool,

    /// Double-tap zoom target as a multiple of the base scale
    pub double_tap_factor: f64,

    /// Scale increment of one zoom-in / zoom-out step
    pub zoom_step: f64,

    /// How far below the base scale a pinch may go before snapping back
    pub pinch_undershoot: f64,

    /// Delay before a discrete zoom is committed, in milliseconds
    pub commit_delay_ms: u64,

    /// How transforms are handed to the render sink
    pub render_mode: RenderMode,

    /// Hold image loads until the host reports the viewer as activated
    pub init_on_activate: bool,

    /// Log verbosity level
    pub log_level: LogLevel,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            auto_fit: true,
            max_scale_factor: DEFAULT_MAX_SCALE_FACTOR,
            double_tap_enabled: true,
            double_tap_factor: DEFAULT_DOUBLE_TAP_FACTOR,
            zoom_step: DEFAULT_ZOOM_STEP,
            pinch_undershoot: DEFAULT_PINCH_UNDERSHOOT,
            commit_delay_ms: DEFAULT_COMMIT_DELAY.as_millis() as u64,
            render_mode: RenderMode::default(),
            init_on_activate: false,
            log_level: LogLevel::default(),
        }
    }
}

impl ViewerConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the image is fitted into the viewport on load.
    pub fn with_auto_fit(mut self, auto_fit: bool) -> Self {
        self.auto_fit = auto_fit;
        self
    }

    /// Set the deferred commit delay.
    pub fn with_commit_delay(mut self, delay: Duration) -> Self {
        self.commit_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Set the render mode.
    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.render_mode = mode;
        self
    }

    /// Set whether double tap is handled.
    pub fn with_double_tap(mut self, enabled: bool) -> Self {
        self.double_tap_enabled = enabled;
        self
    }

    /// Set whether loads wait for activation.
    pub fn with_init_on_activate(mut self, enabled: bool) -> Self {
        self.init_on_activate = enabled;
        self
    }

    /// Deferred commit delay as a duration.
    pub fn commit_delay(&self) -> Duration {
        Duration::from_millis(self.commit_delay_ms)
    }

    /// Check that all numeric settings are usable.
    pub fn validate(&self) -> Result<(), ViewerError> {
        if self.max_scale_factor.is_nan() || self.max_scale_factor < 1.0 {
            return Err(ViewerError::invalid_config(format!(
                "max_scale_factor must be at least 1, got {}",
                self.max_scale_factor
            )));
        }
        if self.double_tap_factor.is_nan() || self.double_tap_factor <= 0.0 {
            return Err(ViewerError::invalid_config(format!(
                "double_tap_factor must be positive, got {}",
                self.double_tap_factor
            )));
        }
        if self.zoom_step.is_nan() || self.zoom_step <= 0.0 {
            return Err(ViewerError::invalid_config(format!(
                "zoom_step must be positive, got {}",
                self.zoom_step
            )));
        }
        if self.pinch_undershoot.is_nan() || self.pinch_undershoot < 0.0 {
            return Err(ViewerError::invalid_config(format!(
                "pinch_undershoot must not be negative, got {}",
                self.pinch_undershoot
            )));
        }
        Ok(())
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize and validate configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded viewer configuration from {:?}", path);
        Ok(config)
    }

    /// Write configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Saved viewer configuration to {:?}", path);
        Ok(())
    }
}
