//! Tracking, recording and overlay configuration.
//!
//! All sections default to the values the tracker was tuned with, and every
//! field is optional in YAML so a config file only needs to list overrides.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Numeric policy for one tracking session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Largest allowed region size as a multiple of the size at acquisition.
    pub max_growth: f64,
    /// Hard floor for region width and height, in pixels.
    pub min_region_size: i32,
    /// Consecutive failures tolerated before the target is dropped.
    pub max_tracking_failures: u32,
    /// Half-width of the square window used for recovery.
    pub search_radius: i32,
    /// Frame-to-frame size ratio above which an update is treated as drift.
    pub size_change_threshold: f64,
    /// Contours must have strictly more area than this to become candidates.
    pub min_contour_area: f64,
    /// Frames to wait after (re)starting auto-search before detecting.
    pub warmup_frames: u32,
    /// Margin added on every side of a detected contour's bounds.
    pub detection_padding: i32,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            max_growth: 2.0,
            min_region_size: 40,
            max_tracking_failures: 12,
            search_radius: 120,
            size_change_threshold: 5.0,
            min_contour_area: 500.0,
            warmup_frames: 30,
            detection_padding: 20,
        }
    }
}

impl TrackingConfig {
    pub fn builder() -> TrackingConfigBuilder {
        TrackingConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_growth.is_finite() && self.max_growth > 0.0) {
            return Err(ConfigError::invalid(
                "max_growth",
                format!("must be a positive number, got {}", self.max_growth),
            ));
        }
        if self.min_region_size <= 0 {
            return Err(ConfigError::invalid(
                "min_region_size",
                format!("must be positive, got {}", self.min_region_size),
            ));
        }
        if self.max_tracking_failures == 0 {
            return Err(ConfigError::invalid(
                "max_tracking_failures",
                "must be at least 1",
            ));
        }
        if self.search_radius <= 0 {
            return Err(ConfigError::invalid(
                "search_radius",
                format!("must be positive, got {}", self.search_radius),
            ));
        }
        if !(self.size_change_threshold.is_finite() && self.size_change_threshold > 1.0) {
            return Err(ConfigError::invalid(
                "size_change_threshold",
                format!("must be greater than 1.0, got {}", self.size_change_threshold),
            ));
        }
        if !(self.min_contour_area.is_finite() && self.min_contour_area >= 0.0) {
            return Err(ConfigError::invalid(
                "min_contour_area",
                format!("must be non-negative, got {}", self.min_contour_area),
            ));
        }
        if self.detection_padding < 0 {
            return Err(ConfigError::invalid(
                "detection_padding",
                format!("must be non-negative, got {}", self.detection_padding),
            ));
        }
        Ok(())
    }
}

/// Chained builder for `TrackingConfig`, validated on `build`.
#[derive(Debug, Clone, Default)]
pub struct TrackingConfigBuilder {
    config: TrackingConfig,
}

impl TrackingConfigBuilder {
    pub fn max_growth(mut self, max_growth: f64) -> Self {
        self.config.max_growth = max_growth;
        self
    }

    pub fn min_region_size(mut self, min_region_size: i32) -> Self {
        self.config.min_region_size = min_region_size;
        self
    }

    pub fn max_tracking_failures(mut self, max_tracking_failures: u32) -> Self {
        self.config.max_tracking_failures = max_tracking_failures;
        self
    }

    pub fn search_radius(mut self, search_radius: i32) -> Self {
        self.config.search_radius = search_radius;
        self
    }

    pub fn size_change_threshold(mut self, size_change_threshold: f64) -> Self {
        self.config.size_change_threshold = size_change_threshold;
        self
    }

    pub fn min_contour_area(mut self, min_contour_area: f64) -> Self {
        self.config.min_contour_area = min_contour_area;
        self
    }

    pub fn warmup_frames(mut self, warmup_frames: u32) -> Self {
        self.config.warmup_frames = warmup_frames;
        self
    }

    pub fn detection_padding(mut self, detection_padding: i32) -> Self {
        self.config.detection_padding = detection_padding;
        self
    }

    pub fn build(self) -> Result<TrackingConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Video recording settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingConfig {
    pub fps: f64,
    /// FourCC codes tried in order until one opens.
    pub codecs: Vec<String>,
    pub output_dir: PathBuf,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            fps: 30.0,
            codecs: ["H264", "avc1", "x264", "mp4v"]
                .into_iter()
                .map(String::from)
                .collect(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl RecordingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(ConfigError::invalid(
                "recording.fps",
                format!("must be positive, got {}", self.fps),
            ));
        }
        if self.codecs.is_empty() {
            return Err(ConfigError::invalid(
                "recording.codecs",
                "at least one codec is required",
            ));
        }
        Ok(())
    }
}

/// On-screen overlay settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Capacity of the on-screen debug log buffer.
    pub max_debug_logs: usize,
    /// Debug lines longer than this are cut and end in "...".
    pub debug_line_max_chars: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            max_debug_logs: 10,
            debug_line_max_chars: 50,
        }
    }
}

/// Top-level configuration file layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tracking: TrackingConfig,
    pub recording: RecordingConfig,
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tracking.validate()?;
        self.recording.validate()?;
        if self.ui.max_debug_logs == 0 {
            return Err(ConfigError::invalid("ui.max_debug_logs", "must be at least 1"));
        }
        if self.ui.debug_line_max_chars < 4 {
            return Err(ConfigError::invalid(
                "ui.debug_line_max_chars",
                "must leave room for the \"...\" suffix",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tracking.max_tracking_failures, 12);
        assert_eq!(config.tracking.search_radius, 120);
        assert_eq!(config.recording.codecs[0], "H264");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "tracking:\n  max_growth: 3.0\n  warmup_frames: 5\nui:\n  max_debug_logs: 4\n";
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.tracking.max_growth, 3.0);
        assert_eq!(config.tracking.warmup_frames, 5);
        assert_eq!(config.tracking.min_region_size, 40);
        assert_eq!(config.ui.max_debug_logs, 4);
        assert_eq!(config.recording.fps, 30.0);
    }

    #[test]
    fn test_invalid_yaml_value_rejected() {
        let yaml = "tracking:\n  size_change_threshold: 0.5\n";
        match AppConfig::from_yaml(yaml) {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "size_change_threshold"),
            other => panic!("expected invalid config, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            AppConfig::from_yaml("tracking: [1, 2"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            AppConfig::load("/nonexistent/sotrack.yaml"),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_builder() {
        let config = TrackingConfig::builder()
            .max_tracking_failures(3)
            .warmup_frames(0)
            .build()
            .unwrap();
        assert_eq!(config.max_tracking_failures, 3);
        assert_eq!(config.warmup_frames, 0);
        assert_eq!(config.max_growth, 2.0);

        assert!(TrackingConfig::builder().min_region_size(0).build().is_err());
    }
}
