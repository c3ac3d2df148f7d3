//! User configuration for the drawing tool.
//!
//! Stored as pretty JSON. Every field has a default so partial files (or no
//! file at all) still produce a working setup.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use sketch_core::{HistoryConfig, HistoryConfigError};
use std::fs;
use std::path::Path;

use crate::export::{ExportConfig, ExportError};

/// RGBA8 colour, unpremultiplied.
pub type Rgba = [u8; 4];

pub const WHITE: Rgba = [255, 255, 255, 255];
pub const BLACK: Rgba = [0, 0, 0, 255];

/// Canvas sizing. The surface fits the available area but never exceeds
/// the maximums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub max_width: u32,
    pub max_height: u32,
    /// Subtracted from the container width before fitting.
    pub horizontal_margin: u32,
    /// Subtracted from the viewport height to leave room for the toolbar.
    pub vertical_margin: u32,
    pub background: Rgba,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            max_width: 800,
            max_height: 600,
            horizontal_margin: 40,
            vertical_margin: 300,
            background: WHITE,
        }
    }
}

impl CanvasConfig {
    /// Canvas size for a container of the given width and a viewport of the
    /// given height. Each side is at least one pixel.
    pub fn fit(&self, container_width: u32, viewport_height: u32) -> (u32, u32) {
        let width = self
            .max_width
            .min(container_width.saturating_sub(self.horizontal_margin))
            .max(1);
        let height = self
            .max_height
            .min(viewport_height.saturating_sub(self.vertical_margin))
            .max(1);
        (width, height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    pub default_size: u32,
    pub min_size: u32,
    pub max_size: u32,
    pub default_color: Rgba,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            default_size: 5,
            min_size: 1,
            max_size: 50,
            default_color: BLACK,
        }
    }
}

impl BrushConfig {
    pub fn clamp_size(&self, size: u32) -> u32 {
        size.clamp(self.min_size, self.max_size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Seconds a toast stays fully visible.
    pub duration_secs: f64,
    /// Seconds spent fading out afterwards.
    pub fade_secs: f64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            duration_secs: 3.0,
            fade_secs: 0.3,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SketchConfig {
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub brush: BrushConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

impl SketchConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.history.validate()?;

        if self.canvas.max_width == 0 || self.canvas.max_height == 0 {
            tracing::error!(
                max_width = self.canvas.max_width,
                max_height = self.canvas.max_height,
                "canvas maximum size must be non-zero"
            );
            return Err(ConfigError::ZeroCanvas);
        }

        let brush = &self.brush;
        if brush.min_size == 0 {
            tracing::error!("brush min_size must be at least 1");
            return Err(ConfigError::ZeroBrush);
        }
        if brush.min_size > brush.max_size {
            tracing::error!(
                min = brush.min_size,
                max = brush.max_size,
                "brush size range is inverted"
            );
            return Err(ConfigError::BrushRange {
                min: brush.min_size,
                max: brush.max_size,
            });
        }
        if !(brush.min_size..=brush.max_size).contains(&brush.default_size) {
            tracing::warn!(
                default = brush.default_size,
                "default brush size outside range, it will be clamped"
            );
        }

        let n = &self.notifications;
        let timings_ok = n.duration_secs.is_finite()
            && n.fade_secs.is_finite()
            && n.duration_secs >= 0.0
            && n.fade_secs >= 0.0;
        if !timings_ok {
            tracing::error!(
                duration = n.duration_secs,
                fade = n.fade_secs,
                "notification timings must be finite and non-negative"
            );
            return Err(ConfigError::NotificationTiming);
        }

        self.export.validate()?;
        Ok(())
    }
}

/// Semantic configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    History(#[from] HistoryConfigError),

    #[error("canvas maximum size must be non-zero")]
    ZeroCanvas,

    #[error("brush min_size must be at least 1")]
    ZeroBrush,

    #[error("brush size range is inverted: min={min} max={max}")]
    BrushRange { min: u32, max: u32 },

    #[error("notification timings must be finite and non-negative")]
    NotificationTiming,

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Save a configuration to disk as pretty JSON.
pub fn save_config(path: impl AsRef<Path>, config: &SketchConfig) -> anyhow::Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create parent dir: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(config).context("serialize config to json")?;
    fs::write(path, json).with_context(|| format!("write config file: {}", path.display()))?;
    Ok(())
}

/// Load and validate a configuration from disk.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<SketchConfig> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config file: {}", path.display()))?;
    let config: SketchConfig = serde_json::from_str(&data).context("parse config json")?;
    config
        .validate()
        .with_context(|| format!("validate config file: {}", path.display()))?;
    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to defaults.
pub fn load_config_or_default(path: impl AsRef<Path>) -> anyhow::Result<SketchConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::info!(path = %path.display(), "no config file, using defaults");
        return Ok(SketchConfig::default());
    }
    load_config(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SketchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.history.capacity, 50);
        assert_eq!(config.brush.default_size, 5);
        assert_eq!(config.brush.default_color, BLACK);
        assert_eq!(config.canvas.background, WHITE);
    }

    #[test]
    fn test_fit_respects_maximums_and_margins() {
        let canvas = CanvasConfig::default();
        assert_eq!(canvas.fit(1920, 1080), (800, 600));
        assert_eq!(canvas.fit(540, 700), (500, 400));
        assert_eq!(canvas.fit(10, 100), (1, 1));
    }

    #[test]
    fn test_brush_clamp() {
        let brush = BrushConfig::default();
        assert_eq!(brush.clamp_size(0), 1);
        assert_eq!(brush.clamp_size(12), 12);
        assert_eq!(brush.clamp_size(500), 50);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SketchConfig =
            serde_json::from_str(r#"{ "history": { "capacity": 10 }, "brush": { "max_size": 80 } }"#)
                .unwrap();
        assert_eq!(config.history.capacity, 10);
        assert_eq!(config.brush.max_size, 80);
        assert_eq!(config.brush.min_size, 1);
        assert_eq!(config.canvas.max_width, 800);
        assert_eq!(config.export.file_prefix, "drawing");
    }

    #[test]
    fn test_invalid_sections_rejected() {
        let mut config = SketchConfig::default();
        config.history.capacity = 0;
        assert!(matches!(config.validate(), Err(ConfigError::History(_))));

        let mut config = SketchConfig::default();
        config.brush.min_size = 10;
        config.brush.max_size = 2;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BrushRange { min: 10, max: 2 })
        ));

        let mut config = SketchConfig::default();
        config.notifications.fade_secs = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotificationTiming)
        ));

        let mut config = SketchConfig::default();
        config.export.file_prefix = "x:y".into();
        assert!(matches!(config.validate(), Err(ConfigError::Export(_))));
    }
}
