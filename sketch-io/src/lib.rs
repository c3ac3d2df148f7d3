//! sketch-io: everything that leaves process memory.
//!
//! - PNG export of the finished drawing, named after the save time.
//! - JSON configuration for history size, canvas fitting, brush limits,
//!   export location and notification timing.
//!
//! Drawing history itself is never written anywhere.

pub mod config;
pub mod export;

pub use config::{
    load_config, load_config_or_default, save_config, BrushConfig, CanvasConfig, ConfigError,
    NotificationConfig, Rgba, SketchConfig, BLACK, WHITE,
};
pub use export::{encode_png, write_png, ExportConfig, ExportError, PNG_EXTENSION};
