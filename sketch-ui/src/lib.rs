//! sketch-ui: the freehand drawing widget.
//!
//! - `editor`: canvas pixels, brush/eraser tools, stroke rendering and the
//!   `DrawingSurface` that owns one bounded undo/redo history.
//! - `app`: egui widget wiring pointer, toolbar, shortcuts and toasts to a
//!   surface.
//! - `logging`: tracing subscriber setup for embedding hosts.

pub mod app;
pub mod editor;
pub mod logging;
pub mod notify;
pub mod shortcuts;

pub use app::SketchApp;
pub use editor::{Brush, Canvas, DrawingSurface, Eraser, Tool};
pub use logging::init_tracing;
pub use notify::{Notifications, Toast, ToastKind};
pub use shortcuts::Shortcut;
