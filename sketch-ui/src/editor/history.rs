// Undo/redo history module for the editor.
// Pixel-type bindings of the generic history engine.

use egui::Color32;
use sketch_core::{HistoryController, Snapshot};

/// Frozen copy of every canvas pixel.
pub type CanvasSnapshot = Snapshot<Color32>;

/// History of canvas snapshots owned by a drawing surface.
pub type CanvasHistory = HistoryController<Color32>;
