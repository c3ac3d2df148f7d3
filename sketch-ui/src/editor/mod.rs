// Editor module for the sketchpad.

pub mod canvas;
pub mod history;
pub mod input;
pub mod stroke;
pub mod surface;
pub mod tools;

pub use canvas::Canvas;
pub use history::{CanvasHistory, CanvasSnapshot};
pub use stroke::Stroke;
pub use surface::DrawingSurface;
pub use tools::{Brush, Eraser, Tool};
