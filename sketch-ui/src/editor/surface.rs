// The drawing surface: canvas pixels, brush state and the one history that
// tracks them. Constructed when the widget first lays out, dropped with it.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use egui::Color32;
use sketch_core::{Availability, HistoryState};
use sketch_io::{encode_png, write_png, ExportError, Rgba, SketchConfig};
use tracing::{debug, error, info};

use crate::editor::history::CanvasHistory;
use crate::editor::stroke::Stroke;
use crate::editor::tools::{Brush, Eraser, Tool};
use crate::Canvas;

pub fn color_from_rgba([r, g, b, a]: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

fn opaque(color: Color32) -> Color32 {
    let [r, g, b, _] = color.to_srgba_unmultiplied();
    Color32::from_rgb(r, g, b)
}

#[derive(Debug)]
pub struct DrawingSurface {
    canvas: Canvas,
    history: CanvasHistory,
    config: SketchConfig,
    brush: Brush,
    eraser: Eraser,
    eraser_active: bool,
    stroke: Option<Stroke>,
    revision: u64,
}

impl DrawingSurface {
    /// Create a surface, paint the background and record it as the oldest
    /// state so undo can always get back to a blank canvas.
    pub fn new(width: u32, height: u32, config: SketchConfig) -> anyhow::Result<Self> {
        let history = CanvasHistory::new(config.history).context("create canvas history")?;
        let background = color_from_rgba(config.canvas.background);
        let size = config.brush.clamp_size(config.brush.default_size);

        let mut surface = Self {
            canvas: Canvas::new(width, height, background),
            history,
            brush: Brush::new(size, opaque(color_from_rgba(config.brush.default_color))),
            eraser: Eraser::new(size),
            eraser_active: false,
            stroke: None,
            revision: 0,
            config,
        };
        surface.record();
        info!(width, height, "drawing surface ready");
        Ok(surface)
    }

    fn background(&self) -> Color32 {
        color_from_rgba(self.config.canvas.background)
    }

    fn active_tool(&self) -> &dyn Tool {
        if self.eraser_active {
            &self.eraser
        } else {
            &self.brush
        }
    }

    fn record(&mut self) {
        match self.canvas.capture() {
            Ok(snapshot) => self.history.record(snapshot),
            Err(err) => error!(%err, "canvas buffer inconsistent, snapshot skipped"),
        }
    }

    fn touched(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    // ---- pointer interaction ----

    /// Pointer pressed on the canvas at canvas coordinates (x, y).
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        if self.stroke.is_some() {
            debug!("pointer_down while drawing ignored");
            return;
        }
        let tool: &dyn Tool = if self.eraser_active {
            &self.eraser
        } else {
            &self.brush
        };
        self.stroke = Some(Stroke::begin(tool, &mut self.canvas, x, y));
        self.touched();
        debug!("{} stroke started", self.active_tool().name());
    }

    /// Pointer moved; ignored unless a stroke is in progress.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let Some(stroke) = self.stroke.as_mut() else {
            return;
        };
        let tool: &dyn Tool = if self.eraser_active {
            &self.eraser
        } else {
            &self.brush
        };
        stroke.extend_to(tool, &mut self.canvas, x, y);
        self.touched();
    }

    /// Pointer released. Records the finished stroke; returns whether one was
    /// in progress.
    pub fn pointer_up(&mut self) -> bool {
        let Some(stroke) = self.stroke.take() else {
            return false;
        };
        let samples = stroke.samples();
        if stroke.end() {
            debug!(samples, "stroke finished");
            self.record();
        } else {
            debug!(samples, "stroke touched no pixels, nothing recorded");
        }
        true
    }

    /// Pointer left the canvas. An active stroke ends exactly as on release.
    pub fn pointer_leave(&mut self) -> bool {
        self.pointer_up()
    }

    /// Abandon the active stroke without recording it, repainting the last
    /// recorded state over its pixels.
    pub fn cancel_stroke(&mut self) -> bool {
        if self.stroke.take().is_none() {
            return false;
        }
        if let Some(snapshot) = self.history.current() {
            self.canvas.restore(snapshot);
        }
        self.touched();
        info!("stroke cancelled");
        true
    }

    pub fn is_drawing(&self) -> bool {
        self.stroke.is_some()
    }

    // ---- whole-canvas operations ----

    /// Wipe to white and record.
    pub fn clear(&mut self) {
        self.stroke = None;
        self.canvas.clear();
        self.touched();
        self.record();
    }

    /// Step back one state. Returns false, changing nothing, when there is
    /// no earlier state.
    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() {
            return false;
        }
        self.stroke = None;
        match self.history.undo() {
            Some(snapshot) => self.canvas.restore(snapshot),
            None => return false,
        }
        self.touched();
        true
    }

    /// Step forward one state. Returns false when there is no later state.
    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() {
            return false;
        }
        self.stroke = None;
        match self.history.redo() {
            Some(snapshot) => self.canvas.restore(snapshot),
            None => return false,
        }
        self.touched();
        true
    }

    /// Refit the canvas. Content is repainted with the background and the
    /// result recorded; history from the old size stays undoable.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == self.canvas.width() && height == self.canvas.height() {
            return false;
        }
        self.stroke = None;
        let background = self.background();
        self.canvas.resize(width, height, background);
        self.touched();
        self.record();
        true
    }

    /// Throw away all history and start again from a blank canvas.
    pub fn reset(&mut self) {
        info!("resetting drawing surface");
        self.stroke = None;
        self.history.reset();
        let background = self.background();
        self.canvas.fill(background);
        self.touched();
        self.record();
    }

    // ---- brush settings ----

    /// Set the brush colour. Paint is always opaque; any alpha is dropped.
    pub fn set_brush_color(&mut self, color: Color32) {
        let color = opaque(color);
        debug!("Brush color changed to {:?}", color);
        self.brush.color = color;
    }

    /// Set brush and eraser size, clamped to the configured range.
    pub fn set_brush_size(&mut self, size: u32) -> u32 {
        let size = self.config.brush.clamp_size(size);
        debug!("Brush size changed to {}px", size);
        self.brush.size = size;
        self.eraser.size = size;
        size
    }

    /// Flip eraser mode, returning the new state.
    pub fn toggle_eraser(&mut self) -> bool {
        self.eraser_active = !self.eraser_active;
        info!(eraser = self.eraser_active, "eraser toggled");
        self.eraser_active
    }

    pub fn is_eraser(&self) -> bool {
        self.eraser_active
    }

    pub fn brush_color(&self) -> Color32 {
        self.brush.color
    }

    pub fn brush_size(&self) -> u32 {
        self.brush.size
    }

    pub fn cursor_size(&self) -> u32 {
        self.active_tool().cursor_size()
    }

    // ---- history state ----

    pub fn availability(&self) -> Availability {
        self.history.availability()
    }

    pub fn history_state(&self) -> HistoryState {
        self.history.state()
    }

    pub fn history(&self) -> &CanvasHistory {
        &self.history
    }

    /// Run `listener` with new undo/redo availability after each change.
    pub fn subscribe(&mut self, listener: impl FnMut(Availability) + 'static) {
        self.history.subscribe(listener);
    }

    // ---- read access & export ----

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    /// Changes whenever the pixels do; lets the view skip texture uploads.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Encode the current canvas as PNG bytes.
    pub fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        encode_png(
            &self.canvas.to_rgba_bytes(),
            self.canvas.width(),
            self.canvas.height(),
        )
    }

    /// Write the current canvas to the configured export directory.
    pub fn export_png_to_dir(&self, now: DateTime<Utc>) -> Result<PathBuf, ExportError> {
        write_png(
            &self.config.export,
            &self.canvas.to_rgba_bytes(),
            self.canvas.width(),
            self.canvas.height(),
            now,
        )
    }
}
