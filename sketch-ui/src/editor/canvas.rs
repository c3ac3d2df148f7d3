// Raster drawing surface for the sketchpad.
// Holds the live pixels; history keeps frozen copies of them.

use egui::Color32;
use tracing::{debug, info, trace, warn};

use crate::editor::history::CanvasSnapshot;
use sketch_core::SnapshotError;

#[derive(Debug, Clone)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color32>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color32) -> Self {
        info!(
            "Creating new canvas of size {}x{} with background color {:?}",
            width, height, background
        );

        let total_pixels = width as usize * height as usize;
        debug!("Total pixels to initialize: {}", total_pixels);

        Self {
            width,
            height,
            pixels: vec![background; total_pixels],
        }
    }

    // Check if coordinates are within canvas bounds
    fn is_valid_coordinate(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    //convert 2d coordinates to 1d index
    fn coord_to_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    // Get the color of a pixel at (x, y)
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color32> {
        if !self.is_valid_coordinate(x, y) {
            warn!(
                "Requested pixel color at invalid coordinates ({}, {})",
                x, y
            );
            return None;
        }

        self.pixels.get(self.coord_to_index(x, y)).copied()
    }

    // Set the color of a pixel at (x, y); false when out of bounds
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color32) -> bool {
        if !self.is_valid_coordinate(x, y) {
            return false;
        }

        let index = self.coord_to_index(x, y);
        match self.pixels.get_mut(index) {
            Some(pixel) => {
                *pixel = color;
                true
            }
            None => false,
        }
    }

    // Fill entire canvas with a color
    pub fn fill(&mut self, color: Color32) {
        info!("Filling canvas {:?}", color);
        self.pixels.fill(color);
        trace!("Canvas fill complete");
    }

    // Clear canvas
    pub fn clear(&mut self) {
        info!("Clearing canvas");
        self.fill(Color32::WHITE);
    }

    // Change dimensions; previous content is discarded
    pub fn resize(&mut self, width: u32, height: u32, background: Color32) {
        info!(
            "Resizing canvas from {}x{} to {}x{}",
            self.width, self.height, width, height
        );
        self.width = width;
        self.height = height;
        self.pixels = vec![background; width as usize * height as usize];
    }

    // Get canvas dimensions
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Freeze the current pixels into a history snapshot.
    pub fn capture(&self) -> Result<CanvasSnapshot, SnapshotError> {
        CanvasSnapshot::new(self.width, self.height, self.pixels.clone())
    }

    /// Paint a snapshot back at the origin, replacing what is there.
    ///
    /// Snapshots taken at another size are clipped to the overlapping area;
    /// pixels outside it keep their current value.
    pub fn restore(&mut self, snapshot: &CanvasSnapshot) {
        if snapshot.width() == self.width
            && snapshot.height() == self.height
            && snapshot.pixels().len() == self.pixels.len()
        {
            self.pixels.copy_from_slice(snapshot.pixels());
            trace!("Restored snapshot {}x{}", self.width, self.height);
            return;
        }

        let cols = snapshot.width().min(self.width) as usize;
        let rows = snapshot.height().min(self.height);
        debug!(
            "Restoring {}x{} snapshot onto {}x{} canvas, clipping to {}x{}",
            snapshot.width(),
            snapshot.height(),
            self.width,
            self.height,
            cols,
            rows
        );
        for y in 0..rows {
            let Some(src) = snapshot.row(y) else { break };
            let start = self.coord_to_index(0, y);
            if let Some(dst) = self.pixels.get_mut(start..start + cols) {
                dst.copy_from_slice(&src[..cols]);
            }
        }
    }

    /// Unpremultiplied RGBA8 bytes, row-major, for export.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| p.to_srgba_unmultiplied())
            .collect()
    }
}

// Create a default canvas
impl Default for Canvas {
    fn default() -> Self {
        Canvas::new(800, 600, Color32::WHITE)
    }
}
