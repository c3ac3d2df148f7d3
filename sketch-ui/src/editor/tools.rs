// Drawing tools for the canvas editor.

use crate::Canvas;
use egui::Color32;
use tracing::{debug, trace};

pub trait Tool {
    /// Stamp the tool footprint centred on (x, y). Centres may lie off the
    /// canvas; only in-bounds pixels are touched. Returns how many were.
    fn apply(&self, canvas: &mut Canvas, x: i32, y: i32) -> u32;

    fn name(&self) -> &str;

    fn cursor_size(&self) -> u32 {
        1
    }
}

// Paint a filled disc of the given diameter. The `+ half` slack rounds the
// edge so small sizes stay square-ish and large ones look circular.
fn stamp_disc(canvas: &mut Canvas, x: i32, y: i32, size: u32, color: Color32) -> u32 {
    let half = (size / 2) as i32;
    let limit = half * half + half;
    let mut painted = 0;
    for dy in -half..=half {
        for dx in -half..=half {
            if dx * dx + dy * dy > limit {
                continue;
            }
            let px = x + dx;
            let py = y + dy;
            if px >= 0 && py >= 0 && canvas.set_pixel(px as u32, py as u32, color) {
                painted += 1;
            }
        }
    }
    painted
}

#[derive(Debug, Clone)]
pub struct Brush {
    pub size: u32,
    pub color: Color32,
}

impl Brush {
    pub fn new(size: u32, color: Color32) -> Self {
        Self { size, color }
    }
}

impl Tool for Brush {
    fn apply(&self, canvas: &mut Canvas, x: i32, y: i32) -> u32 {
        trace!(
            "Applying Brush at ({}, {}) with size {} and color {:?}",
            x,
            y,
            self.size,
            self.color
        );
        let painted = stamp_disc(canvas, x, y, self.size, self.color);
        trace!("Brush applied {} pixels", painted);
        painted
    }

    fn name(&self) -> &str {
        "Brush"
    }

    fn cursor_size(&self) -> u32 {
        self.size
    }
}

/// Removes paint by writing `erase_color`, transparent unless overridden.
#[derive(Debug, Clone)]
pub struct Eraser {
    pub size: u32,
    pub erase_color: Color32,
}

impl Eraser {
    pub fn new(size: u32) -> Self {
        debug!("Creating Eraser tool with size {}", size);
        Self {
            size,
            erase_color: Color32::TRANSPARENT,
        }
    }

    pub fn with_color(size: u32, color: Color32) -> Self {
        debug!(
            "Creating Eraser tool with size {} and color {:?}",
            size, color
        );
        Self {
            size,
            erase_color: color,
        }
    }
}

impl Tool for Eraser {
    fn apply(&self, canvas: &mut Canvas, x: i32, y: i32) -> u32 {
        trace!("Applying Eraser at ({}, {}) with size {}", x, y, self.size);
        let painted = stamp_disc(canvas, x, y, self.size, self.erase_color);
        trace!("Eraser cleared {} pixels", painted);
        painted
    }

    fn name(&self) -> &str {
        "Eraser"
    }

    fn cursor_size(&self) -> u32 {
        self.size
    }
}
