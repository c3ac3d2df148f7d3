// Pointer position mapping between screen space and canvas pixels.

use egui::{Pos2, Rect};

/// Convert a screen position into canvas pixel coordinates.
///
/// The canvas may be displayed scaled; `display` is where it is drawn and
/// `canvas_size` its real pixel size.
pub fn to_canvas_coords(pointer: Pos2, display: Rect, canvas_size: (u32, u32)) -> (f32, f32) {
    let (width, height) = canvas_size;
    let scale_x = if display.width() > 0.0 {
        width as f32 / display.width()
    } else {
        1.0
    };
    let scale_y = if display.height() > 0.0 {
        height as f32 / display.height()
    } else {
        1.0
    };
    (
        (pointer.x - display.left()) * scale_x,
        (pointer.y - display.top()) * scale_y,
    )
}

/// Inverse of [`to_canvas_coords`]: screen length of `pixels` canvas pixels
/// along the horizontal axis.
pub fn canvas_len_to_screen(pixels: f32, display: Rect, canvas_width: u32) -> f32 {
    if canvas_width == 0 {
        return pixels;
    }
    pixels * display.width() / canvas_width as f32
}
