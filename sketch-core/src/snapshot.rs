//! Immutable full-canvas raster captures.

use thiserror::Error;
use tracing::trace;

/// A frozen copy of every pixel on the surface at one point in time.
///
/// The pixel type is left to the caller so the history stays independent of
/// any particular colour representation. Once built a snapshot cannot be
/// mutated; the store hands out shared references only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<P> {
    width: u32,
    height: u32,
    pixels: Box<[P]>,
}

impl<P> Snapshot<P> {
    /// Build a snapshot from a row-major pixel buffer.
    pub fn new(width: u32, height: u32, pixels: Vec<P>) -> Result<Self, SnapshotError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(SnapshotError::DimensionMismatch {
                width,
                height,
                len: pixels.len(),
            });
        }
        trace!(width, height, "snapshot captured");
        Ok(Self {
            width,
            height,
            pixels: pixels.into_boxed_slice(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }

    /// Pixel at (x, y), or `None` outside the captured area.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&P> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize)
    }

    /// Row `y` as a slice.
    pub fn row(&self, y: u32) -> Option<&[P]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        self.pixels.get(start..start + self.width as usize)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("pixel buffer of {len} entries does not match {width}x{height}")]
    DimensionMismatch { width: u32, height: u32, len: usize },
}
