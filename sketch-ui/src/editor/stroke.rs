// Freehand stroke rendering: joins pointer samples with stamped segments.

use tracing::trace;

use crate::editor::tools::Tool;
use crate::Canvas;

/// A stroke in progress, from pointer press to release.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    last: (f32, f32),
    samples: usize,
    painted: u64,
}

impl Stroke {
    /// Start a stroke and stamp a dot where the pointer went down.
    pub fn begin(tool: &dyn Tool, canvas: &mut Canvas, x: f32, y: f32) -> Self {
        trace!("{} stroke begins at ({:.1}, {:.1})", tool.name(), x, y);
        let painted = tool.apply(canvas, x.round() as i32, y.round() as i32);
        Self {
            last: (x, y),
            samples: 1,
            painted: u64::from(painted),
        }
    }

    /// Draw a segment from the previous sample to (x, y).
    ///
    /// Stamps at one-pixel spacing so the line has no gaps and round joins.
    pub fn extend_to(&mut self, tool: &dyn Tool, canvas: &mut Canvas, x: f32, y: f32) {
        let (x0, y0) = self.last;
        let dx = x - x0;
        let dy = y - y0;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;

        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let px = (x0 + dx * t).round() as i32;
            let py = (y0 + dy * t).round() as i32;
            self.painted += u64::from(tool.apply(canvas, px, py));
        }

        self.last = (x, y);
        self.samples += 1;
    }

    pub fn last_point(&self) -> (f32, f32) {
        self.last
    }

    /// Pointer samples consumed, including the initial press.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Finish the stroke. True if any canvas pixel was written.
    pub fn end(self) -> bool {
        trace!(
            samples = self.samples,
            painted = self.painted,
            "stroke ends"
        );
        self.painted > 0
    }
}
