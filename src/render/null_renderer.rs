use crate::error::ChartResult;
use crate::render::{ChartFrame, Renderer};

/// Primitive counts of one frame, per primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameTally {
    pub lines: usize,
    pub rects: usize,
    pub paths: usize,
    pub circles: usize,
    pub texts: usize,
}

impl FrameTally {
    #[must_use]
    pub fn of(frame: &ChartFrame) -> Self {
        Self {
            lines: frame.lines.len(),
            rects: frame.rects.len(),
            paths: frame.paths.len(),
            circles: frame.circles.len(),
            texts: frame.texts.len(),
        }
    }

    #[must_use]
    pub fn total(self) -> usize {
        self.lines + self.rects + self.paths + self.circles + self.texts
    }
}

/// Headless renderer: validates each frame and keeps its tally.
///
/// Invalid frames are rejected before anything is recorded, so
/// `frames_rendered` only counts frames a real backend could draw.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last: FrameTally,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &ChartFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last = FrameTally::of(frame);
        Ok(())
    }
}
