//! Frame renderer: normalize, then compose.
//!
//! [`Renderer`] owns everything the per-frame path touches besides the input
//! readings: the gradient table, built once in [`Renderer::new`], and the
//! display-sized pixel buffer that every frame overwrites in place. Nothing
//! is allocated after construction.

use crate::compose::compose;
use crate::framebuffer::PixelBuffer;
use crate::gradient::VIRIDIS;
use crate::grid::SampleGrid;
use crate::lut::GradientLut;
use crate::normalize::{NormalizationRange, normalize_range};

/// Gradient table plus the frame buffer it paints into.
pub struct Renderer {
    lut: GradientLut,
    buffer: PixelBuffer,
}

impl Renderer {
    /// Build the Viridis table and a black frame buffer.
    pub fn new() -> Self {
        Self {
            lut: GradientLut::build(&VIRIDIS),
            buffer: PixelBuffer::new(),
        }
    }

    /// Turn one frame of readings into display pixels.
    ///
    /// Returns the range the frame was normalized against.
    pub fn render(
        &mut self,
        samples: &SampleGrid,
    ) -> NormalizationRange {
        let range = normalize_range(samples);
        compose(samples, &range, &self.lut, &mut self.buffer);
        range
    }

    #[inline]
    pub const fn lut(&self) -> &GradientLut { &self.lut }

    /// Last rendered frame.
    #[inline]
    pub const fn buffer(&self) -> &PixelBuffer { &self.buffer }

    #[inline]
    pub fn buffer_mut(&mut self) -> &mut PixelBuffer { &mut self.buffer }
}

impl Default for Renderer {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
