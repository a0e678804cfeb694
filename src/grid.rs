//! Sensor sample grid.
//!
//! One frame of calibrated temperatures in °C, row-major, top-left first.
//! The grid is a fixed-size array so a frame of the wrong size cannot reach
//! the renderer; [`SampleGrid::from_slice`] is the checked entry point for
//! data coming from elsewhere.

use crate::config::{SAMPLE_COUNT, SAMPLE_HEIGHT, SAMPLE_WIDTH};
use crate::error::ConfigError;

/// One sensor frame (`SAMPLE_WIDTH` x `SAMPLE_HEIGHT` readings).
#[derive(Clone, Debug, PartialEq)]
pub struct SampleGrid {
    samples: [f32; SAMPLE_COUNT],
}

impl SampleGrid {
    /// Create a grid with every reading at 0 °C.
    pub const fn new() -> Self { Self::filled(0.0) }

    /// Create a grid with every reading set to `value`.
    pub const fn filled(value: f32) -> Self {
        Self {
            samples: [value; SAMPLE_COUNT],
        }
    }

    /// Copy a frame from a slice.
    ///
    /// Rejects slices that do not hold exactly one frame, including empty ones.
    pub fn from_slice(samples: &[f32]) -> Result<Self, ConfigError> {
        if samples.len() != SAMPLE_COUNT {
            return Err(ConfigError::SampleCount {
                expected: SAMPLE_COUNT,
                actual: samples.len(),
            });
        }
        let mut grid = Self::new();
        grid.samples.copy_from_slice(samples);
        Ok(grid)
    }

    /// Build a grid from a function of `(x, y)`.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f32,
    {
        let mut grid = Self::new();
        for (i, sample) in grid.samples.iter_mut().enumerate() {
            *sample = f(i % SAMPLE_WIDTH, i / SAMPLE_WIDTH);
        }
        grid
    }

    /// All readings, row-major.
    #[inline]
    pub const fn as_slice(&self) -> &[f32] { &self.samples }

    /// Mutable access for sensor drivers writing a new frame in place.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] { &mut self.samples }

    /// Reading at column `x`, row `y`.
    #[inline]
    pub fn get(
        &self,
        x: usize,
        y: usize,
    ) -> Option<f32> {
        if x < SAMPLE_WIDTH && y < SAMPLE_HEIGHT {
            Some(self.samples[y * SAMPLE_WIDTH + x])
        } else {
            None
        }
    }

    /// Overwrite the reading at column `x`, row `y`. Out-of-range positions are ignored.
    #[inline]
    pub fn set(
        &mut self,
        x: usize,
        y: usize,
        value: f32,
    ) {
        if x < SAMPLE_WIDTH && y < SAMPLE_HEIGHT {
            self.samples[y * SAMPLE_WIDTH + x] = value;
        }
    }

    /// Iterate over sensor rows, top first.
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> { self.samples.chunks_exact(SAMPLE_WIDTH) }
}

impl Default for SampleGrid {
    fn default() -> Self { Self::new() }
}
