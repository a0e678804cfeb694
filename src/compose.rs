//! Frame compositor: nearest-neighbor upscale plus colorize.
//!
//! Every display pixel `(x, y)` takes the reading of the sensor cell
//!
//! ```text
//! fx = floor(x * SAMPLE_WIDTH / DISPLAY_WIDTH)     (x_scale = 0.25)
//! fy = floor(y * SAMPLE_HEIGHT / DISPLAY_HEIGHT)   (y_scale = 0.15)
//! ```
//!
//! The vertical ratio is not an integer, so sensor rows are repeated 6 or 7
//! times on screen. That uneven repetition is the intended mapping.
//!
//! # Performance
//!
//! - Scale ratios are computed once per call
//! - The source row (`fy * SAMPLE_WIDTH`) is resolved once per display row
//!   and sliced, so the inner loop only computes `fx`
//! - Colors come from the prebuilt [`GradientLut`]; no interpolation per pixel
//! - Output is written straight into the wire-format buffer, every byte
//!   exactly once

use crate::config::{BYTES_PER_PIXEL, DISPLAY_HEIGHT, DISPLAY_WIDTH, SAMPLE_HEIGHT, SAMPLE_WIDTH};
use crate::framebuffer::PixelBuffer;
use crate::grid::SampleGrid;
use crate::lut::GradientLut;
use crate::normalize::NormalizationRange;

/// Upscale `samples` onto `out`, coloring each pixel through `lut`.
///
/// Overwrites all of `out`.
pub fn compose<const N: usize>(
    samples: &SampleGrid,
    range: &NormalizationRange,
    lut: &GradientLut<N>,
    out: &mut PixelBuffer,
) {
    let x_scale = SAMPLE_WIDTH as f32 / DISPLAY_WIDTH as f32;
    let y_scale = SAMPLE_HEIGHT as f32 / DISPLAY_HEIGHT as f32;
    let samples = samples.as_slice();

    for (y, row) in out.rows_mut().enumerate() {
        let fy = ((y as f32 * y_scale) as usize).min(SAMPLE_HEIGHT - 1);
        let fy_offset = fy * SAMPLE_WIDTH;
        let source_row = &samples[fy_offset..fy_offset + SAMPLE_WIDTH];

        for (x, pixel) in row.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
            let fx = ((x as f32 * x_scale) as usize).min(SAMPLE_WIDTH - 1);
            let normalized = range.normalize(source_row[fx]);
            pixel.copy_from_slice(&lut.color_bytes(normalized));
        }
    }
}

/// Sensor row sampled by display row `y`.
#[inline]
pub fn source_row(y: usize) -> usize {
    let y_scale = SAMPLE_HEIGHT as f32 / DISPLAY_HEIGHT as f32;
    ((y as f32 * y_scale) as usize).min(SAMPLE_HEIGHT - 1)
}

/// Sensor column sampled by display column `x`.
#[inline]
pub fn source_column(x: usize) -> usize {
    let x_scale = SAMPLE_WIDTH as f32 / DISPLAY_WIDTH as f32;
    ((x as f32 * x_scale) as usize).min(SAMPLE_WIDTH - 1)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LUT_SIZE, SAMPLE_COUNT};
    use crate::gradient::VIRIDIS;
    use crate::normalize::normalize_range;

    fn viridis_lut() -> GradientLut<LUT_SIZE> { GradientLut::build(&VIRIDIS) }

    fn render(samples: &SampleGrid) -> PixelBuffer {
        let lut = viridis_lut();
        let mut out = PixelBuffer::new();
        compose(samples, &normalize_range(samples), &lut, &mut out);
        out
    }

    #[test]
    fn test_flat_frame_is_bottom_color() {
        let lut = viridis_lut();
        let out = render(&SampleGrid::filled(5.0));
        let bottom = lut.color_bytes(0.0);
        for pixel in out.as_bytes().chunks_exact(2) {
            assert_eq!(pixel, bottom);
        }
    }

    #[test]
    fn test_overwrites_every_byte() {
        // Poison with a pattern no gradient entry produces, then check it is gone
        let lut = viridis_lut();
        assert!(lut.entries().iter().flatten().all(|&b| b != 0xAB));

        let grid = SampleGrid::from_fn(|x, y| (x * 7 + y * 13) as f32);
        let mut out = PixelBuffer::new();
        out.as_mut_bytes().fill(0xAB);
        compose(&grid, &normalize_range(&grid), &lut, &mut out);

        assert!(out.as_bytes().iter().all(|&b| b != 0xAB));
    }

    #[test]
    fn test_idempotent() {
        let grid = SampleGrid::from_fn(|x, y| 20.0 + (x as f32 * 0.3) - (y as f32 * 0.2));
        let first = render(&grid);
        let second = render(&grid);
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_linear_ramp_corners() {
        let lut = viridis_lut();
        let last = (SAMPLE_COUNT - 1) as f32;
        let grid = SampleGrid::from_fn(|x, y| (y * SAMPLE_WIDTH + x) as f32 / last);
        let out = render(&grid);

        assert_eq!(out.pixel(0, 0), lut.entry(0));
        assert_eq!(out.pixel(DISPLAY_WIDTH - 1, DISPLAY_HEIGHT - 1), lut.entry(LUT_SIZE - 1));
    }

    #[test]
    fn test_column_mapping_is_4x() {
        for x in 0..DISPLAY_WIDTH {
            assert_eq!(source_column(x), x / 4);
        }
    }

    #[test]
    fn test_row_mapping_matches_integer_floor() {
        for y in 0..DISPLAY_HEIGHT {
            assert_eq!(source_row(y), y * SAMPLE_HEIGHT / DISPLAY_HEIGHT, "display row {y}");
        }
    }

    #[test]
    fn test_rows_repeat_unevenly() {
        let mut counts = [0usize; SAMPLE_HEIGHT];
        for y in 0..DISPLAY_HEIGHT {
            counts[source_row(y)] += 1;
        }
        assert!(counts.iter().all(|&c| c == 6 || c == 7));
        assert_eq!(counts.iter().sum::<usize>(), DISPLAY_HEIGHT);
        // Row 0 covers display rows 0..=6
        assert_eq!(counts[0], 7);
    }

    #[test]
    fn test_pixels_follow_source_cells() {
        let lut = viridis_lut();
        // One hot cell at (5, 3), everything else cold
        let mut grid = SampleGrid::filled(20.0);
        grid.set(5, 3, 40.0);
        let out = render(&grid);

        let hot = lut.color_bytes(1.0);
        let cold = lut.color_bytes(0.0);
        for y in 0..DISPLAY_HEIGHT {
            for x in 0..DISPLAY_WIDTH {
                let expected = if source_column(x) == 5 && source_row(y) == 3 { hot } else { cold };
                assert_eq!(out.pixel(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
        // 4 columns wide; sensor row 3 spans display rows 20..=26
        assert_eq!(out.pixel(20, 20), Some(hot));
        assert_eq!(out.pixel(23, 26), Some(hot));
        assert_eq!(out.pixel(24, 20), Some(cold));
        assert_eq!(out.pixel(20, 27), Some(cold));
    }
}
