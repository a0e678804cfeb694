//! Frame normalizer.
//!
//! Each frame is stretched to the full gradient: the coldest reading maps to
//! 0.0 and the hottest to 1.0. A thermally flat frame (every reading equal)
//! has no range to stretch; it keeps `inv_range = 1.0`, so every pixel
//! normalizes to 0.0 and the frame renders in the bottom gradient color.
//!
//! The scale is always finite and positive. A spread narrower than
//! [`MIN_RANGE`] is widened to it, and a spread too wide for `f32` (readings
//! near `±f32::MAX`) is computed in `f64`.

use crate::gradient::clamp_unit;
use crate::grid::SampleGrid;

/// Narrowest spread the scale is computed over.
pub const MIN_RANGE: f32 = f32::MIN_POSITIVE;

/// Min/max of one frame and the precomputed scale `1 / (max - min)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct NormalizationRange {
    /// Coldest finite reading (°C).
    pub min: f32,
    /// Hottest finite reading (°C).
    pub max: f32,
    /// `1 / max(max - min, MIN_RANGE)`, or `1.0` for a flat frame.
    pub inv_range: f32,
}

impl NormalizationRange {
    /// Range covering `min..=max`.
    pub fn from_bounds(
        min: f32,
        max: f32,
    ) -> Self {
        let range = max - min;
        let inv_range = if range.is_finite() && range > 0.0 {
            1.0 / range.max(MIN_RANGE)
        } else if range > 0.0 {
            // max - min overflowed f32
            (1.0 / (f64::from(max) - f64::from(min))) as f32
        } else {
            1.0
        };
        Self { min, max, inv_range }
    }

    /// Whether the frame had no temperature spread.
    #[inline]
    pub fn is_flat(&self) -> bool { self.max <= self.min }

    /// Position of `value` within the range, clamped to `[0, 1]`. NaN maps to 0.
    #[inline]
    pub fn normalize(
        &self,
        value: f32,
    ) -> f32 {
        clamp_unit((value - self.min) * self.inv_range)
    }
}

/// Scan a frame once for its coldest and hottest readings.
///
/// Non-finite readings (a dead pixel reporting NaN) are skipped. A frame
/// with no finite reading at all is treated as flat at 0 °C.
pub fn normalize_range(samples: &SampleGrid) -> NormalizationRange {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;

    for &value in samples.as_slice() {
        if !value.is_finite() {
            continue;
        }
        if value < min {
            min = value;
        }
        if value > max {
            max = value;
        }
    }

    if min > max {
        return NormalizationRange::from_bounds(0.0, 0.0);
    }
    NormalizationRange::from_bounds(min, max)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SAMPLE_COUNT;

    #[test]
    fn test_flat_frame() {
        let range = normalize_range(&SampleGrid::filled(5.0));
        assert_eq!(range.min, 5.0);
        assert_eq!(range.max, 5.0);
        assert_eq!(range.inv_range, 1.0);
        assert!(range.is_flat());
        assert_eq!(range.normalize(5.0), 0.0);
    }

    #[test]
    fn test_min_max() {
        let grid = SampleGrid::from_fn(|x, y| 20.0 + (x + y) as f32);
        let range = normalize_range(&grid);
        assert_eq!(range.min, 20.0);
        assert_eq!(range.max, 20.0 + 31.0 + 23.0);
        assert!(!range.is_flat());
        assert_eq!(range.inv_range, 1.0 / 54.0);
    }

    #[test]
    fn test_normalize_maps_extremes() {
        let range = NormalizationRange::from_bounds(20.0, 30.0);
        assert_eq!(range.normalize(20.0), 0.0);
        assert_eq!(range.normalize(25.0), 0.5);
        assert_eq!(range.normalize(30.0), 1.0);
    }

    #[test]
    fn test_normalize_clamps() {
        let range = NormalizationRange::from_bounds(20.0, 30.0);
        assert_eq!(range.normalize(10.0), 0.0);
        assert_eq!(range.normalize(45.0), 1.0);
        assert_eq!(range.normalize(f32::NAN), 0.0);
    }

    #[test]
    fn test_negative_temperatures() {
        let grid = SampleGrid::from_fn(|x, _| -40.0 + x as f32);
        let range = normalize_range(&grid);
        assert_eq!(range.min, -40.0);
        assert_eq!(range.max, -9.0);
    }

    #[test]
    fn test_skips_non_finite() {
        let mut grid = SampleGrid::filled(21.0);
        grid.set(0, 0, f32::NAN);
        grid.set(1, 0, f32::INFINITY);
        grid.set(2, 0, 35.0);
        let range = normalize_range(&grid);
        assert_eq!(range.min, 21.0);
        assert_eq!(range.max, 35.0);
    }

    #[test]
    fn test_all_non_finite_is_flat() {
        let data = [f32::NAN; SAMPLE_COUNT];
        let grid = SampleGrid::from_slice(&data).unwrap();
        let range = normalize_range(&grid);
        assert!(range.is_flat());
        assert_eq!(range.inv_range, 1.0);
    }

    #[test]
    fn test_tiny_range_scale_is_finite() {
        let mut grid = SampleGrid::filled(0.0);
        grid.set(3, 4, 1e-39);
        let range = normalize_range(&grid);
        assert!(!range.is_flat());
        assert!(range.inv_range.is_finite());
        assert_eq!(range.inv_range, 1.0 / MIN_RANGE);
        assert_eq!(range.normalize(0.0), 0.0);

        let near = NormalizationRange::from_bounds(21.0, 21.0 + f32::EPSILON * 16.0);
        assert!(near.inv_range.is_finite());
        assert_eq!(near.normalize(near.max), 1.0);
    }

    #[test]
    fn test_overflowing_range_keeps_spread() {
        let range = NormalizationRange::from_bounds(-3e38, 3e38);
        assert!(range.inv_range > 0.0);
        assert!(range.inv_range.is_finite());
        assert_eq!(range.normalize(-3e38), 0.0);
        assert_eq!(range.normalize(3e38), 1.0);
        let mid = range.normalize(0.0);
        assert!((mid - 0.5).abs() < 0.01, "mid = {mid}");
    }

    #[test]
    fn test_does_not_mutate_grid() {
        let grid = SampleGrid::from_fn(|x, y| (x * y) as f32);
        let copy = grid.clone();
        normalize_range(&grid);
        assert_eq!(grid, copy);
    }
}
