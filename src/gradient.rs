//! Color gradient engine.
//!
//! Maps a normalized value in `[0, 1]` to a color by linear interpolation
//! between evenly spaced control points. The renderer never calls this per
//! pixel; it bakes the gradient into a [`GradientLut`](crate::lut::GradientLut)
//! once at startup. The direct path stays public so the table can be checked
//! against it.
//!
//! # Interpolation
//!
//! With `n` control points the unit interval is split into `n - 1` equal
//! segments:
//!
//! ```text
//! segment = clamp(floor(v * (n - 1)), 0, n - 2)
//! t       = v * (n - 1) - segment
//! channel = lo + (hi - lo) * t        (truncated toward zero)
//! ```
//!
//! `t` is measured inside the clamped segment, so `v = 1.0` lands on the
//! last control point rather than wrapping back to the start of segment
//! `n - 2`.
//!
//! ## Rgb565 Wire Format
//!
//! Channels are reduced by dropping low bits (`r >> 3`, `g >> 2`, `b >> 3`),
//! packed as `RRRRRGGG GGGBBBBB` and sent high byte first. That is the
//! byte order the ST7735 expects after `COLMOD = 16 bpp`.

use embedded_graphics::pixelcolor::raw::{RawData, RawU16};
use embedded_graphics::pixelcolor::{Rgb565, Rgb888, RgbColor};

/// Number of control points in the Viridis table.
pub const VIRIDIS_POINTS: usize = 9;

/// Viridis, sampled at nine evenly spaced points from dark purple to yellow.
pub const VIRIDIS: ColorGradient<VIRIDIS_POINTS> = ColorGradient::new([
    Rgb888::new(68, 1, 84),
    Rgb888::new(71, 44, 122),
    Rgb888::new(59, 81, 139),
    Rgb888::new(44, 113, 142),
    Rgb888::new(33, 144, 141),
    Rgb888::new(39, 173, 129),
    Rgb888::new(92, 200, 99),
    Rgb888::new(170, 220, 50),
    Rgb888::new(253, 231, 37),
]);

/// A fixed table of evenly spaced control points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorGradient<const N: usize> {
    points: [Rgb888; N],
}

impl<const N: usize> ColorGradient<N> {
    const SEGMENTS: usize = N - 1;

    /// Create a gradient. Needs at least two control points.
    pub const fn new(points: [Rgb888; N]) -> Self {
        const { assert!(N >= 2, "a gradient needs at least two control points") };
        Self { points }
    }

    /// Control points, lowest first.
    #[inline]
    pub const fn points(&self) -> &[Rgb888; N] { &self.points }

    /// Interpolated color at `value`. Input is clamped to `[0, 1]`; NaN maps to 0.
    pub fn sample(
        &self,
        value: f32,
    ) -> Rgb888 {
        let scaled = clamp_unit(value) * Self::SEGMENTS as f32;
        // Non-negative, so truncation is floor
        let segment = (scaled as usize).min(Self::SEGMENTS - 1);
        let t = scaled - segment as f32;

        let lo = self.points[segment];
        let hi = self.points[segment + 1];
        Rgb888::new(
            lerp_channel(lo.r(), hi.r(), t),
            lerp_channel(lo.g(), hi.g(), t),
            lerp_channel(lo.b(), hi.b(), t),
        )
    }

    /// Interpolated color at `value`, reduced to Rgb565.
    #[inline]
    pub fn rgb565(
        &self,
        value: f32,
    ) -> Rgb565 {
        to_rgb565(self.sample(value))
    }
}

/// Reduce an 8-bit-per-channel color to Rgb565 by dropping the low bits.
///
/// `Rgb565::from(Rgb888)` in embedded-graphics rounds instead, which would
/// not match the panel's expected encoding of the gradient.
#[inline]
pub fn to_rgb565(color: Rgb888) -> Rgb565 { Rgb565::new(color.r() >> 3, color.g() >> 2, color.b() >> 3) }

/// Big-endian wire bytes of an Rgb565 color.
#[inline]
pub fn wire_bytes(color: Rgb565) -> [u8; 2] {
    let raw: RawU16 = color.into();
    raw.into_inner().to_be_bytes()
}

/// Clamp to `[0, 1]`. NaN maps to 0.
#[inline]
pub(crate) fn clamp_unit(value: f32) -> f32 {
    if value > 1.0 {
        1.0
    } else if value > 0.0 {
        value
    } else {
        0.0
    }
}

#[inline]
fn lerp_channel(
    lo: u8,
    hi: u8,
    t: f32,
) -> u8 {
    let lo = f32::from(lo);
    (lo + (f32::from(hi) - lo) * t) as u8
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viridis_endpoints() {
        assert_eq!(VIRIDIS.sample(0.0), Rgb888::new(68, 1, 84));
        assert_eq!(VIRIDIS.sample(1.0), Rgb888::new(253, 231, 37));
    }

    #[test]
    fn test_clamps_out_of_range() {
        assert_eq!(VIRIDIS.sample(-3.0), VIRIDIS.sample(0.0));
        assert_eq!(VIRIDIS.sample(7.5), VIRIDIS.sample(1.0));
        assert_eq!(VIRIDIS.sample(f32::NAN), VIRIDIS.sample(0.0));
    }

    #[test]
    fn test_segment_boundaries_hit_control_points() {
        for (i, point) in VIRIDIS.points().iter().enumerate() {
            let v = i as f32 / (VIRIDIS_POINTS - 1) as f32;
            assert_eq!(VIRIDIS.sample(v), *point, "control point {i}");
        }
    }

    #[test]
    fn test_first_segment_boundary() {
        assert_eq!(VIRIDIS.sample(1.0 / 8.0), Rgb888::new(71, 44, 122));
    }

    #[test]
    fn test_midpoint_interpolation() {
        // Halfway through segment 0: (68,1,84) -> (71,44,122)
        // 68 + 3 * 0.5 = 69.5 -> 69, 1 + 43 * 0.5 = 22.5 -> 22, 84 + 38 * 0.5 = 103
        assert_eq!(VIRIDIS.sample(1.0 / 16.0), Rgb888::new(69, 22, 103));
    }

    #[test]
    fn test_decreasing_channel_interpolation() {
        // Halfway through segment 7: (170,220,50) -> (253,231,37)
        // 170 + 83 * 0.5 = 211.5 -> 211, 220 + 11 * 0.5 = 225.5 -> 225, 50 - 6.5 = 43.5 -> 43
        assert_eq!(VIRIDIS.sample(15.0 / 16.0), Rgb888::new(211, 225, 43));
    }

    #[test]
    fn test_green_rises_monotonically() {
        let mut prev = 0u8;
        for i in 0..=100 {
            let g = VIRIDIS.sample(i as f32 / 100.0).g();
            assert!(g >= prev, "green dropped at {i}");
            prev = g;
        }
    }

    #[test]
    fn test_rgb565_packing() {
        let color = to_rgb565(Rgb888::new(68, 1, 84));
        // r5 = 8, g6 = 0, b5 = 10 -> 0b01000_000000_01010 = 0x400A
        assert_eq!(wire_bytes(color), [0x40, 0x0A]);

        let color = to_rgb565(Rgb888::new(253, 231, 37));
        // r5 = 31, g6 = 57, b5 = 4 -> 0xFF24
        assert_eq!(wire_bytes(color), [0xFF, 0x24]);
    }

    #[test]
    fn test_truncating_reduction() {
        // Low bits are dropped, not rounded
        assert_eq!(to_rgb565(Rgb888::new(15, 7, 15)), Rgb565::new(1, 1, 1));
        assert_eq!(to_rgb565(Rgb888::new(7, 3, 7)), Rgb565::new(0, 0, 0));
    }

    #[test]
    fn test_clamp_unit() {
        assert_eq!(clamp_unit(-0.1), 0.0);
        assert_eq!(clamp_unit(0.25), 0.25);
        assert_eq!(clamp_unit(1.1), 1.0);
        assert_eq!(clamp_unit(f32::NAN), 0.0);
        assert_eq!(clamp_unit(f32::INFINITY), 1.0);
    }
}
