//! Gradient lookup table.
//!
//! # Optimization: One Build, O(1) Lookups
//!
//! A frame has 20,480 pixels and the table has 256 entries, so interpolating
//! the gradient per pixel would redo the same work ~80 times over. The table
//! is built once at startup and stores each entry already in its big-endian
//! Rgb565 wire form, so a lookup is one clamp, one multiply and one two-byte
//! copy.
//!
//! Entry `i` holds the gradient color at `i / (N - 1)`: entry 0 is the
//! bottom of the gradient, entry `N - 1` the top.

use crate::config::LUT_SIZE;
use crate::gradient::{ColorGradient, clamp_unit, wire_bytes};

/// Precomputed Rgb565 wire bytes for `N` evenly spaced gradient positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GradientLut<const N: usize = LUT_SIZE> {
    entries: [[u8; 2]; N],
}

impl<const N: usize> GradientLut<N> {
    /// Bake `gradient` into a table of `N` entries.
    pub fn build<const P: usize>(gradient: &ColorGradient<P>) -> Self {
        const { assert!(N >= 2, "a lookup table needs at least two entries") };

        let last = (N - 1) as f32;
        let mut entries = [[0u8; 2]; N];
        for (i, entry) in entries.iter_mut().enumerate() {
            *entry = wire_bytes(gradient.rgb565(i as f32 / last));
        }
        Self { entries }
    }

    /// Wire bytes for a normalized value. Input is clamped to `[0, 1]`.
    #[inline]
    pub fn color_bytes(
        &self,
        normalized: f32,
    ) -> [u8; 2] {
        let index = (clamp_unit(normalized) * (N - 1) as f32) as usize;
        self.entries[index.min(N - 1)]
    }

    /// Entry at `index`, if in range.
    #[inline]
    pub fn entry(
        &self,
        index: usize,
    ) -> Option<[u8; 2]> {
        self.entries.get(index).copied()
    }

    /// All entries, lowest first.
    #[inline]
    pub const fn entries(&self) -> &[[u8; 2]; N] { &self.entries }

    /// Number of entries.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize { N }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_graphics::prelude::*;

    use super::*;
    use crate::gradient::{VIRIDIS, to_rgb565};

    fn unpack(bytes: [u8; 2]) -> (i32, i32, i32) {
        let raw = u16::from_be_bytes(bytes);
        (
            i32::from(raw >> 11),
            i32::from((raw >> 5) & 0x3F),
            i32::from(raw & 0x1F),
        )
    }

    #[test]
    fn test_size() {
        let lut = GradientLut::<256>::build(&VIRIDIS);
        assert_eq!(lut.len(), 256);
        assert_eq!(lut.entries().len(), 256);
        assert!(lut.entry(255).is_some());
        assert!(lut.entry(256).is_none());
    }

    #[test]
    fn test_endpoints() {
        let lut = GradientLut::<256>::build(&VIRIDIS);
        assert_eq!(lut.entry(0), Some(wire_bytes(VIRIDIS.rgb565(0.0))));
        assert_eq!(lut.entry(255), Some(wire_bytes(VIRIDIS.rgb565(1.0))));
        assert_eq!(lut.color_bytes(0.0), [0x40, 0x0A]);
        assert_eq!(lut.color_bytes(1.0), [0xFF, 0x24]);
    }

    #[test]
    fn test_clamps_input() {
        let lut = GradientLut::<256>::build(&VIRIDIS);
        assert_eq!(lut.color_bytes(-1.0), lut.color_bytes(0.0));
        assert_eq!(lut.color_bytes(2.0), lut.color_bytes(1.0));
        assert_eq!(lut.color_bytes(f32::NAN), lut.color_bytes(0.0));
    }

    #[test]
    fn test_index_rounds_down() {
        let lut = GradientLut::<256>::build(&VIRIDIS);
        // 0.999 * 255 = 254.7 -> entry 254
        assert_eq!(lut.color_bytes(0.999), lut.entries()[254]);
        assert_eq!(lut.color_bytes(0.5), lut.entries()[127]);
    }

    #[test]
    fn test_matches_direct_interpolation() {
        let lut = GradientLut::<256>::build(&VIRIDIS);
        for i in 0..=1000 {
            let v = i as f32 / 1000.0;
            let (lr, lg, lb) = unpack(lut.color_bytes(v));
            let (dr, dg, db) = unpack(wire_bytes(VIRIDIS.rgb565(v)));
            assert!((lr - dr).abs() <= 1, "red off at {v}");
            assert!((lg - dg).abs() <= 1, "green off at {v}");
            assert!((lb - db).abs() <= 1, "blue off at {v}");
        }
    }

    #[test]
    fn test_entries_match_wire_encoding() {
        let lut = GradientLut::<256>::build(&VIRIDIS);
        let color: Rgb565 = to_rgb565(VIRIDIS.sample(128.0 / 255.0));
        let bytes = lut.entries()[128];
        assert_eq!(u16::from_be_bytes(bytes) >> 11, u16::from(color.r()));
        assert_eq!((u16::from_be_bytes(bytes) >> 5) & 0x3F, u16::from(color.g()));
        assert_eq!(u16::from_be_bytes(bytes) & 0x1F, u16::from(color.b()));
    }

    #[test]
    fn test_small_table() {
        let lut = GradientLut::<2>::build(&VIRIDIS);
        assert_eq!(lut.color_bytes(0.49), [0x40, 0x0A]);
        assert_eq!(lut.color_bytes(1.0), [0xFF, 0x24]);
    }
}
