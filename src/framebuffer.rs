//! Display-sized RGB565 pixel buffer.
//!
//! The buffer holds one full frame in exactly the byte layout the display
//! expects on the wire: row-major, two bytes per pixel, high byte first. It
//! is allocated once and overwritten in place every frame, so the whole
//! frame goes to the panel as one contiguous transfer.
//!
//! [`PixelBuffer`] also implements `DrawTarget`, which is how the firmware
//! clears the screen at startup.

use core::slice::ChunksExactMut;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::config::{BYTES_PER_PIXEL, DISPLAY_HEIGHT, DISPLAY_WIDTH, PIXEL_BUFFER_LEN, ROW_BYTES};
use crate::gradient::wire_bytes;

/// One display frame of big-endian Rgb565 pixels.
#[derive(Clone)]
pub struct PixelBuffer {
    bytes: [u8; PIXEL_BUFFER_LEN],
}

impl PixelBuffer {
    /// Create a zeroed (black) buffer.
    pub const fn new() -> Self {
        Self {
            bytes: [0u8; PIXEL_BUFFER_LEN],
        }
    }

    /// The whole frame, ready to send.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8] { &self.bytes }

    /// Mutable access to the raw frame bytes.
    #[inline]
    pub fn as_mut_bytes(&mut self) -> &mut [u8] { &mut self.bytes }

    /// Mutable display rows, top first. Each row is `ROW_BYTES` long.
    #[inline]
    pub fn rows_mut(&mut self) -> ChunksExactMut<'_, u8> { self.bytes.chunks_exact_mut(ROW_BYTES) }

    /// Bytes of display row `y`.
    pub fn row(
        &self,
        y: usize,
    ) -> Option<&[u8]> {
        if y < DISPLAY_HEIGHT {
            Some(&self.bytes[y * ROW_BYTES..(y + 1) * ROW_BYTES])
        } else {
            None
        }
    }

    /// Wire bytes of the pixel at `(x, y)`.
    pub fn pixel(
        &self,
        x: usize,
        y: usize,
    ) -> Option<[u8; 2]> {
        if x < DISPLAY_WIDTH && y < DISPLAY_HEIGHT {
            let idx = (y * DISPLAY_WIDTH + x) * BYTES_PER_PIXEL;
            Some([self.bytes[idx], self.bytes[idx + 1]])
        } else {
            None
        }
    }

    /// Fill the whole frame with one color.
    ///
    /// Writes two pixels per 4-byte chunk; the buffer length is a multiple of 4.
    pub fn fill(
        &mut self,
        color: Rgb565,
    ) {
        let [hi, lo] = wire_bytes(color);
        let word = [hi, lo, hi, lo];
        for chunk in self.bytes.chunks_exact_mut(4) {
            chunk.copy_from_slice(&word);
        }
    }

    /// Set a pixel in the buffer. Out-of-bounds points are ignored.
    #[inline]
    fn set_pixel(
        &mut self,
        x: i32,
        y: i32,
        color: Rgb565,
    ) {
        if x >= 0 && x < DISPLAY_WIDTH as i32 && y >= 0 && y < DISPLAY_HEIGHT as i32 {
            let idx = (y as usize * DISPLAY_WIDTH + x as usize) * BYTES_PER_PIXEL;
            let bytes = wire_bytes(color);
            self.bytes[idx] = bytes[0];
            self.bytes[idx + 1] = bytes[1];
        }
    }
}

impl Default for PixelBuffer {
    fn default() -> Self { Self::new() }
}

impl OriginDimensions for PixelBuffer {
    fn size(&self) -> Size { Size::new(DISPLAY_WIDTH as u32, DISPLAY_HEIGHT as u32) }
}

impl DrawTarget for PixelBuffer {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    use super::*;

    #[test]
    fn test_new_is_black() {
        let buffer = PixelBuffer::new();
        assert_eq!(buffer.as_bytes().len(), 40_960);
        assert!(buffer.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_clear_fills_every_pixel() {
        let mut buffer = PixelBuffer::new();
        buffer.clear(Rgb565::RED).unwrap();
        // Red is 0xF800 on the wire
        for y in 0..DISPLAY_HEIGHT {
            for x in 0..DISPLAY_WIDTH {
                assert_eq!(buffer.pixel(x, y), Some([0xF8, 0x00]));
            }
        }
    }

    #[test]
    fn test_draw_pixel_big_endian() {
        let mut buffer = PixelBuffer::new();
        Pixel(Point::new(3, 2), Rgb565::new(0b00001, 0b000010, 0b00011))
            .draw(&mut buffer)
            .unwrap();
        // 00001_000010_00011 = 0x0843
        assert_eq!(buffer.pixel(3, 2), Some([0x08, 0x43]));
        let idx = (2 * DISPLAY_WIDTH + 3) * 2;
        assert_eq!(&buffer.as_bytes()[idx..idx + 2], &[0x08, 0x43]);
    }

    #[test]
    fn test_draw_clips_out_of_bounds() {
        let mut buffer = PixelBuffer::new();
        Rectangle::new(Point::new(-10, -10), Size::new(500, 5))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::WHITE))
            .draw(&mut buffer)
            .unwrap();
        assert!(buffer.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_rows() {
        let mut buffer = PixelBuffer::new();
        assert_eq!(buffer.rows_mut().count(), DISPLAY_HEIGHT);
        assert_eq!(buffer.row(0).map(<[u8]>::len), Some(ROW_BYTES));
        assert!(buffer.row(DISPLAY_HEIGHT).is_none());
        assert!(buffer.pixel(DISPLAY_WIDTH, 0).is_none());
    }
}
