//! Display transport interface.
//!
//! [`DisplayTransport`] is how a finished frame leaves the renderer. At
//! startup the loop selects the full panel and pushes a black frame; after
//! that every frame is one contiguous full-panel write.
//!
//! ```text
//! set_window(0, 0, 127, 159)     CASET / RASET
//! blit(buffer, 0, 0, 128, 160)   CASET / RASET, RAMWR + 40,960 bytes
//! ```
//!
//! `blit` addresses its own region, so it never depends on an earlier
//! `set_window`.
//!
//! Coordinates are inclusive, in panel pixels. Pixel data is big-endian
//! Rgb565, row-major.

use crate::config::{BYTES_PER_PIXEL, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::error::{ConfigError, DisplayError};

/// Sink for composed frames.
pub trait DisplayTransport {
    /// Select the inclusive address window `(x0, y0)..=(x1, y1)`.
    fn set_window(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<(), DisplayError>;

    /// Write `buffer` into the `width` x `height` region at `(x, y)`.
    ///
    /// `buffer.len()` must equal `width * height * 2`.
    fn blit(
        &mut self,
        buffer: &[u8],
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    ) -> Result<(), DisplayError>;

    /// Turn the panel off and leave the bus idle.
    fn shutdown(&mut self) -> Result<(), DisplayError>;
}

impl<T: DisplayTransport + ?Sized> DisplayTransport for &mut T {
    fn set_window(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<(), DisplayError> {
        (**self).set_window(x0, y0, x1, y1)
    }

    fn blit(
        &mut self,
        buffer: &[u8],
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    ) -> Result<(), DisplayError> {
        (**self).blit(buffer, x, y, width, height)
    }

    fn shutdown(&mut self) -> Result<(), DisplayError> { (**self).shutdown() }
}

/// Check an inclusive window against the panel.
pub fn check_window(
    x0: u16,
    y0: u16,
    x1: u16,
    y1: u16,
) -> Result<(), DisplayError> {
    if x0 > x1 || y0 > y1 || usize::from(x1) >= DISPLAY_WIDTH || usize::from(y1) >= DISPLAY_HEIGHT {
        return Err(DisplayError::InvalidWindow);
    }
    Ok(())
}

/// Check a blit region against the panel and the buffer length.
///
/// A length mismatch is [`DisplayError::Config`]; a region off the panel is
/// [`DisplayError::InvalidWindow`].
pub fn check_blit(
    buffer: &[u8],
    x: u16,
    y: u16,
    width: u16,
    height: u16,
) -> Result<(), DisplayError> {
    if width == 0 || height == 0 {
        return Err(DisplayError::InvalidWindow);
    }
    let x_end = usize::from(x) + usize::from(width);
    let y_end = usize::from(y) + usize::from(height);
    if x_end > DISPLAY_WIDTH || y_end > DISPLAY_HEIGHT {
        return Err(DisplayError::InvalidWindow);
    }
    let expected = usize::from(width) * usize::from(height) * BYTES_PER_PIXEL;
    if buffer.len() != expected {
        return Err(ConfigError::BufferLength {
            expected,
            actual: buffer.len(),
        }
        .into());
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
