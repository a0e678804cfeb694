//! Frame geometry constants.
//!
//! The renderer is built for exactly one source and one destination
//! resolution: the MLX90640's 32x24 sensor grid and a 128x160 ST7735 panel
//! in portrait orientation. Derived sizes are computed here at compile time
//! so no per-frame arithmetic is spent on them.
//!
//! # Scale Ratios
//!
//! | Axis | Source | Display | Ratio |
//! |------|--------|---------|-------|
//! | X | 32 | 128 | 4x (integer) |
//! | Y | 24 | 160 | ~6.67x (non-integer) |
//!
//! Because the vertical ratio is not an integer, nearest-neighbor sampling
//! gives some sensor rows 7 display rows and others 6.

// =============================================================================
// Sensor Grid
// =============================================================================

/// Sensor columns (MLX90640).
pub const SAMPLE_WIDTH: usize = 32;

/// Sensor rows (MLX90640).
pub const SAMPLE_HEIGHT: usize = 24;

/// Readings per sensor frame.
pub const SAMPLE_COUNT: usize = SAMPLE_WIDTH * SAMPLE_HEIGHT;

// =============================================================================
// Display
// =============================================================================

/// Display width in pixels (ST7735, portrait).
pub const DISPLAY_WIDTH: usize = 128;

/// Display height in pixels.
pub const DISPLAY_HEIGHT: usize = 160;

/// Pixels per display frame.
pub const PIXEL_COUNT: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT;

/// RGB565 is two bytes per pixel on the wire.
pub const BYTES_PER_PIXEL: usize = 2;

/// Bytes in one display row.
pub const ROW_BYTES: usize = DISPLAY_WIDTH * BYTES_PER_PIXEL;

/// Size of the full-screen pixel buffer (40,960 bytes).
pub const PIXEL_BUFFER_LEN: usize = PIXEL_COUNT * BYTES_PER_PIXEL;

// =============================================================================
// Color Lookup
// =============================================================================

/// Entries in the gradient lookup table.
pub const LUT_SIZE: usize = 256;

// =============================================================================
// Compile-time Checks
// =============================================================================

const _: () = assert!(SAMPLE_COUNT > 0, "sensor grid must not be empty");
const _: () = assert!(DISPLAY_WIDTH >= SAMPLE_WIDTH, "renderer only upscales horizontally");
const _: () = assert!(DISPLAY_HEIGHT >= SAMPLE_HEIGHT, "renderer only upscales vertically");
const _: () = assert!(DISPLAY_WIDTH <= u16::MAX as usize && DISPLAY_HEIGHT <= u16::MAX as usize);
const _: () = assert!(PIXEL_BUFFER_LEN % 4 == 0, "buffer fill writes two pixels at a time");
const _: () = assert!(LUT_SIZE >= 2);
