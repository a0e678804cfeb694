//! Application configuration.
//!
//! - `frame`: Sensor grid, display and lookup-table dimensions
//! - `board`: Bus clocks, addresses and loop pacing for the Pico 2 build
//!
//! Everything here is a compile-time constant. Dimensions are not
//! reconfigurable at runtime; mismatches are rejected by the assertions in
//! [`frame`] before the firmware ever links.

pub mod board;
pub mod frame;

// Re-export frame dimensions at config level for convenience
pub use frame::{
    BYTES_PER_PIXEL,
    DISPLAY_HEIGHT,
    DISPLAY_WIDTH,
    LUT_SIZE,
    PIXEL_BUFFER_LEN,
    PIXEL_COUNT,
    ROW_BYTES,
    SAMPLE_COUNT,
    SAMPLE_HEIGHT,
    SAMPLE_WIDTH,
};
// Re-export board settings at config level for convenience
pub use board::{
    DISPLAY_SPI_FREQUENCY,
    FRAME_INTERVAL_MS,
    NOT_READY_POLL_MS,
    PROFILE_LOG_INTERVAL_SECS,
    SENSOR_I2C_ADDRESS,
    SENSOR_I2C_FREQUENCY,
    SENSOR_REFRESH_HZ,
    STOCK_CPU_HZ,
    STOP_DEBOUNCE_MS,
};
