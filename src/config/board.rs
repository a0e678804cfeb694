//! Board-level settings for the Raspberry Pi Pico 2 build.
//!
//! Wiring (RP2350):
//! - MLX90640: I2C0, SDA GPIO20, SCL GPIO21
//! - ST7735: SPI0, CLK GPIO18, MOSI GPIO19, CS GPIO17, DC GPIO16, RST GPIO15
//! - Stop button: GPIO14 to ground (internal pull-up)
//! - Heartbeat LED: GPIO25 (on-board)

// =============================================================================
// Clocks
// =============================================================================

/// Stock RP2350 system clock.
pub const STOCK_CPU_HZ: u32 = 150_000_000;

/// Requested SPI clock for the display.
/// The RP2350 divides from clk_peri, so the actual rate may be lower.
pub const DISPLAY_SPI_FREQUENCY: u32 = 40_000_000;

/// I2C clock for the thermal sensor (fast mode).
pub const SENSOR_I2C_FREQUENCY: u32 = 400_000;

// =============================================================================
// Sensor
// =============================================================================

/// Factory default MLX90640 address.
pub const SENSOR_I2C_ADDRESS: u8 = 0x33;

/// Sensor refresh rate. At 4 Hz a full frame (both chess subpages) is
/// available every 500 ms.
pub const SENSOR_REFRESH_HZ: u8 = 4;

// =============================================================================
// Render Loop Pacing
// =============================================================================

/// Pause after each rendered frame.
pub const FRAME_INTERVAL_MS: u64 = 100;

/// Pause before polling again when the sensor has no new frame yet.
pub const NOT_READY_POLL_MS: u64 = 10;

/// Stop button must still read low this long after the falling edge.
pub const STOP_DEBOUNCE_MS: u64 = 50;

/// Interval between `PROFILE:` log lines.
pub const PROFILE_LOG_INTERVAL_SECS: u64 = 2;
