//! Bus configuration for the ST7735 display and the MLX90640 camera.
//!
//! Pin mapping:
//! - Display DC: GPIO16
//! - Display CS: GPIO17
//! - Display CLK: GPIO18 (SPI0 CLK)
//! - Display MOSI: GPIO19 (SPI0 TX)
//! - Display RST: GPIO15
//! - Camera SDA: GPIO20 (I2C0)
//! - Camera SCL: GPIO21 (I2C0)

use embassy_rp::i2c::Config as I2cConfig;
use embassy_rp::spi::Config as SpiConfig;

use crate::config::{DISPLAY_SPI_FREQUENCY, SENSOR_I2C_FREQUENCY};

/// SPI configuration for the ST7735 display.
pub fn display_spi_config() -> SpiConfig {
    let mut config = SpiConfig::default();
    config.frequency = DISPLAY_SPI_FREQUENCY;
    config
}

/// I2C configuration for the MLX90640 (fast mode).
pub fn sensor_i2c_config() -> I2cConfig {
    let mut config = I2cConfig::default();
    config.frequency = SENSOR_I2C_FREQUENCY;
    config
}
