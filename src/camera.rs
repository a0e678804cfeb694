//! MLX90640 thermal camera on I2C0.
//!
//! Wraps the `mlx9064x` driver as a [`ThermalSensor`]. The camera updates
//! one chess-pattern subpage at a time; the driver folds each new subpage
//! into the image it writes, so every successful read hands back a complete
//! 32x24 frame of calibrated temperatures in °C.

use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use mlx9064x::{FrameRate, Mlx90640Driver};

use crate::config::SENSOR_REFRESH_HZ;
use crate::error::SensorError;
use crate::grid::SampleGrid;
use crate::sensor::ThermalSensor;

/// Blocking I2C bus the camera sits on.
pub type CameraBus = I2c<'static, I2C0, Blocking>;

/// Why the camera could not be brought up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum CameraInitError {
    /// Reading the calibration EEPROM failed.
    Bus,
    /// The configured refresh rate is not one the camera supports.
    FrameRate,
}

pub struct Mlx90640Sensor {
    camera: Mlx90640Driver<CameraBus>,
}

impl Mlx90640Sensor {
    /// Load calibration from the camera at `address` and set its refresh rate.
    pub fn new(
        bus: CameraBus,
        address: u8,
    ) -> Result<Self, CameraInitError> {
        let mut camera = Mlx90640Driver::new(bus, address).map_err(|_| CameraInitError::Bus)?;
        let frame_rate = FrameRate::try_from(SENSOR_REFRESH_HZ).map_err(|_| CameraInitError::FrameRate)?;
        camera
            .set_frame_rate(frame_rate)
            .map_err(|_| CameraInitError::Bus)?;
        Ok(Self { camera })
    }
}

impl ThermalSensor for Mlx90640Sensor {
    fn read_frame(
        &mut self,
        dst: &mut SampleGrid,
    ) -> Result<(), SensorError> {
        match self.camera.generate_image_if_ready(dst.as_mut_slice()) {
            Ok(true) => Ok(()),
            Ok(false) => Err(SensorError::NotReady),
            Err(_) => Err(SensorError::BusTimeout),
        }
    }
}
