//! Thermal Viewer Firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Shows a live false-color image from an MLX90640 thermal camera on a
//! 128x160 ST7735 display.
//!
//! # Architecture
//!
//! One render loop owns the camera, the display and the frame buffer:
//! - Acquire a 32x24 frame over I2C (skipped while the camera has no new data)
//! - Normalize and compose it into the 40 KB Rgb565 buffer
//! - Blit the buffer to the panel in one blocking SPI transfer
//! - Sleep 100 ms
//!
//! A second task watches the stop button. When it fires, the loop turns the
//! display off between frames and parks.
//!
//! # Features
//!
//! - **demo**: Render a synthetic moving heat source instead of the camera
//! - **cpu250**: Run the core at 250 MHz instead of the stock 150 MHz
//!
//! On any target other than ARM this file builds to an empty binary so the
//! library's integration tests can run on the host.

#![cfg_attr(target_arch = "arm", no_std)]
#![cfg_attr(target_arch = "arm", no_main)]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// Modules only used in the binary (not testable on host)
#[cfg(target_arch = "arm")]
mod bus;
#[cfg(target_arch = "arm")]
mod camera;
#[cfg(target_arch = "arm")]
mod st7735;
#[cfg(target_arch = "arm")]
mod stop;

// Re-export testable modules from library for local use
// (These are defined in lib.rs with host-testable code)
#[cfg(target_arch = "arm")]
mod config {
    pub use thermal_viewer::config::*;
}
#[cfg(target_arch = "arm")]
mod error {
    pub use thermal_viewer::error::*;
}
#[cfg(target_arch = "arm")]
mod grid {
    pub use thermal_viewer::grid::*;
}
#[cfg(target_arch = "arm")]
mod sensor {
    pub use thermal_viewer::sensor::*;
}
#[cfg(target_arch = "arm")]
mod transport {
    pub use thermal_viewer::transport::*;
}

#[cfg(target_arch = "arm")]
use {defmt_rtt as _, panic_probe as _};

// Program metadata for `picotool info`
#[cfg(target_arch = "arm")]
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"thermal-viewer"),
    embassy_rp::binary_info::rp_program_description!(c"MLX90640 thermal camera viewer on ST7735 display"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

/// Idle forever. Used after shutdown and on fatal init errors.
#[cfg(target_arch = "arm")]
async fn park() -> ! {
    loop {
        embassy_time::Timer::after_secs(1).await;
    }
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[cfg(target_arch = "arm")]
#[embassy_executor::main]
async fn main(spawner: embassy_executor::Spawner) {
    use defmt::{debug, error, info, warn};
    use embassy_rp::gpio::{Input, Level, Output, Pull};
    use embassy_rp::spi::Spi;
    use embassy_time::{Duration, Instant, Timer};
    use static_cell::StaticCell;
    use thermal_viewer::profiling::{FrameStats, cycles};
    use thermal_viewer::{FrameDriver, Renderer};

    use crate::config::{FRAME_INTERVAL_MS, NOT_READY_POLL_MS, PROFILE_LOG_INTERVAL_SECS, STOCK_CPU_HZ};
    use crate::bus::display_spi_config;
    use crate::error::{DisplayError, FrameError, SensorError};
    use crate::st7735::St7735;
    use crate::stop::{STOP_SIGNAL, stop_button_task};

    info!("Thermal viewer starting...");

    // cpu250: 250 MHz @ 1.10V
    #[cfg(feature = "cpu250")]
    let p = {
        use embassy_rp::clocks::{ClockConfig, CoreVoltage};
        use embassy_rp::config::Config;

        const FREQ_HZ: u32 = 250_000_000;
        const VOLTAGE: CoreVoltage = CoreVoltage::V1_10;

        let mut config = Config::default();
        config.clocks = ClockConfig::system_freq(FREQ_HZ).expect("Invalid overclock frequency");
        config.clocks.core_voltage = VOLTAGE;
        info!("Overclock: 250 MHz @ 1.10V");
        embassy_rp::init(config)
    };

    #[cfg(not(feature = "cpu250"))]
    let p = embassy_rp::init(Default::default());

    // Initialize DWT cycle counter for per-stage frame timing
    let cpu_freq_hz = if cfg!(feature = "cpu250") { 250_000_000 } else { STOCK_CPU_HZ };
    cycles::init(cpu_freq_hz);
    info!("DWT cycle counter initialized at {} MHz", cpu_freq_hz / 1_000_000);

    // On-board LED (heartbeat)
    let mut led = Output::new(p.PIN_25, Level::Low);

    // Display: CS=17, DC=16, CLK=18, MOSI=19, RST=15
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let rst = Output::new(p.PIN_15, Level::High);

    // Blocking SPI, TX only (the panel has no MISO)
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, display_spi_config());

    let mut display = St7735::new(spi, dc, cs, rst);
    if let Err(err) = display.init().await {
        error!("Display init failed: {}", err);
        park().await;
    }
    info!("Display initialized");

    // Gradient table and frame buffer live in a static (40 KB buffer)
    static RENDERER: StaticCell<Renderer> = StaticCell::new();
    let renderer: &'static mut Renderer = RENDERER.init_with(Renderer::new);
    info!("Gradient table built ({} entries)", renderer.lut().len());

    #[cfg(feature = "demo")]
    let sensor = {
        info!("Demo mode: synthetic heat source");
        thermal_viewer::SyntheticSensor::new()
    };

    // Camera: SDA=20, SCL=21
    #[cfg(not(feature = "demo"))]
    let sensor = {
        use embassy_rp::i2c::I2c;

        use crate::camera::Mlx90640Sensor;
        use crate::config::SENSOR_I2C_ADDRESS;
        use crate::bus::sensor_i2c_config;

        let i2c = I2c::new_blocking(p.I2C0, p.PIN_21, p.PIN_20, sensor_i2c_config());
        match Mlx90640Sensor::new(i2c, SENSOR_I2C_ADDRESS) {
            Ok(sensor) => {
                info!("MLX90640 initialized at {=u8:#x}", SENSOR_I2C_ADDRESS);
                sensor
            }
            Err(err) => {
                error!("MLX90640 init failed: {}", err);
                park().await
            }
        }
    };

    // Stop button (active-low with internal pull-up)
    let stop_button = Input::new(p.PIN_14, Pull::Up);
    spawner.spawn(stop_button_task(stop_button)).unwrap();
    info!("Stop button task spawned");

    let mut driver = FrameDriver::new(sensor, display, renderer);
    match driver.begin() {
        Ok(()) => {}
        Err(DisplayError::Config(err)) => {
            error!("Frame buffer misconfigured: {}", err);
            park().await;
        }
        Err(err) => error!("Initial clear failed: {}", err),
    }

    // Profiling: per-window frame statistics
    let mut stats = FrameStats::new();
    let mut last_profile_log = Instant::now();
    let boot = Instant::now();

    info!("Render loop starting");

    loop {
        // Checked between frames only, never mid-transfer
        if STOP_SIGNAL.signaled() {
            info!("Stop requested, turning display off");
            if let Err(err) = driver.shutdown() {
                error!("Display shutdown failed: {}", err);
            }
            led.set_low();
            info!("Halted");
            park().await;
        }

        let frame_start = Instant::now();

        match driver.run_frame() {
            Ok(report) => {
                stats.record(&report);
                debug!(
                    "Frame {}..{} C, elapsed {} ms",
                    report.range.min,
                    report.range.max,
                    frame_start.elapsed().as_millis()
                );
                Timer::after_millis(FRAME_INTERVAL_MS).await;
            }
            Err(err) => {
                stats.record_error(&err);
                match err {
                    FrameError::Acquisition(SensorError::NotReady) => {
                        debug!("Sensor not ready, polling again");
                        Timer::after_millis(NOT_READY_POLL_MS).await;
                    }
                    FrameError::Acquisition(err) => {
                        warn!("Frame skipped: {}", err);
                        Timer::after_millis(FRAME_INTERVAL_MS).await;
                    }
                    FrameError::Transfer(DisplayError::Config(err)) => {
                        error!("Frame buffer misconfigured: {}", err);
                        if let Err(err) = driver.shutdown() {
                            error!("Display shutdown failed: {}", err);
                        }
                        park().await;
                    }
                    FrameError::Transfer(err) => {
                        error!("Display transfer failed: {}", err);
                        Timer::after_millis(FRAME_INTERVAL_MS).await;
                    }
                }
            }
        }

        // Log profiling stats every 2 seconds
        if last_profile_log.elapsed() >= Duration::from_secs(PROFILE_LOG_INTERVAL_SECS) {
            let window_us = last_profile_log.elapsed().as_micros() as u32;
            let summary = stats.summary(window_us);
            info!(
                "PROFILE: acquire={}us compose={}us transfer={}us total={}us ({} FPS) skipped={} failed={} cpu={}%",
                summary.avg_acquire_us,
                summary.avg_compose_us,
                summary.avg_transfer_us,
                summary.avg_total_us,
                summary.fps,
                summary.skipped,
                summary.transfer_failures,
                summary.cpu_util
            );
            stats.reset();
            last_profile_log = Instant::now();
        }

        // Toggle LED every second to show loop is running (time-based)
        if (boot.elapsed().as_millis() / 1000).is_multiple_of(2) {
            led.set_high();
        } else {
            led.set_low();
        }
    }
}

// The firmware only targets ARM; elsewhere only the library is exercised.
#[cfg(not(target_arch = "arm"))]
fn main() {}
