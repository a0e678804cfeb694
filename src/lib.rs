//! Thermal viewer library - the host-testable half of the firmware.
//!
//! Turns a 32x24 grid of temperatures into a 128x160 Rgb565 frame:
//! per-frame min/max normalization, a Viridis lookup table, and
//! nearest-neighbor upscaling straight into the display's wire format.
//! The binary (`main.rs`) supplies the MLX90640 sensor, the ST7735 panel and
//! the embassy render loop.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib --target x86_64-unknown-linux-gnu
//! cargo test --test pipeline --target x86_64-unknown-linux-gnu
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the actual firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// === Pure logic modules (testable on host, no ARM dependencies) ===

// Configuration and errors
pub mod config;
pub mod error;

// Color
pub mod gradient;
pub mod lut;

// Frame pipeline
pub mod compose;
pub mod driver;
pub mod framebuffer;
pub mod grid;
pub mod normalize;
pub mod renderer;

// Collaborator seams
pub mod sensor;
pub mod transport;

pub mod profiling;

pub use driver::{FrameDriver, FrameReport};
pub use error::{ConfigError, DisplayError, FrameError, SensorError};
pub use grid::SampleGrid;
pub use renderer::Renderer;
pub use sensor::{SyntheticSensor, ThermalSensor};
pub use transport::DisplayTransport;
