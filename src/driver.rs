//! Frame driver: one iteration of the acquire, render, transfer pipeline.
//!
//! # Frame Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────────┐   ┌──────────────┐
//! │ read_frame() │──>│ normalize + compose  │──>│    blit()    │
//! │  SampleGrid  │   │ into the PixelBuffer │   │ 40,960 bytes │
//! └──────────────┘   └──────────────────────┘   └──────────────┘
//!    acquire              compose                   transfer
//! ```
//!
//! Each stage runs to completion before the next starts. A failed read
//! returns before anything is composed, so the buffer always holds the last
//! frame that was fully rendered. A failed transfer is reported and not
//! retried; the next frame is a complete rewrite anyway.
//!
//! The driver does no logging and no waiting. Pacing, retry policy and
//! reporting belong to the caller, which gets a [`FrameReport`] or a
//! [`FrameError`] back from every [`FrameDriver::run_frame`].

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

use crate::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::error::{DisplayError, FrameError};
use crate::grid::SampleGrid;
use crate::normalize::NormalizationRange;
use crate::profiling::cycles;
use crate::renderer::Renderer;
use crate::sensor::ThermalSensor;
use crate::transport::DisplayTransport;

const WIDTH: u16 = DISPLAY_WIDTH as u16;
const HEIGHT: u16 = DISPLAY_HEIGHT as u16;

/// Outcome of one delivered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct FrameReport {
    /// Range the frame was normalized against.
    pub range: NormalizationRange,
    /// CPU cycles in `read_frame`.
    pub acquire_cycles: u32,
    /// CPU cycles in normalize + compose.
    pub compose_cycles: u32,
    /// CPU cycles in `blit`.
    pub transfer_cycles: u32,
}

impl FrameReport {
    /// Cycles across all three stages.
    #[inline]
    pub const fn total_cycles(&self) -> u32 {
        self.acquire_cycles
            .saturating_add(self.compose_cycles)
            .saturating_add(self.transfer_cycles)
    }
}

/// Owns the sensor and display and drives frames between them.
pub struct FrameDriver<'r, S, D> {
    sensor: S,
    display: D,
    renderer: &'r mut Renderer,
    samples: SampleGrid,
}

impl<'r, S, D> FrameDriver<'r, S, D>
where
    S: ThermalSensor,
    D: DisplayTransport,
{
    pub fn new(
        sensor: S,
        display: D,
        renderer: &'r mut Renderer,
    ) -> Self {
        Self {
            sensor,
            display,
            renderer,
            samples: SampleGrid::new(),
        }
    }

    /// Select the full panel and push a black frame.
    pub fn begin(&mut self) -> Result<(), DisplayError> {
        self.display.set_window(0, 0, WIDTH - 1, HEIGHT - 1)?;
        self.renderer.buffer_mut().fill(Rgb565::BLACK);
        self.display
            .blit(self.renderer.buffer().as_bytes(), 0, 0, WIDTH, HEIGHT)
    }

    /// Acquire, render and send one frame.
    pub fn run_frame(&mut self) -> Result<FrameReport, FrameError> {
        let t0 = cycles::read();
        self.sensor.read_frame(&mut self.samples)?;
        let t1 = cycles::read();

        let range = self.renderer.render(&self.samples);
        let t2 = cycles::read();

        self.display
            .blit(self.renderer.buffer().as_bytes(), 0, 0, WIDTH, HEIGHT)?;
        let t3 = cycles::read();

        Ok(FrameReport {
            range,
            acquire_cycles: cycles::elapsed(t0, t1),
            compose_cycles: cycles::elapsed(t1, t2),
            transfer_cycles: cycles::elapsed(t2, t3),
        })
    }

    /// Turn the display off. The driver should not be used afterwards.
    pub fn shutdown(&mut self) -> Result<(), DisplayError> { self.display.shutdown() }

    /// Readings of the last successful acquisition.
    #[inline]
    pub const fn samples(&self) -> &SampleGrid { &self.samples }

    #[inline]
    pub fn renderer(&self) -> &Renderer { self.renderer }

    #[inline]
    pub fn sensor_mut(&mut self) -> &mut S { &mut self.sensor }

    #[inline]
    pub fn display_mut(&mut self) -> &mut D { &mut self.display }

    /// Give back the sensor and display.
    pub fn release(self) -> (S, D) { (self.sensor, self.display) }
}

// =============================================================================
// Unit Tests
// =============================================================================
