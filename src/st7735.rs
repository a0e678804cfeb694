//! Blocking ST7735 display driver for embassy-rp.
//!
//! Drives a 128x160 ST7735 panel in portrait over SPI0 (TX only). The
//! composed frame is already in the panel's wire format, so a frame is one
//! `RAMWR` followed by a single 40,960-byte write with CS held low.
//!
//! # Transfer Model
//!
//! Writes are blocking. The render loop waits for each frame to reach the
//! panel before it starts acquiring the next, so there is exactly one owner
//! of the pixel buffer at any time.

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::Timer;

use crate::error::DisplayError;
use crate::transport::{DisplayTransport, check_blit, check_window};

// ST7735 Commands
const SWRESET: u8 = 0x01;
const SLPIN: u8 = 0x10;
const SLPOUT: u8 = 0x11;
const NORON: u8 = 0x13;
const INVOFF: u8 = 0x20;
const DISPOFF: u8 = 0x28;
const DISPON: u8 = 0x29;
const CASET: u8 = 0x2A;
const RASET: u8 = 0x2B;
const RAMWR: u8 = 0x2C;
const MADCTL: u8 = 0x36;
const COLMOD: u8 = 0x3A;

// Portrait, top-left origin, RGB order
const MADCTL_PORTRAIT_RGB: u8 = 0x00;
// 16 bits per pixel
const COLMOD_RGB565: u8 = 0x55;

/// ST7735 panel on a blocking SPI bus.
pub struct St7735<'d> {
    spi: Spi<'d, SPI0, Blocking>,
    dc: Output<'d>,
    cs: Output<'d>,
    rst: Output<'d>,
}

impl<'d> St7735<'d> {
    /// Create a driver from SPI and control pins.
    pub fn new(
        spi: Spi<'d, SPI0, Blocking>,
        dc: Output<'d>,
        cs: Output<'d>,
        rst: Output<'d>,
    ) -> Self {
        Self { spi, dc, cs, rst }
    }

    /// Reset and configure the panel, then switch it on.
    pub async fn init(&mut self) -> Result<(), DisplayError> {
        // Hardware reset pulse
        self.rst.set_low();
        Timer::after_millis(10).await;
        self.rst.set_high();
        Timer::after_millis(120).await;

        self.write_command(SWRESET)?;
        Timer::after_millis(150).await;

        self.write_command(SLPOUT)?;
        Timer::after_millis(120).await;

        self.write_command(COLMOD)?;
        self.write_data(&[COLMOD_RGB565])?;
        Timer::after_millis(10).await;

        self.write_command(MADCTL)?;
        self.write_data(&[MADCTL_PORTRAIT_RGB])?;

        self.write_command(INVOFF)?;

        self.write_command(NORON)?;
        Timer::after_millis(10).await;

        self.write_command(DISPON)?;
        Timer::after_millis(10).await;

        Ok(())
    }

    /// Send a command byte (DC low, CS low during transfer).
    fn write_command(
        &mut self,
        cmd: u8,
    ) -> Result<(), DisplayError> {
        self.cs.set_low();
        self.dc.set_low();
        let result = self.spi.blocking_write(&[cmd]);
        self.cs.set_high();
        result.map_err(|_| DisplayError::Bus)
    }

    /// Send data bytes (DC high, CS low during transfer).
    fn write_data(
        &mut self,
        data: &[u8],
    ) -> Result<(), DisplayError> {
        self.cs.set_low();
        self.dc.set_high();
        let result = self.spi.blocking_write(data);
        self.cs.set_high();
        result.map_err(|_| DisplayError::Bus)
    }

    /// CASET/RASET for an inclusive window already checked against the panel.
    fn address_window(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<(), DisplayError> {
        let [x0_hi, x0_lo] = x0.to_be_bytes();
        let [x1_hi, x1_lo] = x1.to_be_bytes();
        self.write_command(CASET)?;
        self.write_data(&[x0_hi, x0_lo, x1_hi, x1_lo])?;

        let [y0_hi, y0_lo] = y0.to_be_bytes();
        let [y1_hi, y1_lo] = y1.to_be_bytes();
        self.write_command(RASET)?;
        self.write_data(&[y0_hi, y0_lo, y1_hi, y1_lo])
    }
}

impl DisplayTransport for St7735<'_> {
    fn set_window(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<(), DisplayError> {
        check_window(x0, y0, x1, y1)?;
        self.address_window(x0, y0, x1, y1)
    }

    fn blit(
        &mut self,
        buffer: &[u8],
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    ) -> Result<(), DisplayError> {
        check_blit(buffer, x, y, width, height)?;
        self.address_window(x, y, x + width - 1, y + height - 1)?;

        // RAMWR then the whole region with CS held low
        self.cs.set_low();
        self.dc.set_low();
        let mut result = self.spi.blocking_write(&[RAMWR]);
        if result.is_ok() {
            self.dc.set_high();
            result = self.spi.blocking_write(buffer);
        }
        self.cs.set_high();
        result.map_err(|_| DisplayError::Bus)
    }

    fn shutdown(&mut self) -> Result<(), DisplayError> {
        self.write_command(DISPOFF)?;
        self.write_command(SLPIN)
    }
}
