//! Per-window frame statistics.
//!
//! The render loop feeds every frame outcome into [`FrameStats`] and, once
//! per reporting window, asks for a [`ProfileSummary`] and resets. Cycle
//! totals are kept in u64 so a window of any practical length cannot
//! overflow.

use super::cycles;
use crate::driver::FrameReport;
use crate::error::{FrameError, SensorError};

/// Running totals for the current reporting window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    frames: u32,
    skipped: u32,
    transfer_failures: u32,
    acquire_cycles: u64,
    compose_cycles: u64,
    transfer_cycles: u64,
}

/// Averages over one reporting window.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct ProfileSummary {
    /// Frames sent to the display.
    pub frames: u32,
    /// Frames lost to a failed sensor read. `NotReady` polls are not counted.
    pub skipped: u32,
    /// Frames composed but not delivered.
    pub transfer_failures: u32,
    pub avg_acquire_us: u32,
    pub avg_compose_us: u32,
    pub avg_transfer_us: u32,
    pub avg_total_us: u32,
    /// Delivered frames per second.
    pub fps: f32,
    /// Share of the window spent in the pipeline (0-100).
    pub cpu_util: u32,
}

impl FrameStats {
    pub const fn new() -> Self {
        Self {
            frames: 0,
            skipped: 0,
            transfer_failures: 0,
            acquire_cycles: 0,
            compose_cycles: 0,
            transfer_cycles: 0,
        }
    }

    /// Count a delivered frame.
    pub fn record(
        &mut self,
        report: &FrameReport,
    ) {
        self.frames = self.frames.saturating_add(1);
        self.acquire_cycles += u64::from(report.acquire_cycles);
        self.compose_cycles += u64::from(report.compose_cycles);
        self.transfer_cycles += u64::from(report.transfer_cycles);
    }

    /// Count a failed frame by its cause.
    ///
    /// `NotReady` only means the sensor has no new frame yet and is polled
    /// again, so it is not a lost frame.
    pub fn record_error(
        &mut self,
        err: &FrameError,
    ) {
        match err {
            FrameError::Acquisition(SensorError::NotReady) => {}
            FrameError::Acquisition(_) => self.record_skipped(),
            FrameError::Transfer(_) => self.record_transfer_failure(),
        }
    }

    /// Count a frame skipped on an acquisition error.
    pub fn record_skipped(&mut self) { self.skipped = self.skipped.saturating_add(1); }

    /// Count a frame lost on a transfer error.
    pub fn record_transfer_failure(&mut self) { self.transfer_failures = self.transfer_failures.saturating_add(1); }

    #[inline]
    pub const fn frames(&self) -> u32 { self.frames }

    #[inline]
    pub const fn skipped(&self) -> u32 { self.skipped }

    #[inline]
    pub const fn transfer_failures(&self) -> u32 { self.transfer_failures }

    /// Summarize a window of `window_us` at the configured CPU frequency.
    pub fn summary(
        &self,
        window_us: u32,
    ) -> ProfileSummary {
        self.summary_at(window_us, cycles::freq_hz())
    }

    /// Summarize a window of `window_us` at `freq_hz`.
    pub fn summary_at(
        &self,
        window_us: u32,
        freq_hz: u32,
    ) -> ProfileSummary {
        let average_us = |total: u64| -> u32 {
            if self.frames == 0 {
                return 0;
            }
            let avg_cycles = (total / u64::from(self.frames)).min(u64::from(u32::MAX)) as u32;
            cycles::cycles_to_micros(avg_cycles, freq_hz)
        };

        let avg_acquire_us = average_us(self.acquire_cycles);
        let avg_compose_us = average_us(self.compose_cycles);
        let avg_transfer_us = average_us(self.transfer_cycles);

        let busy_cycles = self.acquire_cycles + self.compose_cycles + self.transfer_cycles;
        let busy_cycles = busy_cycles.min(u64::from(u32::MAX)) as u32;

        let fps = if window_us == 0 {
            0.0
        } else {
            self.frames as f32 * 1_000_000.0 / window_us as f32
        };

        ProfileSummary {
            frames: self.frames,
            skipped: self.skipped,
            transfer_failures: self.transfer_failures,
            avg_acquire_us,
            avg_compose_us,
            avg_transfer_us,
            avg_total_us: avg_acquire_us + avg_compose_us + avg_transfer_us,
            fps,
            cpu_util: cycles::util_percent_at(busy_cycles, window_us, freq_hz),
        }
    }

    /// Start a new window.
    pub fn reset(&mut self) { *self = Self::new(); }
}

// =============================================================================
// Unit Tests
// =============================================================================
