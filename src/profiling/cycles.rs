//! CPU cycle counter on the Cortex-M33 DWT unit.
//!
//! Per-stage frame timing reads the Data Watchpoint and Trace cycle counter
//! (CYCCNT). On the host there is no counter and [`read`] always returns 0,
//! so every measured span comes out as zero cycles.
//!
//! # Overflow Handling
//!
//! CYCCNT is a 32-bit counter:
//! - 150 MHz: wraps every ~28.6 seconds (2^32 / 150M)
//! - 250 MHz: wraps every ~17.2 seconds (`cpu250` feature)
//!
//! [`elapsed`] uses `wrapping_sub`, which is exact for any span shorter than
//! one wrap. A frame takes tens of milliseconds, so spans above
//! [`MAX_SANE_CYCLES`] are treated as measurement errors.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::config::STOCK_CPU_HZ;

/// CPU frequency in Hz, set by [`init`].
static CPU_FREQ_HZ: AtomicU32 = AtomicU32::new(STOCK_CPU_HZ);

/// Largest span [`elapsed`] accepts (~0.8 s at 250 MHz).
pub const MAX_SANE_CYCLES: u32 = 200_000_000;

/// Enable the DWT cycle counter and record the core clock.
///
/// Call after `embassy_rp::init()`. Calling it again only updates the
/// frequency.
pub fn init(freq_hz: u32) {
    let clamped_freq = freq_hz.clamp(100_000_000, 500_000_000);
    CPU_FREQ_HZ.store(clamped_freq, Ordering::Relaxed);

    // DEMCR.TRCENA (bit 24) must be set before DWT.CTRL.CYCCNTENA (bit 0)
    #[cfg(target_arch = "arm")]
    unsafe {
        use core::ptr::{read_volatile, write_volatile};

        const DEMCR: *mut u32 = 0xE000_EDFC as *mut u32;
        let demcr_val = read_volatile(DEMCR);
        write_volatile(DEMCR, demcr_val | (1 << 24));

        const DWT_CTRL: *mut u32 = 0xE000_1000 as *mut u32;
        let ctrl_val = read_volatile(DWT_CTRL);
        write_volatile(DWT_CTRL, ctrl_val | 1);
    }
}

/// Current cycle count (32-bit, wraps).
#[inline]
pub fn read() -> u32 {
    #[cfg(target_arch = "arm")]
    unsafe {
        const DWT_CYCCNT: *const u32 = 0xE000_1004 as *const u32;
        core::ptr::read_volatile(DWT_CYCCNT)
    }
    #[cfg(not(target_arch = "arm"))]
    {
        0
    }
}

/// Cycles between two [`read`]s, or 0 if the span is implausibly long.
#[inline]
pub fn elapsed(
    start: u32,
    end: u32,
) -> u32 {
    let elapsed = end.wrapping_sub(start);
    if elapsed > MAX_SANE_CYCLES { 0 } else { elapsed }
}

/// Configured CPU frequency in Hz.
#[inline]
pub fn freq_hz() -> u32 { CPU_FREQ_HZ.load(Ordering::Relaxed) }

/// Convert a cycle count to microseconds at the configured frequency.
#[inline]
pub fn to_micros(cycles: u32) -> u32 { cycles_to_micros(cycles, freq_hz()) }

/// Convert a cycle count to microseconds at `freq_hz`.
pub fn cycles_to_micros(
    cycles: u32,
    freq_hz: u32,
) -> u32 {
    if freq_hz == 0 {
        return 0;
    }
    (u64::from(cycles) * 1_000_000 / u64::from(freq_hz)) as u32
}

/// CPU utilization (0-100) of `cycles_used` over `window_us` at the
/// configured frequency.
#[inline]
pub fn calc_util_percent(
    cycles_used: u32,
    window_us: u32,
) -> u32 {
    util_percent_at(cycles_used, window_us, freq_hz())
}

/// CPU utilization (0-100) of `cycles_used` over `window_us` at `freq_hz`.
///
/// Intermediates are u64; the result is clamped to 100 because a window can
/// include interrupt time the caller also counted.
pub fn util_percent_at(
    cycles_used: u32,
    window_us: u32,
    freq_hz: u32,
) -> u32 {
    if window_us == 0 || cycles_used == 0 {
        return 0;
    }

    let cycles_available = u64::from(freq_hz) * u64::from(window_us) / 1_000_000;
    if cycles_available == 0 {
        return 0;
    }

    let util = u64::from(cycles_used) * 100 / cycles_available;
    util.min(100) as u32
}

// =============================================================================
// Unit Tests (run on host with: cargo test --lib --target <host-triple>)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_normal() {
        assert_eq!(elapsed(100, 200), 100);
        assert_eq!(elapsed(0, 1000), 1000);
    }

    #[test]
    fn test_elapsed_wrap() {
        assert_eq!(elapsed(u32::MAX - 100, 100), 201);
    }

    #[test]
    fn test_elapsed_sanity_check() {
        assert_eq!(elapsed(0, MAX_SANE_CYCLES + 1), 0);
        assert_eq!(elapsed(0, MAX_SANE_CYCLES), MAX_SANE_CYCLES);
    }

    #[test]
    fn test_host_counter_reads_zero() {
        assert_eq!(read(), 0);
        assert_eq!(elapsed(read(), read()), 0);
    }

    #[test]
    fn test_cycles_to_micros() {
        // 150 MHz: 150 cycles per microsecond
        assert_eq!(cycles_to_micros(150_000, 150_000_000), 1_000);
        assert_eq!(cycles_to_micros(250_000, 250_000_000), 1_000);
        assert_eq!(cycles_to_micros(MAX_SANE_CYCLES, 250_000_000), 800_000);
        assert_eq!(cycles_to_micros(1_000, 0), 0);
    }

    #[test]
    fn test_util_zero_inputs() {
        assert_eq!(util_percent_at(0, 1000, 150_000_000), 0);
        assert_eq!(util_percent_at(1000, 0, 150_000_000), 0);
        assert_eq!(util_percent_at(1000, 1000, 0), 0);
    }

    #[test]
    fn test_util_calculation() {
        // 1 ms at 250 MHz is 250,000 cycles
        assert_eq!(util_percent_at(125_000, 1000, 250_000_000), 50);
        assert_eq!(util_percent_at(250_000, 1000, 250_000_000), 100);
        assert_eq!(util_percent_at(400_000, 1000, 250_000_000), 100);
    }
}
