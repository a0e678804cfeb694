//! Error types for the render pipeline and its collaborators.
//!
//! | Error | Source | Recovery |
//! |-------|--------|----------|
//! | [`SensorError`] | Thermal sensor read | Skip the frame, try the next one |
//! | [`DisplayError`] | Display bus transfer | Surfaced to the caller, never retried |
//! | [`ConfigError`] | Size mismatch at a boundary | Fatal, never retried |
//!
//! A buffer that does not match its blit region reaches the render loop as
//! [`DisplayError::Config`]; [`FrameError::is_fatal`] tells it apart from a
//! bus failure.
//!
//! A thermally flat scene is not an error; see
//! [`NormalizationRange`](crate::normalize::NormalizationRange).

use core::fmt;

/// Errors reported by a [`ThermalSensor`](crate::sensor::ThermalSensor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum SensorError {
    /// The bus transaction did not complete.
    BusTimeout,
    /// Frame data failed its integrity check.
    ChecksumFailure,
    /// No new frame is available yet.
    NotReady,
}

impl fmt::Display for SensorError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::BusTimeout => f.write_str("sensor bus timeout"),
            Self::ChecksumFailure => f.write_str("sensor frame checksum failure"),
            Self::NotReady => f.write_str("sensor frame not ready"),
        }
    }
}

/// Errors reported by a [`DisplayTransport`](crate::transport::DisplayTransport).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum DisplayError {
    /// The serial bus rejected a write.
    Bus,
    /// The requested window lies outside the panel.
    InvalidWindow,
    /// The buffer handed to the transport does not fit its region.
    Config(ConfigError),
}

impl fmt::Display for DisplayError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Bus => f.write_str("display bus write failed"),
            Self::InvalidWindow => f.write_str("display window does not fit panel"),
            Self::Config(err) => write!(f, "display misconfigured: {err}"),
        }
    }
}

impl From<ConfigError> for DisplayError {
    fn from(err: ConfigError) -> Self { Self::Config(err) }
}

/// Build-time misconfiguration detected at a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum ConfigError {
    /// A sample slice does not hold exactly one sensor frame.
    SampleCount { expected: usize, actual: usize },
    /// A byte slice does not hold exactly one display frame.
    BufferLength { expected: usize, actual: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::SampleCount { expected, actual } => {
                write!(f, "expected {expected} samples, got {actual}")
            }
            Self::BufferLength { expected, actual } => {
                write!(f, "expected {expected} buffer bytes, got {actual}")
            }
        }
    }
}

/// Outcome of a failed frame in the render loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum FrameError {
    /// The sensor could not deliver a frame. Nothing was composed or sent.
    Acquisition(SensorError),
    /// The composed frame could not be sent to the display.
    Transfer(DisplayError),
}

impl FrameError {
    /// Whether the loop should simply try again on the next iteration.
    pub const fn is_skip(&self) -> bool { matches!(self, Self::Acquisition(_)) }

    /// Whether retrying can never succeed.
    pub const fn is_fatal(&self) -> bool { matches!(self, Self::Transfer(DisplayError::Config(_))) }
}

impl From<SensorError> for FrameError {
    fn from(err: SensorError) -> Self { Self::Acquisition(err) }
}

impl From<DisplayError> for FrameError {
    fn from(err: DisplayError) -> Self { Self::Transfer(err) }
}

impl fmt::Display for FrameError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Acquisition(err) => write!(f, "acquisition failed: {err}"),
            Self::Transfer(err) => write!(f, "transfer failed: {err}"),
        }
    }
}
