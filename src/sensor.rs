//! Thermal sensor interface.
//!
//! [`ThermalSensor`] is the seam between the render loop and whatever
//! produces temperature frames. The firmware implements it over the MLX90640
//! driver; [`SyntheticSensor`] implements it in software for demo builds and
//! host tests.
//!
//! A read either fills the whole grid or fails. On failure the grid contents
//! are unspecified and the caller skips the frame.

use crate::config::{SAMPLE_HEIGHT, SAMPLE_WIDTH};
use crate::error::SensorError;
use crate::grid::SampleGrid;

/// Source of thermal frames.
pub trait ThermalSensor {
    /// Read one frame of calibrated temperatures (°C) into `dst`.
    fn read_frame(
        &mut self,
        dst: &mut SampleGrid,
    ) -> Result<(), SensorError>;
}

impl<T: ThermalSensor + ?Sized> ThermalSensor for &mut T {
    fn read_frame(
        &mut self,
        dst: &mut SampleGrid,
    ) -> Result<(), SensorError> {
        (**self).read_frame(dst)
    }
}

// =============================================================================
// Synthetic Sensor
// =============================================================================

/// Room temperature of the synthetic scene (°C).
const AMBIENT_C: f32 = 22.0;
/// Peak rise of the heat blob above ambient (°C).
const BLOB_RISE_C: f32 = 12.0;
/// Blob radius (standard deviation) in sensor cells.
const BLOB_SIGMA: f32 = 3.5;
/// Phase advance per frame (radians).
const PHASE_STEP: f32 = 0.1;

/// Deterministic scene with a warm blob drifting over a slightly graded
/// background.
///
/// Every read advances the scene by one step, so consecutive frames differ
/// but two sensors created the same way produce identical sequences.
#[derive(Debug, Clone)]
pub struct SyntheticSensor {
    frame: u32,
}

impl SyntheticSensor {
    pub const fn new() -> Self { Self { frame: 0 } }

    /// Number of frames produced so far.
    #[inline]
    pub const fn frame_count(&self) -> u32 { self.frame }

    /// Blob center `(x, y)` in sensor cells for the given frame.
    pub fn blob_center(frame: u32) -> (f32, f32) {
        let t = frame as f32 * PHASE_STEP;
        let half_w = (SAMPLE_WIDTH - 1) as f32 / 2.0;
        let half_h = (SAMPLE_HEIGHT - 1) as f32 / 2.0;
        (
            half_w + (half_w - 4.0) * micromath::F32(t * 0.7).sin().0,
            half_h + (half_h - 3.0) * micromath::F32(t * 0.5).cos().0,
        )
    }

    /// Fill `dst` with the scene at `frame` without advancing.
    pub fn render_scene(
        frame: u32,
        dst: &mut SampleGrid,
    ) {
        let (cx, cy) = Self::blob_center(frame);
        let inv_two_sigma_sq = 1.0 / (2.0 * BLOB_SIGMA * BLOB_SIGMA);

        for (i, sample) in dst.as_mut_slice().iter_mut().enumerate() {
            let x = (i % SAMPLE_WIDTH) as f32;
            let y = (i / SAMPLE_WIDTH) as f32;
            let dx = x - cx;
            let dy = y - cy;
            let heat = micromath::F32(-(dx * dx + dy * dy) * inv_two_sigma_sq).exp().0;
            // Floor is a little warmer than the ceiling
            *sample = AMBIENT_C + y * 0.05 + BLOB_RISE_C * heat;
        }
    }
}

impl Default for SyntheticSensor {
    fn default() -> Self { Self::new() }
}

impl ThermalSensor for SyntheticSensor {
    fn read_frame(
        &mut self,
        dst: &mut SampleGrid,
    ) -> Result<(), SensorError> {
        Self::render_scene(self.frame, dst);
        self.frame = self.frame.wrapping_add(1);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_range;

    #[test]
    fn test_advances_each_read() {
        let mut sensor = SyntheticSensor::new();
        let mut a = SampleGrid::new();
        let mut b = SampleGrid::new();
        sensor.read_frame(&mut a).unwrap();
        sensor.read_frame(&mut b).unwrap();
        assert_eq!(sensor.frame_count(), 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_deterministic() {
        let mut first = SyntheticSensor::new();
        let mut second = SyntheticSensor::new();
        let mut a = SampleGrid::new();
        let mut b = SampleGrid::new();
        for _ in 0..5 {
            first.read_frame(&mut a).unwrap();
            second.read_frame(&mut b).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_plausible_temperatures() {
        let mut sensor = SyntheticSensor::new();
        let mut grid = SampleGrid::new();
        for _ in 0..50 {
            sensor.read_frame(&mut grid).unwrap();
            let range = normalize_range(&grid);
            assert!(range.min >= AMBIENT_C - 0.5);
            assert!(range.max <= AMBIENT_C + BLOB_RISE_C + 2.0);
            assert!(!range.is_flat());
        }
    }

    #[test]
    fn test_hottest_cell_near_blob_center() {
        let mut grid = SampleGrid::new();
        SyntheticSensor::render_scene(7, &mut grid);
        let (cx, cy) = SyntheticSensor::blob_center(7);

        let (hot_index, _) = grid
            .as_slice()
            .iter()
            .enumerate()
            .fold((0, f32::MIN), |best, (i, &v)| if v > best.1 { (i, v) } else { best });
        let hx = (hot_index % SAMPLE_WIDTH) as f32;
        let hy = (hot_index / SAMPLE_WIDTH) as f32;
        assert!((hx - cx).abs() <= 1.5, "x {hx} vs {cx}");
        assert!((hy - cy).abs() <= 1.5, "y {hy} vs {cy}");
    }

    #[test]
    fn test_blob_stays_on_grid() {
        for frame in 0..1000 {
            let (cx, cy) = SyntheticSensor::blob_center(frame);
            assert!((0.0..SAMPLE_WIDTH as f32).contains(&cx));
            assert!((0.0..SAMPLE_HEIGHT as f32).contains(&cy));
        }
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn read_once<S: ThermalSensor>(
            mut sensor: S,
            grid: &mut SampleGrid,
        ) {
            sensor.read_frame(grid).unwrap();
        }

        let mut sensor = SyntheticSensor::new();
        let mut grid = SampleGrid::new();
        read_once(&mut sensor, &mut grid);
        read_once(&mut sensor, &mut grid);
        assert_eq!(sensor.frame_count(), 2);
    }
}
