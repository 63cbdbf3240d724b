//! Observation angle sweeps.

/// Lower edge of the default sweep in degrees.
pub const DEFAULT_START_DEG: f64 = -90.0;
/// Upper edge of the default sweep in degrees.
pub const DEFAULT_STOP_DEG: f64 = 90.0;
/// Number of points in the default sweep.
pub const DEFAULT_POINTS: usize = 500;

/// Generates `n` linearly spaced samples in [start, stop], both inclusive.
#[must_use]
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as f64 - 1.0);
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = stop;
            out
        }
    }
}

/// The conventional pattern sweep: 500 points from -90° to +90°.
#[must_use]
pub fn default_sweep() -> Vec<f64> {
    linspace(DEFAULT_START_DEG, DEFAULT_STOP_DEG, DEFAULT_POINTS)
}
