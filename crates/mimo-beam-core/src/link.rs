//! Link Performance Metrics
//!
//! First-order estimate of what the array buys on the link: the full
//! coherent array gain Nt·Nr is applied to the input SNR and the Shannon
//! capacity of the resulting SNR is reported.
//!
//! ```rust
//! use mimo_beam_core::link::LinkMetrics;
//!
//! let m = LinkMetrics::compute(10.0, 8, 4);
//! assert!((m.effective_snr_db - 25.05).abs() < 0.01);
//! ```

use serde::Serialize;

/// Convert dB to a linear power ratio.
#[inline]
pub fn db_to_linear(db: f64) -> f64 {
    10.0f64.powf(db / 10.0)
}

/// Convert a linear power ratio to dB.
#[inline]
pub fn linear_to_db(linear: f64) -> f64 {
    10.0 * linear.log10()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinkMetrics {
    /// Per-antenna input SNR in dB
    pub input_snr_db: f64,
    /// SNR after combining across Nt·Nr antenna pairs, in dB
    pub effective_snr_db: f64,
    /// Shannon capacity in bits/s/Hz
    pub capacity_bps_hz: f64,
}

impl LinkMetrics {
    pub fn compute(input_snr_db: f64, nt: usize, nr: usize) -> Self {
        let snr_effective = db_to_linear(input_snr_db) * (nt * nr) as f64;
        Self {
            input_snr_db,
            effective_snr_db: linear_to_db(snr_effective),
            capacity_bps_hz: (1.0 + snr_effective).log2(),
        }
    }

    /// Array gain over a single antenna pair, in dB.
    pub fn array_gain_db(&self) -> f64 {
        self.effective_snr_db - self.input_snr_db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_conversions() {
        assert!((db_to_linear(10.0) - 10.0).abs() < 1e-12);
        assert!((db_to_linear(0.0) - 1.0).abs() < 1e-12);
        assert!((linear_to_db(100.0) - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_default_scenario_metrics() {
        let m = LinkMetrics::compute(10.0, 8, 4);
        // 10 * 32 = 320 -> 25.05 dB, log2(321) = 8.326
        assert!((m.effective_snr_db - 25.051).abs() < 1e-3);
        assert!((m.capacity_bps_hz - 8.326).abs() < 1e-3);
        assert!((m.array_gain_db() - 15.051).abs() < 1e-3);
    }

    #[test]
    fn test_single_antenna_pair() {
        let m = LinkMetrics::compute(0.0, 1, 1);
        assert!(m.effective_snr_db.abs() < 1e-12);
        assert!((m.capacity_bps_hz - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_capacity_grows_with_array_size() {
        let small = LinkMetrics::compute(10.0, 2, 1);
        let large = LinkMetrics::compute(10.0, 32, 16);
        assert!(large.capacity_bps_hz > small.capacity_bps_hz);
    }
}
