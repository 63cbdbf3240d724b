//! MIMO Beamforming Response
//!
//! Computes the normalized angular response of a transmit/receive array pair
//! steered toward a single direction. Both arrays are half-wavelength ULAs
//! tapered by the same window.
//!
//! For each observation angle the matched-filter gain is the magnitude of the
//! Frobenius inner product between the channel seen at that angle and the
//! reference channel at the steering angle:
//!
//! ```text
//! H(θ)  = a_rx(θ) ⊗ conj(a_tx(θ))
//! g(θ)  = | Σ_ij H(θ)[i,j] * conj(H(θ_s)[i,j]) |
//! dB(θ) = 20 * log10(g(θ) / max g)
//! ```
//!
//! # Example
//!
//! ```rust
//! use mimo_beam_core::engine::{compute_response, ArrayGeometry};
//! use mimo_beam_core::sweep::default_sweep;
//! use mimo_beam_core::window::WindowKind;
//!
//! let geometry = ArrayGeometry::new(8, 4).unwrap();
//! let curve = compute_response(&geometry, 20.0, &default_sweep(), WindowKind::Hamming).unwrap();
//! assert_eq!(curve.len(), 500);
//! assert!((curve.peak().angle_deg - 20.0).abs() < 0.5);
//! ```

use serde::Serialize;

use crate::steering::{steering_vector, ChannelMatrix};
use crate::types::{MimoError, MimoResult};
use crate::window::{window_vector, WindowKind};

/// Level below the peak that bounds the half-power main lobe.
pub const HALF_POWER_DB: f64 = -3.0;

/// Transmit and receive antenna counts.
///
/// Element spacing and wavenumber are fixed (see [`crate::steering`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArrayGeometry {
    /// Number of transmit antennas (Nt).
    pub nt: usize,
    /// Number of receive antennas (Nr).
    pub nr: usize,
}

impl ArrayGeometry {
    pub fn new(nt: usize, nr: usize) -> MimoResult<Self> {
        let geometry = Self { nt, nr };
        geometry.validate()?;
        Ok(geometry)
    }

    pub fn validate(&self) -> MimoResult<()> {
        if self.nt < 1 || self.nr < 1 {
            return Err(MimoError::InvalidGeometry {
                nt: self.nt,
                nr: self.nr,
            });
        }
        Ok(())
    }
}

/// One sample of a beam pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResponsePoint {
    pub angle_deg: f64,
    pub gain_db: f64,
}

/// Beam pattern over an observation sweep, normalized to a 0 dB peak.
///
/// Points are kept in sweep order. A curve produced by the engine is never
/// empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResponseCurve {
    points: Vec<ResponsePoint>,
}

impl ResponseCurve {
    fn new(points: Vec<ResponsePoint>) -> Self {
        debug_assert!(!points.is_empty());
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[ResponsePoint] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResponsePoint> {
        self.points.iter()
    }

    pub fn angles_deg(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.angle_deg).collect()
    }

    pub fn gains_db(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.gain_db).collect()
    }

    /// Gain at an angle that is exactly present in the sweep.
    pub fn gain_at(&self, angle_deg: f64) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.angle_deg == angle_deg)
            .map(|p| p.gain_db)
    }

    /// Index of the first maximum. NaN samples never win.
    pub fn peak_index(&self) -> usize {
        let mut best = 0;
        for (i, p) in self.points.iter().enumerate() {
            if p.gain_db > self.points[best].gain_db || self.points[best].gain_db.is_nan() {
                best = i;
            }
        }
        best
    }

    pub fn peak(&self) -> ResponsePoint {
        self.points[self.peak_index()]
    }

    pub fn max_gain_db(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.gain_db)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Sample range `[left, right]` of the contiguous region around the peak
    /// that stays within 3 dB of it.
    fn half_power_span(&self) -> (usize, usize) {
        let peak = self.peak_index();
        let threshold = self.points[peak].gain_db + HALF_POWER_DB;
        let within = |i: usize| self.points[i].gain_db >= threshold;

        let mut left = peak;
        while left > 0 && within(left - 1) {
            left -= 1;
        }
        let mut right = peak;
        while right + 1 < self.points.len() && within(right + 1) {
            right += 1;
        }
        (left, right)
    }

    /// Angular half-width of the main lobe at the half-power level.
    ///
    /// This is the largest distance from the peak angle to either edge sample
    /// of the contiguous -3 dB region. Resolution is limited by the sweep.
    pub fn half_power_half_width_deg(&self) -> f64 {
        let peak = self.peak().angle_deg;
        let (left, right) = self.half_power_span();
        let to_left = (peak - self.points[left].angle_deg).abs();
        let to_right = (self.points[right].angle_deg - peak).abs();
        to_left.max(to_right)
    }

    /// Sample range of the main lobe: the monotonic descent from the peak
    /// down to the first local minimum on each side.
    fn main_lobe_span(&self) -> (usize, usize) {
        let peak = self.peak_index();
        let g = |i: usize| self.points[i].gain_db;

        let mut left = peak;
        while left > 0 && g(left - 1) <= g(left) {
            left -= 1;
        }
        let mut right = peak;
        while right + 1 < self.points.len() && g(right + 1) <= g(right) {
            right += 1;
        }
        (left, right)
    }

    /// Highest level outside the main lobe, in dB relative to the peak.
    ///
    /// Returns `None` when the main lobe covers the whole sweep.
    pub fn peak_sidelobe_db(&self) -> Option<f64> {
        let (left, right) = self.main_lobe_span();
        self.points[..left]
            .iter()
            .chain(self.points[right + 1..].iter())
            .map(|p| p.gain_db)
            .filter(|g| !g.is_nan())
            .reduce(f64::max)
    }

    /// Copy of the curve limited to `[floor_db, 0]` for display.
    ///
    /// NaN and -inf samples are drawn at the floor.
    pub fn clamped(&self, floor_db: f64) -> ResponseCurve {
        let points = self
            .points
            .iter()
            .map(|p| ResponsePoint {
                angle_deg: p.angle_deg,
                gain_db: if p.gain_db.is_nan() {
                    floor_db
                } else {
                    p.gain_db.max(floor_db).min(0.0)
                },
            })
            .collect();
        ResponseCurve { points }
    }

    /// `(angle_rad, gain_db)` pairs for polar plotting.
    pub fn to_polar(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|p| (p.angle_deg.to_radians(), p.gain_db))
            .collect()
    }
}

/// Beamformer for a fixed geometry and window.
///
/// Holds the unit-norm tapers so that repeated pattern evaluations for the
/// same array do not regenerate them.
#[derive(Debug, Clone)]
pub struct BeamformingEngine {
    geometry: ArrayGeometry,
    window: WindowKind,
    win_tx: Vec<f64>,
    win_rx: Vec<f64>,
}

impl BeamformingEngine {
    pub fn new(geometry: ArrayGeometry, window: WindowKind) -> MimoResult<Self> {
        geometry.validate()?;
        Ok(Self {
            geometry,
            window,
            win_tx: window_vector(window, geometry.nt),
            win_rx: window_vector(window, geometry.nr),
        })
    }

    pub fn geometry(&self) -> ArrayGeometry {
        self.geometry
    }

    pub fn window(&self) -> WindowKind {
        self.window
    }

    /// Channel matrix seen by the tapered arrays at `angle_deg`.
    pub fn channel(&self, angle_deg: f64) -> ChannelMatrix {
        let tx = steering_vector(&self.win_tx, angle_deg);
        let rx = steering_vector(&self.win_rx, angle_deg);
        ChannelMatrix::outer(&rx, &tx)
    }

    /// Linear (un-normalized) matched-filter gain at `angle_deg` for a beam
    /// steered to `steering_angle_deg`.
    pub fn correlation_gain(&self, steering_angle_deg: f64, angle_deg: f64) -> f64 {
        let h_ref = self.channel(steering_angle_deg);
        self.channel(angle_deg).frobenius_inner(&h_ref).norm()
    }

    /// Normalized pattern over `sweep` for a beam steered to
    /// `steering_angle_deg`.
    ///
    /// A zero gain yields -inf dB and an all-zero sweep yields NaN; neither
    /// is clamped.
    pub fn response(&self, steering_angle_deg: f64, sweep: &[f64]) -> MimoResult<ResponseCurve> {
        if sweep.is_empty() {
            return Err(MimoError::EmptySweep);
        }

        tracing::debug!(
            nt = self.geometry.nt,
            nr = self.geometry.nr,
            window = %self.window,
            steering_deg = steering_angle_deg,
            points = sweep.len(),
            "Computing beam pattern"
        );

        let h_ref = self.channel(steering_angle_deg);
        let gains = self.sweep_gains(&h_ref, sweep);

        let max_gain = gains.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max_gain == 0.0 {
            tracing::warn!("Matched-filter gain is zero across the sweep; pattern is undefined");
        }

        let points = sweep
            .iter()
            .zip(gains)
            .map(|(&angle_deg, g)| ResponsePoint {
                angle_deg,
                gain_db: 20.0 * (g / max_gain).log10(),
            })
            .collect();

        Ok(ResponseCurve::new(points))
    }

    #[cfg(not(feature = "parallel"))]
    fn sweep_gains(&self, h_ref: &ChannelMatrix, sweep: &[f64]) -> Vec<f64> {
        sweep
            .iter()
            .map(|&ang| self.channel(ang).frobenius_inner(h_ref).norm())
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn sweep_gains(&self, h_ref: &ChannelMatrix, sweep: &[f64]) -> Vec<f64> {
        use rayon::prelude::*;

        sweep
            .par_iter()
            .map(|&ang| self.channel(ang).frobenius_inner(h_ref).norm())
            .collect()
    }
}

/// Compute the normalized beam pattern of a MIMO array.
///
/// Fails with [`MimoError::InvalidGeometry`] if either antenna count is
/// zero, and with [`MimoError::EmptySweep`] if `sweep` has no angles.
pub fn compute_response(
    geometry: &ArrayGeometry,
    steering_angle_deg: f64,
    sweep: &[f64],
    window: WindowKind,
) -> MimoResult<ResponseCurve> {
    BeamformingEngine::new(*geometry, window)?.response(steering_angle_deg, sweep)
}
