//! Steering Vectors and Channel Matrices
//!
//! Element `n` of a uniform linear array with half-wavelength spacing sees a
//! plane wave from angle θ (off broadside) with phase `k * d * n * sin(θ)`.
//! Weighting that phasor by the element taper gives the steering vector:
//!
//! ```text
//! a[n] = w[n] * exp(j * k * d * n * sin(θ))      k = 2π, d = 0.5
//! ```
//!
//! A MIMO link is modelled by the rank-one channel `H = a_rx ⊗ conj(a_tx)`.

use std::f64::consts::PI;

use crate::types::Complex;

/// Element spacing in wavelengths.
pub const ELEMENT_SPACING: f64 = 0.5;

/// Wavenumber for a unit wavelength.
pub const WAVENUMBER: f64 = 2.0 * PI;

/// Compute the tapered steering vector for an angle in degrees.
///
/// The output has the same length as `weights`.
pub fn steering_vector(weights: &[f64], angle_deg: f64) -> Vec<Complex> {
    let phase_inc = WAVENUMBER * ELEMENT_SPACING * angle_deg.to_radians().sin();
    weights
        .iter()
        .enumerate()
        .map(|(n, &w)| Complex::from_polar(w, phase_inc * n as f64))
        .collect()
}

/// Rank-one MIMO channel matrix, stored row-major with `rows = Nr`,
/// `cols = Nt`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMatrix {
    rows: usize,
    cols: usize,
    data: Vec<Complex>,
}

impl ChannelMatrix {
    /// Outer product `rx ⊗ conj(tx)`.
    pub fn outer(rx: &[Complex], tx: &[Complex]) -> Self {
        let data = rx
            .iter()
            .flat_map(|r| tx.iter().map(move |t| r * t.conj()))
            .collect();
        Self {
            rows: rx.len(),
            cols: tx.len(),
            data,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Entry at row `i` (receive element), column `j` (transmit element).
    pub fn get(&self, i: usize, j: usize) -> Option<Complex> {
        if i < self.rows && j < self.cols {
            Some(self.data[i * self.cols + j])
        } else {
            None
        }
    }

    /// Frobenius inner product `Σ self[i,j] * conj(other[i,j])`.
    ///
    /// Both matrices must have the same shape.
    pub fn frobenius_inner(&self, other: &ChannelMatrix) -> Complex {
        debug_assert_eq!((self.rows, self.cols), (other.rows, other.cols));
        self.data
            .iter()
            .zip(other.data.iter())
            .fold(Complex::new(0.0, 0.0), |acc, (a, b)| acc + a * b.conj())
    }
}
