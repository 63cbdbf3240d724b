//! # MIMO Beam Pattern Library
//!
//! Computes the angular response ("beam pattern") of a simulated MIMO
//! antenna array: Nt transmit and Nr receive elements on half-wavelength
//! uniform linear arrays, tapered by a window and electronically steered
//! toward a single direction.
//!
//! ## Overview
//!
//! - **Windows**: Uniform, Hamming, Hanning and Blackman tapers, normalized
//!   to unit energy
//! - **Steering**: tapered steering vectors and rank-one channel matrices
//! - **Engine**: matched-filter gain over an observation sweep, normalized
//!   to a 0 dB peak
//! - **Geo**: steering angle from base station and user positions
//! - **Link**: effective SNR and capacity with the full array gain
//! - **Report**: text, JSON and CSV output for front ends
//!
//! ## Signal Flow
//!
//! ```text
//! (Nt, Nr, window) → unit-norm tapers → steering vectors at θ_s → H_ref
//! sweep θ_i        → steering vectors at θ_i → H(θ_i) → |⟨H(θ_i), H_ref⟩| → dB
//! ```
//!
//! ## Example
//!
//! ```rust
//! use mimo_beam_core::prelude::*;
//!
//! let geometry = ArrayGeometry::new(8, 4).unwrap();
//! let curve = compute_response(&geometry, 0.0, &default_sweep(), WindowKind::Hamming).unwrap();
//!
//! assert!(curve.max_gain_db().abs() < 1e-9);
//! assert!(curve.gains_db()[0] < -20.0);
//! ```

pub mod config;
pub mod engine;
pub mod geo;
pub mod link;
pub mod observe;
pub mod report;
pub mod steering;
pub mod sweep;
pub mod types;
pub mod window;

// Re-export main types
pub use config::{BeamConfig, ConfigError};
pub use engine::{compute_response, ArrayGeometry, BeamformingEngine, ResponseCurve, ResponsePoint};
pub use geo::{GeoPoint, SteeringSolution, SteeringSource};
pub use link::LinkMetrics;
pub use report::BeamReport;
pub use steering::ChannelMatrix;
pub use types::{Complex, MimoError, MimoResult};
pub use window::{window_vector, WindowKind};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::engine::{compute_response, ArrayGeometry, BeamformingEngine, ResponseCurve};
    pub use crate::geo::{resolve_steering, GeoPoint};
    pub use crate::sweep::{default_sweep, linspace};
    pub use crate::types::{MimoError, MimoResult};
    pub use crate::window::{window_vector, WindowKind};
}
