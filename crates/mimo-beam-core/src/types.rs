//! Core types for beam pattern computation
//!
//! Antenna steering vectors and channel matrices are complex-valued; every
//! module in this crate works with the same double-precision alias so that
//! phase terms are never computed in single precision.

use num_complex::Complex64;

/// Type alias for complex numbers using f64 precision
pub type Complex = Complex64;

/// Result type for beamforming operations
pub type MimoResult<T> = Result<T, MimoError>;

/// Errors that can occur while computing a beam pattern
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MimoError {
    #[error("Invalid window kind: '{0}'. Must be one of uniform, hamming, hanning, blackman")]
    InvalidWindowKind(String),

    #[error("Invalid array geometry: Nt={nt}, Nr={nr}. Both antenna counts must be at least 1")]
    InvalidGeometry { nt: usize, nr: usize },

    #[error("Angle sweep is empty")]
    EmptySweep,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MimoError::InvalidWindowKind("kaiser".to_string());
        assert!(err.to_string().contains("kaiser"));

        let err = MimoError::InvalidGeometry { nt: 0, nr: 4 };
        assert!(err.to_string().contains("Nt=0"));
        assert!(err.to_string().contains("Nr=4"));

        assert_eq!(MimoError::EmptySweep.to_string(), "Angle sweep is empty");
    }
}
