//! Error type for colour system construction.

use std::fmt;

/// Error type for building a [`ColorSystem`](super::ColorSystem).
///
/// Returned when the requested primaries cannot define a colour space or
/// the wavelength range falls outside the tabulated observer data.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorError {
    /// The white point has no luminance to normalize against
    InvalidWhitePoint {
        /// The offending white chromaticity y coordinate
        y: f64,
    },
    /// The primaries matrix (or its inverse) hit a zero pivot
    SingularMatrix,
    /// Wavelength range is empty or not covered by the observer table
    UnsupportedRange {
        /// Requested lower bound in nm
        min: u32,
        /// Requested upper bound in nm
        max: u32,
    },
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::InvalidWhitePoint { y } => {
                write!(f, "white point luminance must be positive (y = {})", y)
            }
            ColorError::SingularMatrix => write!(f, "primaries matrix is singular"),
            ColorError::UnsupportedRange { min, max } => {
                write!(f, "unsupported wavelength range {}..={} nm", min, max)
            }
        }
    }
}

impl std::error::Error for ColorError {}
