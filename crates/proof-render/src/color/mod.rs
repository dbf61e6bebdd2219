//! Spectral colour engine
//!
//! Materials and lights are described by [`SpectralCurve`]s sampled every
//! nanometre. A [`ColorSystem`] turns a curve into displayable RGB:
//!
//! 1. integrate against the CIE 1931 matching functions to get [`Xyz`],
//!    normalized so an all-ones curve has `Y = 1`
//! 2. transform to linear RGB in the active [`Primaries`]
//! 3. bring the result into gamut with a [`GamutMapping`]
//! 4. quantize to 8 bits by truncation
//!
//! # Example
//!
//! ```
//! use proof_render::color::{ColorSystem, Primaries, SpectralCurve};
//!
//! let colors = ColorSystem::new(Primaries::default()).unwrap();
//! let black = SpectralCurve::filled(colors.range(), 0.0);
//! assert_eq!(colors.to_rgb(&black).to_array(), [0, 0, 0]);
//! ```

mod cie;
mod curve;
mod error;
mod gamut;
mod matrix;
mod system;
mod tristimulus;

pub use curve::{SpectralCurve, WavelengthRange, NEUTRAL_VALUE};
pub use error::ColorError;
pub use gamut::GamutMapping;
pub use matrix::Mat3;
pub use system::{Chromaticity, ColorSystem, Primaries};
pub use tristimulus::{Lab, LinearRgb, Rgb8, Xyz};
