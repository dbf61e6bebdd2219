//! proof-render: spectral soft proofs of ink on rough paper
//!
//! This library predicts what a print will look like by simulating the
//! sheet it is printed on. Paper is a measured micro-roughness height
//! field, ink is a layer deposited where the paper touches the printing
//! form, and a point light illuminates both. Every output pixel evaluates
//! a spectral illumination equation once and is converted to 8-bit RGB.
//!
//! # Quick Start
//!
//! Components are built from line-oriented text descriptions and then
//! borrowed by a [`Renderer`]:
//!
//! ```
//! use std::io::Cursor;
//! use proof_render::{
//!     ColorSystem, LightSource, PaperSurface, Primaries, RenderTarget, Renderer, Scene,
//! };
//!
//! let color = ColorSystem::new(Primaries::NTSC).unwrap();
//! let paper = PaperSurface::from_reader(
//!     Cursor::new("p 20\nm 10\nr 3 3\n128 128 128\n128 128 128\n128 128 128\n"),
//!     &color,
//! )
//! .unwrap();
//! let light = LightSource::from_reader(Cursor::new("X 0\nY 0\nZ 1000\n"), &color).unwrap();
//!
//! let scene = Scene { color: &color, paper: &paper, ink: None, light: &light };
//! let mut raster: Vec<u8> = Vec::new();
//! let stats = Renderer::new(scene, RenderTarget::new(4, 4, 20.0))
//!     .render(&mut raster)
//!     .unwrap();
//!
//! assert_eq!(stats.width, 4);
//! assert_eq!(raster.len(), 4 * 4 * 3);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! nominal point (column·dot, row·dot)
//!     |
//!     v
//! PaperSurface::visible     (march toward the viewer, find the occluder)
//!     |
//!     +---> PaperSurface::normal       (central differences)
//!     +---> PaperSurface::self_shadow  (march toward the light)
//!     +---> MaterialModel::at          (paper terms, or paper/ink blend
//!     |                                 weighted by InkLayer::transfer)
//!     v
//! IlluminationModel::shade  (Phong, or Blinn with a chosen Facet and Fresnel)
//!     |
//!     v
//! ColorSystem::to_rgb       (CIE XYZ, primaries matrix, gamut mapping)
//!     |
//!     v
//! RowSink                   (rows in ascending order)
//! ```
//!
//! # Units
//!
//! Lengths are micrometres throughout, except where a description field
//! says millimetres (ink location, box footprint size). Angles are
//! radians, except the view tilt which is degrees. Spectral curves hold
//! one value per nanometre.
//!
//! # Description Format
//!
//! The first non-blank character of each line is a tag choosing the
//! record; the numbers on the line are its payload. Curve records are
//! followed by `wavelength value` lines, grid records by their rows. See
//! [`description`] for the shared reader and each component's
//! `from_reader` for its tags.
//!
//! # Concurrency
//!
//! Every component is read-only once built. With the default `parallel`
//! feature, bands of rows are computed on the rayon pool and written to
//! the sink in order, so the output is identical to a serial render.

pub mod color;
pub mod description;
mod error;
pub mod facet;
pub mod grid;
pub mod ink;
pub mod light;
pub mod paper;
pub mod render;
pub mod vector;

#[cfg(test)]
mod domain_tests;

pub use color::{
    ColorError, ColorSystem, GamutMapping, Lab, LinearRgb, Primaries, Rgb8, SpectralCurve,
    WavelengthRange, Xyz,
};
pub use description::{DescriptionError, DescriptionErrorKind};
pub use error::RenderError;
pub use facet::Facet;
pub use ink::{Footprint, FootprintShape, InkLayer};
pub use light::{LightError, LightSource};
pub use paper::PaperSurface;
pub use render::{IlluminationModel, RenderStats, RenderTarget, Renderer, RowSink, Scene};
pub use vector::{Point3, Vec3};
