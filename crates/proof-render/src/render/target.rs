use std::io;

use super::illumination::IlluminationModel;
use crate::error::RenderError;
use crate::vector::Vec3;

/// Micrometres per millimetre.
const MICROMETRE: f64 = 1000.0;

/// Consumer of finished raster rows.
///
/// Rows arrive exactly once each, in ascending order, as packed 8-bit RGB
/// triples.
pub trait RowSink {
    fn write_row(&mut self, row: usize, rgb: &[u8]) -> io::Result<()>;
}

/// Collects the raster in memory, row after row.
impl RowSink for Vec<u8> {
    fn write_row(&mut self, _row: usize, rgb: &[u8]) -> io::Result<()> {
        self.extend_from_slice(rgb);
        Ok(())
    }
}

impl<S: RowSink + ?Sized> RowSink for &mut S {
    fn write_row(&mut self, row: usize, rgb: &[u8]) -> io::Result<()> {
        (**self).write_row(row, rgb)
    }
}

/// What to render: raster size, pixel pitch, viewing tilt and model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderTarget {
    /// Pixels per row
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Pixel pitch in µm
    pub dot_size: f64,
    /// View tilt from the normal toward +x, in degrees
    pub view_angle: f64,
    pub model: IlluminationModel,
    /// Whether the ink layer takes part
    pub use_ink: bool,
    /// Render bands of rows on the thread pool when available
    pub parallel: bool,
}

impl RenderTarget {
    pub fn new(width: usize, height: usize, dot_size: f64) -> Self {
        Self {
            width,
            height,
            dot_size,
            view_angle: 0.0,
            model: IlluminationModel::default(),
            use_ink: false,
            parallel: true,
        }
    }

    /// Target covering `width_mm × height_mm`, as many whole dots as fit.
    pub fn from_size_mm(width_mm: f64, height_mm: f64, dot_size: f64) -> Self {
        let pixels = |mm: f64| (mm * MICROMETRE / dot_size).max(0.0) as usize;
        Self::new(pixels(width_mm), pixels(height_mm), dot_size)
    }

    pub fn with_view_angle(mut self, degrees: f64) -> Self {
        self.view_angle = degrees;
        self
    }

    pub fn with_model(mut self, model: IlluminationModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_ink(mut self, use_ink: bool) -> Self {
        self.use_ink = use_ink;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Unit vector toward the viewer.
    pub fn view_direction(&self) -> Result<Vec3, RenderError> {
        if !(-90.0..=90.0).contains(&self.view_angle) {
            return Err(RenderError::InvalidViewAngle {
                degrees: self.view_angle,
            });
        }
        let theta = self.view_angle.to_radians();
        Ok(Vec3::new(theta.sin(), 0.0, theta.cos()))
    }

    /// Check the target describes a renderable raster.
    pub fn validate(&self) -> Result<(), RenderError> {
        if !(self.dot_size > 0.0 && self.dot_size.is_finite()) {
            return Err(RenderError::InvalidDotSize {
                dot_size: self.dot_size,
            });
        }
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::EmptyRaster {
                width: self.width,
                height: self.height,
            });
        }
        self.view_direction().map(|_| ())
    }
}
