//! Error type for a render run.

use std::fmt;
use std::io;

use crate::light::LightError;

/// Error type for [`Renderer::render`](crate::Renderer::render).
#[derive(Debug)]
pub enum RenderError {
    /// The row sink rejected a finished row
    Sink {
        /// Index of the row being written
        row: usize,
        source: io::Error,
    },
    /// The light direction is undefined for this scene
    Light(LightError),
    /// View tilt outside -90..=90 degrees
    InvalidViewAngle { degrees: f64 },
    /// Output pixel pitch is zero, negative or not finite
    InvalidDotSize { dot_size: f64 },
    /// The raster has no pixels
    EmptyRaster { width: usize, height: usize },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Sink { row, source } => {
                write!(f, "failed to write row {}: {}", row, source)
            }
            RenderError::Light(err) => write!(f, "{}", err),
            RenderError::InvalidViewAngle { degrees } => {
                write!(f, "view angle {} is outside -90..=90 degrees", degrees)
            }
            RenderError::InvalidDotSize { dot_size } => {
                write!(f, "dot size must be positive, got {}", dot_size)
            }
            RenderError::EmptyRaster { width, height } => {
                write!(f, "raster {}x{} has no pixels", width, height)
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Sink { source, .. } => Some(source),
            RenderError::Light(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LightError> for RenderError {
    fn from(err: LightError) -> Self {
        RenderError::Light(err)
    }
}
