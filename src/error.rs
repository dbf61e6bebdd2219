use std::fmt;
use std::path::PathBuf;

use proof_render::{ColorError, DescriptionError, RenderError};
use thiserror::Error;

/// Which description file a load error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Paper,
    Ink,
    Light,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Component::Paper => "paper",
            Component::Ink => "ink",
            Component::Light => "light",
        })
    }
}

#[derive(Debug, Error)]
pub enum ProofError {
    #[error("Cannot open {component} description {}: {source}", .path.display())]
    Open {
        component: Component,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid {component} description {}: {source}", .path.display())]
    Description {
        component: Component,
        path: PathBuf,
        source: DescriptionError,
    },

    #[error("Color system error: {0}")]
    Color(#[from] ColorError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Cannot write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("PNG encode error: {0}")]
    PngEncode(#[from] png::EncodingError),

    #[error("Raster too large: {width}x{height}")]
    RasterTooLarge { width: usize, height: usize },

    #[error("Config error in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("Cannot read batch script {}: {source}", .path.display())]
    Script {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ProofError {
    /// Whether the error happened before any pixel was rendered, while
    /// reading descriptions or validating settings.
    pub fn is_setup(&self) -> bool {
        matches!(
            self,
            ProofError::Open { .. }
                | ProofError::Description { .. }
                | ProofError::Color(_)
                | ProofError::Config { .. }
                | ProofError::RasterTooLarge { .. }
        )
    }
}
