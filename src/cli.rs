//! Render options shared by the `render` command and batch script lines.

use std::path::PathBuf;

use clap::Args;

use crate::models::{CompressionChoice, FacetChoice, GamutChoice, ModelChoice, ProofConfig};

/// Overrides applied on top of the loaded [`ProofConfig`].
///
/// Every option is optional so that batch lines only change what they name.
#[derive(Debug, Clone, Default, PartialEq, Args)]
pub struct RenderArgs {
    /// Picture width in millimetres
    #[arg(short = 'x', long, value_name = "MM")]
    pub width_mm: Option<f64>,

    /// Picture height in millimetres
    #[arg(short = 'y', long, value_name = "MM")]
    pub height_mm: Option<f64>,

    /// Output pixel pitch in micrometres
    #[arg(short = 'd', long, value_name = "UM")]
    pub dot_size: Option<f64>,

    /// Output PNG file (".png" is appended when there is no extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Paper description (".p" is appended when there is no extension)
    #[arg(short, long)]
    pub paper: Option<PathBuf>,

    /// Ink description (".i" is appended); also turns ink on
    #[arg(short, long)]
    pub ink: Option<PathBuf>,

    /// Print the ink layer
    #[arg(short = 'I', long)]
    pub use_ink: bool,

    /// Light description (".l" is appended when there is no extension)
    #[arg(short, long)]
    pub light: Option<PathBuf>,

    /// Use the Phong illumination model
    #[arg(short = 'P', long, conflicts_with = "blinn")]
    pub phong: bool,

    /// Use the Blinn illumination model
    #[arg(short = 'B', long)]
    pub blinn: bool,

    /// Viewing angle in degrees, between -90 and 90
    #[arg(short = 'V', long, value_name = "DEGREES", allow_hyphen_values = true)]
    pub view_angle: Option<f64>,

    /// Microfacet distribution for the Blinn model
    #[arg(long, value_enum)]
    pub facets: Option<FacetChoice>,

    /// How out-of-gamut colours are brought into range
    #[arg(long, value_enum)]
    pub gamut: Option<GamutChoice>,

    /// PNG compression
    #[arg(long, value_enum)]
    pub compression: Option<CompressionChoice>,

    /// Render on a single thread
    #[arg(long)]
    pub no_parallel: bool,
}

impl RenderArgs {
    /// Write every given option into `config`, leaving the rest untouched.
    pub fn apply(&self, config: &mut ProofConfig) {
        if let Some(v) = self.width_mm {
            config.width_mm = v;
        }
        if let Some(v) = self.height_mm {
            config.height_mm = v;
        }
        if let Some(v) = self.dot_size {
            config.dot_size = v;
        }
        if let Some(ref v) = self.output {
            config.output = v.clone();
        }
        if let Some(ref v) = self.paper {
            config.paper = v.clone();
        }
        if let Some(ref v) = self.ink {
            config.ink = v.clone();
            config.use_ink = true;
        }
        if self.use_ink {
            config.use_ink = true;
        }
        if let Some(ref v) = self.light {
            config.light = v.clone();
        }
        if self.phong {
            config.model = ModelChoice::Phong;
        }
        if self.blinn {
            config.model = ModelChoice::Blinn;
        }
        if let Some(v) = self.view_angle {
            config.view_angle = v;
        }
        if let Some(v) = self.facets {
            config.facets = v;
        }
        if let Some(v) = self.gamut {
            config.gamut = v;
        }
        if let Some(v) = self.compression {
            config.compression = v;
        }
        if self.no_parallel {
            config.parallel = false;
        }
    }
}
