//! Named choices shared by the YAML config and the command line.

use clap::ValueEnum;
use proof_render::color::Chromaticity;
use proof_render::{Facet, GamutMapping, IlluminationModel, Primaries};
use serde::{Deserialize, Serialize};

/// Which illumination equation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ModelChoice {
    #[default]
    Phong,
    Blinn,
}

/// Microfacet family for the Blinn model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FacetChoice {
    #[default]
    Blinn,
    Gaussian,
    TrowbridgeReitz,
    Cook,
}

impl From<FacetChoice> for Facet {
    fn from(choice: FacetChoice) -> Self {
        match choice {
            FacetChoice::Blinn => Facet::Blinn,
            FacetChoice::Gaussian => Facet::Gaussian,
            FacetChoice::TrowbridgeReitz => Facet::TrowbridgeReitz,
            FacetChoice::Cook => Facet::Cook,
        }
    }
}

impl ModelChoice {
    /// The core illumination model, with `facets` used only for Blinn.
    pub fn model(self, facets: FacetChoice) -> IlluminationModel {
        match self {
            ModelChoice::Phong => IlluminationModel::Phong,
            ModelChoice::Blinn => IlluminationModel::Blinn(facets.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GamutChoice {
    #[default]
    Desaturate,
    Clamp,
    Scale,
}

impl From<GamutChoice> for GamutMapping {
    fn from(choice: GamutChoice) -> Self {
        match choice {
            GamutChoice::Desaturate => GamutMapping::Desaturate,
            GamutChoice::Clamp => GamutMapping::Clamp,
            GamutChoice::Scale => GamutMapping::Scale,
        }
    }
}

/// PNG compression level. `rle` selects run-length encoding of filtered rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CompressionChoice {
    #[default]
    Fast,
    Default,
    Best,
    Rle,
}

/// Custom RGB primaries as `[x, y]` chromaticity pairs.
///
/// ```yaml
/// primaries:
///   red: [0.64, 0.33]
///   green: [0.30, 0.60]
///   blue: [0.15, 0.06]
///   white: [0.3127, 0.3290]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct PrimariesConfig {
    pub red: [f64; 2],
    pub green: [f64; 2],
    pub blue: [f64; 2],
    pub white: [f64; 2],
}

impl From<PrimariesConfig> for Primaries {
    fn from(config: PrimariesConfig) -> Self {
        let xy = |[x, y]: [f64; 2]| Chromaticity::new(x, y);
        Primaries {
            red: xy(config.red),
            green: xy(config.green),
            blue: xy(config.blue),
            white: xy(config.white),
        }
    }
}
