use std::path::{Path, PathBuf};

use proof_render::{ColorError, ColorSystem, Primaries, RenderTarget};
use serde::{Deserialize, Serialize};

use super::{CompressionChoice, FacetChoice, GamutChoice, ModelChoice, PrimariesConfig};
use crate::error::ProofError;

/// Environment variable naming the config file when `--config` is absent
pub const CONFIG_ENV: &str = "SOFTPROOF_CONFIG";

/// Config file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "softproof.yaml";

/// Render settings loaded from softproof.yaml and overridden on the command line
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProofConfig {
    /// Picture width in millimetres
    #[serde(default = "default_size_mm")]
    pub width_mm: f64,

    /// Picture height in millimetres
    #[serde(default = "default_size_mm")]
    pub height_mm: f64,

    /// Output pixel pitch in µm
    #[serde(default = "default_dot_size")]
    pub dot_size: f64,

    #[serde(default = "default_output")]
    pub output: PathBuf,

    #[serde(default = "default_paper")]
    pub paper: PathBuf,

    #[serde(default = "default_ink")]
    pub ink: PathBuf,

    #[serde(default = "default_light")]
    pub light: PathBuf,

    /// Print the ink layer on the paper
    #[serde(default)]
    pub use_ink: bool,

    #[serde(default)]
    pub model: ModelChoice,

    /// View tilt toward +x in degrees
    #[serde(default)]
    pub view_angle: f64,

    /// Microfacet family used by the Blinn model
    #[serde(default)]
    pub facets: FacetChoice,

    #[serde(default)]
    pub gamut: GamutChoice,

    #[serde(default)]
    pub compression: CompressionChoice,

    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Custom primaries (NTSC when absent)
    #[serde(default)]
    pub primaries: Option<PrimariesConfig>,
}

fn default_size_mm() -> f64 {
    10.0
}

fn default_dot_size() -> f64 {
    20.0
}

fn default_output() -> PathBuf {
    PathBuf::from("picture.png")
}

fn default_paper() -> PathBuf {
    PathBuf::from("paper.p")
}

fn default_ink() -> PathBuf {
    PathBuf::from("ink.i")
}

fn default_light() -> PathBuf {
    PathBuf::from("light.l")
}

fn default_parallel() -> bool {
    true
}

impl Default for ProofConfig {
    fn default() -> Self {
        Self {
            width_mm: default_size_mm(),
            height_mm: default_size_mm(),
            dot_size: default_dot_size(),
            output: default_output(),
            paper: default_paper(),
            ink: default_ink(),
            light: default_light(),
            use_ink: false,
            model: ModelChoice::default(),
            view_angle: 0.0,
            facets: FacetChoice::default(),
            gamut: GamutChoice::default(),
            compression: CompressionChoice::default(),
            parallel: default_parallel(),
            primaries: None,
        }
    }
}

impl ProofConfig {
    /// Which config file to read, if any.
    ///
    /// An explicit path wins, then `SOFTPROOF_CONFIG`, then softproof.yaml
    /// in the working directory when it exists.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        local.exists().then_some(local)
    }

    /// Load the config file chosen by [`ProofConfig::locate`].
    ///
    /// A file that cannot be read is an error. A file that does not parse
    /// is reported and replaced by the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ProofError> {
        let Some(path) = Self::locate(explicit) else {
            tracing::debug!("No config file, using defaults");
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(&path).map_err(|e| ProofError::Config {
            path: path.clone(),
            message: e.to_string(),
        })?;

        match Self::parse(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "Loaded configuration");
                Ok(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), %e, "Failed to parse config, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to an all-default map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn paper_path(&self) -> PathBuf {
        with_default_extension(&self.paper, "p")
    }

    pub fn ink_path(&self) -> PathBuf {
        with_default_extension(&self.ink, "i")
    }

    pub fn light_path(&self) -> PathBuf {
        with_default_extension(&self.light, "l")
    }

    pub fn output_path(&self) -> PathBuf {
        with_default_extension(&self.output, "png")
    }

    pub fn primaries(&self) -> Primaries {
        self.primaries.map(Primaries::from).unwrap_or_default()
    }

    pub fn color_system(&self) -> Result<ColorSystem, ColorError> {
        Ok(ColorSystem::new(self.primaries())?.with_gamut(self.gamut.into()))
    }

    /// The raster and viewing parameters for the render loop.
    pub fn target(&self) -> RenderTarget {
        RenderTarget::from_size_mm(self.width_mm, self.height_mm, self.dot_size)
            .with_view_angle(self.view_angle)
            .with_model(self.model.model(self.facets))
            .with_ink(self.use_ink)
            .with_parallel(self.parallel)
    }
}

/// Append `.ext` when `path` has no extension.
pub fn with_default_extension(path: &Path, ext: &str) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(ext)
    }
}
