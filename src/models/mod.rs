pub mod choices;
pub mod config;

pub use choices::{CompressionChoice, FacetChoice, GamutChoice, ModelChoice, PrimariesConfig};
pub use config::{ProofConfig, CONFIG_ENV, DEFAULT_CONFIG_FILE};
