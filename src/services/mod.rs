pub mod batch;
pub mod proof_pipeline;
pub mod swatch;

pub use batch::{run_batch, run_script, BatchReport};
pub use proof_pipeline::{render_proof, ProofPipeline, ProofResult};
pub use swatch::{swatches, SwatchEntry};
