//! Ink deposited on paper through a footprint and a spreading kernel.

mod footprint;
mod layer;
mod record;

pub use footprint::{Footprint, FootprintShape};
pub use layer::InkLayer;
