//! Paper as a tiled micro-roughness height field.
//!
//! The surface answers geometric queries (normal, self-shadowing, the
//! point actually seen along an oblique view) and the ink-facing queries
//! (contact with the printing form, depth below the highest peak).

mod record;
mod surface;

pub use surface::PaperSurface;
