//! The per-pixel render loop and its illumination models.

mod illumination;
mod material;
mod renderer;
mod target;

pub use illumination::{IlluminationModel, ShadingGeometry};
pub use material::{FresnelParams, Material, MaterialModel};
pub use renderer::{RenderStats, Renderer, Scene};
pub use target::{RenderTarget, RowSink};
