use std::borrow::Cow;

use crate::color::SpectralCurve;
use crate::ink::InkLayer;
use crate::paper::PaperSurface;
use crate::vector::Point3;

/// Reflectance at or above this leaves no room for a Fresnel ramp.
const OPAQUE_REFLECTANCE: f64 = 1.0 - 1e-9;

/// Fresnel constants derived from a specular curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FresnelParams {
    /// Average specular reflectance at normal incidence
    pub reflectance: f64,
    /// Refractive index giving that reflectance
    pub index: f64,
}

impl FresnelParams {
    pub fn from_specular(specular: &SpectralCurve) -> Self {
        let reflectance = specular.mean().clamp(0.0, 1.0);
        let root = reflectance.sqrt();
        Self {
            reflectance,
            index: (1.0 + root) / (1.0 - root),
        }
    }

    /// True when the material reflects everything regardless of angle.
    pub fn is_opaque(&self) -> bool {
        self.reflectance >= OPAQUE_REFLECTANCE
    }
}

/// Optical terms at one surface point.
#[derive(Debug, Clone)]
pub struct Material<'a> {
    pub ambient: Cow<'a, SpectralCurve>,
    pub diffuse: Cow<'a, SpectralCurve>,
    pub specular: &'a SpectralCurve,
    /// Specular half-width angle in radians
    pub beta: f64,
    pub fresnel: FresnelParams,
}

/// Paper with optional ink on top, ready to be sampled per point.
#[derive(Debug, Clone)]
pub struct MaterialModel<'a> {
    paper: &'a PaperSurface,
    paper_fresnel: FresnelParams,
    ink: Option<(&'a InkLayer, FresnelParams)>,
}

impl<'a> MaterialModel<'a> {
    pub fn new(paper: &'a PaperSurface, ink: Option<&'a InkLayer>) -> Self {
        Self {
            paper,
            paper_fresnel: FresnelParams::from_specular(paper.specular()),
            ink: ink.map(|layer| (layer, FresnelParams::from_specular(layer.specular()))),
        }
    }

    /// Material seen at `p`.
    ///
    /// Where ink is present the paper's own ambient and diffuse terms are
    /// attenuated by `exp(-2 · amount · absorption)` and the ink makes up
    /// the rest; the specular term and half-angle become the ink's.
    pub fn at(&self, p: Point3) -> Material<'a> {
        let paper = self.paper;
        let bare = Material {
            ambient: Cow::Borrowed(paper.ambient()),
            diffuse: Cow::Borrowed(paper.diffuse()),
            specular: paper.specular(),
            beta: paper.specular_beta(p),
            fresnel: self.paper_fresnel,
        };

        let Some((ink, ink_fresnel)) = self.ink else {
            return bare;
        };
        let amount = ink.transfer(paper, p);
        if amount == 0.0 {
            return bare;
        }

        let paper_share = (-2.0 * amount * ink.absorption()).exp();
        Material {
            ambient: Cow::Owned(mix(paper.ambient(), ink.ambient(), paper_share)),
            diffuse: Cow::Owned(mix(paper.diffuse(), ink.diffuse(), paper_share)),
            specular: ink.specular(),
            beta: ink.specular_beta(),
            fresnel: ink_fresnel,
        }
    }
}

/// `share · a + (1 - share) · b`, per bin.
fn mix(a: &SpectralCurve, b: &SpectralCurve, share: f64) -> SpectralCurve {
    a.scaled(share).add(&b.scaled(1.0 - share))
}
