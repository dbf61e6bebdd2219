use super::material::{FresnelParams, Material};
use crate::color::SpectralCurve;
use crate::facet::Facet;
use crate::light::LightSource;
use crate::vector::{half_vector, Vec3};

/// Below this `N·E` the Blinn model falls back to full reflection.
const GRAZING_VIEW: f64 = 0.0001;

/// The local illumination equation applied at every pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IlluminationModel {
    /// Ambient, Lambertian diffuse and a Phong highlight
    #[default]
    Phong,
    /// Torrance-Sparrow style specular with the given facet distribution
    /// and a Fresnel term
    Blinn(Facet),
}

/// Unit vectors at the shaded point, all pointing away from the surface.
#[derive(Debug, Clone, Copy)]
pub struct ShadingGeometry {
    pub normal: Vec3,
    pub light: Vec3,
    pub view: Vec3,
}

impl IlluminationModel {
    /// Reflected spectrum for `material` lit by `light`.
    ///
    /// A shadowed point only receives ambient light.
    pub fn shade(
        &self,
        light: &LightSource,
        material: &Material<'_>,
        geometry: ShadingGeometry,
        shadowed: bool,
    ) -> SpectralCurve {
        let ambient = material.ambient.multiply(light.ambient());
        if shadowed {
            return ambient;
        }
        match *self {
            IlluminationModel::Phong => phong(ambient, light, material, geometry),
            IlluminationModel::Blinn(facet) => blinn(ambient, light, material, geometry, facet),
        }
    }
}

fn phong(
    mut color: SpectralCurve,
    light: &LightSource,
    material: &Material<'_>,
    g: ShadingGeometry,
) -> SpectralCurve {
    let shape = Facet::Phong.shape_from_half_angle(material.beta);
    let d = Facet::Phong.evaluate(g.normal, g.light, g.view, shape);
    let nl = g.normal.dot(g.light);

    let diffuse = material.diffuse.values();
    let specular = material.specular.values();
    let direct = light.direct().values();
    for (i, out) in color.values_mut().iter_mut().enumerate() {
        *out += direct[i] * (diffuse[i] * nl + specular[i] * d);
    }
    color
}

fn blinn(
    mut color: SpectralCurve,
    light: &LightSource,
    material: &Material<'_>,
    g: ShadingGeometry,
    facet: Facet,
) -> SpectralCurve {
    let direct = light.direct().values();
    let nv = g.normal.dot(g.view);
    if nv <= GRAZING_VIEW {
        for (out, &l) in color.values_mut().iter_mut().zip(direct) {
            *out += l;
        }
        return color;
    }

    let nl = g.normal.dot(g.light);
    let shape = facet.shape_from_half_angle(material.beta);
    let d = facet.evaluate(g.normal, g.light, g.view, shape);
    let attenuation = geometric_attenuation(g);
    let fresnel = fresnel(material.specular, material.fresnel, g);

    let diffuse = material.diffuse.values();
    for (i, out) in color.values_mut().iter_mut().enumerate() {
        *out += direct[i] * (diffuse[i] * nl + d * attenuation * fresnel[i] / nv);
    }
    color
}

/// Torrance-Sparrow masking and shadowing of V-shaped grooves.
fn geometric_attenuation(g: ShadingGeometry) -> f64 {
    let Some(h) = half_vector(g.view, g.light) else {
        return 0.0;
    };
    let vh = g.view.dot(h);
    if vh <= 0.0 {
        return 0.0;
    }
    let nh = g.normal.dot(h);
    let masking = 2.0 * nh * g.normal.dot(g.view) / vh;
    let shadowing = 2.0 * nh * g.normal.dot(g.light) / vh;
    1.0_f64.min(masking).min(shadowing)
}

/// Per-wavelength Fresnel reflectance.
///
/// The dielectric reflectance for the actual incidence angle is computed
/// once from the material's mean index; each bin then moves from its
/// normal-incidence value toward 1 in proportion.
fn fresnel(specular: &SpectralCurve, params: FresnelParams, g: ShadingGeometry) -> Vec<f64> {
    let ones = || vec![1.0; specular.len()];
    if params.is_opaque() {
        return ones();
    }
    let (ni, nt) = (1.0, params.index);
    let Some(t) = g.light.refract(g.normal, ni, nt) else {
        return ones();
    };

    let nl = g.normal.dot(g.light);
    let nt_dot = g.normal.dot(t);
    let rpp = (ni * nl + nt * nt_dot) / (ni * nl - nt * nt_dot);
    let rpl = (nt * nl + ni * nt_dot) / (nt * nl - ni * nt_dot);
    let r = (rpl * rpl + rpp * rpp) / 2.0;
    let ramp = (r - params.reflectance) / (1.0 - params.reflectance);

    specular
        .values()
        .iter()
        .map(|&ks| (ks + (1.0 - ks) * ramp).max(0.0))
        .collect()
}
