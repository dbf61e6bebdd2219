use proof_render::{Lab, Rgb8, SpectralCurve, Xyz};

use super::ProofPipeline;

/// One material or light curve seen through the colour system
#[derive(Debug, Clone, PartialEq)]
pub struct SwatchEntry {
    pub name: &'static str,
    pub xyz: Xyz,
    pub lab: Lab,
    pub rgb: Rgb8,
}

/// Colour of every curve in the loaded descriptions: paper terms, ink
/// terms when ink is loaded, then the two light curves.
pub fn swatches(pipeline: &ProofPipeline) -> Vec<SwatchEntry> {
    let paper = pipeline.paper();
    let light = pipeline.light();

    let mut curves: Vec<(&'static str, &SpectralCurve)> = vec![
        ("paper specular", paper.specular()),
        ("paper diffuse", paper.diffuse()),
        ("paper ambient", paper.ambient()),
    ];
    if let Some(ink) = pipeline.ink() {
        curves.push(("ink specular", ink.specular()));
        curves.push(("ink diffuse", ink.diffuse()));
        curves.push(("ink ambient", ink.ambient()));
    }
    curves.push(("light direct", light.direct()));
    curves.push(("light ambient", light.ambient()));

    let color = pipeline.color();
    curves
        .into_iter()
        .map(|(name, curve)| {
            let xyz = color.to_xyz(curve);
            SwatchEntry {
                name,
                xyz,
                lab: color.xyz_to_lab(xyz),
                rgb: color.to_rgb(curve),
            }
        })
        .collect()
}
