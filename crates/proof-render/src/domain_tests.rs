//! Domain-critical regression tests for proof-render.
//!
//! Each test pins down one physical or numerical property the renderer
//! relies on and documents the regression it guards against.

use std::io::Cursor;

use crate::color::{ColorSystem, GamutMapping, LinearRgb, Mat3, Primaries, SpectralCurve};
use crate::description::LineSource;
use crate::facet::Facet;
use crate::ink::InkLayer;
use crate::light::LightSource;
use crate::paper::PaperSurface;
use crate::render::{RenderTarget, Renderer, Scene};
use crate::vector::{Point3, Vec3};

fn ntsc() -> ColorSystem {
    ColorSystem::new(Primaries::NTSC).unwrap()
}

fn flat_paper(color: &ColorSystem, level: u8) -> PaperSurface {
    let row = format!("{level} {level} {level} {level} {level}\n");
    let text = format!(
        "p 20\nm 10\nc 5\nS 0.5 0.3\n380 0.1\n780 0.1\nD 0.8\n380 1\n780 1\nA 0.4\n380 1\n780 1\n\
         r 5 5\n{row}{row}{row}{row}{row}"
    );
    PaperSurface::from_reader(Cursor::new(text), color).unwrap()
}

fn max_deviation(a: &Mat3, b: &Mat3) -> f64 {
    a.0.iter()
        .flatten()
        .zip(b.0.iter().flatten())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

// ========================================================================
// Color engine
// ========================================================================

/// If this breaks, it means: the Gauss-Jordan inverse or the primaries
/// matrix built by Gaussian elimination has lost precision, so every
/// rendered color is skewed by the round trip through XYZ.
#[test]
fn test_primaries_matrix_inverse_round_trip() {
    for primaries in [Primaries::NTSC, Primaries::REC709] {
        let system = ColorSystem::new(primaries).unwrap();
        let m = *system.rgb_to_xyz_matrix();
        let inv = *system.xyz_to_rgb_matrix();

        let product = m.multiply(&inv);
        assert!(
            max_deviation(&product, &Mat3::IDENTITY) < 1e-9,
            "REGRESSION: M x inv(M) deviates from identity: {:?}",
            product
        );

        let back = inv.inverse().unwrap();
        assert!(
            max_deviation(&back, &m) < 1e-9,
            "REGRESSION: inv(inv(M)) deviates from M: {:?}",
            back
        );
    }
}

/// If this breaks, it means: the normalization scale no longer makes a
/// perfect reflector integrate to Y = 1, or the gamut mapping lost its
/// white clip, so unprinted paper under white light turns grey or tinted.
#[test]
fn test_unit_reflector_is_white() {
    let system = ntsc();
    let ones = SpectralCurve::filled(system.range(), 1.0);
    let rgb = system.to_rgb(&ones).to_array();
    for channel in rgb {
        assert!(
            channel >= 254,
            "REGRESSION: all-ones reflector rendered as {:?}, expected ~(255, 255, 255)",
            rgb
        );
    }
}

/// If this breaks, it means: curve interpolation is off by one bin or
/// interpolates in the wrong direction, shifting every measured spectrum.
#[test]
fn test_two_point_curve_is_linear_ramp() {
    let system = ntsc();
    let mut src = LineSource::new(Cursor::new("380 0.25\n780 0.75\n"));
    let curve = system.read_curve(&mut src).unwrap();
    assert_eq!(curve.len(), 401);
    for (i, &v) in curve.values().iter().enumerate() {
        let expected = 0.25 + 0.5 * i as f64 / 400.0;
        assert!(
            (v - expected).abs() < 1e-12,
            "REGRESSION: bin {} holds {}, expected {}",
            i,
            v,
            expected
        );
    }
}

/// If this breaks, it means: the default gamut mapping no longer collapses
/// to pure black/white at the ends of the grey axis, or it started
/// clamping channels independently, which shifts hue on saturated inks.
#[test]
fn test_desaturating_gamut_clip() {
    let map = GamutMapping::Desaturate;
    assert_eq!(
        map.apply(LinearRgb::new(1.5, 1.5, 1.5)),
        LinearRgb::new(1.0, 1.0, 1.0)
    );
    assert_eq!(
        map.apply(LinearRgb::new(-0.5, -0.5, -0.5)),
        LinearRgb::new(0.0, 0.0, 0.0)
    );

    let out = map.apply(LinearRgb::new(1.2, 0.5, 0.5));
    let clamped = GamutMapping::Clamp.apply(LinearRgb::new(1.2, 0.5, 0.5));
    assert!(out.in_gamut(), "REGRESSION: {:?} not in gamut", out);
    assert!(
        out.g > clamped.g && out.b > clamped.b,
        "REGRESSION: desaturation should lift the other channels toward grey, got {:?}",
        out
    );
    assert!((out.r - 0.9999).abs() < 1e-12);
    // The grey level is preserved.
    assert!(((out.r + out.g + out.b) / 3.0 - 2.2 / 3.0).abs() < 1e-12);
}

// ========================================================================
// Paper geometry
// ========================================================================

/// If this breaks, it means: the shadow march compares against the wrong
/// base height or starts on the test point itself, so flat paper shadows
/// itself and the whole sheet goes dark under any oblique light.
#[test]
fn test_flat_paper_never_self_shadows() {
    let system = ntsc();
    let paper = flat_paper(&system, 128);
    let lights = [
        Vec3::new(1.0, 0.0, 0.1),
        Vec3::new(-1.0, 0.3, 0.05),
        Vec3::new(0.2, -1.0, 1.0),
        Vec3::new(0.5, 0.5, 3.0),
    ];
    for light in lights {
        let light = light.normalize().unwrap();
        for i in 0..25 {
            let p = Point3::new(i as f64 * 13.0, i as f64 * 7.0, 0.0);
            assert!(
                !paper.self_shadow(light, p),
                "REGRESSION: flat paper shadowed at {:?} for light {:?}",
                p,
                light
            );
        }
    }
}

/// If this breaks, it means: height quantization and denormalization no
/// longer agree on the `cell · Range / 255` scale.
#[test]
fn test_height_quantization_round_trip() {
    let system = ntsc();
    let paper = flat_paper(&system, 0);
    let step = paper.max_range() / 255.0;
    for i in 0..=1000 {
        let h = paper.max_range() * i as f64 / 1000.0;
        let back = paper.cell_height(paper.quantize(h));
        assert!(
            (back - h).abs() <= step,
            "REGRESSION: height {} quantized back to {}",
            h,
            back
        );
    }
}

// ========================================================================
// Ink transfer
// ========================================================================

/// If this breaks, it means: the kernel's reach lets ink bleed outside the
/// footprint's bounding box, so a dot prints a halo on blank paper.
#[test]
fn test_transfer_zero_outside_footprint_for_every_shape() {
    let system = ntsc();
    let paper = flat_paper(&system, 255);
    let kernel = "c 5 5\n1 1 1 1 1\n1 1 1 1 1\n1 1 1 1 1\n1 1 1 1 1\n1 1 1 1 1\n";
    let footprints = [
        ("i DOT 1\n", (10.0, 10.0)),
        ("i BOX 0.05 0.03 1\n", (50.0, 30.0)),
        ("i MATRIX 3 2 1\n111\n101\n", (30.0, 20.0)),
    ];

    for (footprint, (width, height)) in footprints {
        let text = format!("p 10\nl 1 2\n{footprint}{kernel}");
        let ink = InkLayer::from_reader(Cursor::new(text), &system).unwrap();
        let origin = Point3::new(1000.0, 2000.0, 0.0);

        let inside = origin + Point3::new(width / 2.0, height / 2.0, 0.0);
        assert!(
            ink.transfer(&paper, inside) > 0.0,
            "{footprint:?}: no ink inside the footprint"
        );

        let outside = [
            origin + Point3::new(-0.5, height / 2.0, 0.0),
            origin + Point3::new(width + 0.5, height / 2.0, 0.0),
            origin + Point3::new(width / 2.0, -0.5, 0.0),
            origin + Point3::new(width / 2.0, height + 0.5, 0.0),
            origin + Point3::new(width + 20.0, height + 20.0, 0.0),
        ];
        for p in outside {
            assert_eq!(
                ink.transfer(&paper, p),
                0.0,
                "REGRESSION: {footprint:?} deposited ink at {p:?}, outside its bounding box"
            );
        }
    }
}

// ========================================================================
// Microfacet distributions
// ========================================================================

/// If this breaks, it means: a shape parameter no longer matches the
/// half-width definition, so highlights are wider or narrower than the
/// measured paper gloss.
#[test]
fn test_blinn_half_width() {
    let beta: f64 = 0.2;
    let shape = Facet::Blinn.shape_from_half_angle(beta);
    let light = Vec3::new((2.0 * beta).sin(), 0.0, (2.0 * beta).cos());
    let d = Facet::Blinn.evaluate(Vec3::UP, light, Vec3::UP, shape);
    assert!((d - 0.5).abs() < 1e-9, "REGRESSION: D(beta) = {}", d);
}

// ========================================================================
// End to end
// ========================================================================

/// If this breaks, it means: the render loop applies a different equation
/// per pixel than the Phong model prescribes, or varies across a surface
/// that is geometrically identical everywhere.
#[test]
fn test_flat_paper_overhead_light_renders_uniform_phong_color() {
    let system = ntsc();
    let paper = flat_paper(&system, 128);
    let light = LightSource::from_reader(
        Cursor::new("X 0\nY 0\nZ 1000\nc 0.5\n380 1\n780 1\na 0.5\n380 1\n780 1\n"),
        &system,
    )
    .unwrap();

    // N = L = E = up, so N·L = 1 and the Phong distribution is 1.
    let expected_curve = paper
        .ambient()
        .multiply(light.ambient())
        .add(&light.direct().multiply(&paper.diffuse().add(paper.specular())));
    let expected = system.to_rgb(&expected_curve).to_array();

    let scene = Scene {
        color: &system,
        paper: &paper,
        ink: None,
        light: &light,
    };
    let mut raster: Vec<u8> = Vec::new();
    Renderer::new(scene, RenderTarget::new(6, 6, 20.0))
        .render(&mut raster)
        .unwrap();

    assert_eq!(raster.len(), 6 * 6 * 3);
    for (i, pixel) in raster.chunks_exact(3).enumerate() {
        assert_eq!(
            pixel,
            &expected[..],
            "REGRESSION: pixel {} differs from the analytic Phong color",
            i
        );
    }
}
