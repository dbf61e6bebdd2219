//! Common test infrastructure for proof-render integration tests.
//!
//! Each test file compiles its own copy of this module, so items may appear
//! unused from the perspective of a single test file.

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;

use std::io::Cursor;

use proof_render::{ColorSystem, InkLayer, LightSource, PaperSurface, Primaries, Scene};

/// Every component of a render, owned.
pub struct TestScene {
    pub color: ColorSystem,
    pub paper: PaperSurface,
    pub ink: Option<InkLayer>,
    pub light: LightSource,
}

impl TestScene {
    pub fn new(paper: &str, ink: Option<&str>, light: &str) -> Self {
        let color = ColorSystem::new(Primaries::NTSC).expect("NTSC primaries");
        let paper = PaperSurface::from_reader(Cursor::new(paper), &color).expect("paper fixture");
        let ink = ink.map(|text| InkLayer::from_reader(Cursor::new(text), &color).expect("ink fixture"));
        let light = LightSource::from_reader(Cursor::new(light), &color).expect("light fixture");
        Self {
            color,
            paper,
            ink,
            light,
        }
    }

    pub fn scene(&self) -> Scene<'_> {
        Scene {
            color: &self.color,
            paper: &self.paper,
            ink: self.ink.as_ref(),
            light: &self.light,
        }
    }
}

/// Mean of each channel over a packed RGB raster.
pub fn mean_rgb(raster: &[u8]) -> [f64; 3] {
    let mut sum = [0.0; 3];
    let mut count = 0.0;
    for pixel in raster.chunks_exact(3) {
        for (s, &v) in sum.iter_mut().zip(pixel) {
            *s += f64::from(v);
        }
        count += 1.0;
    }
    sum.map(|s| s / count)
}

/// RGB triple at `(x, y)` of a packed raster `width` pixels wide.
pub fn pixel_at(raster: &[u8], width: usize, x: usize, y: usize) -> [u8; 3] {
    let i = (y * width + x) * 3;
    [raster[i], raster[i + 1], raster[i + 2]]
}
