//! Common test infrastructure for softproof integration tests.
//!
//! Each test file compiles its own copy of this module, so items may appear
//! unused from the perspective of a single test file even though they're
//! used elsewhere.

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;

use std::path::Path;
use std::process::Command;

pub use fixtures::*;

/// The softproof binary, run inside `dir` with a clean environment.
pub fn softproof(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_softproof"));
    cmd.current_dir(dir)
        .env_remove("SOFTPROOF_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// A decoded 8-bit RGB PNG.
pub struct DecodedPng {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl DecodedPng {
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    /// Mean of one channel over the pixels in `cols × rows`.
    pub fn mean_channel(
        &self,
        channel: usize,
        cols: std::ops::Range<usize>,
        rows: std::ops::Range<usize>,
    ) -> f64 {
        let mut sum = 0.0;
        let mut count = 0usize;
        for y in rows {
            for x in cols.clone() {
                sum += f64::from(self.pixel(x, y)[channel]);
                count += 1;
            }
        }
        sum / count as f64
    }
}

pub fn read_png(path: &Path) -> DecodedPng {
    let bytes = std::fs::read(path).unwrap_or_else(|e| panic!("{}: {e}", path.display()));
    let decoder = png::Decoder::new(bytes.as_slice());
    let mut reader = decoder.read_info().expect("PNG header");
    let mut pixels = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut pixels).expect("PNG frame");
    assert_eq!(info.color_type, png::ColorType::Rgb, "expected RGB output");
    pixels.truncate(info.buffer_size());
    DecodedPng {
        width: info.width as usize,
        height: info.height as usize,
        pixels,
    }
}
