//! Streaming PNG output for rendered rows.
//!
//! Rows are compressed as they arrive, so the whole raster is never held
//! in memory. The physical resolution goes into the `pHYs` chunk.

use std::io::{self, Write};

use proof_render::RowSink;

use crate::models::CompressionChoice;

/// Micrometres per metre, for pixels-per-metre from a pixel pitch in µm.
const MICROMETRES_PER_METRE: f64 = 1_000_000.0;

/// Writes 8-bit RGB rows into a PNG stream.
pub struct PngRowWriter<W: Write + 'static> {
    stream: png::StreamWriter<'static, W>,
}

impl<W: Write + 'static> PngRowWriter<W> {
    /// Write the PNG header for a `width × height` raster with pixel pitch
    /// `dot_size` µm.
    pub fn new(
        inner: W,
        width: u32,
        height: u32,
        dot_size: f64,
        compression: CompressionChoice,
    ) -> Result<Self, png::EncodingError> {
        let mut encoder = png::Encoder::new(inner, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png_compression(compression));
        encoder.set_pixel_dims(Some(pixel_dims(dot_size)));

        let writer = encoder.write_header()?;
        let stream = writer.into_stream_writer()?;
        Ok(Self { stream })
    }

    /// Flush the final image data and the end chunk.
    ///
    /// Fails if fewer rows than the declared height were written.
    pub fn finish(self) -> Result<(), png::EncodingError> {
        self.stream.finish()
    }
}

impl<W: Write + 'static> RowSink for PngRowWriter<W> {
    fn write_row(&mut self, _row: usize, rgb: &[u8]) -> io::Result<()> {
        self.stream.write_all(rgb)
    }
}

#[allow(deprecated)]
fn png_compression(choice: CompressionChoice) -> png::Compression {
    match choice {
        CompressionChoice::Fast => png::Compression::Fast,
        CompressionChoice::Default => png::Compression::Default,
        CompressionChoice::Best => png::Compression::Best,
        CompressionChoice::Rle => png::Compression::Rle,
    }
}

fn pixel_dims(dot_size: f64) -> png::PixelDimensions {
    let ppm = (MICROMETRES_PER_METRE / dot_size).round() as u32;
    png::PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: png::Unit::Meter,
    }
}
