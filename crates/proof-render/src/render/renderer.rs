use super::illumination::ShadingGeometry;
use super::material::MaterialModel;
use super::target::{RenderTarget, RowSink};
use crate::color::ColorSystem;
use crate::error::RenderError;
use crate::ink::InkLayer;
use crate::light::LightSource;
use crate::paper::PaperSurface;
use crate::vector::{Point3, Vec3};

/// Rows computed together before being handed to the sink.
const BAND_ROWS: usize = 32;

/// The read-only components a render samples.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub color: &'a ColorSystem,
    pub paper: &'a PaperSurface,
    pub ink: Option<&'a InkLayer>,
    pub light: &'a LightSource,
}

/// Summary of a finished render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub width: usize,
    pub height: usize,
    /// Pixels whose visible point was shadowed from the direct light
    pub shadowed_pixels: usize,
}

/// Per-render constants shared by every pixel.
struct Frame<'a> {
    materials: MaterialModel<'a>,
    light_dir: Vec3,
    view: Vec3,
}

/// Evaluates the illumination model for each output pixel and streams
/// the raster to a [`RowSink`] in row order.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    scene: Scene<'a>,
    target: RenderTarget,
}

impl<'a> Renderer<'a> {
    pub fn new(scene: Scene<'a>, target: RenderTarget) -> Self {
        Self { scene, target }
    }

    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    /// Render the whole raster into `sink`.
    ///
    /// Rows are computed in bands, in parallel when enabled, and written
    /// strictly in ascending order. The first sink error aborts the render.
    pub fn render<S: RowSink + ?Sized>(&self, sink: &mut S) -> Result<RenderStats, RenderError> {
        self.target.validate()?;
        let ink = if self.target.use_ink { self.scene.ink } else { None };
        let frame = Frame {
            materials: MaterialModel::new(self.scene.paper, ink),
            // The light is far enough away to share one direction.
            light_dir: self.scene.light.direction_to(Point3::ZERO)?,
            view: self.target.view_direction()?,
        };

        let RenderTarget { width, height, .. } = self.target;
        tracing::debug!(width, height, model = ?self.target.model, ink = ink.is_some(), "Rendering");

        let row_len = width * 3;
        let mut band = vec![0u8; row_len * BAND_ROWS.min(height)];
        let mut shadowed_pixels = 0;
        for band_start in (0..height).step_by(BAND_ROWS) {
            let rows = BAND_ROWS.min(height - band_start);
            let buf = &mut band[..rows * row_len];
            shadowed_pixels += self.render_band(&frame, band_start, buf);
            for (offset, rgb) in buf.chunks_exact(row_len).enumerate() {
                let row = band_start + offset;
                sink.write_row(row, rgb)
                    .map_err(|source| RenderError::Sink { row, source })?;
            }
        }

        Ok(RenderStats {
            width,
            height,
            shadowed_pixels,
        })
    }

    #[cfg(feature = "parallel")]
    fn render_band(&self, frame: &Frame<'_>, first_row: usize, buf: &mut [u8]) -> usize {
        use rayon::iter::{IndexedParallelIterator as _, ParallelIterator as _};
        use rayon::slice::ParallelSliceMut as _;

        if !self.target.parallel {
            return self.render_band_serial(frame, first_row, buf);
        }
        buf.par_chunks_mut(self.target.width * 3)
            .enumerate()
            .map(|(offset, row)| self.render_row(frame, first_row + offset, row))
            .sum()
    }

    #[cfg(not(feature = "parallel"))]
    fn render_band(&self, frame: &Frame<'_>, first_row: usize, buf: &mut [u8]) -> usize {
        self.render_band_serial(frame, first_row, buf)
    }

    fn render_band_serial(&self, frame: &Frame<'_>, first_row: usize, buf: &mut [u8]) -> usize {
        buf.chunks_mut(self.target.width * 3)
            .enumerate()
            .map(|(offset, row)| self.render_row(frame, first_row + offset, row))
            .sum()
    }

    /// Fill one row of RGB triples; returns the number of shadowed pixels.
    fn render_row(&self, frame: &Frame<'_>, row: usize, out: &mut [u8]) -> usize {
        let Scene {
            color,
            paper,
            light,
            ..
        } = self.scene;
        let dot = self.target.dot_size;
        let y = row as f64 * dot;
        let mut shadowed_pixels = 0;

        for (column, pixel) in out.chunks_exact_mut(3).enumerate() {
            let nominal = Point3::new(column as f64 * dot, y, 0.0);
            let seen = paper.visible(frame.view, nominal);
            let material = frame.materials.at(seen);
            let shadowed = paper.self_shadow(frame.light_dir, seen);
            let geometry = ShadingGeometry {
                normal: paper.normal(seen),
                light: frame.light_dir,
                view: frame.view,
            };
            let spectrum = self.target.model.shade(light, &material, geometry, shadowed);
            pixel.copy_from_slice(&color.to_rgb(&spectrum).to_array());
            shadowed_pixels += usize::from(shadowed);
        }
        shadowed_pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Primaries;
    use std::io::{self, Cursor};

    struct Fixture {
        color: ColorSystem,
        paper: PaperSurface,
        light: LightSource,
    }

    impl Fixture {
        fn new(paper: &str, light: &str) -> Self {
            let color = ColorSystem::new(Primaries::NTSC).unwrap();
            let paper = PaperSurface::from_reader(Cursor::new(paper), &color).unwrap();
            let light = LightSource::from_reader(Cursor::new(light), &color).unwrap();
            Self {
                color,
                paper,
                light,
            }
        }

        fn scene(&self) -> Scene<'_> {
            Scene {
                color: &self.color,
                paper: &self.paper,
                ink: None,
                light: &self.light,
            }
        }
    }

    const BUMPY: &str = "p 10\nm 10\nc 3\nr 4 4\n0 80 160 240\n240 0 80 160\n160 240 0 80\n80 160 240 0\n";
    const SIDE_LIGHT: &str = "X 1000\nY 300\nZ 400\nc 1\n380 1\n780 1\na 0.3\n380 1\n780 1\n";

    /// Fails on a chosen row.
    struct FailingSink {
        fail_at: usize,
        written: Vec<usize>,
    }

    impl RowSink for FailingSink {
        fn write_row(&mut self, row: usize, _rgb: &[u8]) -> io::Result<()> {
            if row == self.fail_at {
                return Err(io::Error::other("sink closed"));
            }
            self.written.push(row);
            Ok(())
        }
    }

    #[test]
    fn test_rows_arrive_in_order() {
        let fixture = Fixture::new(BUMPY, SIDE_LIGHT);
        let target = RenderTarget::new(5, 70, 10.0);
        let mut sink = FailingSink {
            fail_at: usize::MAX,
            written: Vec::new(),
        };
        let stats = Renderer::new(fixture.scene(), target).render(&mut sink).unwrap();
        assert_eq!(sink.written, (0..70).collect::<Vec<_>>());
        assert_eq!((stats.width, stats.height), (5, 70));
    }

    #[test]
    fn test_sink_error_aborts_with_row() {
        let fixture = Fixture::new(BUMPY, SIDE_LIGHT);
        let mut sink = FailingSink {
            fail_at: 40,
            written: Vec::new(),
        };
        let err = Renderer::new(fixture.scene(), RenderTarget::new(3, 70, 10.0))
            .render(&mut sink)
            .unwrap_err();
        assert!(matches!(err, RenderError::Sink { row: 40, .. }));
        assert_eq!(sink.written.len(), 40);
    }

    #[test]
    fn test_parallel_and_serial_output_match() {
        let fixture = Fixture::new(BUMPY, SIDE_LIGHT);
        let target = RenderTarget::new(9, 40, 7.0).with_view_angle(20.0);
        let mut parallel: Vec<u8> = Vec::new();
        let mut serial: Vec<u8> = Vec::new();
        Renderer::new(fixture.scene(), target).render(&mut parallel).unwrap();
        Renderer::new(fixture.scene(), target.with_parallel(false))
            .render(&mut serial)
            .unwrap();
        assert_eq!(parallel.len(), 9 * 40 * 3);
        assert_eq!(parallel, serial);
    }

    #[test]
    fn test_light_at_origin_is_error() {
        let fixture = Fixture::new(BUMPY, "X 0\nY 0\nZ 0\n");
        let mut sink: Vec<u8> = Vec::new();
        let err = Renderer::new(fixture.scene(), RenderTarget::new(1, 1, 10.0))
            .render(&mut sink)
            .unwrap_err();
        assert!(matches!(err, RenderError::Light(_)));
    }
}
