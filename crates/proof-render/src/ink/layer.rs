use std::io::BufRead;

use super::footprint::{Footprint, MICROMETRE};
use super::record::{FootprintSpec, InkRecord};
use crate::color::{ColorSystem, SpectralCurve};
use crate::description::{
    read_grid, CellFormat, DescriptionError, DescriptionErrorKind, LineSource,
};
use crate::grid::Grid;
use crate::paper::PaperSurface;
use crate::vector::Point3;

const DEFAULT_ABSORPTION: f64 = 2.0;
const DEFAULT_DEPOSITION: f64 = 0.5;
const DEFAULT_SPLITTING: f64 = 0.5;
const DEFAULT_PIXEL_SIZE: f64 = 20.0;
const DEFAULT_IMAGE_SCALE: f64 = 1.0;
const DEFAULT_SPECULAR_BETA: f64 = 0.2;

/// A convolution kernel with its center cell.
#[derive(Debug, Clone)]
struct Kernel {
    weights: Grid<f64>,
    center_x: usize,
    center_y: usize,
}

impl Kernel {
    fn new(weights: Grid<f64>) -> Self {
        Self {
            center_x: weights.cols() / 2,
            center_y: weights.rows() / 2,
            weights,
        }
    }
}

/// Ink printed onto paper.
///
/// The amount of ink at a point is the footprint mask gated by paper
/// contact, convolved with the deposition kernel, and weighted by
/// `splitting + deposition · roughness`.
#[derive(Debug, Clone)]
pub struct InkLayer {
    pixel_size: f64,
    location: Point3,
    absorption: f64,
    deposition: f64,
    splitting: f64,
    image_scale: f64,
    footprint: Option<Footprint>,
    kernel: Option<Kernel>,
    specular_beta: f64,
    specular: SpectralCurve,
    diffuse: SpectralCurve,
    ambient: SpectralCurve,
}

impl InkLayer {
    /// Parse an ink description.
    ///
    /// Without a footprint (`i`) or kernel (`c`) record the layer deposits
    /// no ink anywhere.
    pub fn from_reader<R: BufRead>(
        reader: R,
        color: &ColorSystem,
    ) -> Result<Self, DescriptionError> {
        let mut src = LineSource::new(reader);
        let mut layer = Self {
            pixel_size: DEFAULT_PIXEL_SIZE,
            location: Point3::ZERO,
            absorption: DEFAULT_ABSORPTION,
            deposition: DEFAULT_DEPOSITION,
            splitting: DEFAULT_SPLITTING,
            image_scale: DEFAULT_IMAGE_SCALE,
            footprint: None,
            kernel: None,
            specular_beta: DEFAULT_SPECULAR_BETA,
            specular: color.new_curve(),
            diffuse: color.new_curve(),
            ambient: color.new_curve(),
        };

        while let Some((line_no, text)) = src.next_line()? {
            match InkRecord::classify(line_no, &text)? {
                InkRecord::Absorption(v) => layer.absorption = v,
                InkRecord::Deposition(v) => layer.deposition = v,
                InkRecord::Splitting(v) => layer.splitting = v,
                InkRecord::PixelSize(v) => {
                    if v <= 0.0 {
                        return Err(DescriptionError::at(
                            line_no,
                            DescriptionErrorKind::InvalidValue {
                                field: "pixel size",
                                value: v,
                            },
                        ));
                    }
                    layer.pixel_size = v;
                }
                InkRecord::Location { x_mm, y_mm } => {
                    layer.location = Point3::new(x_mm * MICROMETRE, y_mm * MICROMETRE, 0.0);
                }
                InkRecord::Footprint(spec) => layer.read_footprint(&mut src, spec)?,
                InkRecord::Specular { scale, beta } => {
                    layer.specular = color.read_curve(&mut src)?.scaled(scale);
                    layer.specular_beta = beta;
                }
                InkRecord::Diffuse { scale } => {
                    layer.diffuse = color.read_curve(&mut src)?.scaled(scale);
                }
                InkRecord::Ambient { scale } => {
                    layer.ambient = color.read_curve(&mut src)?.scaled(scale);
                }
                InkRecord::Kernel { cols, rows } => {
                    let weights = read_grid(&mut src, cols, rows, "kernel", CellFormat::Real)?;
                    layer.kernel = Some(Kernel::new(weights));
                }
                InkRecord::Ignored => {}
            }
        }

        tracing::debug!(
            footprint = ?layer.footprint.as_ref().map(Footprint::shape),
            kernel = ?layer.kernel.as_ref().map(|k| (k.weights.cols(), k.weights.rows())),
            absorption = layer.absorption,
            "Ink layer loaded"
        );
        Ok(layer)
    }

    fn read_footprint<R: BufRead>(
        &mut self,
        src: &mut LineSource<R>,
        spec: FootprintSpec,
    ) -> Result<(), DescriptionError> {
        let (footprint, scale) = match spec {
            FootprintSpec::Dot { scale } => (Footprint::dot(self.pixel_size), scale),
            FootprintSpec::Box {
                width_mm,
                height_mm,
                scale,
            } => {
                let rect = Footprint::rect(
                    width_mm * MICROMETRE,
                    height_mm * MICROMETRE,
                    self.pixel_size,
                )
                .ok_or_else(|| {
                    DescriptionError::new(
                        Some(src.line_number()),
                        DescriptionErrorKind::InvalidDimensions {
                            grid: "footprint",
                            cols: (width_mm * MICROMETRE / self.pixel_size) as i64,
                            rows: (height_mm * MICROMETRE / self.pixel_size) as i64,
                        },
                    )
                })?;
                (rect, scale)
            }
            FootprintSpec::Matrix { cols, rows, scale } => (
                Footprint::read_matrix(src, cols, rows, self.pixel_size)?,
                scale,
            ),
        };
        self.footprint = Some(footprint);
        self.image_scale = scale;
        Ok(())
    }

    #[inline]
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    /// Footprint origin in µm.
    #[inline]
    pub fn location(&self) -> Point3 {
        self.location
    }

    #[inline]
    pub fn absorption(&self) -> f64 {
        self.absorption
    }

    #[inline]
    pub fn deposition(&self) -> f64 {
        self.deposition
    }

    #[inline]
    pub fn splitting(&self) -> f64 {
        self.splitting
    }

    #[inline]
    pub fn image_scale(&self) -> f64 {
        self.image_scale
    }

    #[inline]
    pub fn specular_beta(&self) -> f64 {
        self.specular_beta
    }

    pub fn footprint(&self) -> Option<&Footprint> {
        self.footprint.as_ref()
    }

    pub fn specular(&self) -> &SpectralCurve {
        &self.specular
    }

    pub fn diffuse(&self) -> &SpectralCurve {
        &self.diffuse
    }

    pub fn ambient(&self) -> &SpectralCurve {
        &self.ambient
    }

    /// Ink amount of the footprint cell at `p`: the image scale where the
    /// mask is set, 0 elsewhere.
    pub fn mask_value(&self, p: Point3) -> f64 {
        match &self.footprint {
            Some(fp) if fp.is_set(self.location, self.pixel_size, p) => self.image_scale,
            _ => 0.0,
        }
    }

    /// Ink deposited on `paper` at `p`.
    ///
    /// Always 0 outside the footprint's bounding box.
    pub fn transfer(&self, paper: &PaperSurface, p: Point3) -> f64 {
        let (Some(footprint), Some(kernel)) = (&self.footprint, &self.kernel) else {
            return 0.0;
        };
        if !footprint.contains(self.location, p) {
            return 0.0;
        }

        let start_x = p.x - kernel.center_x as f64 * self.pixel_size;
        let start_y = p.y - kernel.center_y as f64 * self.pixel_size;
        let mut sum = 0.0;
        for iy in 0..kernel.weights.rows() {
            for ix in 0..kernel.weights.cols() {
                let sample = Point3::new(
                    start_x + ix as f64 * self.pixel_size,
                    start_y + iy as f64 * self.pixel_size,
                    0.0,
                );
                if paper.contact(sample) {
                    sum += self.mask_value(sample) * kernel.weights.get(ix, iy);
                }
            }
        }

        self.image_scale * sum * (self.splitting + self.deposition * paper.roughness(p))
    }
}
