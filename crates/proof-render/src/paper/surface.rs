use std::io::BufRead;

use super::record::PaperRecord;
use crate::color::{ColorSystem, SpectralCurve};
use crate::description::{
    read_grid, CellFormat, DescriptionError, DescriptionErrorKind, LineSource,
};
use crate::grid::Grid;
use crate::vector::{Point3, Vec3};

const DEFAULT_PIXEL_SIZE: f64 = 20.0;
const DEFAULT_CONTACT_LEVEL: f64 = 250.0;
const DEFAULT_MAX_RANGE: f64 = 10.0;
const DEFAULT_SPECULAR_BETA: f64 = 0.5;

/// Horizontal light components below this are treated as straight overhead.
const VERTICAL_EPSILON: f64 = 1e-4;

/// Rays rising slower than this never leave the surface in practice.
const GRAZING_EPSILON: f64 = 1e-6;

/// Upper bound on march steps for very shallow rays.
const MAX_MARCH_STEPS: usize = 1 << 20;

/// Largest value a quantized height cell holds.
const CELL_MAX: f64 = 255.0;

/// A tiled paper height field with its optical terms.
///
/// Heights are stored as 8-bit cells and denormalized on read with
/// `cell · max_range / 255`. Physical points wrap around the sheet extent
/// in both axes, so the grid tiles the plane.
#[derive(Debug, Clone)]
pub struct PaperSurface {
    pixel_size: f64,
    contact_level: f64,
    max_range: f64,
    heights: Grid<u8>,
    beta_offsets: Option<Grid<f64>>,
    specular_beta: f64,
    specular: SpectralCurve,
    diffuse: SpectralCurve,
    ambient: SpectralCurve,
}

impl PaperSurface {
    /// Parse a paper description.
    ///
    /// The roughness grid (`r`) is mandatory. Absent curves keep the
    /// neutral fill of [`ColorSystem::new_curve`].
    pub fn from_reader<R: BufRead>(
        reader: R,
        color: &ColorSystem,
    ) -> Result<Self, DescriptionError> {
        let mut src = LineSource::new(reader);

        let mut pixel_size = DEFAULT_PIXEL_SIZE;
        let mut contact_level = DEFAULT_CONTACT_LEVEL;
        let mut max_range = DEFAULT_MAX_RANGE;
        let mut specular_beta = DEFAULT_SPECULAR_BETA;
        let mut specular = color.new_curve();
        let mut diffuse = color.new_curve();
        let mut ambient = color.new_curve();
        let mut heights = None;
        let mut beta_offsets = None;

        while let Some((line_no, text)) = src.next_line()? {
            match PaperRecord::classify(line_no, &text)? {
                PaperRecord::PixelSize(v) => pixel_size = positive(line_no, "pixel size", v)?,
                PaperRecord::ContactLevel(v) => contact_level = v,
                PaperRecord::MaxRange(v) => max_range = positive(line_no, "max range", v)?,
                PaperRecord::Specular { scale, beta } => {
                    specular = color.read_curve(&mut src)?.scaled(scale);
                    specular_beta = beta;
                }
                PaperRecord::Diffuse { scale } => {
                    diffuse = color.read_curve(&mut src)?.scaled(scale);
                }
                PaperRecord::Ambient { scale } => {
                    ambient = color.read_curve(&mut src)?.scaled(scale);
                }
                PaperRecord::Roughness { cols, rows } => {
                    let grid = read_grid(&mut src, cols, rows, "roughness", CellFormat::Integer)?;
                    heights = Some(to_cells(line_no, &grid)?);
                }
                PaperRecord::BetaGrid { cols, rows } => {
                    beta_offsets = Some(read_grid(&mut src, cols, rows, "beta", CellFormat::Real)?);
                }
                PaperRecord::Ignored => {}
            }
        }

        let heights = heights.ok_or_else(|| DescriptionError::missing_record("roughness matrix"))?;
        tracing::debug!(
            cols = heights.cols(),
            rows = heights.rows(),
            pixel_size,
            max_range,
            contact_level,
            beta_grid = beta_offsets.is_some(),
            "Paper surface loaded"
        );

        Ok(Self {
            pixel_size,
            contact_level,
            max_range,
            heights,
            beta_offsets,
            specular_beta,
            specular,
            diffuse,
            ambient,
        })
    }

    #[inline]
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    #[inline]
    pub fn contact_level(&self) -> f64 {
        self.contact_level
    }

    #[inline]
    pub fn max_range(&self) -> f64 {
        self.max_range
    }

    /// Physical size of one tile, `pixel_size × grid dimensions`, in µm.
    pub fn extent(&self) -> (f64, f64) {
        grid_extent(&self.heights, self.pixel_size)
    }

    pub fn heights(&self) -> &Grid<u8> {
        &self.heights
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

    /// Height in µm represented by a quantized cell.
    #[inline]
    pub fn cell_height(&self, cell: u8) -> f64 {
        f64::from(cell) * self.max_range / CELL_MAX
    }

    /// Nearest cell value for a height in µm, clamped to `0..=255`.
    pub fn quantize(&self, height: f64) -> u8 {
        (height * CELL_MAX / self.max_range).round().clamp(0.0, CELL_MAX) as u8
    }

    /// Height at the cell nearest to `p`.
    pub fn height_at(&self, p: Point3) -> f64 {
        let (x, y) = nearest_cell(&self.heights, self.pixel_size, p);
        self.cell_height(*self.heights.get_wrapped(x, y))
    }

    fn inner_height(&self, x: i64, y: i64) -> f64 {
        self.cell_height(*self.heights.get_wrapped(x, y))
    }

    /// Nearest cell to `p`, nudged off the border so both neighbors exist.
    fn inner_cell(&self, p: Point3) -> (i64, i64) {
        let (x, y) = nearest_cell(&self.heights, self.pixel_size, p);
        let cols = self.heights.cols() as i64;
        let rows = self.heights.rows() as i64;
        (x.clamp(1, cols - 2), y.clamp(1, rows - 2))
    }

    /// Unit surface normal from central differences around `p`.
    pub fn normal(&self, p: Point3) -> Vec3 {
        let (x, y) = self.inner_cell(p);
        let dx = (self.inner_height(x + 1, y) - self.inner_height(x - 1, y)) / 2.0;
        let dy = (self.inner_height(x, y + 1) - self.inner_height(x, y - 1)) / 2.0;
        let tangent_x = Vec3::new(self.pixel_size, 0.0, dx);
        let tangent_y = Vec3::new(0.0, self.pixel_size, dy);
        tangent_x.cross(tangent_y).normalize().unwrap_or(Vec3::UP)
    }

    /// Whether the height field blocks `light` (a unit direction toward
    /// the light) before it reaches `p`.
    ///
    /// A near-vertical light never casts a shadow; a light at or below the
    /// horizon always does.
    pub fn self_shadow(&self, light: Vec3, p: Point3) -> bool {
        if is_vertical(light) {
            return false;
        }
        if light.z <= GRAZING_EPSILON {
            return true;
        }
        self.march(light, p).any(|step| step.ray < step.surface)
    }

    /// The point actually seen when looking at `p` from direction `view`.
    ///
    /// Returns the furthest sample along the march where the surface rises
    /// above the sight line, or `p` itself when nothing occludes it.
    pub fn visible(&self, view: Vec3, p: Point3) -> Point3 {
        if is_vertical(view) || view.z <= GRAZING_EPSILON {
            return p;
        }
        self.march(view, p)
            .filter(|step| step.ray < step.surface)
            .last()
            .map_or(p, |step| Point3::new(step.x, step.y, step.surface))
    }

    /// Whether the peak at `p` is high enough to touch the ink.
    pub fn contact(&self, p: Point3) -> bool {
        let (x, y) = self.inner_cell(p);
        self.inner_height(x, y) >= self.max_range - self.contact_level
    }

    /// Depth of `p` below the highest possible peak.
    pub fn roughness(&self, p: Point3) -> f64 {
        let (x, y) = self.inner_cell(p);
        self.max_range - self.inner_height(x, y)
    }

    /// Specular half-angle at `p`, including any local offset.
    pub fn specular_beta(&self, p: Point3) -> f64 {
        match &self.beta_offsets {
            Some(grid) => {
                let (x, y) = nearest_cell(grid, self.pixel_size, p);
                self.specular_beta + grid.get_wrapped(x, y)
            }
            None => self.specular_beta,
        }
    }

    fn march(&self, dir: Vec3, p: Point3) -> March<'_> {
        let horizontal = dir.horizontal_length();
        let slope = dir.z / horizontal;
        let (step_x, step_y) = if dir.x.abs() >= dir.y.abs() {
            let sx = self.pixel_size * unit_sign(dir.x);
            (sx, dir.y / dir.x.abs() * self.pixel_size)
        } else {
            let sy = self.pixel_size * unit_sign(dir.y);
            (dir.x / dir.y.abs() * self.pixel_size, sy)
        };
        March {
            surface: self,
            origin: p,
            base: self.height_at(p),
            slope,
            step_x,
            step_y,
            taken: 0,
        }
    }
}

/// One sample of a ray march across the height field.
#[derive(Debug, Clone, Copy)]
struct MarchStep {
    x: f64,
    y: f64,
    ray: f64,
    surface: f64,
}

/// Walks away from a point one pixel at a time along the dominant
/// horizontal axis until the ray clears the highest possible peak.
struct March<'a> {
    surface: &'a PaperSurface,
    origin: Point3,
    base: f64,
    slope: f64,
    step_x: f64,
    step_y: f64,
    taken: usize,
}

impl Iterator for March<'_> {
    type Item = MarchStep;

    fn next(&mut self) -> Option<MarchStep> {
        if self.taken >= MAX_MARCH_STEPS {
            return None;
        }
        self.taken += 1;
        let n = self.taken as f64;
        let dx = self.step_x * n;
        let dy = self.step_y * n;
        let ray = self.base + self.slope * (dx * dx + dy * dy).sqrt();
        if ray >= self.surface.max_range {
            return None;
        }
        let x = self.origin.x + dx;
        let y = self.origin.y + dy;
        Some(MarchStep {
            x,
            y,
            ray,
            surface: self.surface.height_at(Point3::new(x, y, 0.0)),
        })
    }
}

fn is_vertical(dir: Vec3) -> bool {
    dir.x.abs() < VERTICAL_EPSILON && dir.y.abs() < VERTICAL_EPSILON
}

fn unit_sign(v: f64) -> f64 {
    if v < 0.0 {
        -1.0
    } else {
        1.0
    }
}

fn grid_extent<T>(grid: &Grid<T>, pixel_size: f64) -> (f64, f64) {
    (
        grid.cols() as f64 * pixel_size,
        grid.rows() as f64 * pixel_size,
    )
}

/// Wrap `p` into one tile of `grid` and round to the nearest cell.
///
/// The result may equal the grid size after rounding; callers index with
/// [`Grid::get_wrapped`].
fn nearest_cell<T>(grid: &Grid<T>, pixel_size: f64, p: Point3) -> (i64, i64) {
    let (width, height) = grid_extent(grid, pixel_size);
    let x = (p.x.rem_euclid(width) / pixel_size).round() as i64;
    let y = (p.y.rem_euclid(height) / pixel_size).round() as i64;
    (x, y)
}

fn positive(line: usize, field: &'static str, value: f64) -> Result<f64, DescriptionError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(DescriptionError::at(
            line,
            DescriptionErrorKind::InvalidValue { field, value },
        ))
    }
}

fn to_cells(line: usize, grid: &Grid<f64>) -> Result<Grid<u8>, DescriptionError> {
    if let Some(&value) = grid.cells().iter().find(|&&v| !(0.0..=CELL_MAX).contains(&v)) {
        return Err(DescriptionError::at(
            line,
            DescriptionErrorKind::InvalidValue {
                field: "roughness height",
                value,
            },
        ));
    }
    Ok(grid.map(|&v| v as u8))
}
