use std::io::BufRead;

use crate::description::{grid_buffer, DescriptionError, DescriptionErrorKind, LineSource};
use crate::grid::Grid;
use crate::vector::Point3;

/// Micrometres per millimetre.
pub(super) const MICROMETRE: f64 = 1000.0;

/// Which declaration produced a footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FootprintShape {
    Dot,
    Box,
    Matrix,
}

/// The image area printed by the ink layer.
///
/// A boolean mask on the layer's pixel pitch, anchored at the layer
/// location, plus the physical size of its bounding box. Every set cell
/// carries the same ink amount, the image scale.
#[derive(Debug, Clone)]
pub struct Footprint {
    shape: FootprintShape,
    mask: Grid<bool>,
    width: f64,
    height: f64,
}

impl Footprint {
    /// One set cell, one pixel wide.
    pub fn dot(pixel_size: f64) -> Self {
        Self {
            shape: FootprintShape::Dot,
            mask: Grid::filled(1, 1, true),
            width: pixel_size,
            height: pixel_size,
        }
    }

    /// A filled rectangle of the given physical size in µm.
    ///
    /// The mask holds as many whole pixels as fit; the bounding box keeps
    /// the declared size. Returns `None` if the mask is too large to
    /// allocate.
    pub fn rect(width: f64, height: f64, pixel_size: f64) -> Option<Self> {
        let cols = (width / pixel_size).max(0.0) as usize;
        let rows = (height / pixel_size).max(0.0) as usize;
        Some(Self {
            shape: FootprintShape::Box,
            mask: Grid::try_filled(cols, rows, true)?,
            width,
            height,
        })
    }

    /// An explicit mask, one pixel per cell.
    pub fn matrix(mask: Grid<bool>, pixel_size: f64) -> Self {
        Self {
            shape: FootprintShape::Matrix,
            width: mask.cols() as f64 * pixel_size,
            height: mask.rows() as f64 * pixel_size,
            mask,
        }
    }

    /// Read `rows` bitmap lines of `'0'`/`'1'` characters, one per column.
    pub(super) fn read_matrix<R: BufRead>(
        src: &mut LineSource<R>,
        cols: usize,
        rows: usize,
        pixel_size: f64,
    ) -> Result<Self, DescriptionError> {
        let mut cells = grid_buffer(cols, rows, "footprint", Some(src.line_number()))?;
        for _ in 0..rows {
            let (line_no, text) = src
                .next_line()?
                .ok_or_else(|| DescriptionError::unexpected_end(src.line_number(), "footprint bitmap"))?;
            let mut chars = text.chars();
            for column in 0..cols {
                let cell = match chars.next() {
                    Some('1') => true,
                    Some('0') => false,
                    found => {
                        return Err(DescriptionError::at(
                            line_no,
                            DescriptionErrorKind::InvalidBitmap { column, found },
                        ))
                    }
                };
                cells.push(cell);
            }
        }
        let mask = Grid::from_rows(cols, rows, cells).ok_or_else(|| {
            DescriptionError::new(
                None,
                DescriptionErrorKind::InvalidDimensions {
                    grid: "footprint",
                    cols: cols as i64,
                    rows: rows as i64,
                },
            )
        })?;
        Ok(Self::matrix(mask, pixel_size))
    }

    #[inline]
    pub fn shape(&self) -> FootprintShape {
        self.shape
    }

    pub fn mask(&self) -> &Grid<bool> {
        &self.mask
    }

    /// Physical bounding box size `(width, height)` in µm.
    #[inline]
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Whether `p` lies inside the bounding box anchored at `origin`.
    /// Points on the border count as inside.
    pub fn contains(&self, origin: Point3, p: Point3) -> bool {
        p.x >= origin.x
            && p.y >= origin.y
            && p.x <= origin.x + self.width
            && p.y <= origin.y + self.height
    }

    /// Whether the mask cell nearest to `p` is set.
    pub fn is_set(&self, origin: Point3, pixel_size: f64, p: Point3) -> bool {
        if !self.contains(origin, p) || self.mask.cells().is_empty() {
            return false;
        }
        let index = |offset: f64, len: usize| -> usize {
            ((offset / pixel_size).round().max(0.0) as usize).min(len - 1)
        };
        let x = index(p.x - origin.x, self.mask.cols());
        let y = index(p.y - origin.y, self.mask.rows());
        *self.mask.get(x, y)
    }
}
