//! Owned 2D grids addressed by column (`x`) and row (`y`).

/// A dense `cols × rows` grid stored row by row in one buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    cols: usize,
    rows: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// A grid with every cell set to `value`.
    pub fn filled(cols: usize, rows: usize, value: T) -> Self {
        Self {
            cols,
            rows,
            cells: vec![value; cols * rows],
        }
    }

    /// Like [`Grid::filled`], but returns `None` when the cell count
    /// overflows or the buffer cannot be allocated.
    pub fn try_filled(cols: usize, rows: usize, value: T) -> Option<Self> {
        let len = cols.checked_mul(rows)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).ok()?;
        cells.resize(len, value);
        Some(Self { cols, rows, cells })
    }
}

impl<T> Grid<T> {
    /// Wrap row-major cells. Returns `None` if the length does not match.
    pub fn from_rows(cols: usize, rows: usize, cells: Vec<T>) -> Option<Self> {
        (cells.len() == cols * rows).then_some(Self { cols, rows, cells })
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.cols && y < self.rows);
        y * self.cols + x
    }

    /// Cell at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.cells[self.offset(x, y)]
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        let offset = self.offset(x, y);
        &mut self.cells[offset]
    }

    /// Cell at a signed index folded back into the grid modulo its size.
    #[inline]
    pub fn get_wrapped(&self, x: i64, y: i64) -> &T {
        let x = x.rem_euclid(self.cols as i64) as usize;
        let y = y.rem_euclid(self.rows as i64) as usize;
        self.get(x, y)
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// A grid of the same shape with `f` applied to every cell.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            cols: self.cols,
            rows: self.rows,
            cells: self.cells.iter().map(f).collect(),
        }
    }
}
