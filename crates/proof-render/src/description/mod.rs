//! Tag-driven text descriptions of paper, ink and light.
//!
//! Each description is a sequence of lines. The first non-blank character
//! of a line is its tag; the tag selects a record kind and the numbers on
//! the line are its payload. Some records are followed by a block of data
//! lines (spectral curve points, grid rows, bitmap rows). Comment lines
//! (`#`) and unknown tags are skipped.
//!
//! Every component classifies its header lines into its own record enum
//! and then pulls block data from the shared [`LineSource`].

mod error;
mod source;
mod tokens;

pub use error::{DescriptionError, DescriptionErrorKind};
pub use source::LineSource;
pub use tokens::{is_numeric_line, record_tag, Tokens};

/// Read the next number on a header line, naming the field on failure.
pub(crate) fn required_number(
    tokens: &mut Tokens<'_>,
    line: usize,
    field: &'static str,
) -> Result<f64, DescriptionError> {
    tokens
        .next_number()
        .ok_or_else(|| DescriptionError::missing_value(line, field))
}

/// Read grid dimensions `cols rows` from a header line.
///
/// Both must be at least `min`.
pub(crate) fn required_dimensions(
    tokens: &mut Tokens<'_>,
    line: usize,
    grid: &'static str,
    min: i64,
) -> Result<(usize, usize), DescriptionError> {
    let cols = tokens
        .next_int()
        .ok_or_else(|| DescriptionError::missing_value(line, "grid columns"))?;
    let rows = tokens
        .next_int()
        .ok_or_else(|| DescriptionError::missing_value(line, "grid rows"))?;
    if cols < min || rows < min {
        return Err(DescriptionError::at(
            line,
            DescriptionErrorKind::InvalidDimensions { grid, cols, rows },
        ));
    }
    Ok((cols as usize, rows as usize))
}

/// An empty buffer with room for `cols × rows` cells.
///
/// Dimensions come straight from a header line, so a product that
/// overflows or an allocation that fails is reported as invalid
/// dimensions rather than aborting.
pub(crate) fn grid_buffer<T>(
    cols: usize,
    rows: usize,
    grid: &'static str,
    line: Option<usize>,
) -> Result<Vec<T>, DescriptionError> {
    let invalid = || {
        DescriptionError::new(
            line,
            DescriptionErrorKind::InvalidDimensions {
                grid,
                cols: cols as i64,
                rows: rows as i64,
            },
        )
    };
    let len = cols.checked_mul(rows).ok_or_else(invalid)?;
    let mut cells = Vec::new();
    cells.try_reserve_exact(len).map_err(|_| invalid())?;
    Ok(cells)
}

/// How the cells of a numeric grid are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CellFormat {
    Integer,
    Real,
}

/// Read `rows` data lines of `cols` numbers each into a grid.
///
/// Row `y` of the input becomes grid row `y`; the `x`-th number on a line
/// is column `x`.
pub(crate) fn read_grid<R: std::io::BufRead>(
    src: &mut LineSource<R>,
    cols: usize,
    rows: usize,
    grid: &'static str,
    format: CellFormat,
) -> Result<crate::grid::Grid<f64>, DescriptionError> {
    let mut cells = grid_buffer(cols, rows, grid, Some(src.line_number()))?;
    for _ in 0..rows {
        let (line_no, text) = src
            .next_line()?
            .ok_or_else(|| DescriptionError::unexpected_end(src.line_number(), grid))?;
        let mut tokens = Tokens::new(&text);
        for found in 0..cols {
            let value = match format {
                CellFormat::Integer => tokens.next_int().map(|v| v as f64),
                CellFormat::Real => tokens.next_number(),
            };
            let value = value.ok_or_else(|| {
                DescriptionError::at(
                    line_no,
                    DescriptionErrorKind::ShortRow {
                        grid,
                        expected: cols,
                        found,
                    },
                )
            })?;
            cells.push(value);
        }
    }
    crate::grid::Grid::from_rows(cols, rows, cells).ok_or_else(|| {
        DescriptionError::new(
            None,
            DescriptionErrorKind::InvalidDimensions {
                grid,
                cols: cols as i64,
                rows: rows as i64,
            },
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_grid_rows_and_columns() {
        let mut src = LineSource::new(Cursor::new("1 2 3\n4 5 6\nnext\n"));
        let grid = read_grid(&mut src, 3, 2, "test", CellFormat::Integer).unwrap();
        assert_eq!(*grid.get(2, 0), 3.0);
        assert_eq!(*grid.get(0, 1), 4.0);
        assert_eq!(src.peek().unwrap(), Some("next"));
    }

    #[test]
    fn test_read_grid_short_row() {
        let mut src = LineSource::new(Cursor::new("1 2 3\n4 5\n"));
        let err = read_grid(&mut src, 3, 2, "test", CellFormat::Real).unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert!(matches!(
            err.kind(),
            DescriptionErrorKind::ShortRow {
                expected: 3,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_read_grid_truncated_input() {
        let mut src = LineSource::new(Cursor::new("1 2\n"));
        let err = read_grid(&mut src, 2, 2, "test", CellFormat::Real).unwrap_err();
        assert!(matches!(err.kind(), DescriptionErrorKind::UnexpectedEnd { .. }));
    }

    #[test]
    fn test_read_grid_absurd_dimensions_are_rejected() {
        let mut src = LineSource::new(Cursor::new("0 0 0\n"));
        let err = read_grid(&mut src, usize::MAX, 2, "roughness", CellFormat::Integer).unwrap_err();
        assert!(matches!(
            err.kind(),
            DescriptionErrorKind::InvalidDimensions { grid: "roughness", .. }
        ));

        // The product fits in usize but the byte size does not.
        let mut src = LineSource::new(Cursor::new("0 0 0\n"));
        let err = read_grid(&mut src, 3_000_000_000, 3_000_000_000, "beta", CellFormat::Real)
            .unwrap_err();
        assert!(matches!(
            err.kind(),
            DescriptionErrorKind::InvalidDimensions { grid: "beta", .. }
        ));
    }

    #[test]
    fn test_dimensions_must_meet_minimum() {
        let mut tokens = Tokens::new("r 2 5");
        let err = required_dimensions(&mut tokens, 4, "roughness", 3).unwrap_err();
        assert!(matches!(
            err.kind(),
            DescriptionErrorKind::InvalidDimensions { cols: 2, rows: 5, .. }
        ));
    }
}
