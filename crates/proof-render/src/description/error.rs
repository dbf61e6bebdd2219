//! Errors raised while reading paper, ink and light descriptions.

use std::fmt;
use std::io;

/// What went wrong in a description stream.
#[derive(Debug)]
pub enum DescriptionErrorKind {
    /// A record is missing one of its numeric fields
    MissingValue { field: &'static str },
    /// A mandatory record never appeared
    MissingRecord { record: &'static str },
    /// A grid or kernel row ran out of numeric tokens
    ShortRow {
        grid: &'static str,
        expected: usize,
        found: usize,
    },
    /// The stream ended inside a multi-line block
    UnexpectedEnd { block: &'static str },
    /// A footprint bitmap line holds something other than `0` or `1`
    InvalidBitmap { column: usize, found: Option<char> },
    /// The footprint keyword is not `DOT`, `BOX` or `MATRIX`
    UnknownFootprint { keyword: String },
    /// Grid dimensions are zero, negative or too small to use
    InvalidDimensions {
        grid: &'static str,
        cols: i64,
        rows: i64,
    },
    /// A value is outside the range its field accepts
    InvalidValue { field: &'static str, value: f64 },
    /// Reading from the underlying stream failed
    Io(io::Error),
}

/// Error type for description parsing, carrying the 1-based line number
/// where the problem was detected when one is known.
#[derive(Debug)]
pub struct DescriptionError {
    line: Option<usize>,
    kind: DescriptionErrorKind,
}

impl DescriptionError {
    pub fn new(line: Option<usize>, kind: DescriptionErrorKind) -> Self {
        Self { line, kind }
    }

    pub(crate) fn at(line: usize, kind: DescriptionErrorKind) -> Self {
        Self::new(Some(line), kind)
    }

    pub(crate) fn missing_value(line: usize, field: &'static str) -> Self {
        Self::at(line, DescriptionErrorKind::MissingValue { field })
    }

    pub(crate) fn missing_record(record: &'static str) -> Self {
        Self::new(None, DescriptionErrorKind::MissingRecord { record })
    }

    pub(crate) fn unexpected_end(line: usize, block: &'static str) -> Self {
        Self::at(line, DescriptionErrorKind::UnexpectedEnd { block })
    }

    /// Line number the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn kind(&self) -> &DescriptionErrorKind {
        &self.kind
    }
}

impl fmt::Display for DescriptionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescriptionErrorKind::MissingValue { field } => write!(f, "missing {}", field),
            DescriptionErrorKind::MissingRecord { record } => {
                write!(f, "required {} record not found", record)
            }
            DescriptionErrorKind::ShortRow {
                grid,
                expected,
                found,
            } => write!(
                f,
                "{} row has {} values, expected {}",
                grid, found, expected
            ),
            DescriptionErrorKind::UnexpectedEnd { block } => {
                write!(f, "unexpected end of input inside {}", block)
            }
            DescriptionErrorKind::InvalidBitmap { column, found } => match found {
                Some(c) => write!(f, "bitmap column {} holds {:?}, expected '0' or '1'", column, c),
                None => write!(f, "bitmap row ends before column {}", column),
            },
            DescriptionErrorKind::UnknownFootprint { keyword } => {
                write!(f, "unknown footprint type {:?}", keyword)
            }
            DescriptionErrorKind::InvalidDimensions { grid, cols, rows } => {
                write!(f, "invalid {} dimensions {}x{}", grid, cols, rows)
            }
            DescriptionErrorKind::InvalidValue { field, value } => {
                write!(f, "invalid {} {}", field, value)
            }
            DescriptionErrorKind::Io(err) => write!(f, "read error: {}", err),
        }
    }
}

impl fmt::Display for DescriptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for DescriptionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            DescriptionErrorKind::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for DescriptionError {
    fn from(err: io::Error) -> Self {
        DescriptionError::new(None, DescriptionErrorKind::Io(err))
    }
}
