//! Line-at-a-time reading with one line of lookahead.

use std::io::BufRead;

use super::{DescriptionError, DescriptionErrorKind};

/// Numbered lines from a buffered reader.
///
/// One line can be peeked without consuming it, which lets a block reader
/// stop at the first line that does not belong to it and hand that line
/// back to the record loop.
pub struct LineSource<R> {
    reader: R,
    line_no: usize,
    peeked: Option<(usize, String)>,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            peeked: None,
        }
    }

    fn read_raw(&mut self) -> Result<Option<(usize, String)>, DescriptionError> {
        let mut buf = String::new();
        let next = self.line_no + 1;
        let read = self
            .reader
            .read_line(&mut buf)
            .map_err(|e| DescriptionError::at(next, DescriptionErrorKind::Io(e)))?;
        if read == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        let trimmed = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed);
        Ok(Some((self.line_no, buf)))
    }

    /// Consume the next line, returning it with its 1-based number.
    pub fn next_line(&mut self) -> Result<Option<(usize, String)>, DescriptionError> {
        match self.peeked.take() {
            Some(line) => Ok(Some(line)),
            None => self.read_raw(),
        }
    }

    /// Look at the next line without consuming it.
    pub fn peek(&mut self) -> Result<Option<&str>, DescriptionError> {
        if self.peeked.is_none() {
            self.peeked = self.read_raw()?;
        }
        Ok(self.peeked.as_ref().map(|(_, text)| text.as_str()))
    }

    /// Number of the last line read from the underlying reader.
    pub fn line_number(&self) -> usize {
        self.line_no
    }
}
