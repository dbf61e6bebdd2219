//! Number and word extraction from a single description line.
//!
//! Numbers are found by skipping blanks, underscores and letters, so a tag
//! or a unit name in front of a value is passed over: `S 0.8 0.5` yields
//! `0.8` then `0.5`. A number is an optional `-`, digits, and an optional
//! `.` followed by more digits. Exponents are not recognized.

/// Cursor over one line of text.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn bytes(&self) -> &'a [u8] {
        self.text.as_bytes()
    }

    fn skip_filler(&mut self) {
        let bytes = self.bytes();
        while let Some(&b) = bytes.get(self.pos) {
            if b == b' ' || b == b'\t' || b == b'_' || b.is_ascii_alphabetic() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn skip_digits(&mut self) -> usize {
        let bytes = self.bytes();
        let start = self.pos;
        while bytes.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Next real number, or `None` when the line holds no further number.
    pub fn next_number(&mut self) -> Option<f64> {
        self.skip_filler();
        let start = self.pos;
        if self.bytes().get(self.pos) == Some(&b'-') {
            self.pos += 1;
        }
        let mut digits = self.skip_digits();
        if self.bytes().get(self.pos) == Some(&b'.') {
            self.pos += 1;
            digits += self.skip_digits();
        }
        if digits == 0 {
            self.pos = start;
            return None;
        }
        self.text[start..self.pos].parse().ok()
    }

    /// Next integer, or `None` when the line holds no further integer.
    pub fn next_int(&mut self) -> Option<i64> {
        self.skip_filler();
        let start = self.pos;
        if self.bytes().get(self.pos) == Some(&b'-') {
            self.pos += 1;
        }
        if self.skip_digits() == 0 {
            self.pos = start;
            return None;
        }
        self.text[start..self.pos].parse().ok()
    }

    /// Next whitespace-delimited word.
    pub fn next_word(&mut self) -> Option<&'a str> {
        let rest = &self.text[self.pos..];
        let trimmed = rest.trim_start_matches([' ', '\t']);
        if trimmed.is_empty() {
            self.pos = self.text.len();
            return None;
        }
        let start = self.pos + (rest.len() - trimmed.len());
        let len = trimmed.find([' ', '\t']).unwrap_or(trimmed.len());
        self.pos = start + len;
        Some(&self.text[start..self.pos])
    }
}

/// True if the line is a data line: its first non-blank character is a
/// digit, `-` or `.`.
pub fn is_numeric_line(line: &str) -> bool {
    line.trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '-' || c == '.')
}

/// First non-blank character of a line, used as the record tag.
pub fn record_tag(line: &str) -> Option<char> {
    line.trim_start().chars().next()
}
