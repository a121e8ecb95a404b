//! Fixed-width field formatting
//!
//! Two primitive rules cover every field in the batch format:
//!
//! - [`numeric`] zero-pads on the left and refuses values that do not fit.
//!   Truncating a number would silently corrupt a monetary total.
//! - [`alpha`] left-justifies and space-pads, truncating overlong text. Names and
//!   identifiers that exceed their field simply do not fit the format.
//!
//! [`FixedWidthLine`] strings fields together and checks the finished width.

use crate::core::layout::RECORD_SIZE;
use crate::types::AchError;

/// Render a non-negative integer zero-padded to `width` characters
///
/// # Errors
///
/// Returns `FieldOverflow` if `value` needs more than `width` digits.
pub fn numeric(field: &str, value: u64, width: usize) -> Result<String, AchError> {
    let digits = value.to_string();
    if digits.len() > width {
        return Err(AchError::field_overflow(field, value, width));
    }
    Ok(format!("{:0>width$}", digits, width = width))
}

/// Left-justify `value` in `width` characters, space-padded or truncated
///
/// Characters outside printable ASCII are rendered as `?` so every record
/// stays one byte per column.
pub fn alpha(value: &str, width: usize) -> String {
    let mut out: String = value.chars().take(width).map(ascii_or_placeholder).collect();
    let len = out.len();
    out.extend(std::iter::repeat(' ').take(width - len));
    out
}

/// Right-align `value` in `width` characters
///
/// All-digit values are zero-filled on the left; anything else is space-filled.
/// Overlong values keep their first `width` characters, matching [`alpha`].
pub fn right_aligned(value: &str, width: usize) -> String {
    let trimmed: String = value
        .trim()
        .chars()
        .take(width)
        .map(ascii_or_placeholder)
        .collect();
    let fill = if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        '0'
    } else {
        ' '
    };
    let len = trimmed.len();
    let mut out: String = std::iter::repeat(fill).take(width - len).collect();
    out.push_str(&trimmed);
    out
}

fn ascii_or_placeholder(c: char) -> char {
    if c == ' ' || c.is_ascii_graphic() {
        c
    } else {
        '?'
    }
}

/// Builder for a single fixed-width record line
///
/// Fields are appended left to right; [`FixedWidthLine::finish`] verifies the
/// line is exactly one record wide.
#[derive(Debug)]
pub struct FixedWidthLine {
    record: &'static str,
    buf: String,
}

impl FixedWidthLine {
    /// Start a line for the named record kind
    pub fn new(record: &'static str) -> Self {
        Self {
            record,
            buf: String::with_capacity(RECORD_SIZE),
        }
    }

    /// Append literal text as-is
    pub fn literal(mut self, text: &str) -> Self {
        self.buf.push_str(text);
        self
    }

    /// Append a zero-padded numeric field
    pub fn numeric(mut self, field: &str, value: u64, width: usize) -> Result<Self, AchError> {
        self.buf.push_str(&numeric(field, value, width)?);
        Ok(self)
    }

    /// Append a left-justified alphanumeric field
    pub fn alpha(mut self, value: &str, width: usize) -> Self {
        self.buf.push_str(&alpha(value, width));
        self
    }

    /// Append a right-aligned field
    pub fn right_aligned(mut self, value: &str, width: usize) -> Self {
        self.buf.push_str(&right_aligned(value, width));
        self
    }

    /// Append `width` spaces
    pub fn blank(mut self, width: usize) -> Self {
        self.buf.extend(std::iter::repeat(' ').take(width));
        self
    }

    /// Finish the line
    ///
    /// # Errors
    ///
    /// Returns `RecordWidth` if the fields do not add up to one record.
    pub fn finish(self) -> Result<String, AchError> {
        let width = self.buf.len();
        if width != RECORD_SIZE {
            return Err(AchError::record_width(self.record, width));
        }
        Ok(self.buf)
    }
}
