//! Offset index: absolute character offset <-> (line, column).
//!
//! An [`OffsetIndex`] is built once from one buffer snapshot and is only valid for that exact
//! snapshot. Lines carry their terminators, so the lines partition the buffer with no gaps:
//! `lines[i].offset + lines[i].length == lines[i + 1].offset`.

use crate::selection::Position;

/// Start offset and length (in characters) of one line, terminator included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineOffset {
    /// Character offset of the first character of the line.
    pub offset: usize,
    /// Character length of the line, including its line terminator.
    pub length: usize,
}

impl LineOffset {
    /// Exclusive end offset of the line.
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Whether `offset` lies in the half-open interval `[offset, end)`.
    pub fn contains(&self, offset: usize) -> bool {
        self.offset <= offset && offset < self.end()
    }
}

/// Mapping between absolute character offsets and line/column positions.
///
/// Lookups are `O(log n)` binary searches over the line starts.
///
/// End-of-buffer policy: an offset equal to (or past) the total length has no containing line.
/// It is clamped to the last line, with the column equal to that line's length. On an empty
/// index every offset maps to `(0, 0)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetIndex {
    lines: Vec<LineOffset>,
    total_len: usize,
}

impl OffsetIndex {
    /// Build an index from an ordered sequence of lines (terminators included).
    pub fn build<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut offset = 0;
        let lines = lines
            .into_iter()
            .map(|line| {
                let length = line.as_ref().chars().count();
                let entry = LineOffset { offset, length };
                offset += length;
                entry
            })
            .collect();

        Self {
            lines,
            total_len: offset,
        }
    }

    /// Build an index directly from buffer text.
    ///
    /// Lines are split after each `'\n'`, so `"\r\n"` stays within a single line. A buffer that
    /// does not end with a newline gets a final unterminated line.
    pub fn from_text(text: &str) -> Self {
        Self::build(text.split_inclusive('\n'))
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total character length of the indexed buffer.
    pub fn total_len(&self) -> usize {
        self.total_len
    }

    /// Whether the index covers an empty buffer.
    pub fn is_empty(&self) -> bool {
        self.total_len == 0
    }

    /// All line entries in line order.
    pub fn lines(&self) -> &[LineOffset] {
        &self.lines
    }

    /// Line containing `offset`.
    ///
    /// Returns the first line whose interval contains `offset`; zero-length lines never contain
    /// anything, so they are skipped exactly as a front-to-back scan would skip them.
    pub fn line_of(&self, offset: usize) -> usize {
        if self.lines.is_empty() {
            return 0;
        }
        if offset >= self.total_len {
            return self.lines.len() - 1;
        }

        // Number of lines that end at or before `offset`; the next one is the containing line.
        self.lines.partition_point(|line| line.end() <= offset)
    }

    /// Column of `offset` within its line.
    pub fn column_of(&self, offset: usize) -> usize {
        match self.lines.get(self.line_of(offset)) {
            Some(line) => offset.min(self.total_len) - line.offset,
            None => 0,
        }
    }

    /// Line and column of `offset`.
    pub fn position_of(&self, offset: usize) -> Position {
        Position::new(self.line_of(offset), self.column_of(offset))
    }

    /// Absolute offset of `(line, column)`.
    ///
    /// The caller guarantees the position is in bounds; a line past the end saturates to the
    /// total length. Use [`OffsetIndex::checked_offset_of`] for untrusted input.
    pub fn offset_of(&self, line: usize, column: usize) -> usize {
        match self.lines.get(line) {
            Some(entry) => entry.offset + column,
            None => self.total_len,
        }
    }

    /// Absolute offset of `(line, column)`, or `None` if the position is not inside the buffer.
    ///
    /// The end of the buffer has two spellings, both accepted: a column equal to the length of
    /// the last line, and `(line_count, 0)` (the line after a trailing newline).
    pub fn checked_offset_of(&self, line: usize, column: usize) -> Option<usize> {
        if line == self.lines.len() {
            return (column == 0).then_some(self.total_len);
        }

        let entry = self.lines.get(line)?;
        let is_last = line + 1 == self.lines.len();
        let in_bounds = column < entry.length || (is_last && column == entry.length);
        in_bounds.then(|| entry.offset + column)
    }

    /// Checked variant of [`OffsetIndex::offset_of`] taking a [`Position`].
    pub fn checked_offset_of_position(&self, position: Position) -> Option<usize> {
        self.checked_offset_of(position.line, position.column)
    }
}
