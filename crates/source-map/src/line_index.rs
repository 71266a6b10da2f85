//! Line index for byte offset ↔ [`Position`] conversion.

use crate::{ByteOffset, Position};
use text_size::TextSize;

/// An index over the line starts of a text.
///
/// Lookups in both directions are O(log n) in the number of lines. Positions
/// produced here use the crate-wide convention: 1-based line, 0-based byte
/// column.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// `line_starts[i]` is the offset where line `i + 1` begins.
    line_starts: Vec<ByteOffset>,
    len: TextSize,
}

impl LineIndex {
    /// Creates a new line index from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];

        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::from((offset + 1) as u32));
            }
        }

        Self {
            line_starts,
            len: TextSize::from(text.len() as u32),
        }
    }

    /// Returns the number of lines in the source.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts a byte offset to a position.
    ///
    /// Returns `None` if the offset lies past the end of the text.
    pub fn position(&self, offset: ByteOffset) -> Option<Position> {
        if offset > self.len {
            return None;
        }

        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };

        let column = u32::from(offset) - u32::from(self.line_starts[line]);
        Some(Position::new(line as u32 + 1, column))
    }

    /// Converts a position back to a byte offset.
    ///
    /// Returns `None` for line 0, lines past the end, or columns past the end
    /// of their line.
    pub fn offset(&self, position: Position) -> Option<ByteOffset> {
        let line = (position.line as usize).checked_sub(1)?;
        let start = *self.line_starts.get(line)?;
        let line_end = self.line_starts.get(line + 1).copied().unwrap_or(self.len);

        let offset = start + TextSize::from(position.column);
        (offset <= line_end).then_some(offset)
    }

    /// Returns the byte offset where a 1-based line starts.
    pub fn line_start(&self, line: u32) -> Option<ByteOffset> {
        let line = (line as usize).checked_sub(1)?;
        self.line_starts.get(line).copied()
    }
}
