//! Code generation with position tracking.

use crate::tokens::token_starts;
use source_map::{ByteOffset, LineIndex, Position, PositionMap, PositionMapBuilder};

/// Appends code while recording where pieces of it came from.
///
/// The emitter tracks the 1-based line and byte column of the end of the
/// generated code, so mappings can be added as text is pushed.
pub(crate) struct Emitter<'a> {
    code: String,
    end: Position,
    builder: PositionMapBuilder,
    source_name: &'a str,
    index: &'a LineIndex,
}

impl<'a> Emitter<'a> {
    /// Creates an emitter whose mappings point into `source_name`.
    pub fn new(source_name: &'a str, index: &'a LineIndex) -> Self {
        Self {
            code: String::new(),
            end: Position::new(1, 0),
            builder: PositionMap::builder(),
            source_name,
            index,
        }
    }

    /// Appends generated text that has no counterpart in the source.
    pub fn push(&mut self, text: &str) -> &mut Self {
        self.code.push_str(text);
        self.end = advance(self.end, text);
        self
    }

    /// Appends text whose first character came from `original`.
    pub fn push_mapped(&mut self, text: &str, original: ByteOffset) -> &mut Self {
        self.add_mapping(self.end, original);
        self.push(text)
    }

    /// Appends text copied verbatim from the source starting at `original`.
    ///
    /// Every token in the copy is mapped to its place in the source.
    pub fn push_source(&mut self, text: &str, original: ByteOffset) -> &mut Self {
        let mut position = self.end;
        let mut consumed = 0;
        for start in token_starts(text) {
            position = advance(position, &text[consumed..start]);
            consumed = start;
            self.add_mapping(position, original + ByteOffset::from(start as u32));
        }
        self.push(text)
    }

    /// Appends a line break.
    pub fn newline(&mut self) -> &mut Self {
        self.push("\n")
    }

    fn add_mapping(&mut self, generated: Position, original: ByteOffset) {
        if let Some(original) = self.index.position(original) {
            self.builder
                .add_mapping(generated, original, Some(self.source_name));
        }
    }

    /// Returns the generated code and its map.
    pub fn finish(self) -> (String, PositionMap) {
        (self.code, self.builder.build())
    }

    /// Returns the generated code and its map, embedding `content` as the
    /// text of the source.
    pub fn finish_with_content(mut self, content: &str) -> (String, PositionMap) {
        self.builder.set_source_content(self.source_name, content);
        self.finish()
    }
}

/// Returns the position reached after appending `text` at `position`.
pub(crate) fn advance(position: Position, text: &str) -> Position {
    match text.rfind('\n') {
        Some(last) => {
            let lines = text.bytes().filter(|&b| b == b'\n').count() as u32;
            Position::new(position.line + lines, (text.len() - last - 1) as u32)
        }
        None => Position::new(position.line, position.column + text.len() as u32),
    }
}
