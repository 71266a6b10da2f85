//! The final-code step: a strict-mode prologue and whitespace normalization.

use crate::emitter::advance;
use crate::tokens::token_starts;
use component_pipeline::{FinalOptions, FinalTranslator, TranslateError, Translation};
use source_map::{Position, PositionMap};
use tracing::trace;

/// The default prologue.
pub const DEFAULT_BANNER: &str = "\"use strict\";";

/// Prepends a banner to generated code and normalizes its whitespace.
///
/// Line endings become `\n`, trailing whitespace is removed and the output
/// ends with a single newline. When a map is requested, the start of every
/// token is mapped back to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrictModeTranslator {
    banner: String,
}

impl Default for StrictModeTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl StrictModeTranslator {
    pub fn new() -> Self {
        Self::with_banner(DEFAULT_BANNER)
    }

    /// Uses `banner` as the prologue. An empty banner adds nothing.
    pub fn with_banner(banner: impl Into<String>) -> Self {
        Self {
            banner: banner.into(),
        }
    }

    pub fn banner(&self) -> &str {
        &self.banner
    }
}

impl FinalTranslator for StrictModeTranslator {
    fn translate(&self, code: &str, options: &FinalOptions) -> Result<Translation, TranslateError> {
        let mut output = String::with_capacity(self.banner.len() + code.len() + 1);
        for line in self.banner.lines() {
            output.push_str(line.trim_end());
            output.push('\n');
        }
        let line_offset = self.banner.lines().count() as u32;

        let mut builder = PositionMap::builder();
        for (index, line) in code.lines().enumerate() {
            let line = line.trim_end();
            let input_line = index as u32 + 1;

            if options.generate_map {
                let mut original = Position::new(input_line, 0);
                let mut consumed = 0;
                for start in token_starts(line) {
                    original = advance(original, &line[consumed..start]);
                    consumed = start;
                    builder.add_mapping(
                        Position::new(input_line + line_offset, original.column),
                        original,
                        Some(options.filename.as_str()),
                    );
                }
            }

            output.push_str(line);
            output.push('\n');
        }

        let map = builder.build();
        trace!(mappings = map.len(), "normalized final code");
        Ok(Translation { code: output, map })
    }
}
