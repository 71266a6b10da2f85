//! Position maps for html-component-compiler.
//!
//! A [`PositionMap`] records which position in a generated artifact came from
//! which position in its source. Compiling a component takes two translation
//! steps, each producing its own map; [`compose`] chains them so the final code
//! maps straight back to the original `.html` file.
//!
//! Maps are exchanged with the outside world as Source Map v3 JSON
//! ([`SourceMapJson`]).
//!
//! # Conventions
//!
//! Every [`Position`] in this crate uses a 1-based line and a 0-based column.
//! The v3 codec converts to the 0-based lines of the wire format.

mod builder;
mod compose;
mod error;
mod json;
mod line_index;
mod map;
mod position;
mod span;
pub mod vlq;

pub use builder::PositionMapBuilder;
pub use compose::{compose, compose_with};
pub use error::SourceMapError;
pub use json::SourceMapJson;
pub use line_index::LineIndex;
pub use map::{Bias, MapEntry, PositionMap, SourceContent};
pub use position::Position;
pub use span::{ByteOffset, Span};
