//! Markup parser for html-component-compiler.
//!
//! This crate parses single-file components and plain HTML fragments:
//! - Elements, text, comments and `<!...>` declarations
//! - `{expression}` interpolations in text and attribute values
//! - Raw-text elements (`<script>`, `<style>`) kept verbatim
//! - Error recovery: parsing never fails, problems are reported alongside the tree
//!
//! Node spans point into the original source, so the verbatim text of any
//! subtree can be sliced back out with [`Element::inner_html`].
//!
//! # Example
//!
//! ```
//! use markup_parser::parse;
//!
//! let source = "<head><title>Hi</title></head><body><p>{greeting}</p></body>";
//! let result = parse(source);
//!
//! let head = result.document.root_element("head").unwrap();
//! assert_eq!(head.inner_html(source), "<title>Hi</title>");
//! assert!(result.errors.is_empty());
//! ```

mod ast;
mod error;
mod lexer;
mod parser;

pub use ast::*;
pub use error::{ParseError, ParseErrorKind};
pub use lexer::{TagLexer, TagTokenKind, Token};
pub use source_map::Span;

/// The result of parsing a markup file.
#[derive(Debug)]
pub struct ParseResult {
    /// The parsed document.
    pub document: Document,
    /// Problems the parser recovered from, in source order of discovery.
    pub errors: Vec<ParseError>,
}

/// Parses markup source into a tree.
///
/// This function never fails; see [`ParseResult::errors`] for recovered problems.
pub fn parse(source: &str) -> ParseResult {
    parser::Parser::new(source).parse()
}
