//! Parse error types.

use source_map::Span;
use thiserror::Error;

/// An error that occurred during parsing.
///
/// Parsing always produces a tree; errors describe where the parser had to
/// recover.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// The location in the source where the error occurred.
    pub span: Span,
}

impl ParseError {
    /// Creates a new parse error.
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kind of parse error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// An element was not closed before its parent or the end of input.
    #[error("<{tag_name}> was left open")]
    UnclosedTag {
        /// The name of the unclosed element.
        tag_name: String,
    },

    /// A start tag ran to the end of input without `>`.
    #[error("unterminated start tag <{tag_name}>")]
    UnterminatedStartTag {
        /// The name of the element.
        tag_name: String,
    },

    /// A closing tag matched no open element.
    #[error("</{tag_name}> attempted to close an element that was not open")]
    UnexpectedClosingTag {
        /// The name in the closing tag.
        tag_name: String,
    },

    /// A closing tag appeared on a void element.
    #[error("</{tag_name}> is a void element and cannot have a closing tag")]
    VoidElementClosingTag {
        /// The void element name.
        tag_name: String,
    },

    /// A `<!--` comment was never closed.
    #[error("comment was left open, expected -->")]
    UnclosedComment,

    /// A `{` expression was never closed.
    #[error("expected }} to close the expression")]
    UnclosedExpression,

    /// An attribute could not be read.
    #[error("invalid attribute: {message}")]
    InvalidAttribute {
        /// A description of the problem.
        message: String,
    },
}
