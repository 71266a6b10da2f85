//! Diagnostic types.

use source_map::Position;
use std::fmt;

/// A user-facing compile error.
///
/// Only failures that point at a location in the component source become
/// diagnostics; everything else is a [`PipelineError`](crate::PipelineError).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The diagnostic message.
    pub message: String,
    /// Where in the original source the problem is (1-based line, 0-based column).
    pub position: Option<Position>,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    pub fn new(message: impl Into<String>, position: Option<Position>) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }

    /// Creates a diagnostic at a known position.
    pub fn located(message: impl Into<String>, position: Position) -> Self {
        Self::new(message, Some(position))
    }

    /// Returns the 1-based line, if known.
    pub fn line(&self) -> Option<u32> {
        self.position.map(|p| p.line)
    }

    /// Returns the column, if known.
    pub fn column(&self) -> Option<u32> {
        self.position.map(|p| p.column)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "{} ({})", self.message, position),
            None => write!(f, "{}", self.message),
        }
    }
}
