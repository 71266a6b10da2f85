//! The boundary to the two translation steps.

use source_map::{Position, PositionMap};
use thiserror::Error;

/// Options passed to a [`ComponentTranslator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentOptions {
    /// The logical path of the component, used in maps and messages.
    pub filename: String,
    /// The identifier to export the component under.
    pub name: String,
}

/// Options passed to a [`FinalTranslator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalOptions {
    /// The logical path of the component the code was generated from.
    pub filename: String,
    /// Whether the translator should produce a position map.
    pub generate_map: bool,
}

/// Generated code and the map from it back to its input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    pub code: String,
    pub map: PositionMap,
}

/// A translator failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// The input is malformed at a known position.
    #[error("{message} ({position})")]
    Located { message: String, position: Position },

    /// The translator failed without pointing at the input.
    #[error("{message}")]
    Fatal { message: String },
}

impl TranslateError {
    /// Creates a located failure.
    pub fn located(message: impl Into<String>, position: Position) -> Self {
        TranslateError::Located {
            message: message.into(),
            position,
        }
    }

    /// Creates a failure without a position.
    pub fn fatal(message: impl Into<String>) -> Self {
        TranslateError::Fatal {
            message: message.into(),
        }
    }
}

/// Compiles component source into intermediate code.
pub trait ComponentTranslator: Send + Sync {
    /// Translates `source`, mapping the result back to it.
    fn translate(
        &self,
        source: &str,
        options: &ComponentOptions,
    ) -> Result<Translation, TranslateError>;
}

/// Compiles intermediate code into final code.
pub trait FinalTranslator: Send + Sync {
    /// Translates `code`, mapping the result back to it when
    /// [`FinalOptions::generate_map`] is set.
    fn translate(&self, code: &str, options: &FinalOptions) -> Result<Translation, TranslateError>;
}

impl<F> ComponentTranslator for F
where
    F: Fn(&str, &ComponentOptions) -> Result<Translation, TranslateError> + Send + Sync,
{
    fn translate(
        &self,
        source: &str,
        options: &ComponentOptions,
    ) -> Result<Translation, TranslateError> {
        self(source, options)
    }
}

impl<F> FinalTranslator for F
where
    F: Fn(&str, &FinalOptions) -> Result<Translation, TranslateError> + Send + Sync,
{
    fn translate(&self, code: &str, options: &FinalOptions) -> Result<Translation, TranslateError> {
        self(code, options)
    }
}
