//! The compile pipeline: classify, translate twice, compose the maps.

use crate::classify::{classify, StructuralSection};
use crate::diagnostic::Diagnostic;
use crate::identifier::{component_identifier, DEFAULT_EXTENSION};
use crate::translator::{
    ComponentOptions, ComponentTranslator, FinalOptions, FinalTranslator, TranslateError,
};
use source_map::{compose_with, Bias, PositionMap};
use thiserror::Error;
use tracing::{debug, debug_span, trace};

/// Pipeline settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Extension stripped from the base name when deriving the identifier.
    pub extension: String,
    /// How final-map positions are resolved in the component map.
    pub bias: Bias,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            bias: Bias::Exact,
        }
    }
}

/// The result of compiling one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    /// The file holds top-level `<head>`/`<body>` sections for the host document.
    Structural { sections: Vec<StructuralSection> },
    /// The file is a component, compiled to final code.
    Component {
        code: String,
        /// Maps `code` straight back to the component source.
        map: PositionMap,
    },
    /// The component translator rejected the source at a known position.
    Error { diagnostic: Diagnostic },
}

/// A failure that aborts the whole build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("failed to compile component {path}: {message}")]
    ComponentTranslator { path: String, message: String },

    #[error("failed to translate generated code for {path}: {message}")]
    FinalTranslator { path: String, message: String },
}

/// Compiles markup files with a component translator followed by a final translator.
///
/// The pipeline keeps no per-call state and may be shared between threads.
#[derive(Debug, Clone)]
pub struct CompilePipeline<C, F> {
    component: C,
    finalizer: F,
    options: PipelineOptions,
}

impl<C, F> CompilePipeline<C, F>
where
    C: ComponentTranslator,
    F: FinalTranslator,
{
    /// Creates a pipeline with default options.
    pub fn new(component: C, finalizer: F) -> Self {
        Self::with_options(component, finalizer, PipelineOptions::default())
    }

    pub fn with_options(component: C, finalizer: F, options: PipelineOptions) -> Self {
        Self {
            component,
            finalizer,
            options,
        }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Compiles `source`, read from `logical_path` whose file name is `base_name`.
    ///
    /// A file with top-level `<head>` or `<body>` elements is never handed to
    /// the translators. A component translator failure with a position becomes
    /// [`CompileOutcome::Error`]; every other translator failure is returned as
    /// a [`PipelineError`].
    pub fn compile(
        &self,
        source: &str,
        logical_path: &str,
        base_name: &str,
    ) -> Result<CompileOutcome, PipelineError> {
        let span = debug_span!("compile", path = logical_path);
        let _enter = span.enter();

        let parsed = markup_parser::parse(source);
        if !parsed.errors.is_empty() {
            trace!(errors = parsed.errors.len(), "markup has recoverable errors");
        }

        let classification = classify(&parsed.document, source);
        if !classification.is_component {
            debug!(
                sections = classification.structural.len(),
                "emitting structural sections"
            );
            return Ok(CompileOutcome::Structural {
                sections: classification.structural,
            });
        }

        let name = component_identifier(base_name, &self.options.extension);
        debug!(name = %name, "translating component");

        let component_options = ComponentOptions {
            filename: logical_path.to_string(),
            name,
        };
        let intermediate = match self.component.translate(source, &component_options) {
            Ok(translation) => translation,
            Err(TranslateError::Located { message, position }) => {
                debug!(%position, "component translator reported an error");
                return Ok(CompileOutcome::Error {
                    diagnostic: Diagnostic::located(message, position),
                });
            }
            Err(TranslateError::Fatal { message }) => {
                return Err(PipelineError::ComponentTranslator {
                    path: logical_path.to_string(),
                    message,
                });
            }
        };
        trace!(
            bytes = intermediate.code.len(),
            mappings = intermediate.map.len(),
            "intermediate code ready"
        );

        let final_options = FinalOptions {
            filename: logical_path.to_string(),
            generate_map: true,
        };
        let output = self
            .finalizer
            .translate(&intermediate.code, &final_options)
            .map_err(|err| PipelineError::FinalTranslator {
                path: logical_path.to_string(),
                message: err.to_string(),
            })?;

        // `file` names the generated artifact, which only the host knows.
        let map = compose_with(&output.map, &intermediate.map, self.options.bias);
        debug!(
            mappings = map.len(),
            dropped = output.map.len() - map.len(),
            "composed position maps"
        );

        Ok(CompileOutcome::Component {
            code: output.code,
            map,
        })
    }
}
