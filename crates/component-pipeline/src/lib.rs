//! Compile pipeline for html components.
//!
//! A markup file is either a *structural* file, whose top-level `<head>` and
//! `<body>` contents go into the host HTML document, or a *component*. A
//! component goes through two translators: a [`ComponentTranslator`] that turns
//! the markup into intermediate code and a [`FinalTranslator`] that turns that
//! into the final code. Both return position maps, which are composed so the
//! final code maps straight back to the component source.
//!
//! # Example
//!
//! ```
//! use component_pipeline::{CompileOutcome, CompilePipeline, Section, Translation};
//! use component_pipeline::{ComponentOptions, FinalOptions, TranslateError};
//!
//! let pipeline = CompilePipeline::new(
//!     |_: &str, _: &ComponentOptions| -> Result<Translation, TranslateError> {
//!         unreachable!("structural files are not translated")
//!     },
//!     |_: &str, _: &FinalOptions| -> Result<Translation, TranslateError> {
//!         unreachable!("structural files are not translated")
//!     },
//! );
//!
//! let outcome = pipeline
//!     .compile("<head><title>Hi</title></head>", "client/main.html", "main.html")
//!     .unwrap();
//! match outcome {
//!     CompileOutcome::Structural { sections } => {
//!         assert_eq!(sections[0].section, Section::Head);
//!         assert_eq!(sections[0].content, "<title>Hi</title>");
//!     }
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```

pub mod classify;
mod diagnostic;
pub mod identifier;
mod pipeline;
pub mod plugin;
mod translator;

pub use classify::{classify, Classification, Section, StructuralSection};
pub use diagnostic::Diagnostic;
pub use identifier::{component_identifier, DEFAULT_EXTENSION};
pub use pipeline::{CompileOutcome, CompilePipeline, PipelineError, PipelineOptions};
pub use plugin::{ComponentCompiler, InputFile, JavaScriptOutput};
pub use translator::{
    ComponentOptions, ComponentTranslator, FinalOptions, FinalTranslator, TranslateError,
    Translation,
};
