//! Build-host integration.
//!
//! A host hands the compiler one [`InputFile`] per matched file and receives
//! HTML sections, JavaScript or errors back through the same handle.

use crate::classify::Section;
use crate::diagnostic::Diagnostic;
use crate::pipeline::{CompileOutcome, CompilePipeline, PipelineError};
use crate::translator::{ComponentTranslator, FinalTranslator};
use rayon::prelude::*;
use serde::Serialize;
use source_map::SourceMapJson;
use tracing::debug;

/// Compiled JavaScript handed back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JavaScriptOutput {
    pub source_path: String,
    pub path: String,
    pub data: String,
    pub source_map: SourceMapJson,
}

/// A file the host wants compiled.
pub trait InputFile: Send {
    /// The file contents.
    fn contents(&self) -> &str;

    /// The path of the file relative to its package.
    fn path_in_package(&self) -> &str;

    /// The file name including its extension.
    fn basename(&self) -> &str;

    /// Appends `data` to a section of the host document.
    fn add_html(&mut self, section: Section, data: String);

    fn add_javascript(&mut self, output: JavaScriptOutput);

    /// Reports a compile error for this file.
    fn error(&mut self, diagnostic: Diagnostic);
}

/// Drives a [`CompilePipeline`] over host files.
#[derive(Debug, Clone)]
pub struct ComponentCompiler<C, F> {
    pipeline: CompilePipeline<C, F>,
}

impl<C, F> ComponentCompiler<C, F>
where
    C: ComponentTranslator,
    F: FinalTranslator,
{
    pub fn new(pipeline: CompilePipeline<C, F>) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &CompilePipeline<C, F> {
        &self.pipeline
    }

    /// Compiles every file in parallel.
    ///
    /// Stops at the first fatal error; files already compiled keep their output.
    pub fn process_files_for_target<I: InputFile>(
        &self,
        files: &mut [I],
    ) -> Result<(), PipelineError> {
        debug!(files = files.len(), "processing files");
        files
            .par_iter_mut()
            .try_for_each(|file| self.process_one_file_for_target(file))
    }

    /// Compiles one file and reports the outcome through it.
    pub fn process_one_file_for_target<I: InputFile>(
        &self,
        file: &mut I,
    ) -> Result<(), PipelineError> {
        let path = file.path_in_package().to_string();
        let outcome = self
            .pipeline
            .compile(file.contents(), &path, file.basename())?;

        match outcome {
            CompileOutcome::Structural { sections } => {
                for section in sections {
                    file.add_html(section.section, section.content);
                }
            }
            CompileOutcome::Component { code, map } => {
                file.add_javascript(JavaScriptOutput {
                    source_path: path.clone(),
                    path,
                    data: code,
                    source_map: map.to_json(),
                });
            }
            CompileOutcome::Error { diagnostic } => file.error(diagnostic),
        }
        Ok(())
    }
}
