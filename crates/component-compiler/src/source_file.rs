//! Files read from disk and the results the compiler reports for them.

use camino::{Utf8Path, Utf8PathBuf};
use component_pipeline::{Diagnostic, InputFile, JavaScriptOutput, Section};

/// A source file together with everything compiled from it.
#[derive(Debug)]
pub struct SourceFile {
    /// Absolute path on disk.
    pub disk_path: Utf8PathBuf,
    /// Workspace-relative path with `/` separators.
    pub logical_path: String,
    basename: String,
    contents: String,
    pub sections: Vec<(Section, String)>,
    pub javascript: Option<JavaScriptOutput>,
    pub diagnostics: Vec<Diagnostic>,
}

impl SourceFile {
    pub fn new(disk_path: Utf8PathBuf, workspace: &Utf8Path, contents: String) -> Self {
        let relative = disk_path
            .strip_prefix(workspace)
            .unwrap_or(disk_path.as_path());
        let logical_path = relative
            .components()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join("/");
        let basename = disk_path.file_name().unwrap_or_default().to_string();

        Self {
            disk_path,
            logical_path,
            basename,
            contents,
            sections: Vec::new(),
            javascript: None,
            diagnostics: Vec::new(),
        }
    }
}

impl InputFile for SourceFile {
    fn contents(&self) -> &str {
        &self.contents
    }

    fn path_in_package(&self) -> &str {
        &self.logical_path
    }

    fn basename(&self) -> &str {
        &self.basename
    }

    fn add_html(&mut self, section: Section, data: String) {
        self.sections.push((section, data));
    }

    fn add_javascript(&mut self, output: JavaScriptOutput) {
        self.javascript = Some(output);
    }

    fn error(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
