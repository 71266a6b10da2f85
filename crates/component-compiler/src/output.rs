//! Output formatting.

use crate::cli::OutputFormat;
use component_pipeline::Diagnostic;
use serde::Serialize;

/// A formatted diagnostic for output.
#[derive(Debug, Serialize)]
pub struct FormattedDiagnostic {
    /// The diagnostic type.
    #[serde(rename = "type")]
    pub diagnostic_type: String,
    /// The workspace-relative file path.
    pub filename: String,
    /// The start position, if known.
    pub start: Option<Position>,
    pub message: String,
    pub source: String,
}

/// A position in the source.
#[derive(Debug, Serialize)]
pub struct Position {
    /// 1-indexed line number.
    pub line: u32,
    /// 1-indexed column number.
    pub column: u32,
}

impl From<source_map::Position> for Position {
    fn from(position: source_map::Position) -> Self {
        Self {
            line: position.line,
            column: position.column + 1,
        }
    }
}

/// Formats diagnostics for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the diagnostics of one file.
    pub fn format(&self, diagnostics: &[Diagnostic], file_path: &str) -> String {
        match self.format {
            OutputFormat::Human => Self::format_human(diagnostics, file_path),
            OutputFormat::Json => {
                let formatted = Self::format_json_diagnostics(diagnostics, file_path);
                serde_json::to_string_pretty(&formatted).unwrap_or_default()
            }
            OutputFormat::Machine => Self::format_machine(diagnostics, file_path),
        }
    }

    fn format_human(diagnostics: &[Diagnostic], file_path: &str) -> String {
        let mut output = String::new();

        for diag in diagnostics {
            match diag.position {
                Some(position) => output.push_str(&format!(
                    "{}:{}:{}\nError: {}\n\n",
                    file_path,
                    position.line,
                    position.column + 1,
                    diag.message
                )),
                None => output.push_str(&format!("{}\nError: {}\n\n", file_path, diag.message)),
            }
        }

        output
    }

    /// Formats diagnostics into JSON-ready structs.
    pub fn format_json_diagnostics(
        diagnostics: &[Diagnostic],
        file_path: &str,
    ) -> Vec<FormattedDiagnostic> {
        diagnostics
            .iter()
            .map(|diag| FormattedDiagnostic {
                diagnostic_type: "Error".to_string(),
                filename: file_path.to_string(),
                start: diag.position.map(Position::from),
                message: diag.message.clone(),
                source: "component".to_string(),
            })
            .collect()
    }

    fn format_machine(diagnostics: &[Diagnostic], file_path: &str) -> String {
        let mut output = String::new();

        for diag in diagnostics {
            let (line, column) = diag
                .position
                .map_or((0, 0), |p| (p.line, p.column + 1));
            output.push_str(&format!(
                "ERROR {}:{}:{} {}\n",
                file_path, line, column, diag.message
            ));
        }

        output
    }
}

/// Summary of a build.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    /// Number of files compiled.
    pub file_count: usize,
    /// Number of components written.
    pub component_count: usize,
    /// Number of document sections collected.
    pub section_count: usize,
    /// Number of errors.
    pub error_count: usize,
}

impl BuildSummary {
    /// Formats the summary line.
    pub fn format(&self) -> String {
        format!(
            "====================================\n\
             component-compiler found {} {} in {} {} ({} {}, {} document {})",
            self.error_count,
            plural(self.error_count, "error", "errors"),
            self.file_count,
            plural(self.file_count, "file", "files"),
            self.component_count,
            plural(self.component_count, "component", "components"),
            self.section_count,
            plural(self.section_count, "section", "sections"),
        )
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unexpected_token() -> Diagnostic {
        Diagnostic::located("unexpected token", source_map::Position::new(2, 4))
    }

    #[test]
    fn test_format_human() {
        let formatter = Formatter::new(OutputFormat::Human);
        let output = formatter.format(&[unexpected_token()], "ui/Card.html");
        assert_eq!(output, "ui/Card.html:2:5\nError: unexpected token\n\n");
    }

    #[test]
    fn test_format_human_without_position() {
        let formatter = Formatter::new(OutputFormat::Human);
        let output = formatter.format(&[Diagnostic::new("broken", None)], "a.html");
        assert_eq!(output, "a.html\nError: broken\n\n");
    }

    #[test]
    fn test_format_json() {
        let formatter = Formatter::new(OutputFormat::Json);
        let output = formatter.format(&[unexpected_token()], "ui/Card.html");
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["filename"], "ui/Card.html");
        assert_eq!(value[0]["start"]["line"], 2);
        assert_eq!(value[0]["start"]["column"], 5);
        assert_eq!(value[0]["type"], "Error");
    }

    #[test]
    fn test_format_machine() {
        let formatter = Formatter::new(OutputFormat::Machine);
        let output = formatter.format(&[unexpected_token()], "ui/Card.html");
        assert_eq!(output, "ERROR ui/Card.html:2:5 unexpected token\n");
    }

    #[test]
    fn test_summary() {
        let summary = BuildSummary {
            file_count: 5,
            component_count: 3,
            section_count: 1,
            error_count: 1,
        };

        let output = summary.format();
        assert!(output.contains("1 error in 5 files"));
        assert!(output.contains("3 components, 1 document section"));
    }
}
