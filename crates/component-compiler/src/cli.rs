//! CLI argument parsing.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};

/// Compiles html components to JavaScript and merges document sections.
#[derive(Debug, Parser)]
#[command(name = "component-compiler")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Root directory of the project
    #[arg(long, default_value = ".")]
    pub workspace: Utf8PathBuf,

    /// Path to the config file (default: <workspace>/component-compiler.json)
    #[arg(long)]
    pub config: Option<Utf8PathBuf>,

    /// Output directory, overriding the config file
    #[arg(long = "out-dir")]
    pub out_dir: Option<Utf8PathBuf>,

    /// Diagnostic output format
    #[arg(long, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Glob patterns to ignore, in addition to the config file's
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Do not write source maps
    #[arg(long = "no-maps")]
    pub no_maps: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output
    Json,
    /// Machine-readable (one line per diagnostic)
    Machine,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["component-compiler"]);
        assert_eq!(args.workspace.as_str(), ".");
        assert_eq!(args.output, OutputFormat::Human);
        assert!(args.config.is_none());
        assert!(args.out_dir.is_none());
        assert!(!args.no_maps);
        assert!(!args.verbose);
    }

    #[test]
    fn test_custom_workspace() {
        let args = Args::parse_from(["component-compiler", "--workspace", "/path/to/project"]);
        assert_eq!(args.workspace.as_str(), "/path/to/project");
    }

    #[test]
    fn test_output_formats() {
        let args = Args::parse_from(["component-compiler", "--output", "json"]);
        assert_eq!(args.output, OutputFormat::Json);

        let args = Args::parse_from(["component-compiler", "--output", "machine"]);
        assert_eq!(args.output, OutputFormat::Machine);
    }

    #[test]
    fn test_build_flags() {
        let args = Args::parse_from([
            "component-compiler",
            "--out-dir",
            "dist",
            "--ignore",
            "legacy/**",
            "--ignore",
            "**/*.draft.html",
            "--no-maps",
            "-v",
        ]);
        assert_eq!(args.out_dir.as_deref().map(|p| p.as_str()), Some("dist"));
        assert_eq!(args.ignore, vec!["legacy/**", "**/*.draft.html"]);
        assert!(args.no_maps);
        assert!(args.verbose);
    }
}
