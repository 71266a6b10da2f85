//! Discovery, compilation and output writing.

use crate::cli::{Args, OutputFormat};
use crate::config::CompilerConfig;
use crate::document::HtmlDocument;
use crate::output::{BuildSummary, Formatter};
use crate::source_file::SourceFile;
use camino::{Utf8Path, Utf8PathBuf};
use component_pipeline::{
    CompilePipeline, ComponentCompiler, InputFile, JavaScriptOutput, PipelineError,
    PipelineOptions,
};
use component_transformer::{StrictModeTranslator, TemplateTranslator};
use globset::{Glob, GlobSet, GlobSetBuilder};
use source_map::SourceMapJson;
use std::fs;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Build errors.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum CompilerError {
    /// Invalid glob pattern.
    #[error("invalid glob pattern: {0}")]
    #[diagnostic(code(component_compiler::invalid_glob))]
    InvalidGlob(String),

    #[error("failed to read {path}")]
    #[diagnostic(code(component_compiler::read))]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}")]
    #[diagnostic(code(component_compiler::write))]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize the source map for {path}")]
    #[diagnostic(code(component_compiler::source_map))]
    SourceMap {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A translator failed without pointing at the source.
    #[error(transparent)]
    #[diagnostic(
        code(component_compiler::translator),
        help("run with --verbose to see which stage failed")
    )]
    Pipeline(#[from] PipelineError),
}

/// Compiles every matching file in the workspace and writes the results.
pub fn run(args: &Args) -> Result<BuildSummary, CompilerError> {
    let workspace = if args.workspace.is_relative() {
        std::env::current_dir()
            .map(|p| Utf8PathBuf::try_from(p).unwrap_or_default())
            .unwrap_or_default()
            .join(&args.workspace)
    } else {
        args.workspace.clone()
    };

    let mut config = CompilerConfig::load(&workspace, args.config.as_deref());
    if let Some(out_dir) = &args.out_dir {
        config.out_dir = out_dir.clone();
    }
    config.ignore.extend(args.ignore.iter().cloned());
    let out_dir = workspace.join(&config.out_dir);

    let ignore_set = build_ignore_set(&config)?;
    let paths = discover(&workspace, &config.extensions, &ignore_set);
    info!(files = paths.len(), workspace = %workspace, "discovered files");

    let mut pending = paths
        .into_iter()
        .map(|path| {
            let contents = fs::read_to_string(&path).map_err(|source| CompilerError::Read {
                path: path.clone(),
                source,
            })?;
            Ok(SourceFile::new(path, &workspace, contents))
        })
        .collect::<Result<Vec<_>, CompilerError>>()?;

    // Each extension gets its own pipeline so identifiers lose the right suffix.
    let mut files = Vec::with_capacity(pending.len());
    for extension in &config.extensions {
        let (mut group, rest): (Vec<_>, Vec<_>) = pending
            .into_iter()
            .partition(|file| file.basename().ends_with(extension.as_str()));
        pending = rest;
        if group.is_empty() {
            continue;
        }

        let pipeline = CompilePipeline::with_options(
            TemplateTranslator::new(),
            StrictModeTranslator::with_banner(config.banner.as_str()),
            PipelineOptions {
                extension: extension.clone(),
                ..PipelineOptions::default()
            },
        );
        debug!(extension = %extension, files = group.len(), "compiling");
        ComponentCompiler::new(pipeline).process_files_for_target(&mut group)?;
        files.extend(group);
    }
    files.sort_by(|a, b| a.logical_path.cmp(&b.logical_path));

    write_outputs(args, &config, &out_dir, &files)
}

/// Writes compiled files and the merged document, and reports diagnostics.
fn write_outputs(
    args: &Args,
    config: &CompilerConfig,
    out_dir: &Utf8Path,
    files: &[SourceFile],
) -> Result<BuildSummary, CompilerError> {
    let formatter = Formatter::new(args.output);
    let mut document = HtmlDocument::new();
    let mut json_diagnostics = Vec::new();
    let mut summary = BuildSummary {
        file_count: files.len(),
        ..BuildSummary::default()
    };

    for file in files {
        for (section, content) in &file.sections {
            document.add(*section, content.as_str());
        }

        if let Some(output) = &file.javascript {
            write_javascript(out_dir, output, !args.no_maps)?;
            summary.component_count += 1;
        }

        if !file.diagnostics.is_empty() {
            summary.error_count += file.diagnostics.len();
            debug!(path = %file.disk_path, errors = file.diagnostics.len(), "file has errors");
            if args.output == OutputFormat::Json {
                json_diagnostics.extend(Formatter::format_json_diagnostics(
                    &file.diagnostics,
                    &file.logical_path,
                ));
            } else {
                print!("{}", formatter.format(&file.diagnostics, &file.logical_path));
            }
        }
    }

    summary.section_count = document.len();
    if !document.is_empty() {
        let path = out_dir.join(&config.document);
        write_file(&path, &document.render())?;
        info!(path = %path, sections = document.len(), "wrote document");
    }

    match args.output {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json_diagnostics).unwrap_or_default()
            );
        }
        OutputFormat::Human => println!("{}", summary.format()),
        OutputFormat::Machine => {}
    }

    Ok(summary)
}

/// Writes `<path>.js` and, when `with_map` is set, `<path>.js.map`.
fn write_javascript(
    out_dir: &Utf8Path,
    output: &JavaScriptOutput,
    with_map: bool,
) -> Result<(), CompilerError> {
    let js_path = out_dir.join(format!("{}.js", output.path));
    let mut code = output.data.clone();

    if with_map {
        let map_path = out_dir.join(format!("{}.js.map", output.path));
        let source_map = SourceMapJson {
            file: js_path.file_name().map(str::to_string),
            ..output.source_map.clone()
        };
        let json = serde_json::to_string(&source_map).map_err(|source| {
            CompilerError::SourceMap {
                path: output.source_path.clone(),
                source,
            }
        })?;
        write_file(&map_path, &json)?;

        if !code.ends_with('\n') {
            code.push('\n');
        }
        code.push_str("//# sourceMappingURL=");
        code.push_str(map_path.file_name().unwrap_or_default());
        code.push('\n');
    }

    write_file(&js_path, &code)?;
    debug!(path = %js_path, "wrote component");
    Ok(())
}

fn write_file(path: &Utf8Path, contents: &str) -> Result<(), CompilerError> {
    let write_error = |source| CompilerError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, contents).map_err(write_error)
}

/// Builds the set of ignored paths, relative to the workspace.
fn build_ignore_set(config: &CompilerConfig) -> Result<GlobSet, CompilerError> {
    let mut ignore_builder = GlobSetBuilder::new();
    for pattern in &config.ignore {
        let glob = Glob::new(pattern)
            .map_err(|e| CompilerError::InvalidGlob(format!("{pattern}: {e}")))?;
        ignore_builder.add(glob);
    }

    // Add default ignores
    let mut defaults = vec!["**/node_modules/**".to_string()];
    if config.out_dir.is_relative() {
        defaults.push(format!("{}/**", config.out_dir.as_str().trim_end_matches('/')));
    }
    for pattern in defaults {
        if let Ok(glob) = Glob::new(&pattern) {
            ignore_builder.add(glob);
        }
    }

    ignore_builder
        .build()
        .map_err(|e| CompilerError::InvalidGlob(e.to_string()))
}

/// Finds files with one of `extensions` under `workspace`, in path order.
fn discover(workspace: &Utf8Path, extensions: &[String], ignore_set: &GlobSet) -> Vec<Utf8PathBuf> {
    WalkDir::new(workspace)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| Utf8PathBuf::try_from(e.into_path()).ok())
        .filter(|p| {
            let file_name = p.file_name().unwrap_or("");
            extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
        })
        .filter(|p| {
            let relative = p.strip_prefix(workspace).unwrap_or(p);
            !ignore_set.is_match(relative.as_str())
        })
        .collect()
}
