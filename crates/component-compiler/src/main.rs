//! component-compiler: compiles html components and merges document sections.

mod cli;
mod config;
mod document;
mod orchestrator;
mod output;
mod source_file;

use clap::Parser;
use cli::Args;
use miette::Result;

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let summary = orchestrator::run(&args)?;
    if summary.error_count > 0 {
        std::process::exit(1);
    }
    Ok(())
}
