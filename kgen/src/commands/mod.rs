mod check;
mod completions;
mod generate;

use std::path::Path;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::{Context, Result};
use generate::GenerateCommand;
use kgen_codegen::{Catalog, GeneratorConfig};

use crate::logging::Verbosity;

/// Extension trait for exiting on schema errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for kgen_schema::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "kgen")]
#[command(version)]
#[command(about = "Generate Jsonnet libraries from API schema documents")]
pub(crate) struct Cli {
    /// Show debug logs
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        match (self.verbose, self.quiet) {
            (true, _) => Verbosity::Verbose,
            (_, true) => Verbosity::Quiet,
            _ => Verbosity::Normal,
        }
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a Jsonnet library from a schema document
    Generate(GenerateCommand),

    /// Build the library without writing it and report diagnostics
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Load the generator config (defaults when no path is given), then the
/// schema it filters. Schema errors exit with a rendered diagnostic.
fn load_inputs(schema: &Path, config: Option<&Path>) -> Result<(Catalog, GeneratorConfig)> {
    let config = match config {
        Some(path) => GeneratorConfig::load(path)
            .wrap_err_with(|| format!("Failed to load config '{}'", path.display()))?,
        None => GeneratorConfig::default(),
    };
    let catalog = kgen_schema::parse_file(schema, &config.schema).unwrap_or_exit();
    Ok((catalog, config))
}
