use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Schema document (swagger 1.2 JSON)
    pub schema: PathBuf,

    /// Directory to write the library into (created if missing)
    pub output: PathBuf,

    /// Generator config (TOML); defaults are used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Name of the generated library file
    #[arg(long, default_value = "k8s.libsonnet")]
    pub file_name: String,

    /// Print the library instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let (catalog, config) = super::load_inputs(&self.schema, self.config.as_deref())?;

        let report = ops::generate(
            catalog,
            config,
            GenerateOptions {
                output_dir: &self.output,
                file_name: &self.file_name,
                dry_run: self.dry_run,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
