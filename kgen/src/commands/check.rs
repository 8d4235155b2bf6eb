use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Schema document (swagger 1.2 JSON)
    pub schema: PathBuf,

    /// Generator config (TOML); defaults are used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let (catalog, config) = super::load_inputs(&self.schema, self.config.as_deref())?;

        let report = ops::check(catalog, config, &self.schema)?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
