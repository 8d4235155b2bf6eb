//! Check command report data structures.

use std::path::PathBuf;

use super::{
    Stats,
    output::{Output, Report},
};

/// Report data from a check run.
#[derive(Debug)]
pub struct CheckReport {
    pub schema_path: PathBuf,
    pub api_version: Option<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub stats: Stats,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }

        if !self.warnings.is_empty() || !self.infos.is_empty() {
            out.newline();
        }

        out.preformatted(&format!("✓ {} is valid", self.schema_path.display()));
        out.newline();
        if let Some(api_version) = &self.api_version {
            out.key_value("apiVersion", api_version);
        }
        self.stats.render(out);
    }
}
