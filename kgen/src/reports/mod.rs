//! Report data structures for commands.
//!
//! Commands build reports, then render them to an [`Output`] target.

mod check;
mod generate;
mod output;

pub use check::CheckReport;
pub use generate::{GenerateReport, GenerationResult};
pub use output::{Output, Report, TerminalOutput};

/// Namespace tree counts shown after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub types: usize,
    pub namespaces: usize,
    pub constructors: usize,
    pub setters: usize,
    pub mixins: usize,
}

impl Stats {
    fn render(&self, out: &mut dyn Output) {
        out.key_value_indented("types", &self.types.to_string());
        out.key_value_indented("namespaces", &self.namespaces.to_string());
        out.key_value_indented("constructors", &self.constructors.to_string());
        out.key_value_indented("setters", &self.setters.to_string());
        out.key_value_indented("mixins", &self.mixins.to_string());
    }
}
