//! Pipeline phase trait.

use eyre::Result;

use super::CompilationContext;

#[derive(Debug, Clone)]
pub struct PhaseInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// A phase in the generation pipeline.
///
/// Each phase reads what the previous one left in the context and stores
/// its own result there. Fatal problems are returned as errors; everything
/// else is recorded as a diagnostic.
pub trait Phase: Send + Sync {
    /// Name used in diagnostics and plugin hooks.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Run this phase on the context.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase fails fatally. Errors raised by the
    /// generator keep their type and can be recovered with
    /// [`eyre::Report::downcast_ref`].
    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;

    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
