//! Pipeline orchestrator.

use eyre::Result;
use kgen_schema::Catalog;

use super::{
    CompilationContext, Phase, Plugin,
    phases::{BuildPhase, MarshalPhase, MixinPhase, PrintPhase},
};
use crate::GeneratorConfig;

/// Runs the built-in phases (build, mixins, marshal, print) followed by any
/// user phases, calling plugin hooks around each one.
///
/// # Example
///
/// ```ignore
/// let ctx = Pipeline::new()
///     .plugin(TracingPlugin::new())
///     .run(catalog, config)?;
/// ```
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run the pipeline on a catalog.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error of any phase or plugin.
    pub fn run(&self, catalog: Catalog, config: GeneratorConfig) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(catalog, config);

        let builtin_phases: [Box<dyn Phase>; 4] = [
            Box::new(BuildPhase),
            Box::new(MixinPhase),
            Box::new(MarshalPhase),
            Box::new(PrintPhase),
        ];

        for phase in builtin_phases.iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let phase_name = phase.name();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
