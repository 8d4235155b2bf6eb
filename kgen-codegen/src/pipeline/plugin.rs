//! Pipeline plugin trait.

use std::{sync::Mutex, time::Instant};

use eyre::Result;
use tracing::info;

use super::CompilationContext;

/// A plugin that hooks into the pipeline.
///
/// Plugins receive callbacks before and after each phase runs and may
/// inspect or modify the context.
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Called before a phase runs. Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completes. Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }
}

/// Logs each phase with its elapsed time.
#[derive(Debug, Default)]
pub struct TracingPlugin {
    started: Mutex<Option<Instant>>,
}

impl TracingPlugin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Plugin for TracingPlugin {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn on_before_phase(&self, _phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
        if let Ok(mut started) = self.started.lock() {
            *started = Some(Instant::now());
        }
        Ok(())
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        let elapsed = self
            .started
            .lock()
            .ok()
            .and_then(|mut started| started.take())
            .map(|start| start.elapsed());
        info!(
            phase,
            elapsed = ?elapsed,
            diagnostics = ctx.diagnostics.len(),
            warnings = ctx.warnings().count(),
            "phase complete"
        );
        Ok(())
    }
}
