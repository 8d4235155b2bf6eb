//! Mixin phase - attaches mixin specs to the built tree.

use eyre::Result;

use crate::{
    build_mixins,
    pipeline::{CompilationContext, Diagnostic, Phase},
};

pub struct MixinPhase;

impl Phase for MixinPhase {
    fn name(&self) -> &'static str {
        "mixins"
    }

    fn description(&self) -> &'static str {
        "Synthesize mixins for reference-valued setters"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let empty = build_mixins(ctx.tree_mut()?)?;

        for mixin in empty {
            ctx.add_diagnostic(
                Diagnostic::info(
                    self.name(),
                    format!(
                        "mixin for '{}' is skipped because '{}' has no setters",
                        mixin.field, mixin.source
                    ),
                )
                .at(mixin.namespace),
            );
        }
        Ok(())
    }
}
