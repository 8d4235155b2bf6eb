//! Marshal phase - renders the tree as a Jsonnet AST.

use eyre::{Result, eyre};

use crate::{
    Marshaller,
    pipeline::{CompilationContext, Phase},
};

pub struct MarshalPhase;

impl Phase for MarshalPhase {
    fn name(&self) -> &'static str {
        "marshal"
    }

    fn description(&self) -> &'static str {
        "Render the namespace tree as a Jsonnet AST"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let tree = ctx
            .tree
            .as_ref()
            .ok_or_else(|| eyre!("namespace tree not set - did the build phase run?"))?;
        let ast = Marshaller::new(tree, &ctx.config).marshal()?;
        ctx.ast = Some(ast);
        Ok(())
    }
}
