//! Print phase - turns the AST into library text.

use eyre::Result;
use kgen_ast::Config;

use crate::pipeline::{CompilationContext, Phase};

pub struct PrintPhase;

impl Phase for PrintPhase {
    fn name(&self) -> &'static str {
        "print"
    }

    fn description(&self) -> &'static str {
        "Print the Jsonnet AST"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let mut output = Config::new(ctx.config.library.indent).print(ctx.ast()?)?;
        output.push('\n');
        ctx.output = Some(output);
        Ok(())
    }
}
