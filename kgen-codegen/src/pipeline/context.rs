//! Generation context passed through pipeline phases.

use eyre::{Result, eyre};
use kgen_ast::Node;
use kgen_schema::Catalog;

use super::diagnostic::{Diagnostic, Severity};
use crate::{GeneratorConfig, NamespaceTree};

/// State carried through every phase.
///
/// Each phase fills in one of the optional slots; later phases take or
/// borrow what earlier ones produced.
#[derive(Debug)]
pub struct CompilationContext {
    pub catalog: Catalog,
    pub config: GeneratorConfig,
    /// Populated by the build phase, completed by the mixin phase.
    pub tree: Option<NamespaceTree>,
    /// Populated by the marshal phase; the print phase only borrows it.
    pub ast: Option<Node>,
    /// Populated by the print phase.
    pub output: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    pub fn new(catalog: Catalog, config: GeneratorConfig) -> Self {
        Self {
            catalog,
            config,
            tree: None,
            ast: None,
            output: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// Borrow the namespace tree mutably.
    pub fn tree_mut(&mut self) -> Result<&mut NamespaceTree> {
        self.tree
            .as_mut()
            .ok_or_else(|| eyre!("namespace tree not set - did the build phase run?"))
    }

    /// Borrow the library AST.
    pub fn ast(&self) -> Result<&Node> {
        self.ast
            .as_ref()
            .ok_or_else(|| eyre!("AST not set - did the marshal phase run?"))
    }

    /// Take the library text out of the context.
    pub fn take_output(&mut self) -> Result<String> {
        self.output
            .take()
            .ok_or_else(|| eyre!("output not set - did the print phase run?"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> CompilationContext {
        CompilationContext::new(Catalog::new(Some("v1".into())), GeneratorConfig::default())
    }

    #[test]
    fn test_context_creation() {
        let ctx = context();
        assert!(ctx.tree.is_none());
        assert!(ctx.ast.is_none());
        assert!(ctx.output.is_none());
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_context_diagnostics() {
        let mut ctx = context();
        ctx.add_diagnostic(Diagnostic::warning("build", "test warning").at("v1.Pod"));
        ctx.add_diagnostic(Diagnostic::info("build", "test info"));

        assert_eq!(ctx.diagnostics.len(), 2);
        let warnings: Vec<_> = ctx.warnings().map(|d| d.message.as_str()).collect();
        assert_eq!(warnings, ["test warning"]);
    }

    #[test]
    fn test_take_before_phase_ran() {
        let mut ctx = context();
        let err = ctx.take_output().unwrap_err();
        assert!(err.to_string().contains("print phase"));
        assert!(ctx.tree_mut().is_err());
        assert!(ctx.ast().is_err());
    }
}
