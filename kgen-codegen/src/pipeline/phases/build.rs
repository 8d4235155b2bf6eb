//! Build phase - turns the catalog into a namespace tree.

use eyre::Result;
use tracing::debug;

use crate::{
    Builder, NamespaceTree,
    pipeline::{CompilationContext, Diagnostic, Phase},
};

pub struct BuildPhase;

impl Phase for BuildPhase {
    fn name(&self) -> &'static str {
        "build"
    }

    fn description(&self) -> &'static str {
        "Build the namespace tree from the schema catalog"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let mut tree = NamespaceTree::new(ctx.catalog.api_version().map(str::to_string));

        let mut builder = Builder::new(&mut tree, &ctx.config);
        builder.add_catalog(&ctx.catalog)?;
        let renames = builder.into_renames();

        for rename in renames {
            ctx.add_diagnostic(
                Diagnostic::info(
                    self.name(),
                    format!(
                        "property '{}' is emitted as '{}'",
                        rename.property, rename.method
                    ),
                )
                .at(rename.type_id),
            );
        }

        let omitted: Vec<Diagnostic> = ctx
            .catalog
            .types()
            .flat_map(|ty| {
                ty.omitted_required.iter().map(|(property, omission)| {
                    Diagnostic::warning(
                        self.name(),
                        format!(
                            "required property '{property}' is {omission} and left out of the constructor"
                        ),
                    )
                    .at(&ty.id)
                })
            })
            .collect();
        for diagnostic in omitted {
            ctx.add_diagnostic(diagnostic);
        }

        debug!(namespaces = tree.len(), types = ctx.catalog.len(), "built namespace tree");
        ctx.tree = Some(tree);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use kgen_schema::{Catalog, LoadOptions, PrimitiveType, Property, TypeDef, parse_str};

    use super::*;
    use crate::{GeneratorConfig, pipeline::Severity};

    #[test]
    fn test_build_phase_reports_renames() {
        let catalog = Catalog::new(None)
            .with_type(
                TypeDef::new("v1.Status")
                    .with_property("error", Property::literal(PrimitiveType::String))
                    .with_property("reason", Property::literal(PrimitiveType::String)),
            )
            .unwrap();
        let mut ctx = CompilationContext::new(catalog, GeneratorConfig::default());

        BuildPhase.run(&mut ctx).unwrap();

        assert!(ctx.tree.as_ref().unwrap().lookup("v1.Status").is_some());
        assert_eq!(ctx.diagnostics.len(), 1);
        let diag = &ctx.diagnostics[0];
        assert_eq!(diag.severity, Severity::Info);
        assert_eq!(diag.message, "property 'error' is emitted as 'errorCondition'");
        assert_eq!(diag.location.as_deref(), Some("v1.Status"));
    }

    #[test]
    fn test_build_phase_warns_on_dropped_required() {
        let schema = r#"{"models": {"v1.Pod": {
            "id": "v1.Pod",
            "required": ["spec", "status"],
            "properties": {
                "spec": {"type": "object"},
                "status": {"type": "object", "description": "Read-only."}
            }
        }}}"#;
        let catalog = parse_str(schema, &LoadOptions::default()).unwrap();
        let mut ctx = CompilationContext::new(catalog, GeneratorConfig::default());

        BuildPhase.run(&mut ctx).unwrap();

        let warnings: Vec<_> = ctx.warnings().map(ToString::to_string).collect();
        assert_eq!(
            warnings,
            ["warning: required property 'status' is read-only and left out of the constructor (at v1.Pod)"]
        );
    }
}
