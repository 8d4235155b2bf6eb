//! Check operation - build the library without writing it.

use std::path::Path;

use eyre::{Context, Result};
use kgen_codegen::{
    Catalog, GeneratorConfig,
    pipeline::{Pipeline, TracingPlugin},
};

use crate::reports::CheckReport;

/// Run the whole pipeline and report its diagnostics and tree counts.
pub fn check(catalog: Catalog, config: GeneratorConfig, schema_path: &Path) -> Result<CheckReport> {
    let ctx = Pipeline::new()
        .plugin(TracingPlugin::new())
        .run(catalog, config)
        .wrap_err("Generation failed")?;

    let notes = super::collect_notes(&ctx);
    Ok(CheckReport {
        schema_path: schema_path.to_path_buf(),
        api_version: ctx.catalog.api_version().map(str::to_string),
        warnings: notes.warnings,
        infos: notes.infos,
        stats: super::collect_stats(&ctx),
    })
}

#[cfg(test)]
mod tests {
    use kgen_schema::{LoadOptions, parse_str};

    use super::*;

    const SCHEMA: &str = r#"{
      "apiVersion": "v1",
      "models": {
        "v1.Status": {
          "id": "v1.Status",
          "properties": {"error": {"type": "string"}, "code": {"type": "integer"}}
        }
      }
    }"#;

    #[test]
    fn test_check_reports_renames_and_stats() {
        let catalog = parse_str(SCHEMA, &LoadOptions::default()).unwrap();
        let report = check(catalog, GeneratorConfig::default(), Path::new("schema.json")).unwrap();

        assert_eq!(report.api_version.as_deref(), Some("v1"));
        assert_eq!(
            report.infos,
            ["property 'error' is emitted as 'errorCondition'\n  --> v1.Status"]
        );
        assert_eq!(report.stats.types, 1);
        assert_eq!(report.stats.namespaces, 2);
        assert_eq!(report.stats.setters, 2);
        assert_eq!(report.stats.constructors, 0);
    }
}
