//! Generate operation - build the library and write it out.

use std::{fs, path::Path};

use eyre::{Context, Result};
use kgen_codegen::{
    Catalog, GeneratorConfig,
    pipeline::{Pipeline, TracingPlugin},
};
use tracing::info;

use crate::reports::{GenerateReport, GenerationResult};

pub struct GenerateOptions<'a> {
    /// Directory the library is written into; created if missing.
    pub output_dir: &'a Path,
    pub file_name: &'a str,
    /// Return the library text instead of writing it.
    pub dry_run: bool,
}

/// Run the pipeline and write exactly one library file.
pub fn generate(
    catalog: Catalog,
    config: GeneratorConfig,
    opts: GenerateOptions,
) -> Result<GenerateReport> {
    let mut ctx = Pipeline::new()
        .plugin(TracingPlugin::new())
        .run(catalog, config)
        .wrap_err("Generation failed")?;

    let notes = super::collect_notes(&ctx);
    let stats = super::collect_stats(&ctx);
    let library = ctx.take_output()?;

    let result = if opts.dry_run {
        GenerationResult::Preview {
            file_name: opts.file_name.to_string(),
            content: library,
        }
    } else {
        fs::create_dir_all(opts.output_dir).wrap_err_with(|| {
            format!("Failed to create '{}'", opts.output_dir.display())
        })?;
        let path = opts.output_dir.join(opts.file_name);
        fs::write(&path, &library)
            .wrap_err_with(|| format!("Failed to write '{}'", path.display()))?;
        info!(path = %path.display(), bytes = library.len(), "wrote library");
        GenerationResult::Written { path }
    };

    Ok(GenerateReport {
        api_version: ctx.catalog.api_version().map(str::to_string),
        warnings: notes.warnings,
        stats,
        result,
    })
}
