//! Core operations.
//!
//! The logic behind each command, separated from argument parsing and
//! output rendering.

pub mod check;
pub mod generate;

pub use check::check;
pub use generate::{GenerateOptions, generate};

use kgen_codegen::pipeline::{CompilationContext, Severity};

use crate::reports::Stats;

/// Diagnostics split by severity, with locations folded into the message.
#[derive(Debug, Default)]
struct Notes {
    warnings: Vec<String>,
    infos: Vec<String>,
}

fn collect_notes(ctx: &CompilationContext) -> Notes {
    let mut notes = Notes::default();
    for diag in &ctx.diagnostics {
        let msg = match &diag.location {
            Some(loc) => format!("{}\n  --> {}", diag.message, loc),
            None => diag.message.clone(),
        };
        match diag.severity {
            Severity::Warning => notes.warnings.push(msg),
            Severity::Info => notes.infos.push(msg),
        }
    }
    notes
}

fn collect_stats(ctx: &CompilationContext) -> Stats {
    let tree = ctx.tree.as_ref().map(|tree| tree.stats()).unwrap_or_default();
    Stats {
        types: ctx.catalog.len(),
        namespaces: tree.namespaces,
        constructors: tree.constructors,
        setters: tree.setters,
        mixins: tree.mixins,
    }
}
