//! Generation pipeline.
//!
//! A [`Pipeline`] runs the generation phases in order over one
//! [`CompilationContext`]:
//!
//! - `build`: catalog types become a namespace tree
//! - `mixins`: reference-valued setters get mixin specs
//! - `marshal`: the tree becomes a Jsonnet AST
//! - `print`: the AST becomes library text
//!
//! Plugins are called before and after each phase. Non-fatal notes are
//! collected as [`Diagnostic`]s; fatal problems abort the run with an error.
//!
//! # Example
//!
//! ```ignore
//! use kgen_codegen::pipeline::{Pipeline, TracingPlugin};
//!
//! let mut ctx = Pipeline::new().plugin(TracingPlugin::new()).run(catalog, config)?;
//! for diag in &ctx.diagnostics {
//!     eprintln!("{diag}");
//! }
//! let library = ctx.take_output()?;
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use plugin::{Plugin, TracingPlugin};
pub use runner::Pipeline;
