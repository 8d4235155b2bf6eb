//! Jsonnet library generation for a schema catalog.
//!
//! # Module Organization
//!
//! - [`builder`] - catalog types to namespaces with constructors and setters
//! - [`mixin`] - mixin synthesis for reference-valued setters
//! - [`marshal`] - namespace tree to Jsonnet AST
//! - [`templates`] - small Jsonnet expressions embedded in the output
//! - [`pipeline`] - phase orchestration, plugins and diagnostics
//!
//! Most callers only need [`generate`], or [`pipeline::Pipeline`] when they
//! want diagnostics or plugin hooks.

pub mod builder;
mod config;
mod error;
pub mod marshal;
pub mod mixin;
mod namespace;
mod naming;
pub mod pipeline;
pub mod templates;

pub use builder::{Builder, Rename};
pub use config::{GeneratorConfig, LibraryConfig, NamingConfig};
pub use error::{Error, Result};
pub use kgen_schema::Catalog;
pub use marshal::Marshaller;
pub use mixin::{EmptyMixin, build_mixins};
pub use namespace::{
    Constructor, ConstructorParam, MixinSpec, Namespace, NamespaceId, NamespaceTree,
    PropertyMethod, SetterStrategy, SpecialCall, TreeStats,
};
pub use naming::MethodName;

/// Generate the library text for a catalog.
///
/// # Errors
///
/// Returns the first fatal generation error. Typed errors can be recovered
/// with `downcast_ref::<kgen_codegen::Error>()`.
pub fn generate(catalog: Catalog, config: &GeneratorConfig) -> eyre::Result<String> {
    pipeline::Pipeline::new()
        .run(catalog, config.clone())?
        .take_output()
}
