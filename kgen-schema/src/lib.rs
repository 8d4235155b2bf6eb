//! Schema catalog model and loader.
//!
//! The loader reads a swagger 1.2 API document (`apiVersion` plus a `models`
//! map) into a [`Catalog`] whose references all resolve and whose type ids
//! are unique. Errors are miette diagnostics pointing into the document.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod catalog;
mod error;
mod options;
mod swagger;

use std::path::Path;

pub use catalog::{Catalog, ItemType, Omission, PrimitiveType, Property, TypeDef};
pub use error::{Error, Result, SourceContext};
pub use options::LoadOptions;

/// Load a schema document from the given path.
pub fn parse_file(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Catalog> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Box::new(Error::Io {
            path: path.to_path_buf(),
            source: e,
        })
    })?;
    let filename = path.display().to_string();
    parse_str_with_filename(&content, &filename, options)
}

/// Load a schema document from a string (uses "schema.json" as filename).
pub fn parse_str(content: &str, options: &LoadOptions) -> Result<Catalog> {
    parse_str_with_filename(content, "schema.json", options)
}

/// Load a schema document from a string with a custom filename for error
/// reporting.
pub fn parse_str_with_filename(
    content: &str,
    filename: &str,
    options: &LoadOptions,
) -> Result<Catalog> {
    swagger::load(&SourceContext::new(content, filename), options)
}
