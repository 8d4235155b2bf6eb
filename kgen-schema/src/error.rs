use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for kgen-schema operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Holds the raw document and its filename so that loader errors can point
/// at the offending text.
#[derive(Debug, Clone)]
pub struct SourceContext<'a> {
    src: &'a str,
    filename: &'a str,
}

impl<'a> SourceContext<'a> {
    pub fn new(src: &'a str, filename: &'a str) -> Self {
        Self { src, filename }
    }

    pub fn src(&self) -> &'a str {
        self.src
    }

    pub fn filename(&self) -> &'a str {
        self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.filename, self.src.to_string())
    }

    /// Create a parse error from a serde_json error.
    pub fn parse_error(&self, source: serde_json::Error) -> Box<Error> {
        let span = offset_of(self.src, source.line(), source.column())
            .map(|offset| SourceSpan::from((offset, 0)));
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Find the first quoted occurrence of `text` at or after `from`.
    ///
    /// Falls back to a search from the start of the document when nothing
    /// follows `from`.
    pub fn find_quoted(&self, text: &str, from: usize) -> Option<SourceSpan> {
        let needle = format!("\"{text}\"");
        let tail = self.src.get(from..).unwrap_or_default();
        if let Some(pos) = tail.find(&needle) {
            return Some(SourceSpan::from((from + pos, needle.len())));
        }
        self.src
            .find(&needle)
            .map(|pos| SourceSpan::from((pos, needle.len())))
    }
}

/// Convert a 1-based line and column into a byte offset.
fn offset_of(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    Some((line_start + column.saturating_sub(1)).min(src.len()))
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(kgen::io), help("check that the schema path exists and is readable"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema document")]
    #[diagnostic(code(kgen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_json::Error,
    },

    #[error("property '{property}' of '{model}' has neither a type nor a $ref")]
    #[diagnostic(
        code(kgen::missing_type),
        help("every property must declare either \"type\" or \"$ref\"")
    )]
    MissingType {
        #[source_code]
        src: NamedSource<String>,
        #[label("untyped property")]
        span: Option<SourceSpan>,
        model: String,
        property: String,
    },

    #[error("unknown type '{ty}' for property '{property}' of '{model}'")]
    #[diagnostic(
        code(kgen::unknown_type),
        help("valid types are: string, integer, number, boolean, object, array, any")
    )]
    UnknownType {
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown type")]
        span: Option<SourceSpan>,
        model: String,
        property: String,
        ty: String,
    },

    #[error("'{model}' requires '{property}', which it does not declare")]
    #[diagnostic(
        code(kgen::undeclared_required),
        help("add '{property}' to the model's properties or remove it from \"required\"")
    )]
    UndeclaredRequired {
        #[source_code]
        src: NamedSource<String>,
        #[label("required here")]
        span: Option<SourceSpan>,
        model: String,
        property: String,
    },

    #[error("property '{property}' of '{model}' references unknown type '{target}'")]
    #[diagnostic(
        code(kgen::dangling_reference),
        help("references must point at a model defined in the same document")
    )]
    DanglingReference {
        #[source_code]
        src: NamedSource<String>,
        #[label("no model with this id")]
        span: Option<SourceSpan>,
        model: String,
        property: String,
        target: String,
    },

    #[error("duplicate model id '{id}'")]
    #[diagnostic(code(kgen::duplicate_model))]
    DuplicateModel {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared again here")]
        span: Option<SourceSpan>,
        id: String,
    },

    #[error("type '{id}' is already in the catalog")]
    #[diagnostic(code(kgen::duplicate_type))]
    DuplicateType { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_of() {
        let src = "ab\ncd\nef";
        assert_eq!(offset_of(src, 1, 1), Some(0));
        assert_eq!(offset_of(src, 2, 2), Some(4));
        assert_eq!(offset_of(src, 3, 1), Some(6));
        assert_eq!(offset_of(src, 0, 0), None);
    }

    #[test]
    fn test_find_quoted_prefers_later_occurrence() {
        let src = r#"{"a": {"name": 1}, "b": {"name": 2}}"#;
        let ctx = SourceContext::new(src, "doc.json");
        let b = src.find("\"b\"").unwrap();
        let span = ctx.find_quoted("name", b).unwrap();
        assert_eq!(span.offset(), src.rfind("\"name\"").unwrap());
        assert_eq!(span.len(), 6);
    }

    #[test]
    fn test_find_quoted_falls_back_to_start() {
        let ctx = SourceContext::new(r#"{"x": 1}"#, "doc.json");
        let span = ctx.find_quoted("x", 6).unwrap();
        assert_eq!(span.offset(), 1);
    }
}
