use thiserror::Error;

/// Result type for AST construction and printing.
pub type Result<T> = std::result::Result<T, Error>;

/// Structural errors in an AST.
///
/// These indicate a bug in whatever built the tree rather than bad input,
/// so they are never retried or worked around by the printer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("field {0:?} already exists in the object")]
    DuplicateField(String),

    #[error("{0:?} is not a valid binary operator")]
    UnknownOperator(String),

    #[error("cannot linearize {0} into a dotted call target")]
    InvalidApplyTarget(&'static str),

    #[error("index selector must be a string literal, found {0}")]
    InvalidIndexSelector(&'static str),

    #[error("{0} has no Jsonnet number literal")]
    NonFiniteNumber(String),

    #[error("identifier is empty")]
    EmptyIdentifier,

    #[error("invalid default argument for parameter {name:?}: {source}")]
    InvalidDefaultArgument {
        name: String,
        #[source]
        source: Box<Error>,
    },
}
