use std::path::PathBuf;

use thiserror::Error;

/// Result type for library generation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or rendering a library.
///
/// All of them are deterministic functions of the input catalog and
/// configuration; generation stops at the first one.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config '{path}'")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid generator config")]
    ConfigParse(#[from] toml::de::Error),

    #[error("property '{property}' of '{namespace}' references '{target}', which does not exist")]
    MissingReference {
        namespace: String,
        property: String,
        target: String,
    },

    #[error("object in namespace '{namespace}' has an empty identifier")]
    EmptyIdentifier { namespace: String },

    #[error(
        "can't emit '{name}' as '{stylized}' in namespace '{namespace}' because a member already exists with that name"
    )]
    SiblingCollision {
        namespace: String,
        name: String,
        stylized: String,
    },

    #[error("type '{id}' lands on namespace '{namespace}', which already holds type '{existing}'")]
    TypeCollision {
        id: String,
        namespace: String,
        existing: String,
    },

    #[error("properties '{first}' and '{second}' of '{type_id}' both map to method '{method}'")]
    MethodCollision {
        type_id: String,
        method: String,
        first: String,
        second: String,
    },

    #[error("constructor parameter '{parameter}' of '{type_id}' collides with a metadata parameter")]
    ParameterCollision { type_id: String, parameter: String },

    #[error("object metadata type '{type_id}' is not in the catalog")]
    MissingMetadataType { type_id: String },

    #[error("object metadata type '{type_id}' has no '{setter}' setter")]
    MissingMetadataSetter { type_id: String, setter: String },

    #[error(transparent)]
    Ast(#[from] kgen_ast::Error),
}
