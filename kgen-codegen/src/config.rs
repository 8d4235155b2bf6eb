//! Generator configuration.
//!
//! All naming tables live here as plain data so that several generators,
//! e.g. one per schema version, can run side by side without sharing state.

use std::{collections::BTreeMap, path::Path};

use kgen_ast::{Indent, ident::JSONNET_KEYWORDS};
use kgen_schema::LoadOptions;
use serde::{Deserialize, Deserializer};

use crate::{Error, Result};

/// Complete configuration for one generator run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub library: LibraryConfig,
    pub naming: NamingConfig,
    pub schema: LoadOptions,
}

impl GeneratorConfig {
    /// Load a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Shape of the emitted library.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LibraryConfig {
    /// Name of every namespace's constructor.
    pub constructor_name: String,
    /// Name of the per-namespace mixin object.
    pub mixin_name: String,
    /// Type id whose setters build default object metadata.
    pub object_metadata_type: String,
    /// Name of the root-level local that builds default metadata.
    pub default_metadata_name: String,
    /// Emit descriptions as `//` comments.
    pub comments: bool,
    #[serde(deserialize_with = "deserialize_indent")]
    pub indent: Indent,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            constructor_name: "default".to_string(),
            mixin_name: "mixin".to_string(),
            object_metadata_type: "v1.ObjectMeta".to_string(),
            default_metadata_name: "defaultMetadata".to_string(),
            comments: true,
            indent: Indent::JSONNET,
        }
    }
}

/// Accepts a width (`indent = 4`) or `indent = "tab"`.
fn deserialize_indent<'de, D>(deserializer: D) -> std::result::Result<Indent, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawIndent {
        Width(u8),
        Name(String),
    }

    match RawIndent::deserialize(deserializer)? {
        RawIndent::Width(width) => Ok(Indent::Spaces(width)),
        RawIndent::Name(name) if name == "tab" => Ok(Indent::Tab),
        RawIndent::Name(other) => Err(D::Error::custom(format!(
            "invalid indent {other:?}, expected a width or \"tab\""
        ))),
    }
}

/// Identifier vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConfig {
    /// Names that cannot be used as bare method ids.
    pub reserved_words: Vec<String>,
    /// Properties filled in by constructors instead of exposed as setters.
    pub special_properties: Vec<String>,
    /// Appended to method ids that clash with the constructor or mixin name.
    pub constructor_suffix: String,
    /// Appended to method ids that clash with a reserved word.
    pub reserved_suffix: String,
    /// Literal substring rewrites, applied in order, e.g. `["HTTP", "Http"]`.
    pub acronyms: Vec<(String, String)>,
    /// Exact identifier rewrites; an alias replaces the acronym rewrites.
    pub aliases: BTreeMap<String, String>,
}

const DEFAULT_ACRONYMS: &[(&str, &str)] = &[
    ("ISCSI", "Iscsi"),
    ("CIDR", "Cidr"),
    ("HTTP", "Http"),
    ("UUID", "Uuid"),
    ("API", "Api"),
    ("AWS", "Aws"),
    ("CPU", "Cpu"),
    ("GCE", "Gce"),
    ("IPC", "Ipc"),
    ("NFS", "Nfs"),
    ("PID", "Pid"),
    ("RBD", "Rbd"),
    ("TCP", "Tcp"),
    ("TLS", "Tls"),
    ("URI", "Uri"),
    ("URL", "Url"),
    ("WWN", "Wwn"),
    ("FC", "Fc"),
    ("FS", "Fs"),
    ("ID", "Id"),
    ("IO", "Io"),
    ("IP", "Ip"),
    ("SE", "Se"),
];

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            reserved_words: JSONNET_KEYWORDS.iter().map(|w| w.to_string()).collect(),
            special_properties: ["kind", "apiVersion", "metadata"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            constructor_suffix: "Value".to_string(),
            reserved_suffix: "Condition".to_string(),
            acronyms: DEFAULT_ACRONYMS
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            aliases: BTreeMap::new(),
        }
    }
}
