//! Identifier rewriting for generated names.

use kgen_ast::ident::is_identifier;

use crate::{Error, NamingConfig, Result};

/// A method id chosen for a schema property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodName {
    pub id: String,
    /// Set when the id differs from the property name.
    pub renamed: bool,
}

impl NamingConfig {
    /// Apply the alias for `id`, or the acronym rewrites if it has none.
    pub fn normalize(&self, id: &str) -> String {
        if let Some(alias) = self.aliases.get(id) {
            return alias.clone();
        }
        self.acronyms
            .iter()
            .fold(id.to_string(), |acc, (from, to)| acc.replace(from.as_str(), to))
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.iter().any(|w| w == name)
    }

    pub fn is_special(&self, property: &str) -> bool {
        self.special_properties.iter().any(|p| p == property)
    }

    /// Method id for a property.
    ///
    /// Names that are not identifiers are camel-cased first. Ids equal to one
    /// of `constructor_reserved` get `constructor_suffix`; reserved words get
    /// `reserved_suffix`.
    pub fn method_name(&self, property: &str, constructor_reserved: &[&str]) -> MethodName {
        let mut id = to_identifier(&self.normalize(property));
        if constructor_reserved.contains(&id.as_str()) {
            id.push_str(&self.constructor_suffix);
        } else if self.is_reserved(&id) {
            id.push_str(&self.reserved_suffix);
        }
        MethodName {
            renamed: id != property,
            id,
        }
    }

    /// Jsonnet style of a namespace segment: normalized, first letter
    /// lower-cased.
    pub fn stylize(&self, id: &str, namespace: &str) -> Result<String> {
        if id.is_empty() {
            return Err(Error::EmptyIdentifier {
                namespace: namespace.to_string(),
            });
        }
        Ok(lower_first(&self.normalize(id)))
    }

    /// `$`-relative Jsonnet path of a dotted type id, e.g. `v1.ObjectMeta`
    /// becomes `v1.objectMeta`.
    pub fn jsonnet_path(&self, type_id: &str) -> Result<String> {
        let mut parent = String::new();
        let mut segments = Vec::new();
        for segment in type_id.split('.') {
            segments.push(self.stylize(segment, &parent)?);
            if !parent.is_empty() {
                parent.push('.');
            }
            parent.push_str(segment);
        }
        Ok(segments.join("."))
    }
}

/// `x-kubernetes-embedded` becomes `xKubernetesEmbedded`, `2xx` becomes
/// `_2xx`.
fn to_identifier(name: &str) -> String {
    if is_identifier(name) {
        return name.to_string();
    }

    let mut id = String::new();
    for part in name
        .split(|c: char| c != '_' && !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
    {
        if id.is_empty() {
            id.push_str(part);
        } else {
            id.push_str(&upper_first(part));
        }
    }
    if !id.starts_with(|c: char| c == '_' || c.is_ascii_alphabetic()) {
        id.insert(0, '_');
    }
    id
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naming() -> NamingConfig {
        NamingConfig::default()
    }

    #[test]
    fn test_acronyms() {
        let naming = naming();
        assert_eq!(naming.normalize("podCIDR"), "podCidr");
        assert_eq!(naming.normalize("hostIPC"), "hostIpc");
        assert_eq!(naming.normalize("clusterIP"), "clusterIp");
        assert_eq!(naming.normalize("targetWWNs"), "targetWwns");
        assert_eq!(naming.normalize("HTTPGetAction"), "HttpGetAction");
        assert_eq!(naming.normalize("image"), "image");
    }

    #[test]
    fn test_alias_replaces_acronyms() {
        let mut naming = naming();
        naming.aliases.insert("scaleIO".into(), "scaleIo".into());
        naming.aliases.insert("podIP".into(), "podAddress".into());
        assert_eq!(naming.normalize("scaleIO"), "scaleIo");
        assert_eq!(naming.normalize("podIP"), "podAddress");
    }

    #[test]
    fn test_method_name_reserved() {
        let naming = naming();
        let reserved = ["default", "mixin"];
        assert_eq!(
            naming.method_name("error", &reserved),
            MethodName {
                id: "errorCondition".into(),
                renamed: true
            }
        );
        assert_eq!(naming.method_name("default", &reserved).id, "defaultValue");
        assert_eq!(naming.method_name("mixin", &reserved).id, "mixinValue");
        assert_eq!(
            naming.method_name("image", &reserved),
            MethodName {
                id: "image".into(),
                renamed: false
            }
        );
        assert!(naming.method_name("podIP", &reserved).renamed);
    }

    #[test]
    fn test_method_name_non_identifier() {
        let naming = naming();
        let reserved = ["default", "mixin"];
        assert_eq!(
            naming.method_name("x-kubernetes-embedded", &reserved),
            MethodName {
                id: "xKubernetesEmbedded".into(),
                renamed: true
            }
        );
        assert_eq!(naming.method_name("$ref", &reserved).id, "ref");
        assert_eq!(naming.method_name("io.k8s.name", &reserved).id, "ioK8sName");
        assert_eq!(naming.method_name("2xx", &reserved).id, "_2xx");
        assert_eq!(naming.method_name("x-default", &reserved).id, "xDefault");
        assert_eq!(naming.method_name("under_score", &reserved).id, "under_score");
    }

    #[test]
    fn test_stylize() {
        let naming = naming();
        assert_eq!(naming.stylize("Deployment", "v1").unwrap(), "deployment");
        assert_eq!(naming.stylize("v1beta1", "").unwrap(), "v1beta1");
        assert_eq!(naming.stylize("HTTPGetAction", "v1").unwrap(), "httpGetAction");
        assert!(matches!(
            naming.stylize("", "v1"),
            Err(Error::EmptyIdentifier { namespace }) if namespace == "v1"
        ));
    }

    #[test]
    fn test_jsonnet_path() {
        let naming = naming();
        assert_eq!(naming.jsonnet_path("v1.ObjectMeta").unwrap(), "v1.objectMeta");
        assert_eq!(
            naming.jsonnet_path("apps.v1beta1.Deployment").unwrap(),
            "apps.v1beta1.deployment"
        );
        assert!(naming.jsonnet_path("v1..Pod").is_err());
    }
}
