//! Namespace builder: turns catalog types into namespaces with constructors
//! and setters.

use std::collections::BTreeMap;

use kgen_ast::Node;
use kgen_schema::{Catalog, TypeDef};
use tracing::{debug, trace};

use crate::{
    Error, GeneratorConfig, Result,
    namespace::{
        Constructor, ConstructorParam, NamespaceId, NamespaceTree, PropertyMethod, SpecialCall,
    },
    templates,
};

pub const KIND: &str = "kind";
pub const API_VERSION: &str = "apiVersion";
pub const METADATA: &str = "metadata";

/// Parameters a constructor gains when it fills in default metadata.
pub const METADATA_NAME_PARAM: &str = "name";
pub const METADATA_NAMESPACE_PARAM: &str = "namespace";
pub const DEFAULT_NAMESPACE: &str = "default";

/// A property whose method id differs from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub type_id: String,
    pub property: String,
    pub method: String,
}

/// Adds catalog types to a namespace tree it borrows for the duration of
/// the build.
pub struct Builder<'a> {
    tree: &'a mut NamespaceTree,
    config: &'a GeneratorConfig,
    renames: Vec<Rename>,
}

impl<'a> Builder<'a> {
    pub fn new(tree: &'a mut NamespaceTree, config: &'a GeneratorConfig) -> Self {
        Self {
            tree,
            config,
            renames: Vec::new(),
        }
    }

    /// Add every type of the catalog, in id order.
    pub fn add_catalog(&mut self, catalog: &Catalog) -> Result<()> {
        for ty in catalog.types() {
            self.add_type(ty)?;
        }
        Ok(())
    }

    /// Add one type: resolve its namespace, then attach its constructor and
    /// setters.
    pub fn add_type(&mut self, ty: &TypeDef) -> Result<NamespaceId> {
        let (id, created) = self.tree.resolve_or_create(&ty.id);
        let ns = self.tree.get(id);
        if let Some(existing) = &ns.type_id {
            return Err(Error::TypeCollision {
                id: ty.id.clone(),
                namespace: ns.path.clone(),
                existing: existing.clone(),
            });
        }

        let methods = self.methods(ty)?;
        let constructor = self.constructor(ty, &methods)?;
        let naming = &self.config.naming;

        let ns = self.tree.get_mut(id);
        ns.type_id = Some(ty.id.clone());
        ns.description = ty.description.clone();
        ns.constructor = constructor;
        for (property, method) in methods {
            if naming.is_special(&property) {
                ns.special.insert(property, method);
            } else if !ty.is_required(&property) {
                ns.methods.insert(method.name.clone(), method);
            }
        }

        debug!(
            type_id = %ty.id,
            created,
            setters = ns.methods.len(),
            constructor = ns.constructor.is_some(),
            "added type"
        );
        Ok(id)
    }

    pub fn renames(&self) -> &[Rename] {
        &self.renames
    }

    pub fn into_renames(self) -> Vec<Rename> {
        self.renames
    }

    /// One method per property, keyed by property name.
    fn methods(&mut self, ty: &TypeDef) -> Result<BTreeMap<String, PropertyMethod>> {
        let config = self.config;
        let reserved = [
            config.library.constructor_name.as_str(),
            config.library.mixin_name.as_str(),
        ];

        let mut owners: BTreeMap<String, &str> = BTreeMap::new();
        let mut methods = BTreeMap::new();

        for (property, descriptor) in &ty.properties {
            let method = config.naming.method_name(property, &reserved);
            if let Some(first) = owners.insert(method.id.clone(), property) {
                return Err(Error::MethodCollision {
                    type_id: ty.id.clone(),
                    method: method.id,
                    first: first.to_string(),
                    second: property.clone(),
                });
            }

            if method.renamed {
                trace!(type_id = %ty.id, %property, method = %method.id, "renamed property");
                self.renames.push(Rename {
                    type_id: ty.id.clone(),
                    property: property.clone(),
                    method: method.id.clone(),
                });
            }

            methods.insert(
                property.clone(),
                PropertyMethod {
                    name: method.id.clone(),
                    param: method.id,
                    field: property.clone(),
                    property: descriptor.clone(),
                },
            );
        }

        Ok(methods)
    }

    fn constructor(
        &self,
        ty: &TypeDef,
        methods: &BTreeMap<String, PropertyMethod>,
    ) -> Result<Option<Constructor>> {
        let naming = &self.config.naming;
        let has_api_version = self.tree.root().api_version.is_some();
        let has_special =
            |name: &str| naming.is_special(name) && ty.properties.contains_key(name);

        let mut special_calls = Vec::new();
        if has_api_version && has_special(API_VERSION) {
            special_calls.push(SpecialCall::ApiVersion);
        }
        if has_special(KIND) {
            special_calls.push(SpecialCall::Kind);
        }
        if has_api_version && has_special(METADATA) {
            special_calls.push(SpecialCall::DefaultMetadata);
        }

        // Defaults go in first so required parameters overwrite them.
        let mut assignments: BTreeMap<String, Node> = BTreeMap::new();
        for (name, property) in &ty.properties {
            if naming.is_special(name) {
                continue;
            }
            if let Some(default) = templates::empty_default(property) {
                assignments.insert(name.clone(), default);
            }
        }

        let mut params = Vec::new();
        for name in &ty.required {
            if naming.is_special(name) {
                continue;
            }
            let (Some(property), Some(method)) = (ty.properties.get(name), methods.get(name))
            else {
                continue;
            };

            let value = if property.is_array() {
                templates::array_autobox(&method.param)
            } else {
                Node::var(&method.param)
            };
            assignments.insert(name.clone(), value);
            params.push(ConstructorParam {
                name: method.param.clone(),
                field: name.clone(),
                property: property.clone(),
            });
        }
        params.sort_by(|a, b| a.name.cmp(&b.name));

        if special_calls.contains(&SpecialCall::DefaultMetadata) {
            if let Some(param) = params
                .iter()
                .find(|p| p.name == METADATA_NAME_PARAM || p.name == METADATA_NAMESPACE_PARAM)
            {
                return Err(Error::ParameterCollision {
                    type_id: ty.id.clone(),
                    parameter: param.name.clone(),
                });
            }
        }

        let constructor = Constructor {
            name: self.config.library.constructor_name.clone(),
            params,
            special_calls,
            assignments,
        };
        Ok((!constructor.is_empty()).then_some(constructor))
    }
}

#[cfg(test)]
mod tests {
    use kgen_ast::print;
    use kgen_schema::{ItemType, PrimitiveType, Property};

    use super::*;

    fn string() -> Property {
        Property::literal(PrimitiveType::String)
    }

    fn build(api_version: Option<&str>, types: &[TypeDef]) -> Result<NamespaceTree> {
        let config = GeneratorConfig::default();
        let mut tree = NamespaceTree::new(api_version.map(str::to_string));
        let mut builder = Builder::new(&mut tree, &config);
        for ty in types {
            builder.add_type(ty)?;
        }
        Ok(tree)
    }

    fn namespace<'t>(tree: &'t NamespaceTree, path: &str) -> &'t crate::Namespace {
        tree.get(tree.lookup(path).unwrap())
    }

    #[test]
    fn test_optional_properties_become_setters() {
        let ty = TypeDef::new("v1.Container")
            .with_required("name", string())
            .with_property("image", string())
            .with_property("ports", Property::array_of(ItemType::Reference("v1.ContainerPort".into())));
        let tree = build(None, &[ty]).unwrap();
        let ns = namespace(&tree, "v1.Container");

        assert_eq!(ns.methods.keys().collect::<Vec<_>>(), ["image", "ports"]);
        let constructor = ns.constructor.as_ref().unwrap();
        assert_eq!(constructor.name, "default");
        assert_eq!(constructor.params.len(), 1);
        assert_eq!(constructor.params[0].name, "name");
    }

    #[test]
    fn test_special_properties_are_segregated() {
        let ty = TypeDef::new("v1.Service")
            .with_property("kind", string())
            .with_property("apiVersion", string())
            .with_property("metadata", Property::reference("v1.ObjectMeta"))
            .with_property("spec", Property::reference("v1.ServiceSpec"));
        let tree = build(Some("v1"), &[ty]).unwrap();
        let ns = namespace(&tree, "v1.Service");

        assert_eq!(ns.special.keys().collect::<Vec<_>>(), ["apiVersion", "kind", "metadata"]);
        assert_eq!(ns.methods.keys().collect::<Vec<_>>(), ["spec"]);
        let constructor = ns.constructor.as_ref().unwrap();
        assert_eq!(
            constructor.special_calls,
            [SpecialCall::ApiVersion, SpecialCall::Kind, SpecialCall::DefaultMetadata]
        );
        assert!(!constructor.assignments.contains_key("metadata"));
    }

    #[test]
    fn test_no_api_version_means_no_version_calls() {
        let ty = TypeDef::new("v1.Service")
            .with_property("kind", string())
            .with_property("apiVersion", string())
            .with_property("metadata", Property::reference("v1.ObjectMeta"));
        let tree = build(None, &[ty]).unwrap();
        let constructor = namespace(&tree, "v1.Service").constructor.clone().unwrap();
        assert_eq!(constructor.special_calls, [SpecialCall::Kind]);
    }

    #[test]
    fn test_required_params_sorted_and_autoboxed() {
        let ty = TypeDef::new("v1.PodSpec")
            .with_required("volumes", Property::array_of(ItemType::Reference("v1.Volume".into())))
            .with_required("containers", Property::array_of(ItemType::Reference("v1.Container".into())))
            .with_required("hostname", string());
        let tree = build(None, &[ty]).unwrap();
        let ns = namespace(&tree, "v1.PodSpec");
        let constructor = ns.constructor.as_ref().unwrap();

        let names: Vec<_> = constructor.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["containers", "hostname", "volumes"]);
        assert_eq!(
            print(&constructor.assignments["containers"]).unwrap(),
            r#"if std.type(containers) == "array" then containers else [containers]"#
        );
        assert_eq!(print(&constructor.assignments["hostname"]).unwrap(), "hostname");
        assert!(ns.methods.is_empty());
    }

    #[test]
    fn test_defaults_for_optional_complex_fields() {
        let ty = TypeDef::new("v1.ObjectMeta")
            .with_property("labels", Property::literal(PrimitiveType::Object))
            .with_property("finalizers", Property::array_of(ItemType::Primitive(PrimitiveType::String)))
            .with_property("owner", Property::reference("v1.OwnerReference"))
            .with_property("name", string());
        let tree = build(None, &[ty]).unwrap();
        let constructor = namespace(&tree, "v1.ObjectMeta").constructor.clone().unwrap();

        let printed: Vec<_> = constructor
            .assignments
            .iter()
            .map(|(k, v)| format!("{k}={}", print(v).unwrap()))
            .collect();
        assert_eq!(printed, ["finalizers=[]", "labels={}", "owner={}"]);
        assert!(constructor.params.is_empty());
    }

    #[test]
    fn test_required_overrides_default() {
        let ty = TypeDef::new("v1.Pod").with_required("spec", Property::reference("v1.PodSpec"));
        let tree = build(None, &[ty]).unwrap();
        let constructor = namespace(&tree, "v1.Pod").constructor.clone().unwrap();
        assert_eq!(print(&constructor.assignments["spec"]).unwrap(), "spec");
    }

    #[test]
    fn test_empty_constructor_is_suppressed() {
        let ty = TypeDef::new("v1.Probe")
            .with_property("periodSeconds", Property::literal(PrimitiveType::Integer))
            .with_property("command", string());
        let tree = build(Some("v1"), &[ty]).unwrap();
        let ns = namespace(&tree, "v1.Probe");
        assert!(ns.constructor.is_none());
        assert_eq!(ns.methods.len(), 2);
    }

    #[test]
    fn test_reserved_names_are_renamed() {
        let ty = TypeDef::new("v1.Status")
            .with_property("error", string())
            .with_property("default", string())
            .with_property("mixin", string());
        let config = GeneratorConfig::default();
        let mut tree = NamespaceTree::new(None);
        let mut builder = Builder::new(&mut tree, &config);
        builder.add_type(&ty).unwrap();

        let renamed: Vec<_> = builder.renames().iter().map(|r| r.method.as_str()).collect();
        assert_eq!(renamed, ["defaultValue", "errorCondition", "mixinValue"]);

        let ns = namespace(&tree, "v1.Status");
        let method = &ns.methods["errorCondition"];
        assert_eq!(method.param, "errorCondition");
        assert_eq!(method.field, "error");
    }

    #[test]
    fn test_non_identifier_property_is_renamed() {
        let ty = TypeDef::new("v1.Props").with_required("x-kubernetes-embedded", string());
        let config = GeneratorConfig::default();
        let mut tree = NamespaceTree::new(None);
        let mut builder = Builder::new(&mut tree, &config);
        builder.add_type(&ty).unwrap();

        assert_eq!(
            builder.renames(),
            [Rename {
                type_id: "v1.Props".into(),
                property: "x-kubernetes-embedded".into(),
                method: "xKubernetesEmbedded".into(),
            }]
        );
        let constructor = namespace(&tree, "v1.Props").constructor.clone().unwrap();
        assert_eq!(constructor.params[0].name, "xKubernetesEmbedded");
        assert_eq!(constructor.params[0].field, "x-kubernetes-embedded");
        assert_eq!(
            print(&constructor.assignments["x-kubernetes-embedded"]).unwrap(),
            "xKubernetesEmbedded"
        );
    }

    #[test]
    fn test_method_collision() {
        let ty = TypeDef::new("v1.Node")
            .with_property("podCIDR", string())
            .with_property("podCidr", string());
        let err = build(None, &[ty]).unwrap_err();
        assert!(matches!(
            err,
            Error::MethodCollision { ref method, .. } if method == "podCidr"
        ));
    }

    #[test]
    fn test_type_collision() {
        let err = build(None, &[TypeDef::new("v1.Pod"), TypeDef::new("v1.Pod")]).unwrap_err();
        assert!(matches!(err, Error::TypeCollision { ref namespace, .. } if namespace == "v1.Pod"));
    }

    #[test]
    fn test_type_on_intermediate_namespace() {
        let tree = build(None, &[TypeDef::new("v1.Pod.Spec"), TypeDef::new("v1.Pod")]).unwrap();
        let pod = namespace(&tree, "v1.Pod");
        assert_eq!(pod.type_id.as_deref(), Some("v1.Pod"));
        assert_eq!(pod.children.len(), 1);
    }

    #[test]
    fn test_metadata_parameter_collision() {
        let ty = TypeDef::new("v1.Secret")
            .with_property("metadata", Property::reference("v1.ObjectMeta"))
            .with_required("name", string());
        let err = build(Some("v1"), &[ty]).unwrap_err();
        assert!(matches!(
            err,
            Error::ParameterCollision { ref parameter, .. } if parameter == "name"
        ));
    }
}
