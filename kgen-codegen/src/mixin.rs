//! Mixin synthesis.
//!
//! For each reference-valued setter (plus the special `metadata` setter),
//! the referenced namespace's setters are copied into a [`MixinSpec`] that
//! merges through the referencing field. Only the referenced namespace's own
//! setters are copied; its mixins are not followed, so reference cycles
//! terminate.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    Error, Result,
    builder::METADATA,
    namespace::{MixinSpec, NamespaceId, NamespaceTree},
};

/// A reference whose target exposes no setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyMixin {
    pub namespace: String,
    pub field: String,
    pub source: String,
}

/// Attach mixin specs to every namespace of a fully built tree.
///
/// Returns the specs that came out empty; they are kept but never emitted.
pub fn build_mixins(tree: &mut NamespaceTree) -> Result<Vec<EmptyMixin>> {
    let mut pending: Vec<(NamespaceId, BTreeMap<String, MixinSpec>)> = Vec::new();

    for id in tree.ids() {
        let ns = tree.get(id);
        let sources = ns.special.get(METADATA).into_iter().chain(ns.methods.values());

        let mut specs = BTreeMap::new();
        for method in sources {
            let Some(target) = method.property.reference_target() else {
                continue;
            };
            let source = tree
                .lookup(target)
                .ok_or_else(|| Error::MissingReference {
                    namespace: ns.path.clone(),
                    property: method.field.clone(),
                    target: target.to_string(),
                })?;

            let spec = MixinSpec {
                field: method.field.clone(),
                helper: format!("__{}Mixin", method.name),
                param: method.param.clone(),
                source: target.to_string(),
                methods: tree.get(source).methods.clone(),
            };
            debug!(
                namespace = %ns.path,
                field = %spec.field,
                source = %spec.source,
                methods = spec.methods.len(),
                "built mixin"
            );
            specs.insert(spec.field.clone(), spec);
        }

        if !specs.is_empty() {
            pending.push((id, specs));
        }
    }

    let mut empty = Vec::new();
    for (id, specs) in pending {
        let ns = tree.get_mut(id);
        empty.extend(
            specs
                .values()
                .filter(|spec| spec.methods.is_empty())
                .map(|spec| EmptyMixin {
                    namespace: ns.path.clone(),
                    field: spec.field.clone(),
                    source: spec.source.clone(),
                }),
        );
        ns.mixins = specs;
    }

    Ok(empty)
}

#[cfg(test)]
mod tests {
    use kgen_schema::{PrimitiveType, Property, TypeDef};

    use super::*;
    use crate::{Builder, GeneratorConfig};

    fn tree(api_version: Option<&str>, types: &[TypeDef]) -> NamespaceTree {
        let config = GeneratorConfig::default();
        let mut tree = NamespaceTree::new(api_version.map(str::to_string));
        let mut builder = Builder::new(&mut tree, &config);
        for ty in types {
            builder.add_type(ty).unwrap();
        }
        tree
    }

    fn string() -> Property {
        Property::literal(PrimitiveType::String)
    }

    #[test]
    fn test_mixin_copies_referenced_setters() {
        let mut tree = tree(
            None,
            &[
                TypeDef::new("v1.Pod").with_property("spec", Property::reference("v1.PodSpec")),
                TypeDef::new("v1.PodSpec")
                    .with_property("hostname", string())
                    .with_property("subdomain", string()),
            ],
        );
        let empty = build_mixins(&mut tree).unwrap();
        assert!(empty.is_empty());

        let pod = tree.get(tree.lookup("v1.Pod").unwrap());
        let spec = &pod.mixins["spec"];
        assert_eq!(spec.helper, "__specMixin");
        assert_eq!(spec.param, "spec");
        assert_eq!(spec.source, "v1.PodSpec");
        assert_eq!(spec.methods.keys().collect::<Vec<_>>(), ["hostname", "subdomain"]);
    }

    #[test]
    fn test_metadata_special_gets_mixin() {
        let mut tree = tree(
            Some("v1"),
            &[
                TypeDef::new("v1.Service").with_property("metadata", Property::reference("v1.ObjectMeta")),
                TypeDef::new("v1.ObjectMeta").with_property("name", string()),
            ],
        );
        build_mixins(&mut tree).unwrap();
        let service = tree.get(tree.lookup("v1.Service").unwrap());
        assert!(service.methods.is_empty());
        assert_eq!(service.mixins["metadata"].methods.len(), 1);
    }

    #[test]
    fn test_missing_reference_is_fatal() {
        let mut tree = tree(
            None,
            &[TypeDef::new("v1.Pod").with_property("spec", Property::reference("v1.PodSpec"))],
        );
        let err = build_mixins(&mut tree).unwrap_err();
        match err {
            Error::MissingReference {
                namespace,
                property,
                target,
            } => {
                assert_eq!(namespace, "v1.Pod");
                assert_eq!(property, "spec");
                assert_eq!(target, "v1.PodSpec");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_reference_cycle_is_shallow() {
        let mut tree = tree(
            None,
            &[
                TypeDef::new("v1.A")
                    .with_property("b", Property::reference("v1.B"))
                    .with_property("label", string()),
                TypeDef::new("v1.B")
                    .with_property("a", Property::reference("v1.A"))
                    .with_property("note", string()),
            ],
        );
        build_mixins(&mut tree).unwrap();

        let a = tree.get(tree.lookup("v1.A").unwrap());
        let b = tree.get(tree.lookup("v1.B").unwrap());
        assert_eq!(a.mixins["b"].methods.keys().collect::<Vec<_>>(), ["a", "note"]);
        assert_eq!(b.mixins["a"].methods.keys().collect::<Vec<_>>(), ["b", "label"]);
        assert_eq!(a.mixins.len(), 1);
        assert_eq!(b.mixins.len(), 1);
    }

    #[test]
    fn test_empty_mixins_are_reported() {
        let mut tree = tree(
            None,
            &[
                TypeDef::new("v1.Pod").with_property("status", Property::reference("v1.PodStatus")),
                TypeDef::new("v1.PodStatus"),
            ],
        );
        let empty = build_mixins(&mut tree).unwrap();
        assert_eq!(
            empty,
            [EmptyMixin {
                namespace: "v1.Pod".into(),
                field: "status".into(),
                source: "v1.PodStatus".into(),
            }]
        );
    }

    #[test]
    fn test_scalar_setters_get_no_mixin() {
        let mut tree = tree(None, &[TypeDef::new("v1.Probe").with_property("command", string())]);
        build_mixins(&mut tree).unwrap();
        assert!(tree.get(tree.lookup("v1.Probe").unwrap()).mixins.is_empty());
    }
}
