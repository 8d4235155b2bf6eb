//! The namespace tree: one node per dotted path segment of the catalog's
//! type ids.
//!
//! Nodes live in an arena owned by the tree and refer to each other by
//! [`NamespaceId`]. Namespaces are created on demand and never removed.

use std::collections::BTreeMap;

use kgen_ast::Node;
use kgen_schema::Property;

/// Index of a namespace in its [`NamespaceTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NamespaceId(usize);

/// How a setter writes its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetterStrategy {
    /// Concatenate arrays, wrapping a single element first.
    ArrayMerge,
    /// Deep-merge with `+:`.
    DeepMerge,
    /// Replace with `:`.
    Replace,
}

/// A setter for one property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyMethod {
    pub name: String,
    pub param: String,
    /// Field written by the setter; always the original property name.
    pub field: String,
    pub property: Property,
}

impl PropertyMethod {
    pub fn strategy(&self) -> SetterStrategy {
        if self.property.is_array() {
            SetterStrategy::ArrayMerge
        } else if self.property.is_reference() || self.property.is_object() {
            SetterStrategy::DeepMerge
        } else {
            SetterStrategy::Replace
        }
    }

    pub fn description(&self) -> &str {
        self.property.description()
    }
}

/// Expressions a constructor adds in front of its assignment object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialCall {
    ApiVersion,
    Kind,
    DefaultMetadata,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorParam {
    pub name: String,
    pub field: String,
    pub property: Property,
}

/// A namespace's factory function.
#[derive(Debug, Clone, PartialEq)]
pub struct Constructor {
    pub name: String,
    /// Required parameters, sorted by name.
    pub params: Vec<ConstructorParam>,
    pub special_calls: Vec<SpecialCall>,
    /// Field name to value, in field order.
    pub assignments: BTreeMap<String, Node>,
}

impl Constructor {
    pub fn uses_metadata(&self) -> bool {
        self.special_calls.contains(&SpecialCall::DefaultMetadata)
    }

    /// A constructor with nothing to do is never emitted.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty() && self.special_calls.is_empty() && self.assignments.is_empty()
    }
}

/// Setters of a referenced type, re-targeted to merge through one field.
#[derive(Debug, Clone, PartialEq)]
pub struct MixinSpec {
    /// Field of the owning namespace the setters merge into.
    pub field: String,
    /// Name of the local merge helper.
    pub helper: String,
    /// Parameter of the merge helper.
    pub param: String,
    /// Type id of the referenced namespace.
    pub source: String,
    pub methods: BTreeMap<String, PropertyMethod>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Namespace {
    /// Local path segment; empty for the root.
    pub id: String,
    /// Full dotted path; empty for the root.
    pub path: String,
    /// Schema API version; only ever set on the root.
    pub api_version: Option<String>,
    /// Id of the type backing this namespace, if any.
    pub type_id: Option<String>,
    pub description: String,
    pub children: BTreeMap<String, NamespaceId>,
    pub constructor: Option<Constructor>,
    pub methods: BTreeMap<String, PropertyMethod>,
    pub special: BTreeMap<String, PropertyMethod>,
    pub mixins: BTreeMap<String, MixinSpec>,
}

impl Namespace {
    fn new(id: &str, path: String) -> Self {
        Self {
            id: id.to_string(),
            path,
            api_version: None,
            type_id: None,
            description: String::new(),
            children: BTreeMap::new(),
            constructor: None,
            methods: BTreeMap::new(),
            special: BTreeMap::new(),
            mixins: BTreeMap::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }
}

/// Counts used for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub namespaces: usize,
    pub types: usize,
    pub constructors: usize,
    pub setters: usize,
    pub mixins: usize,
}

/// Arena of namespaces rooted at an unnamed namespace.
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceTree {
    nodes: Vec<Namespace>,
}

impl NamespaceTree {
    pub const ROOT: NamespaceId = NamespaceId(0);

    pub fn new(api_version: Option<String>) -> Self {
        let mut root = Namespace::new("", String::new());
        root.api_version = api_version;
        Self { nodes: vec![root] }
    }

    pub fn root(&self) -> &Namespace {
        &self.nodes[0]
    }

    pub fn get(&self, id: NamespaceId) -> &Namespace {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NamespaceId) -> &mut Namespace {
        &mut self.nodes[id.0]
    }

    /// All namespace ids, root first, in creation order.
    pub fn ids(&self) -> impl Iterator<Item = NamespaceId> + use<> {
        (0..self.nodes.len()).map(NamespaceId)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Find the namespace for a dotted path without creating anything.
    pub fn lookup(&self, path: &str) -> Option<NamespaceId> {
        path.split('.').try_fold(Self::ROOT, |current, segment| {
            self.get(current).children.get(segment).copied()
        })
    }

    /// Find the namespace for a dotted path, creating missing segments.
    ///
    /// Returns whether the final segment was created.
    pub fn resolve_or_create(&mut self, path: &str) -> (NamespaceId, bool) {
        let mut current = Self::ROOT;
        let mut created = false;
        let mut current_path = String::new();

        for segment in path.split('.') {
            if !current_path.is_empty() {
                current_path.push('.');
            }
            current_path.push_str(segment);

            current = match self.get(current).children.get(segment) {
                Some(&child) => {
                    created = false;
                    child
                }
                None => {
                    let child = NamespaceId(self.nodes.len());
                    self.nodes
                        .push(Namespace::new(segment, current_path.clone()));
                    self.get_mut(current)
                        .children
                        .insert(segment.to_string(), child);
                    created = true;
                    child
                }
            };
        }

        (current, created)
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            namespaces: self.nodes.len() - 1,
            ..TreeStats::default()
        };
        for ns in &self.nodes {
            stats.types += usize::from(ns.type_id.is_some());
            stats.constructors += usize::from(ns.constructor.is_some());
            stats.setters += ns.methods.len();
            stats.mixins += ns.mixins.values().filter(|m| !m.methods.is_empty()).count();
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use kgen_schema::{ItemType, PrimitiveType};

    use super::*;

    fn method(property: Property) -> PropertyMethod {
        PropertyMethod {
            name: "x".into(),
            param: "x".into(),
            field: "x".into(),
            property,
        }
    }

    #[test]
    fn test_resolve_or_create() {
        let mut tree = NamespaceTree::new(None);
        let (pod, created) = tree.resolve_or_create("v1.Pod");
        assert!(created);
        assert_eq!(tree.get(pod).path, "v1.Pod");
        assert_eq!(tree.get(pod).id, "Pod");

        let (service, created) = tree.resolve_or_create("v1.Service");
        assert!(created);
        assert_ne!(pod, service);

        let (again, created) = tree.resolve_or_create("v1.Pod");
        assert!(!created);
        assert_eq!(again, pod);

        let (v1, created) = tree.resolve_or_create("v1");
        assert!(!created);
        assert_eq!(tree.get(v1).children.len(), 2);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_lookup_does_not_create() {
        let mut tree = NamespaceTree::new(None);
        tree.resolve_or_create("v1.Pod");
        assert!(tree.lookup("v1.Pod").is_some());
        assert!(tree.lookup("v1").is_some());
        assert!(tree.lookup("v1.Missing").is_none());
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_setter_strategy() {
        assert_eq!(
            method(Property::array_of(ItemType::Primitive(PrimitiveType::String))).strategy(),
            SetterStrategy::ArrayMerge
        );
        assert_eq!(
            method(Property::reference("v1.PodSpec")).strategy(),
            SetterStrategy::DeepMerge
        );
        assert_eq!(
            method(Property::literal(PrimitiveType::Object)).strategy(),
            SetterStrategy::DeepMerge
        );
        assert_eq!(
            method(Property::literal(PrimitiveType::Integer)).strategy(),
            SetterStrategy::Replace
        );
    }

    #[test]
    fn test_root() {
        let tree = NamespaceTree::new(Some("v1".into()));
        assert!(tree.root().is_root());
        assert_eq!(tree.root().api_version.as_deref(), Some("v1"));
        assert!(tree.is_empty());
    }
}
