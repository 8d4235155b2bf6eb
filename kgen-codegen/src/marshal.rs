//! Renders a finished namespace tree into a Jsonnet AST.

use std::collections::BTreeMap;

use kgen_ast::{Key, Node, Object, Signature, combine};
use tracing::debug;

use crate::{
    Error, GeneratorConfig, Result,
    builder::{
        API_VERSION, DEFAULT_NAMESPACE, KIND, METADATA, METADATA_NAME_PARAM,
        METADATA_NAMESPACE_PARAM,
    },
    namespace::{
        Constructor, MixinSpec, Namespace, NamespaceId, NamespaceTree, PropertyMethod,
        SetterStrategy, SpecialCall,
    },
    templates,
};

/// Walks a namespace tree depth first, emitting every name-keyed collection
/// in sorted order.
pub struct Marshaller<'a> {
    tree: &'a NamespaceTree,
    config: &'a GeneratorConfig,
}

impl<'a> Marshaller<'a> {
    pub fn new(tree: &'a NamespaceTree, config: &'a GeneratorConfig) -> Self {
        Self { tree, config }
    }

    /// Render the whole tree as one unnamed object.
    pub fn marshal(&self) -> Result<Node> {
        Ok(self.namespace(NamespaceTree::ROOT)?.into())
    }

    fn namespace(&self, id: NamespaceId) -> Result<Object> {
        let ns = self.tree.get(id);
        let mut object = Object::new();

        if ns.special.contains_key(KIND) {
            object.set(
                Key::local(KIND),
                templates::set_field(KIND, Node::string(&ns.id)),
            )?;
        }

        if let (true, Some(api_version)) = (ns.is_root(), &ns.api_version) {
            object.set(
                Key::local(API_VERSION),
                templates::set_field(API_VERSION, Node::string(api_version)),
            )?;
            if self.uses_default_metadata() {
                let (key, value) = self.default_metadata()?;
                object.set(key, value)?;
            }
        }

        if let Some(constructor) = &ns.constructor {
            let (key, value) = self.constructor(constructor)?;
            object.set(key, value)?;
        }

        for method in ns.methods.values() {
            object.set(self.setter_key(method), setter_value(method))?;
        }

        if let Some(mixins) = self.mixins(ns)? {
            object.set(Key::new(&self.config.library.mixin_name), mixins)?;
        }

        for (name, child) in self.children(ns)? {
            let key = Key::new(name).with_comment_opt(self.comment(&self.tree.get(child).description));
            object.set(key, self.namespace(child)?.into())?;
        }

        debug!(namespace = display_path(ns), fields = object.len(), "marshalled namespace");
        Ok(object)
    }

    /// Children keyed by their emitted name.
    fn children(&self, ns: &Namespace) -> Result<BTreeMap<String, NamespaceId>> {
        self.stylize_keys(
            display_path(ns),
            ns.children.iter().map(|(id, &child)| (id.as_str(), child)),
        )
    }

    /// Key entries by their stylized name. Two entries landing on the same
    /// name are an error naming the one that was rewritten.
    fn stylize_keys<'k, T>(
        &self,
        scope: &str,
        entries: impl IntoIterator<Item = (&'k str, T)>,
    ) -> Result<BTreeMap<String, T>> {
        let naming = &self.config.naming;
        let mut keyed: BTreeMap<String, (&str, T)> = BTreeMap::new();

        for (name, value) in entries {
            let stylized = naming.stylize(name, scope)?;
            if let Some((previous, _)) = keyed.insert(stylized.clone(), (name, value)) {
                let name = if name != stylized { name } else { previous };
                return Err(Error::SiblingCollision {
                    namespace: scope.to_string(),
                    name: name.to_string(),
                    stylized,
                });
            }
        }

        Ok(keyed
            .into_iter()
            .map(|(stylized, (_, value))| (stylized, value))
            .collect())
    }

    fn uses_default_metadata(&self) -> bool {
        self.tree.ids().any(|id| {
            self.tree
                .get(id)
                .constructor
                .as_ref()
                .is_some_and(Constructor::uses_metadata)
        })
    }

    /// `local defaultMetadata(name, namespace) = { metadata: ... },`
    fn default_metadata(&self) -> Result<(Key, Node)> {
        let library = &self.config.library;
        let type_id = &library.object_metadata_type;

        let meta = self
            .tree
            .lookup(type_id)
            .map(|id| self.tree.get(id))
            .filter(|ns| ns.type_id.is_some())
            .ok_or_else(|| Error::MissingMetadataType {
                type_id: type_id.clone(),
            })?;
        for setter in [METADATA_NAME_PARAM, METADATA_NAMESPACE_PARAM] {
            if !meta.methods.contains_key(setter) {
                return Err(Error::MissingMetadataSetter {
                    type_id: type_id.clone(),
                    setter: setter.to_string(),
                });
            }
        }

        let path = format!("$.{}", self.config.naming.jsonnet_path(type_id)?);
        let value = templates::set_field(
            METADATA,
            combine([METADATA_NAME_PARAM, METADATA_NAMESPACE_PARAM].map(|param| {
                Node::apply_call(&format!("{path}.{param}"), [Node::var(param)])
            })),
        );
        let key = Key::local(&library.default_metadata_name).with_signature(Signature::new([
            METADATA_NAME_PARAM,
            METADATA_NAMESPACE_PARAM,
        ]));
        Ok((key, value))
    }

    /// `default(params):: apiVersion + kind + { field: value, ... },`
    fn constructor(&self, constructor: &Constructor) -> Result<(Key, Node)> {
        let uses_metadata = constructor.uses_metadata();

        let mut required = Vec::new();
        if uses_metadata {
            required.push(METADATA_NAME_PARAM);
        }
        required.extend(constructor.params.iter().map(|p| p.name.as_str()));
        let mut signature = Signature::new(required);
        if uses_metadata {
            signature =
                signature.with_optional(METADATA_NAMESPACE_PARAM, Node::string(DEFAULT_NAMESPACE));
        }

        let mut parts: Vec<Node> = constructor
            .special_calls
            .iter()
            .map(|call| match call {
                SpecialCall::ApiVersion => Node::var(API_VERSION),
                SpecialCall::Kind => Node::var(KIND),
                SpecialCall::DefaultMetadata => Node::apply_call(
                    &self.config.library.default_metadata_name,
                    [
                        Node::var(METADATA_NAME_PARAM),
                        Node::var(METADATA_NAMESPACE_PARAM),
                    ],
                ),
            })
            .collect();

        if !constructor.assignments.is_empty() || parts.is_empty() {
            let mut body = Object::new();
            for (field, value) in &constructor.assignments {
                body.set(Key::inherited(field), value.clone())?;
            }
            parts.push(body.into());
        }

        Ok((
            Key::new(&constructor.name).with_signature(signature),
            combine(parts),
        ))
    }

    fn setter_key(&self, method: &PropertyMethod) -> Key {
        Key::function(&method.name, [&method.param])
            .with_comment_opt(self.comment(method.description()))
    }

    /// `mixin:: { field:: { local helper(p) = { field+: p, }, ... }, ... },`
    fn mixins(&self, ns: &Namespace) -> Result<Option<Node>> {
        let scope = format!("{}.{}", display_path(ns), self.config.library.mixin_name);
        let specs = self.stylize_keys(
            &scope,
            ns.mixins
                .values()
                .filter(|spec| !spec.methods.is_empty())
                .map(|spec| (spec.field.as_str(), spec)),
        )?;

        let mut block = Object::new();
        for (name, spec) in specs {
            block.set(Key::new(name), self.mixin(spec)?)?;
        }
        Ok((!block.is_empty()).then(|| block.into()))
    }

    fn mixin(&self, spec: &MixinSpec) -> Result<Node> {
        let path = format!("$.{}", self.config.naming.jsonnet_path(&spec.source)?);

        let mut object = Object::new();
        object.set(
            Key::local(&spec.helper).with_signature(Signature::new([&spec.param])),
            templates::merge_field(&spec.field, Node::var(&spec.param)),
        )?;
        for method in spec.methods.values() {
            object.set(
                Key::function(&method.name, [&method.param]),
                templates::mixin_call(
                    &spec.helper,
                    &format!("{path}.{}", method.name),
                    &method.param,
                ),
            )?;
        }
        Ok(object.into())
    }

    fn comment(&self, text: &str) -> Option<String> {
        (self.config.library.comments && !text.is_empty()).then(|| text.to_string())
    }
}

fn setter_value(method: &PropertyMethod) -> Node {
    match method.strategy() {
        SetterStrategy::ArrayMerge => templates::array_merge(&method.field, &method.param),
        SetterStrategy::DeepMerge => {
            templates::merge_field(&method.field, Node::var(&method.param))
        }
        SetterStrategy::Replace => templates::set_field(&method.field, Node::var(&method.param)),
    }
}

fn display_path(ns: &Namespace) -> &str {
    if ns.is_root() { "$" } else { &ns.path }
}
