//! Objects and their field keys.

use indexmap::IndexMap;

use crate::{Error, Node, Result, ident::is_bare_identifier};

/// How a field name is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Bare identifier: `name:`.
    Identifier,
    /// Quoted string: `"name":`.
    Str,
    /// Object-local binding: `local name = value`.
    Local,
}

/// Field visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// `::`
    #[default]
    Hidden,
    /// `:::`
    Visible,
    /// `:`
    Inherited,
}

impl Visibility {
    pub fn token(&self) -> &'static str {
        match self {
            Self::Hidden => "::",
            Self::Visible => ":::",
            Self::Inherited => ":",
        }
    }
}

/// An optional parameter with its default value.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionalParam {
    pub name: String,
    pub default: Node,
}

/// Parameter list of a method-style field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signature {
    pub required: Vec<String>,
    pub optional: Vec<OptionalParam>,
}

impl Signature {
    pub fn new(required: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            required: required.into_iter().map(Into::into).collect(),
            optional: Vec::new(),
        }
    }

    pub fn with_optional(mut self, name: impl Into<String>, default: Node) -> Self {
        self.optional.push(OptionalParam {
            name: name.into(),
            default,
        });
        self
    }
}

/// The key half of an object field.
#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    name: String,
    kind: KeyKind,
    visibility: Visibility,
    comment: Option<String>,
    signature: Option<Signature>,
    mixin: bool,
}

impl Key {
    /// A hidden key. Names that cannot be written bare are quoted.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = if is_bare_identifier(&name) {
            KeyKind::Identifier
        } else {
            KeyKind::Str
        };
        Self {
            name,
            kind,
            visibility: Visibility::Hidden,
            comment: None,
            signature: None,
            mixin: false,
        }
    }

    pub fn hidden(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    /// A key printed with `:`.
    pub fn inherited(name: impl Into<String>) -> Self {
        Self::new(name).with_visibility(Visibility::Inherited)
    }

    /// An object-local binding.
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            kind: KeyKind::Local,
            ..Self::new(name)
        }
    }

    /// A hidden method taking the given required parameters.
    pub fn function(
        name: impl Into<String>,
        params: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(name).with_signature(Signature::new(params))
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_kind(mut self, kind: KeyKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Set the comment only if one is given.
    pub fn with_comment_opt(mut self, comment: Option<impl Into<String>>) -> Self {
        self.comment = comment.map(Into::into);
        self
    }

    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = Some(signature);
        self
    }

    /// Mark the field as `+:` (merge into the inherited value).
    pub fn with_mixin(mut self) -> Self {
        self.mixin = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    pub fn is_mixin(&self) -> bool {
        self.mixin
    }
}

/// One field of an [`Object`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: Key,
    pub value: Node,
}

/// An object literal.
///
/// Fields keep insertion order. Names are unique within one object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    fields: IndexMap<String, Field>,
    oneline: bool,
}

impl Object {
    /// An empty multi-line object.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty object printed on a single line.
    pub fn oneline() -> Self {
        Self {
            oneline: true,
            ..Self::default()
        }
    }

    /// A single-field object printed on one line.
    pub fn single(key: Key, value: Node) -> Self {
        let mut object = Self::oneline();
        object
            .fields
            .insert(key.name().to_string(), Field { key, value });
        object
    }

    /// Add a field. Fails if a field with the same name already exists.
    pub fn set(&mut self, key: Key, value: Node) -> Result<()> {
        if self.fields.contains_key(key.name()) {
            return Err(Error::DuplicateField(key.name().to_string()));
        }
        self.fields
            .insert(key.name().to_string(), Field { key, value });
        Ok(())
    }

    /// Builder form of [`Object::set`].
    pub fn with(mut self, key: Key, value: Node) -> Result<Self> {
        self.set(key, value)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn is_oneline(&self) -> bool {
        self.oneline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_kind_from_name() {
        assert_eq!(Key::new("foo").kind(), KeyKind::Identifier);
        assert_eq!(Key::new("error").kind(), KeyKind::Str);
        assert_eq!(Key::new("x-forwarded").kind(), KeyKind::Str);
        assert_eq!(Key::local("foo").kind(), KeyKind::Local);
    }

    #[test]
    fn test_key_defaults_to_hidden() {
        assert_eq!(Key::new("foo").visibility(), Visibility::Hidden);
        assert_eq!(Key::inherited("foo").visibility(), Visibility::Inherited);
    }

    #[test]
    fn test_duplicate_field_is_rejected() {
        let mut object = Object::new();
        object.set(Key::new("a"), Node::Null).unwrap();
        let err = object.set(Key::inherited("a"), Node::Null).unwrap_err();
        assert_eq!(err, Error::DuplicateField("a".into()));
        assert_eq!(object.len(), 1);
    }

    #[test]
    fn test_fields_keep_insertion_order() {
        let object = Object::new()
            .with(Key::new("b"), Node::Null)
            .and_then(|o| o.with(Key::new("a"), Node::Null))
            .unwrap();
        let names: Vec<_> = object.fields().map(|f| f.key.name()).collect();
        assert_eq!(names, ["b", "a"]);
    }
}
