//! Normalized schema catalog.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    str::FromStr,
};

use crate::{Error, Result};

/// Primitive type tag of a literal property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
    Any,
}

impl PrimitiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Any => "any",
        }
    }
}

impl FromStr for PrimitiveType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "integer" => Ok(Self::Integer),
            "number" => Ok(Self::Number),
            "boolean" => Ok(Self::Boolean),
            "object" => Ok(Self::Object),
            "array" => Ok(Self::Array),
            "any" => Ok(Self::Any),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Element type of an array property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemType {
    Primitive(PrimitiveType),
    Reference(String),
}

/// Descriptor of one property of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Property {
    /// A value of a primitive type, possibly an array.
    Literal {
        ty: PrimitiveType,
        format: Option<String>,
        items: Option<ItemType>,
        description: String,
    },
    /// A value of another named type.
    Reference { target: String, description: String },
}

impl Property {
    pub fn literal(ty: PrimitiveType) -> Self {
        Self::Literal {
            ty,
            format: None,
            items: None,
            description: String::new(),
        }
    }

    pub fn array_of(items: ItemType) -> Self {
        Self::Literal {
            ty: PrimitiveType::Array,
            format: None,
            items: Some(items),
            description: String::new(),
        }
    }

    pub fn reference(target: impl Into<String>) -> Self {
        Self::Reference {
            target: target.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            Self::Literal { description, .. } | Self::Reference { description, .. } => {
                *description = text.into();
            }
        }
        self
    }

    /// Set the format of a literal. No effect on references.
    pub fn with_format(mut self, value: impl Into<String>) -> Self {
        if let Self::Literal { format, .. } = &mut self {
            *format = Some(value.into());
        }
        self
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Literal { description, .. } | Self::Reference { description, .. } => description,
        }
    }

    /// The referenced type id, for references.
    pub fn reference_target(&self) -> Option<&str> {
        match self {
            Self::Reference { target, .. } => Some(target),
            Self::Literal { .. } => None,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference { .. })
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self,
            Self::Literal {
                ty: PrimitiveType::Array,
                ..
            }
        )
    }

    pub fn is_object(&self) -> bool {
        matches!(
            self,
            Self::Literal {
                ty: PrimitiveType::Object,
                ..
            }
        )
    }

    /// Objects, arrays and references: values that are merged rather than
    /// replaced.
    pub fn is_complex(&self) -> bool {
        self.is_reference() || self.is_array() || self.is_object()
    }
}

/// Why the loader left a property out of its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Omission {
    Blacklisted,
    ReadOnly,
}

impl fmt::Display for Omission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blacklisted => f.write_str("blacklisted"),
            Self::ReadOnly => f.write_str("read-only"),
        }
    }
}

/// One named type of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    pub id: String,
    pub description: String,
    pub properties: BTreeMap<String, Property>,
    pub required: BTreeSet<String>,
    /// Required properties the loader dropped, so no constructor takes them.
    pub omitted_required: BTreeMap<String, Omission>,
}

impl TypeDef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            properties: BTreeMap::new(),
            required: BTreeSet::new(),
            omitted_required: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, property: Property) -> Self {
        self.properties.insert(name.into(), property);
        self
    }

    /// Add a property and mark it required.
    pub fn with_required(mut self, name: impl Into<String>, property: Property) -> Self {
        let name = name.into();
        self.required.insert(name.clone());
        self.properties.insert(name, property);
        self
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    /// Dotted path segments of the id, e.g. `["v1", "Pod"]`.
    pub fn path(&self) -> impl Iterator<Item = &str> {
        self.id.split('.')
    }
}

/// A flattened set of types with globally unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    api_version: Option<String>,
    types: BTreeMap<String, TypeDef>,
}

impl Catalog {
    pub fn new(api_version: Option<String>) -> Self {
        Self {
            api_version,
            types: BTreeMap::new(),
        }
    }

    /// Add a type. Fails if a type with the same id already exists.
    pub fn insert(&mut self, ty: TypeDef) -> Result<()> {
        if self.types.contains_key(&ty.id) {
            return Err(Box::new(Error::DuplicateType { id: ty.id }));
        }
        self.types.insert(ty.id.clone(), ty);
        Ok(())
    }

    /// Builder form of [`Catalog::insert`].
    pub fn with_type(mut self, ty: TypeDef) -> Result<Self> {
        self.insert(ty)?;
        Ok(self)
    }

    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    pub fn get(&self, id: &str) -> Option<&TypeDef> {
        self.types.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.types.contains_key(id)
    }

    /// Types in id order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
