//! Swagger 1.2 API document loader.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::{
    Catalog, Error, ItemType, LoadOptions, Omission, PrimitiveType, Property, Result,
    SourceContext, TypeDef,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Document {
    #[serde(default)]
    api_version: Option<String>,
    #[serde(default)]
    models: BTreeMap<String, Model>,
}

#[derive(Debug, Deserialize)]
struct Model {
    id: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    required: Vec<String>,
    #[serde(default)]
    properties: BTreeMap<String, RawProperty>,
}

#[derive(Debug, Deserialize)]
struct ObjectType {
    #[serde(rename = "type")]
    ty: Option<String>,
    #[serde(rename = "$ref")]
    reference: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawProperty {
    #[serde(flatten)]
    object_type: ObjectType,
    format: Option<String>,
    items: Option<ObjectType>,
    #[serde(default)]
    description: String,
}

/// Where a model's text starts, used to anchor span searches.
struct ModelCursor<'a> {
    ctx: &'a SourceContext<'a>,
    id: &'a str,
    anchor: usize,
}

impl ModelCursor<'_> {
    fn span(&self, text: &str) -> Option<miette::SourceSpan> {
        self.ctx.find_quoted(text, self.anchor)
    }

    fn missing_type(&self, property: &str) -> Box<Error> {
        Box::new(Error::MissingType {
            src: self.ctx.named_source(),
            span: self.span(property),
            model: self.id.to_string(),
            property: property.to_string(),
        })
    }

    fn unknown_type(&self, property: &str, ty: &str) -> Box<Error> {
        Box::new(Error::UnknownType {
            src: self.ctx.named_source(),
            span: self.span(ty),
            model: self.id.to_string(),
            property: property.to_string(),
            ty: ty.to_string(),
        })
    }

    fn primitive(&self, property: &str, ty: &str) -> Result<PrimitiveType> {
        ty.parse().map_err(|_| self.unknown_type(property, ty))
    }
}

pub(crate) fn load(ctx: &SourceContext<'_>, options: &LoadOptions) -> Result<Catalog> {
    let document: Document = serde_json::from_str(ctx.src()).map_err(|e| ctx.parse_error(e))?;

    let models_offset = ctx
        .find_quoted("models", 0)
        .map(|span| span.offset())
        .unwrap_or_default();

    let api_version = document.api_version.filter(|v| !v.is_empty());
    let mut catalog = Catalog::new(api_version);
    let mut anchors = BTreeMap::new();

    for (key, model) in &document.models {
        let anchor = ctx
            .find_quoted(key, models_offset)
            .map(|span| span.offset())
            .unwrap_or(models_offset);
        let cursor = ModelCursor {
            ctx,
            id: &model.id,
            anchor,
        };

        if catalog.contains(&model.id) {
            return Err(Box::new(Error::DuplicateModel {
                src: ctx.named_source(),
                span: cursor.span(&model.id),
                id: model.id.clone(),
            }));
        }

        let ty = convert_model(&cursor, model, options)?;
        anchors.insert(model.id.clone(), anchor);
        catalog.insert(ty)?;
    }

    check_references(ctx, &catalog, &anchors)?;
    Ok(catalog)
}

fn convert_model(
    cursor: &ModelCursor<'_>,
    model: &Model,
    options: &LoadOptions,
) -> Result<TypeDef> {
    for name in &model.required {
        if !model.properties.contains_key(name) {
            return Err(Box::new(Error::UndeclaredRequired {
                src: cursor.ctx.named_source(),
                span: cursor.span(name),
                model: model.id.clone(),
                property: name.clone(),
            }));
        }
    }

    let mut ty = TypeDef::new(&model.id).with_description(model.description.trim());
    let mut skipped = BTreeMap::new();

    for (name, raw) in &model.properties {
        let omission = if options.is_blacklisted(&model.id, name) {
            Some(Omission::Blacklisted)
        } else if options.skips(&raw.description) {
            Some(Omission::ReadOnly)
        } else {
            None
        };
        if let Some(omission) = omission {
            skipped.insert(name.as_str(), omission);
            continue;
        }
        ty.properties
            .insert(name.clone(), convert_property(cursor, name, raw)?);
    }

    for name in &model.required {
        match skipped.get(name.as_str()) {
            Some(&omission) => {
                ty.omitted_required.insert(name.clone(), omission);
            }
            None => {
                ty.required.insert(name.clone());
            }
        }
    }

    Ok(ty)
}

fn convert_property(cursor: &ModelCursor<'_>, name: &str, raw: &RawProperty) -> Result<Property> {
    let description = raw.description.trim().to_string();

    if let Some(target) = &raw.object_type.reference {
        return Ok(Property::Reference {
            target: target.clone(),
            description,
        });
    }

    let Some(ty) = &raw.object_type.ty else {
        return Err(cursor.missing_type(name));
    };
    let ty = cursor.primitive(name, ty)?;

    let items = match &raw.items {
        None => None,
        Some(ObjectType {
            reference: Some(target),
            ..
        }) => Some(ItemType::Reference(target.clone())),
        Some(ObjectType { ty: Some(item), .. }) => {
            Some(ItemType::Primitive(cursor.primitive(name, item)?))
        }
        Some(ObjectType { .. }) => return Err(cursor.missing_type(&format!("{name}.items"))),
    };

    Ok(Property::Literal {
        ty,
        format: raw.format.clone(),
        items,
        description,
    })
}

/// Every `$ref`, including array item references, must name a loaded model.
fn check_references(
    ctx: &SourceContext<'_>,
    catalog: &Catalog,
    anchors: &BTreeMap<String, usize>,
) -> Result<()> {
    for ty in catalog.types() {
        for (name, property) in &ty.properties {
            let target = match property {
                Property::Reference { target, .. } => target,
                Property::Literal {
                    items: Some(ItemType::Reference(target)),
                    ..
                } => target,
                Property::Literal { .. } => continue,
            };

            if !catalog.contains(target) {
                let anchor = anchors.get(&ty.id).copied().unwrap_or_default();
                return Err(Box::new(Error::DanglingReference {
                    src: ctx.named_source(),
                    span: ctx.find_quoted(target, anchor),
                    model: ty.id.clone(),
                    property: name.clone(),
                    target: target.clone(),
                }));
            }
        }
    }
    Ok(())
}
