use std::collections::BTreeMap;

use anyhow::Context;
use indexmap::IndexMap;
use oas3::{
  Spec,
  spec::{ObjectOrReference, ObjectSchema, Schema, SchemaType, SchemaTypeSet},
};

use super::refs::parse_schema_ref_path;
use crate::schema::{SchemaDocument, SchemaFragment, SchemaKind};

/// Conversion of parsed OpenAPI schemas back into fragments.
pub(crate) trait SchemaExt {
  /// The single non-null type of the schema, if it declares one.
  fn primary_type(&self) -> Option<SchemaType>;

  fn to_fragment(&self) -> anyhow::Result<SchemaFragment>;
}

impl SchemaExt for ObjectSchema {
  fn primary_type(&self) -> Option<SchemaType> {
    match self.schema_type.as_ref()? {
      SchemaTypeSet::Single(schema_type) => Some(*schema_type),
      SchemaTypeSet::Multiple(types) => types.iter().copied().find(|t| *t != SchemaType::Null),
    }
  }

  fn to_fragment(&self) -> anyhow::Result<SchemaFragment> {
    let kind = match self.primary_type() {
      Some(SchemaType::String) => SchemaKind::String,
      Some(SchemaType::Boolean) => SchemaKind::Boolean,
      Some(SchemaType::Integer) => SchemaKind::Integer,
      Some(SchemaType::Number) => SchemaKind::Number,
      Some(SchemaType::Array) => SchemaKind::Array,
      Some(SchemaType::Object) => SchemaKind::Object,
      Some(SchemaType::Null) | None if !self.properties.is_empty() => SchemaKind::Object,
      Some(SchemaType::Null) | None => SchemaKind::Untyped,
    };

    let items = match self.items.as_deref() {
      Some(Schema::Object(items)) => Some(Box::new(items.to_fragment().context("in array items")?)),
      Some(Schema::Boolean(_)) | None => None,
    };

    let properties: IndexMap<String, SchemaFragment> = self
      .properties
      .iter()
      .map(|(name, property)| {
        property
          .to_fragment()
          .with_context(|| format!("in property `{name}`"))
          .map(|fragment| (name.clone(), fragment))
      })
      .collect::<anyhow::Result<_>>()?;

    Ok(SchemaFragment {
      kind,
      description: self.description.clone(),
      pattern: self.pattern.clone(),
      format: self.format.clone(),
      items,
      reference: None,
      properties,
      required: self.required.clone(),
    })
  }
}

impl SchemaExt for ObjectOrReference<ObjectSchema> {
  fn primary_type(&self) -> Option<SchemaType> {
    match self {
      Self::Object(schema) => schema.primary_type(),
      Self::Ref { .. } => None,
    }
  }

  fn to_fragment(&self) -> anyhow::Result<SchemaFragment> {
    match self {
      Self::Object(schema) => schema.to_fragment(),
      Self::Ref {
        ref_path, description, ..
      } => {
        let name = parse_schema_ref_path(ref_path).with_context(|| format!("invalid ref format: {ref_path}"))?;
        Ok(SchemaFragment::reference(name).with_description(description.clone()))
      }
    }
  }
}

impl SchemaDocument {
  /// Collects the component schemas of a parsed OpenAPI document.
  pub fn from_spec(spec: &Spec) -> anyhow::Result<Self> {
    let mut schemas = BTreeMap::new();
    if let Some(components) = &spec.components {
      for (name, schema) in &components.schemas {
        let fragment = schema
          .to_fragment()
          .with_context(|| format!("failed to parse schema \"{name}\""))?;
        schemas.insert(name.clone(), fragment);
      }
    }

    Ok(
      Self::builder()
        .title(spec.info.title.clone())
        .version(spec.info.version.clone())
        .maybe_description(spec.info.description.clone())
        .schemas(schemas)
        .build(),
    )
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn spec_with(schemas: serde_json::Value) -> Spec {
    serde_json::from_value(json!({
      "openapi": "3.0.3",
      "info": { "title": "Test", "version": "1.0.0" },
      "components": { "schemas": schemas }
    }))
    .unwrap()
  }

  #[test]
  fn test_converts_object_with_reference_property() {
    let spec = spec_with(json!({
      "Contact": {
        "type": "object",
        "description": "A person.",
        "properties": {
          "email": { "$ref": "#/components/schemas/Email", "description": "Where to write." },
          "tags": { "type": "array", "items": { "type": "string" } }
        },
        "required": ["email"]
      }
    }));

    let document = SchemaDocument::from_spec(&spec).unwrap();
    let contact = document.get("Contact").unwrap();
    assert_eq!(contact.kind, SchemaKind::Object);
    assert_eq!(contact.required, vec!["email".to_string()]);

    let email = &contact.properties["email"];
    assert_eq!(email.kind, SchemaKind::Reference);
    assert_eq!(email.reference_name(), Some("Email"));
    assert_eq!(email.description.as_deref(), Some("Where to write."));

    let tags = &contact.properties["tags"];
    assert_eq!(tags.items.as_deref(), Some(&SchemaFragment::string()));
  }

  #[test]
  fn test_nullable_type_set_uses_non_null_member() {
    let spec = spec_with(json!({ "Name": { "type": ["null", "string"] } }));
    let document = SchemaDocument::from_spec(&spec).unwrap();
    assert_eq!(document.get("Name").unwrap().kind, SchemaKind::String);
  }

  #[test]
  fn test_missing_type_is_untyped() {
    let spec = spec_with(json!({ "Anything": { "description": "free-form" } }));
    let document = SchemaDocument::from_spec(&spec).unwrap();
    assert_eq!(document.get("Anything").unwrap().kind, SchemaKind::Untyped);
  }

  #[test]
  fn test_malformed_ref_is_error() {
    let spec = spec_with(json!({
      "Contact": {
        "type": "object",
        "properties": { "email": { "$ref": "#/definitions/Email" } }
      }
    }));
    let err = SchemaDocument::from_spec(&spec).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("failed to parse schema \"Contact\""), "{chain}");
    assert!(chain.contains("invalid ref format: #/definitions/Email"), "{chain}");
  }
}
