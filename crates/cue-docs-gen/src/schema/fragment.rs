use indexmap::IndexMap;
use serde::Serialize;
use strum::{Display, IntoStaticStr};

use crate::utils::refs::schema_ref_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum SchemaKind {
  String,
  Boolean,
  Integer,
  Number,
  Object,
  Array,
  Reference,
  /// A CUE shape with no schema mapping. Written out as `type: string`.
  Untyped,
}

impl SchemaKind {
  /// The OpenAPI `type` keyword written for this kind.
  pub const fn wire_type(self) -> Option<&'static str> {
    match self {
      Self::String | Self::Untyped => Some("string"),
      Self::Boolean => Some("boolean"),
      Self::Integer => Some("integer"),
      Self::Number => Some("number"),
      Self::Object => Some("object"),
      Self::Array => Some("array"),
      Self::Reference => None,
    }
  }

  /// Type name shown in rendered documentation.
  pub const fn display_name(self) -> Option<&'static str> {
    match self {
      Self::Untyped | Self::Reference => None,
      other => other.wire_type(),
    }
  }
}

/// One normalized schema node.
#[derive(Debug, Clone, PartialEq, bon::Builder, Serialize)]
#[serde(into = "WireSchema")]
pub struct SchemaFragment {
  pub kind: SchemaKind,
  #[builder(into)]
  pub description: Option<String>,
  #[builder(into)]
  pub pattern: Option<String>,
  #[builder(into)]
  pub format: Option<String>,
  #[builder(into)]
  pub items: Option<Box<SchemaFragment>>,
  /// Name of the referenced schema, without the `#/components/schemas/` prefix.
  #[builder(into)]
  pub reference: Option<String>,
  #[builder(default)]
  pub properties: IndexMap<String, SchemaFragment>,
  /// Required property names, in declaration order.
  #[builder(default)]
  pub required: Vec<String>,
}

impl SchemaFragment {
  pub fn string() -> Self {
    Self::builder().kind(SchemaKind::String).build()
  }

  pub fn boolean() -> Self {
    Self::builder().kind(SchemaKind::Boolean).build()
  }

  pub fn untyped() -> Self {
    Self::builder().kind(SchemaKind::Untyped).build()
  }

  pub fn object() -> Self {
    Self::builder().kind(SchemaKind::Object).build()
  }

  pub fn reference(name: impl Into<String>) -> Self {
    Self::builder().kind(SchemaKind::Reference).reference(name).build()
  }

  pub fn array(items: SchemaFragment) -> Self {
    Self::builder().kind(SchemaKind::Array).items(items).build()
  }

  #[must_use]
  pub fn with_description(mut self, description: Option<String>) -> Self {
    self.description = description;
    self
  }

  /// Schemas without properties are documented as aliases.
  pub fn is_alias(&self) -> bool {
    self.properties.is_empty()
  }

  pub fn reference_name(&self) -> Option<&str> {
    self.reference.as_deref()
  }

  pub fn is_required(&self, property: &str) -> bool {
    self.required.iter().any(|name| name == property)
  }

  /// Names of every schema referenced from this node or its children.
  pub fn referenced_names(&self) -> Vec<&str> {
    let mut names = Vec::new();
    self.collect_references(&mut names);
    names
  }

  fn collect_references<'a>(&'a self, names: &mut Vec<&'a str>) {
    if let Some(name) = self.reference_name() {
      names.push(name);
    }
    if let Some(items) = &self.items {
      items.collect_references(names);
    }
    for property in self.properties.values() {
      property.collect_references(names);
    }
  }
}

/// Serialized shape, field order matching the generated documents.
#[derive(Serialize)]
struct WireSchema {
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  schema_type: Option<&'static str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  description: Option<String>,
  #[serde(skip_serializing_if = "IndexMap::is_empty")]
  properties: IndexMap<String, SchemaFragment>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  required: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pattern: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  format: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  items: Option<Box<SchemaFragment>>,
  #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
  reference: Option<String>,
}

impl From<SchemaFragment> for WireSchema {
  fn from(fragment: SchemaFragment) -> Self {
    Self {
      schema_type: fragment.kind.wire_type(),
      description: fragment.description,
      properties: fragment.properties,
      required: fragment.required,
      pattern: fragment.pattern,
      format: fragment.format,
      items: fragment.items,
      reference: fragment.reference.as_deref().map(schema_ref_path),
    }
  }
}
