//! Serialization of a schema document into the OpenAPI component layout.

use std::{collections::BTreeMap, path::Path};

use anyhow::Context;
use serde::Serialize;

use crate::schema::{SchemaDocument, SchemaFragment};

pub const OPENAPI_VERSION: &str = "3.0.3";

/// Fixed-shape OpenAPI document borrowing from a [`SchemaDocument`].
#[derive(Debug, Serialize)]
pub struct OpenApiDocument<'a> {
  openapi: &'static str,
  info: Info<'a>,
  components: Components<'a>,
}

#[derive(Debug, Serialize)]
struct Info<'a> {
  title: &'a str,
  version: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  description: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct Components<'a> {
  schemas: &'a BTreeMap<String, SchemaFragment>,
}

impl<'a> From<&'a SchemaDocument> for OpenApiDocument<'a> {
  fn from(document: &'a SchemaDocument) -> Self {
    Self {
      openapi: OPENAPI_VERSION,
      info: Info {
        title: &document.title,
        version: &document.version,
        description: document.description.as_deref(),
      },
      components: Components {
        schemas: &document.schemas,
      },
    }
  }
}

impl OpenApiDocument<'_> {
  pub fn to_yaml(&self) -> anyhow::Result<String> {
    serde_yaml::to_string(self).context("failed to serialize OpenAPI document as YAML")
  }

  pub fn to_json(&self) -> anyhow::Result<String> {
    serde_json::to_string_pretty(self).context("failed to serialize OpenAPI document as JSON")
  }

  /// JSON for a `.json` output path, YAML otherwise.
  pub fn render_for(&self, output: &Path) -> anyhow::Result<String> {
    if output.extension().is_some_and(|ext| ext == "json") {
      self.to_json()
    } else {
      self.to_yaml()
    }
  }
}

#[cfg(test)]
mod tests {
  use cue_syntax::parse_file;

  use super::*;
  use crate::converter::SchemaTreeBuilder;

  fn directory_document() -> SchemaDocument {
    let file = parse_file(include_str!("../fixtures/directory.cue")).unwrap();
    SchemaTreeBuilder::new("Directory", "2.0.0").build(&file).document
  }

  #[test]
  fn test_document_shape() {
    let document = directory_document();
    let yaml = OpenApiDocument::from(&document).to_yaml().unwrap();
    let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

    assert_eq!(value["openapi"].as_str(), Some("3.0.3"));
    assert_eq!(value["info"]["title"].as_str(), Some("Directory"));
    assert_eq!(value["info"]["version"].as_str(), Some("2.0.0"));
    assert_eq!(
      value["components"]["schemas"]["Email"]["pattern"].as_str(),
      Some("^[^@]+@[^@]+$")
    );
    assert_eq!(
      value["components"]["schemas"]["Directory"]["properties"]["updated"]["$ref"].as_str(),
      Some("#/components/schemas/Date")
    );
  }

  #[test]
  fn test_missing_description_is_omitted() {
    let document = SchemaDocument::builder().title("T").version("1").build();
    let json = OpenApiDocument::from(&document).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["info"].get("description").is_none());
    assert_eq!(value["components"]["schemas"], serde_json::json!({}));
  }

  #[test]
  fn test_output_format_follows_extension() {
    let document = directory_document();
    let openapi = OpenApiDocument::from(&document);
    assert!(openapi.render_for(Path::new("out/openapi.json")).unwrap().starts_with('{'));
    assert!(openapi.render_for(Path::new("openapi.yaml")).unwrap().starts_with("openapi:"));
  }

  #[test]
  fn test_round_trip_through_oas3() {
    let document = directory_document();
    let yaml = OpenApiDocument::from(&document).to_yaml().unwrap();

    let spec = oas3::from_yaml(&yaml).unwrap();
    let reparsed = SchemaDocument::from_spec(&spec).unwrap();

    assert_eq!(reparsed.title, document.title);
    assert_eq!(reparsed.description, document.description);
    assert_eq!(reparsed.schemas, document.schemas);
  }
}
