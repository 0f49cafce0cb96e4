use std::collections::BTreeMap;

use super::SchemaFragment;

/// Schema catalog plus the document metadata it is published under.
#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct SchemaDocument {
  #[builder(into)]
  pub title: String,
  #[builder(into)]
  pub version: String,
  #[builder(into)]
  pub description: Option<String>,
  #[builder(default)]
  pub schemas: BTreeMap<String, SchemaFragment>,
}

impl SchemaDocument {
  pub fn get(&self, name: &str) -> Option<&SchemaFragment> {
    self.schemas.get(name)
  }

  pub fn aliases(&self) -> impl Iterator<Item = (&String, &SchemaFragment)> {
    self.schemas.iter().filter(|(_, schema)| schema.is_alias())
  }

  pub fn objects(&self) -> impl Iterator<Item = (&String, &SchemaFragment)> {
    self.schemas.iter().filter(|(_, schema)| !schema.is_alias())
  }
}
