use std::{collections::BTreeMap, path::Path};

use anyhow::Context;
use serde::Deserialize;

/// Source file name to the schema names it defines, e.g. `"contact.cue": ["Contact"]`.
pub type Manifest = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct NavConfig {
  #[serde(default)]
  pub pages: Vec<NavPage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NavPage {
  pub title: String,
  #[serde(default)]
  pub filename: Option<String>,
  #[serde(default)]
  pub schemas: Vec<String>,
}

impl NavPage {
  /// Output file name without the `.md` extension.
  pub fn output_stem(&self) -> String {
    match self.filename.as_deref() {
      Some(filename) if !filename.is_empty() => filename.to_string(),
      _ => slugify(&self.title),
    }
  }
}

/// Lowercases letters and digits, turns spaces and dashes into `-`, drops the rest.
pub fn slugify(title: &str) -> String {
  title
    .chars()
    .filter_map(|c| match c {
      c if c.is_alphanumeric() => Some(c.to_lowercase().collect::<String>()),
      ' ' | '-' => Some("-".to_string()),
      _ => None,
    })
    .collect()
}

pub fn parse_nav(source: &str) -> anyhow::Result<NavConfig> {
  let deserializer = serde_yaml::Deserializer::from_str(source);
  serde_path_to_error::deserialize(deserializer)
    .map_err(|err| anyhow::anyhow!("invalid value at `{}`: {}", err.path(), err.inner()))
    .context("parse nav file")
}

pub fn parse_manifest(source: &str) -> anyhow::Result<Manifest> {
  let mut deserializer = serde_json::Deserializer::from_str(source);
  serde_path_to_error::deserialize(&mut deserializer)
    .map_err(|err| anyhow::anyhow!("invalid value at `{}`: {}", err.path(), err.inner()))
    .context("parse manifest")
}

pub async fn load_nav(path: &Path) -> anyhow::Result<NavConfig> {
  let source = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("read nav file {}", path.display()))?;
  parse_nav(&source)
}

pub async fn load_manifest(path: &Path) -> anyhow::Result<Manifest> {
  let source = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("read manifest {}", path.display()))?;
  parse_manifest(&source)
}
