use std::collections::{BTreeMap, BTreeSet};

use anyhow::Context;
use itertools::Itertools;

use super::{
  RenderMode, RenderStats, RenderWarning, SchemaGraph,
  config::{Manifest, NavConfig},
};
use crate::schema::{SchemaDocument, SchemaFragment, SchemaKind};

const ROOTS_PAGE_STEM: &str = "schema";
const SECTION_LEVEL: usize = 2;
const MAX_HEADING_LEVEL: usize = 6;

const DEFAULT_TITLE: &str = "Schema";
const DEFAULT_VERSION: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
  /// File name inside the output directory, including the `.md` extension.
  pub file_name: String,
  pub content: String,
}

#[derive(Debug)]
pub struct RenderOutput {
  pub pages: Vec<RenderedPage>,
  pub stats: RenderStats,
}

/// Schema names linked from rendered pages, emitted once as a reference-link footer.
#[derive(Debug, Clone, Default)]
pub struct LinkedHeaders(BTreeSet<String>);

impl LinkedHeaders {
  pub fn record(&mut self, name: &str) {
    self.0.insert(name.to_string());
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn footer(&self) -> String {
    self
      .0
      .iter()
      .map(|name| format!("\n[{name}]: #{}", anchor(name)))
      .collect()
  }
}

fn anchor(name: &str) -> String {
  name.to_lowercase()
}

fn heading(level: usize) -> String {
  "#".repeat(level.min(MAX_HEADING_LEVEL))
}

/// Rejects page stems that would resolve outside the output directory.
fn checked_stem(stem: &str) -> anyhow::Result<&str> {
  if stem.is_empty() || stem == "." || stem == ".." || stem.contains(['/', '\\']) {
    anyhow::bail!("invalid page name \"{stem}\": expected a plain file name");
  }
  Ok(stem)
}

fn non_empty(text: Option<&str>) -> Option<&str> {
  text.filter(|text| !text.trim().is_empty())
}

/// Renders the schemas of one document into markdown pages.
///
/// Each renderer owns its link accumulator and statistics, so separate runs
/// never share state.
pub struct MarkdownRenderer<'a> {
  document: &'a SchemaDocument,
  /// schema name -> page stem, populated in nav mode only
  schema_files: BTreeMap<String, String>,
  linked: LinkedHeaders,
  stats: RenderStats,
}

impl<'a> MarkdownRenderer<'a> {
  pub fn new(document: &'a SchemaDocument) -> Self {
    Self {
      document,
      schema_files: BTreeMap::new(),
      linked: LinkedHeaders::default(),
      stats: RenderStats::default(),
    }
  }

  pub fn render(mut self, mode: &RenderMode) -> anyhow::Result<RenderOutput> {
    self
      .stats
      .record_cycles(SchemaGraph::new(self.document).detect_cycles());

    let pages = match mode {
      RenderMode::Nav(nav) => self.render_nav(nav)?,
      RenderMode::Manifest(manifest) => self.render_manifest(manifest)?,
      RenderMode::Roots(roots) => vec![self.render_roots(roots)?],
    };

    self.stats.record_links(self.linked.len());
    Ok(RenderOutput {
      pages,
      stats: self.stats,
    })
  }

  fn lookup(&self, name: &str) -> Option<&'a SchemaFragment> {
    self.document.get(name)
  }

  fn page(&mut self, stem: &str, content: String) -> anyhow::Result<RenderedPage> {
    let stem = checked_stem(stem)?;
    self.stats.record_page();
    Ok(RenderedPage {
      file_name: format!("{stem}.md"),
      content,
    })
  }

  fn render_nav(&mut self, nav: &NavConfig) -> anyhow::Result<Vec<RenderedPage>> {
    for page in &nav.pages {
      let stem = page.output_stem();
      checked_stem(&stem)?;
      for name in &page.schemas {
        self.schema_files.insert(name.clone(), stem.clone());
      }
    }

    let mut pages = Vec::with_capacity(nav.pages.len());
    for page in &nav.pages {
      let mut content = String::new();
      for name in &page.schemas {
        let schema = self.lookup(name).with_context(|| {
          format!(
            "schema \"{name}\" not found in OpenAPI spec (referenced in page \"{}\")",
            page.title
          )
        })?;
        content.push_str(&self.schema_block(name, schema)?);
      }
      pages.push(self.page(&page.output_stem(), content)?);
    }

    Ok(pages)
  }

  fn render_manifest(&mut self, manifest: &Manifest) -> anyhow::Result<Vec<RenderedPage>> {
    let mut pages = Vec::new();

    for (source_file, names) in manifest {
      if names.is_empty() {
        continue;
      }

      let mut content = String::new();
      for name in names {
        let Some(schema) = self.lookup(name) else {
          self.stats.record_warning(RenderWarning::MissingSchema {
            schema_name: name.clone(),
            source_file: source_file.clone(),
          });
          continue;
        };
        content.push_str(&self.schema_block(name, schema)?);
      }

      if content.is_empty() {
        self.stats.record_warning(RenderWarning::EmptyPage {
          page: source_file.clone(),
        });
        continue;
      }

      let stem = source_file.strip_suffix(".cue").unwrap_or(source_file.as_str());
      pages.push(self.page(stem, content)?);
    }

    Ok(pages)
  }

  fn render_roots(&mut self, roots: &[String]) -> anyhow::Result<RenderedPage> {
    let document = self.document;
    let root_schemas = roots
      .iter()
      .map(|name| {
        document
          .get(name)
          .map(|schema| (name.as_str(), schema))
          .with_context(|| format!("root schema \"{name}\" not found in OpenAPI spec"))
      })
      .collect::<anyhow::Result<Vec<_>>>()?;
    let is_root = |name: &str| roots.iter().any(|root| root == name);

    let title = non_empty(Some(document.title.as_str())).unwrap_or(DEFAULT_TITLE);
    let version = non_empty(Some(document.version.as_str())).unwrap_or(DEFAULT_VERSION);

    let mut content = format!("# {title} _({version})_\n\n");
    content.push_str("**Table of Contents**\n\n* \n{:toc}\n\n---\n\n");

    for (name, schema) in root_schemas {
      content.push_str(&self.object_section(name, schema)?);
      self.stats.record_section(false);
    }

    for (name, schema) in document.objects().filter(|(name, _)| !is_root(name)) {
      content.push_str(&self.object_section(name, schema)?);
      self.stats.record_section(false);
    }

    let aliases = document.aliases().filter(|(name, _)| !is_root(name)).collect_vec();
    if !aliases.is_empty() {
      content.push_str("\n## Aliases\n\nThe following aliases are used throughout the schema for consistency.\n\n");
      for (name, schema) in aliases {
        content.push_str(&self.alias_block(name, schema, SECTION_LEVEL + 1)?);
        self.stats.record_section(true);
      }
    }

    content.push_str(&self.linked.footer());
    self.page(ROOTS_PAGE_STEM, content)
  }

  fn schema_block(&mut self, name: &str, schema: &SchemaFragment) -> anyhow::Result<String> {
    let is_alias = schema.is_alias();
    self.stats.record_section(is_alias);
    if is_alias {
      self.alias_block(name, schema, SECTION_LEVEL)
    } else {
      self.object_section(name, schema)
    }
  }

  fn alias_block(&mut self, name: &str, schema: &SchemaFragment, level: usize) -> anyhow::Result<String> {
    let mut out = format!("{} `{name}`\n\n", heading(level));
    if let Some(description) = non_empty(schema.description.as_deref()) {
      out.push_str(&format!("{description}\n\n"));
    }

    match (schema.kind, self.type_display(schema)?) {
      (SchemaKind::Reference | SchemaKind::Array, Some(display)) => out.push_str(&format!("- **Type**: {display}\n")),
      (_, Some(display)) => out.push_str(&format!("- **Type**: `{display}`\n")),
      (_, None) => {}
    }
    if let Some(format) = non_empty(schema.format.as_deref()) {
      out.push_str(&format!("- **Format**: `{format}`\n"));
    }
    if let Some(pattern) = non_empty(schema.pattern.as_deref()) {
      out.push_str(&format!("- **Value**: `{pattern}`\n"));
    }

    out.push_str("\n---\n\n");
    Ok(out)
  }

  fn object_section(&mut self, name: &str, schema: &SchemaFragment) -> anyhow::Result<String> {
    let mut out = format!("{} #{name}\n\n", heading(SECTION_LEVEL));
    if let Some(description) = non_empty(schema.description.as_deref()) {
      out.push_str(&format!("{description}\n\n"));
    }

    let (required, optional): (Vec<&String>, Vec<&String>) = schema
      .properties
      .keys()
      .sorted()
      .partition(|property| schema.is_required(property));
    for (label, names) in [("Required", required), ("Optional", optional)] {
      if !names.is_empty() {
        let listed = names.iter().map(|name| format!("`{name}`")).join(", ");
        out.push_str(&format!("**{label}**: {listed}\n\n"));
      }
    }

    let mut visited = vec![name.to_string()];
    self.fields(&mut out, schema, "", SECTION_LEVEL + 1, &mut visited)?;
    Ok(out)
  }

  /// Required fields first, then alphabetical, each followed by its nested fields.
  fn fields(
    &mut self,
    out: &mut String,
    object: &SchemaFragment,
    prefix: &str,
    level: usize,
    visited: &mut Vec<String>,
  ) -> anyhow::Result<()> {
    let mut ordered: Vec<(&String, &SchemaFragment)> = object.properties.iter().collect();
    ordered.sort_by(|(a, _), (b, _)| {
      object
        .is_required(b)
        .cmp(&object.is_required(a))
        .then_with(|| a.cmp(b))
    });

    for (name, field) in ordered {
      let path = if prefix.is_empty() {
        name.clone()
      } else {
        format!("{prefix}.{name}")
      };
      self.field_block(out, &path, field, object.is_required(name), level)?;
      self.expand(out, field, &path, level + 1, visited)?;
    }

    Ok(())
  }

  fn field_block(
    &mut self,
    out: &mut String,
    path: &str,
    field: &SchemaFragment,
    required: bool,
    level: usize,
  ) -> anyhow::Result<()> {
    out.push_str(&format!("{} `{path}`\n\n", heading(level)));

    let requirement = if required { "_Required_" } else { "_Optional_" };
    match self.type_display(field)? {
      Some(display) => out.push_str(&format!("**{display}** {requirement}\n\n")),
      None => out.push_str(&format!("{requirement}\n\n")),
    }

    let description = non_empty(field.description.as_deref()).or_else(|| {
      field
        .reference_name()
        .and_then(|name| self.lookup(name))
        .and_then(|target| non_empty(target.description.as_deref()))
    });
    if let Some(description) = description {
      out.push_str(&format!("{description}\n\n"));
    }

    Ok(())
  }

  /// Expands inline objects, object references and arrays of either.
  ///
  /// `visited` holds the references currently open on this branch. A reference
  /// already open is left as the field line alone.
  fn expand(
    &mut self,
    out: &mut String,
    field: &SchemaFragment,
    path: &str,
    level: usize,
    visited: &mut Vec<String>,
  ) -> anyhow::Result<()> {
    match field.kind {
      SchemaKind::Object => self.fields(out, field, path, level, visited),
      SchemaKind::Array => match field.items.as_deref() {
        Some(items) => self.expand(out, items, &format!("{path}[]"), level, visited),
        None => Ok(()),
      },
      SchemaKind::Reference => {
        let Some(name) = field.reference_name() else {
          return Ok(());
        };
        let target = self
          .lookup(name)
          .with_context(|| format!("schema not found: {name}"))?;
        if target.is_alias() || visited.iter().any(|open| open == name) {
          return Ok(());
        }

        visited.push(name.to_string());
        let result = self.fields(out, target, path, level, visited);
        visited.pop();
        result
      }
      _ => Ok(()),
    }
  }

  /// Type shown for a field: primitive name, link, or `array[...]`.
  fn type_display(&mut self, fragment: &SchemaFragment) -> anyhow::Result<Option<String>> {
    match fragment.kind {
      SchemaKind::Reference => {
        let name = fragment
          .reference_name()
          .context("reference schema without a target")?;
        self.link(name).map(Some)
      }
      SchemaKind::Array => {
        let items = match fragment.items.as_deref() {
          Some(items) => self.type_display(items)?,
          None => None,
        };
        Ok(Some(match items {
          Some(items) => format!("array[{items}]"),
          None => "array".to_string(),
        }))
      }
      kind => Ok(kind.display_name().map(str::to_string)),
    }
  }

  fn link(&mut self, name: &str) -> anyhow::Result<String> {
    if self.lookup(name).is_none() {
      anyhow::bail!("schema not found: {name}");
    }
    self.linked.record(name);

    let anchor = anchor(name);
    Ok(match self.schema_files.get(name) {
      Some(file) => format!("[{name}]({file}#{anchor})"),
      None => format!("[{name}](#{anchor})"),
    })
  }
}
