mod graph;

use cue_syntax::parse_file;

use super::{Manifest, MarkdownRenderer, RenderMode, RenderOutput};
use crate::{converter::SchemaTreeBuilder, schema::SchemaDocument};

const DIRECTORY_CUE: &str = include_str!("../../../fixtures/directory.cue");
const CYCLE_CUE: &str = include_str!("../../../fixtures/cycle.cue");
const NAV_YAML: &str = include_str!("../../../fixtures/schema-nav.yml");
const MANIFEST_JSON: &str = include_str!("../../../fixtures/schema-manifest.json");

fn document(source: &str) -> SchemaDocument {
  let file = parse_file(source).unwrap();
  SchemaTreeBuilder::new("Directory Schema", "1.2.0").build(&file).document
}

fn render(document: &SchemaDocument, mode: &RenderMode) -> anyhow::Result<RenderOutput> {
  MarkdownRenderer::new(document).render(mode)
}

/// Manifest mode with a single source file entry.
fn manifest(source_file: &str, names: &[&str]) -> RenderMode {
  let names = names.iter().map(ToString::to_string).collect();
  RenderMode::Manifest(Manifest::from([(source_file.to_string(), names)]))
}

/// Content of the single page produced for `mode`.
fn single_page(document: &SchemaDocument, mode: &RenderMode) -> String {
  let output = render(document, mode).unwrap();
  assert_eq!(output.pages.len(), 1);
  output.pages.into_iter().next().unwrap().content
}
