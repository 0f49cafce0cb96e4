use std::path::Path;

use comfy_table::{Attribute, Cell, ContentArrangement, Row, Table};

use super::UNKNOWN_VERSION;
use crate::{
  converter::SchemaTreeBuilder,
  schema::{SchemaDocument, SchemaFragment, SchemaKind},
  ui::{Colors, colors::Role, term_width},
  utils::spec::{SpecFormat, SpecLoader},
};

async fn load_document(input: &Path) -> anyhow::Result<SchemaDocument> {
  let loader = SpecLoader::open(input).await?;
  match loader.format() {
    SpecFormat::Cue => {
      let file = loader.parse_cue()?;
      Ok(SchemaTreeBuilder::new("Schema", UNKNOWN_VERSION).build(&file).document)
    }
    SpecFormat::Json | SpecFormat::Yaml => SchemaDocument::from_spec(&loader.parse()?),
  }
}

/// Short type label for the table: `string`, `array[Contact]`, `-> Contact`.
fn type_label(schema: &SchemaFragment) -> String {
  match schema.kind {
    SchemaKind::Reference => format!("-> {}", schema.reference_name().unwrap_or_default()),
    SchemaKind::Array => match schema.items.as_deref() {
      Some(items) => format!("array[{}]", type_label(items).trim_start_matches("-> ")),
      None => "array".to_string(),
    },
    kind => kind.to_string(),
  }
}

fn schema_rows(document: &SchemaDocument) -> Vec<(String, &'static str, String, String)> {
  document
    .schemas
    .iter()
    .map(|(name, schema)| {
      let category = if schema.is_alias() { "alias" } else { "object" };
      let description = schema.description.clone().unwrap_or_default();
      (name.clone(), category, type_label(schema), description)
    })
    .collect()
}

pub async fn list_schemas(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let document = load_document(input).await?;

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  row.add_cell(Cell::new("SCHEMA").fg(colors.cell(Role::Label)));
  row.add_cell(Cell::new("KIND").fg(colors.cell(Role::Label)));
  row.add_cell(Cell::new("TYPE").fg(colors.cell(Role::Label)));
  row.add_cell(Cell::new("DESCRIPTION").fg(colors.cell(Role::Label)));
  table.set_header(row);

  for (name, category, type_label, description) in schema_rows(&document) {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(name)
        .fg(colors.cell(Role::Value))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(category).fg(colors.cell(Role::Alert)));
    row.add_cell(Cell::new(type_label).fg(colors.cell(Role::Detail)));
    row.add_cell(Cell::new(description).fg(colors.cell(Role::Heading)));
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}
