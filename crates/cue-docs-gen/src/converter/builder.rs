use std::collections::BTreeMap;

use cue_syntax::{Decl, File};

use super::{ConversionStats, ConversionWarning, ExprClassifier};
use crate::schema::SchemaDocument;

#[derive(Debug)]
pub struct ConversionOutput {
  pub document: SchemaDocument,
  pub stats: ConversionStats,
}

/// Collects every top-level `#Definition` of a CUE file into a schema document.
#[derive(Debug, Clone)]
pub struct SchemaTreeBuilder {
  title: String,
  version: String,
}

impl SchemaTreeBuilder {
  pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      version: version.into(),
    }
  }

  pub fn build(&self, file: &File) -> ConversionOutput {
    let mut stats = ConversionStats::default();
    let mut schemas = BTreeMap::new();
    let mut document_description = None;
    let mut seen_definition = false;
    let mut pending_comment = None;

    for decl in &file.decls {
      let field = match decl {
        Decl::Comment(group) => {
          if let Some(text) = group.text() {
            pending_comment = Some(text);
          }
          continue;
        }
        Decl::Field(field) => field,
        _ => continue,
      };

      let description = field.comment_text().or(pending_comment.take());
      let Some(name) = field.label.definition_name() else {
        continue;
      };

      if !seen_definition {
        seen_definition = true;
        document_description.clone_from(&description);
      }

      let fragment = ExprClassifier::new(&mut stats).classify(&field.value, description, &format!("#{name}"));
      stats.record_definition(fragment.is_alias());
      if schemas.insert(name.to_string(), fragment).is_some() {
        stats.record_warning(ConversionWarning::DuplicateDefinition { name: name.to_string() });
      }
    }

    let document = SchemaDocument::builder()
      .title(self.title.clone())
      .version(self.version.clone())
      .maybe_description(document_description)
      .schemas(schemas)
      .build();

    ConversionOutput { document, stats }
  }
}
