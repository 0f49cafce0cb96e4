use cue_syntax::{Decl, Expr, Field, ListElement, StructLit};
use regex::Regex;

use super::{ConversionStats, ConversionWarning, DATE_FORMAT, DATE_PATTERN};
use crate::schema::{SchemaFragment, SchemaKind};

/// Maps one CUE expression onto a schema fragment.
///
/// Only a closed set of shapes is understood: `string`, `bool`, definition
/// references, regex matches, lists, struct literals and `time.Format(...)`.
/// Anything else becomes an untyped fragment and is recorded as a fallback.
pub struct ExprClassifier<'a> {
  stats: &'a mut ConversionStats,
}

impl<'a> ExprClassifier<'a> {
  pub fn new(stats: &'a mut ConversionStats) -> Self {
    Self { stats }
  }

  /// `path` locates the expression in warnings, e.g. `#Contact.email`.
  pub fn classify(&mut self, expr: &Expr, description: Option<String>, path: &str) -> SchemaFragment {
    let fragment = match expr {
      Expr::Ident(name) => self.identifier(name, expr, path),
      Expr::Binary { op, lhs, rhs } if op.is_match() => self.matched_string([&**rhs, &**lhs], path),
      Expr::Unary { op, operand } if op.is_match() => self.matched_string([&**operand], path),
      Expr::Unary { operand, .. } | Expr::Paren(operand) => return self.classify(operand, description, path),
      Expr::List(elements) => self.list(elements, path),
      Expr::Struct(body) => self.object(body, path),
      Expr::Call { func, .. } if func.qualified_name().as_deref() == Some("time.Format") => SchemaFragment::builder()
        .kind(SchemaKind::String)
        .format(DATE_FORMAT)
        .pattern(DATE_PATTERN)
        .build(),
      _ => self.fallback(expr, path),
    };
    fragment.with_description(description)
  }

  fn identifier(&mut self, name: &str, expr: &Expr, path: &str) -> SchemaFragment {
    match name {
      "string" => SchemaFragment::string(),
      "bool" => SchemaFragment::boolean(),
      _ => match name.strip_prefix('#') {
        Some(definition) => SchemaFragment::reference(definition),
        None => self.fallback(expr, path),
      },
    }
  }

  /// String constrained by the first string literal among `operands`.
  fn matched_string<'e>(&mut self, operands: impl IntoIterator<Item = &'e Expr>, path: &str) -> SchemaFragment {
    let Some(pattern) = operands.into_iter().find_map(Expr::as_raw_string_literal) else {
      return SchemaFragment::string();
    };

    self.stats.record_pattern();
    if let Err(error) = Regex::new(pattern) {
      self.stats.record_warning(ConversionWarning::InvalidPattern {
        path: path.to_string(),
        pattern: pattern.to_string(),
        error: error.to_string(),
      });
    }

    SchemaFragment::builder()
      .kind(SchemaKind::String)
      .pattern(pattern)
      .build()
  }

  fn list(&mut self, elements: &[ListElement], path: &str) -> SchemaFragment {
    let items_path = format!("{path}[]");
    for element in elements {
      match element {
        ListElement::Ellipsis(Some(item)) => {
          return SchemaFragment::array(self.classify(item, None, &items_path));
        }
        ListElement::Value(Expr::Ident(name)) if name.starts_with('#') => {
          let definition = name.trim_start_matches('#');
          return SchemaFragment::array(SchemaFragment::reference(definition));
        }
        _ => {}
      }
    }
    SchemaFragment::array(SchemaFragment::string())
  }

  fn object(&mut self, body: &StructLit, path: &str) -> SchemaFragment {
    let mut object = SchemaFragment::object();
    let mut pending_comment = None;

    for decl in &body.decls {
      match decl {
        Decl::Comment(group) => {
          if let Some(text) = group.text() {
            pending_comment = Some(text);
          }
        }
        Decl::Field(field) => {
          let description = field.comment_text().or(pending_comment.take());
          self.property(&mut object, field, description, path);
        }
        _ => {}
      }
    }

    object
  }

  fn property(&mut self, object: &mut SchemaFragment, field: &Field, description: Option<String>, path: &str) {
    let Some(name) = field.label.name() else {
      self.stats.record_warning(ConversionWarning::ComputedLabel {
        path: path.to_string(),
      });
      return;
    };

    let field_path = if path.is_empty() {
      name.to_string()
    } else {
      format!("{path}.{name}")
    };
    let schema = self.classify(&field.value, description, &field_path);

    if !field.is_optional() && !object.is_required(name) {
      object.required.push(name.to_string());
    }
    object.properties.insert(name.to_string(), schema);
    self.stats.record_property();
  }

  fn fallback(&mut self, expr: &Expr, path: &str) -> SchemaFragment {
    self.stats.record_fallback(path, expr.shape());
    SchemaFragment::untyped()
  }
}
