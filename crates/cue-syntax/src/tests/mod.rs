mod parser;

use crate::{Decl, Field, File, parse_file};

pub(super) fn parse(source: &str) -> File {
  parse_file(source).unwrap()
}

pub(super) fn field<'a>(decls: &'a [Decl], name: &str) -> &'a Field {
  decls
    .iter()
    .filter_map(Decl::as_field)
    .find(|field| field.label.name() == Some(name))
    .unwrap_or_else(|| panic!("field {name} not found"))
}
