pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Builds the `$ref` path for a component schema name.
pub fn schema_ref_path(name: &str) -> String {
  format!("{SCHEMA_REF_PREFIX}{name}")
}

/// Extracts the schema name from a `#/components/schemas/<Name>` reference.
///
/// Returns `None` for references to other component kinds, external
/// documents, or nested pointers.
pub fn parse_schema_ref_path(ref_path: &str) -> Option<String> {
  let name = ref_path.strip_prefix(SCHEMA_REF_PREFIX)?;
  (!name.is_empty() && !name.contains('/')).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_schema_ref_path() {
    assert_eq!(parse_schema_ref_path("#/components/schemas/Contact"), Some("Contact".to_string()));
    assert_eq!(parse_schema_ref_path("#/components/responses/Contact"), None);
    assert_eq!(parse_schema_ref_path("other.yaml#/components/schemas/Contact"), None);
    assert_eq!(parse_schema_ref_path("#/components/schemas/"), None);
    assert_eq!(parse_schema_ref_path("#/components/schemas/A/properties/b"), None);
  }

  #[test]
  fn test_schema_ref_path_round_trip() {
    let path = schema_ref_path("Email");
    assert_eq!(path, "#/components/schemas/Email");
    assert_eq!(parse_schema_ref_path(&path).as_deref(), Some("Email"));
  }
}
