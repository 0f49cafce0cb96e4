use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversionStats {
  pub definitions_converted: usize,
  pub objects_converted: usize,
  pub aliases_converted: usize,
  pub properties_converted: usize,
  pub patterns_extracted: usize,
  pub fallbacks: usize,
  pub warnings: Vec<ConversionWarning>,
}

impl ConversionStats {
  pub fn record_definition(&mut self, is_alias: bool) {
    self.definitions_converted += 1;
    if is_alias {
      self.aliases_converted += 1;
    } else {
      self.objects_converted += 1;
    }
  }

  pub fn record_property(&mut self) {
    self.properties_converted += 1;
  }

  pub fn record_pattern(&mut self) {
    self.patterns_extracted += 1;
  }

  pub fn record_fallback(&mut self, path: &str, shape: String) {
    self.fallbacks += 1;
    self.record_warning(ConversionWarning::Fallback {
      path: path.to_string(),
      shape,
    });
  }

  pub fn record_warning(&mut self, warning: ConversionWarning) {
    self.warnings.push(warning);
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ConversionWarning {
  #[strum(to_string = "'{path}': {shape} has no schema mapping, documented as untyped")]
  Fallback { path: String, shape: String },
  #[strum(to_string = "'{path}': pattern `{pattern}` does not compile: {error}")]
  InvalidPattern {
    path: String,
    pattern: String,
    error: String,
  },
  #[strum(to_string = "'{path}': field with a computed label")]
  ComputedLabel { path: String },
  #[strum(to_string = "Definition '#{name}' declared more than once, keeping the last one")]
  DuplicateDefinition { name: String },
}

impl ConversionWarning {
  pub fn is_skipped_item(&self) -> bool {
    matches!(self, Self::ComputedLabel { .. })
  }

  /// Fallbacks are expected for most real schemas and only shown on request.
  pub fn is_verbose_only(&self) -> bool {
    matches!(self, Self::Fallback { .. })
  }
}
