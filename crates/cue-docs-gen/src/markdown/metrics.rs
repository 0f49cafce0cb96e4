use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderStats {
  pub pages_written: usize,
  pub sections_rendered: usize,
  pub aliases_rendered: usize,
  pub links_collected: usize,
  pub cycles_detected: usize,
  pub cycle_details: Vec<Vec<String>>,
  pub warnings: Vec<RenderWarning>,
}

impl RenderStats {
  pub fn record_page(&mut self) {
    self.pages_written += 1;
  }

  pub fn record_section(&mut self, is_alias: bool) {
    if is_alias {
      self.aliases_rendered += 1;
    } else {
      self.sections_rendered += 1;
    }
  }

  pub fn record_links(&mut self, count: usize) {
    self.links_collected += count;
  }

  pub fn record_cycle(&mut self, cycle: Vec<String>) {
    self.cycles_detected += 1;
    self.cycle_details.push(cycle);
  }

  pub fn record_cycles(&mut self, cycles: Vec<Vec<String>>) {
    for cycle in cycles {
      self.record_cycle(cycle);
    }
  }

  pub fn record_warning(&mut self, warning: RenderWarning) {
    self.warnings.push(warning);
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum RenderWarning {
  #[strum(to_string = "Schema '{schema_name}' listed for '{source_file}' is not in the OpenAPI document")]
  MissingSchema { schema_name: String, source_file: String },
  #[strum(to_string = "Page '{page}' has no schemas to render, not written")]
  EmptyPage { page: String },
}

impl RenderWarning {
  pub fn is_skipped_item(&self) -> bool {
    matches!(self, Self::EmptyPage { .. })
  }

  /// Manifest mode skips missing schemas silently unless asked.
  pub fn is_verbose_only(&self) -> bool {
    matches!(self, Self::MissingSchema { .. } | Self::EmptyPage { .. })
  }
}
