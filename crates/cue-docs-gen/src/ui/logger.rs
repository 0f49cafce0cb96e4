use std::fmt::Display;

use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use super::{Colors, colors::Role};
use crate::{converter::ConversionWarning, markdown::RenderWarning};

pub(crate) fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

/// Warnings the logger knows how to classify.
pub(crate) trait Reportable: Display {
  fn is_skipped_item(&self) -> bool;
  fn is_verbose_only(&self) -> bool;
}

impl Reportable for ConversionWarning {
  fn is_skipped_item(&self) -> bool {
    Self::is_skipped_item(self)
  }

  fn is_verbose_only(&self) -> bool {
    Self::is_verbose_only(self)
  }
}

impl Reportable for RenderWarning {
  fn is_skipped_item(&self) -> bool {
    Self::is_skipped_item(self)
  }

  fn is_verbose_only(&self) -> bool {
    Self::is_verbose_only(self)
  }
}

pub(crate) struct Logger<'a> {
  colors: &'a Colors,
  verbose: bool,
  quiet: bool,
}

impl<'a> Logger<'a> {
  pub(crate) const fn new(colors: &'a Colors, verbose: bool, quiet: bool) -> Self {
    Self { colors, verbose, quiet }
  }

  pub(crate) fn info(&self, message: &str) {
    if !self.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.fg(Role::Timestamp)));
    }
  }

  pub(crate) fn step(&self, message: &str) {
    self.info(&message.with(self.colors.fg(Role::Heading)).to_string());
  }

  pub(crate) fn stat(&self, label: &str, value: String) {
    if !self.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.fg(Role::Label)),
        value.with(self.colors.fg(Role::Value))
      );
    }
  }

  pub(crate) fn detail(&self, message: &str) {
    if self.verbose && !self.quiet {
      println!("            {}", message.with(self.colors.fg(Role::Detail)));
    }
  }

  pub(crate) fn cycles(&self, count: usize, details: &[Vec<String>]) {
    if count == 0 {
      return;
    }

    self.stat("Cycles:", count.to_string());

    if self.verbose && !self.quiet {
      for (i, cycle) in details.iter().enumerate() {
        println!(
          "              {}: {}",
          format!("Cycle {}", i + 1).with(self.colors.fg(Role::Alert)),
          cycle.join(" -> ").with(self.colors.fg(Role::Detail))
        );
      }
    }
  }

  pub(crate) fn warnings<W: Reportable>(&self, warnings: &[W]) {
    if warnings.is_empty() || self.quiet {
      return;
    }

    self.stat("Warnings:", warnings.len().to_string());

    let mut printed_header = false;
    for warning in warnings {
      if warning.is_verbose_only() && !self.verbose {
        continue;
      }

      if !printed_header {
        println!();
        printed_header = true;
      }

      let label = if warning.is_skipped_item() { "Skipped:" } else { "Warning:" };
      eprintln!(
        "{} {}",
        label.with(self.colors.fg(Role::Alert)),
        format!("{warning}").with(self.colors.fg(Role::Heading))
      );
    }
  }

  pub(crate) fn success(&self, message: &str) {
    if !self.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.fg(Role::Timestamp)),
        message.with(self.colors.fg(Role::Success))
      );
    }
  }
}
