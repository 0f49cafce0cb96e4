use std::io::IsTerminal;

use clap::{
  ValueEnum,
  builder::styling::{Color as ClapColor, RgbColor, Style, Styles},
};
use comfy_table::Color as ComfyColor;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Dark,
  Light,
}

/// What a piece of terminal output is, independent of the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
  Timestamp,
  /// Step messages, warning text and schema descriptions.
  Heading,
  /// Cycle and warning labels, schema kinds.
  Alert,
  Detail,
  Success,
  Label,
  Value,
}

const fn rgb(theme: Theme, role: Role) -> (u8, u8, u8) {
  match (theme, role) {
    (Theme::Dark, Role::Timestamp) => (122, 142, 160),
    (Theme::Dark, Role::Heading) => (138, 196, 232),
    (Theme::Dark, Role::Alert) => (232, 130, 104),
    (Theme::Dark, Role::Detail) => (150, 170, 186),
    (Theme::Dark, Role::Success) => (126, 204, 150),
    (Theme::Dark, Role::Label) => (196, 168, 236),
    (Theme::Dark, Role::Value) => (240, 214, 128),
    (Theme::Light, Role::Timestamp) => (88, 100, 112),
    (Theme::Light, Role::Heading) => (24, 78, 128),
    (Theme::Light, Role::Alert) => (176, 60, 36),
    (Theme::Light, Role::Detail) => (70, 88, 104),
    (Theme::Light, Role::Success) => (28, 118, 64),
    (Theme::Light, Role::Label) => (104, 64, 160),
    (Theme::Light, Role::Value) => (136, 96, 12),
  }
}

pub struct Colors {
  enabled: bool,
  theme: Theme,
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self { enabled, theme }
  }

  const fn rgb(&self, role: Role) -> Option<(u8, u8, u8)> {
    if self.enabled { Some(rgb(self.theme, role)) } else { None }
  }

  /// Foreground for styled terminal text, `Reset` when colors are off.
  pub const fn fg(&self, role: Role) -> Color {
    match self.rgb(role) {
      Some((r, g, b)) => Color::Rgb { r, g, b },
      None => Color::Reset,
    }
  }

  /// Foreground for a table cell, `Reset` when colors are off.
  pub const fn cell(&self, role: Role) -> ComfyColor {
    match self.rgb(role) {
      Some((r, g, b)) => ComfyColor::Rgb { r, g, b },
      None => ComfyColor::Reset,
    }
  }

  /// Help output styles, always drawn with the dark palette.
  pub const fn clap_styles() -> Styles {
    const fn clap(role: Role) -> Option<ClapColor> {
      let (r, g, b) = rgb(Theme::Dark, role);
      Some(ClapColor::Rgb(RgbColor(r, g, b)))
    }

    Styles::styled()
      .header(Style::new().bold().underline().fg_color(clap(Role::Label)))
      .usage(Style::new().bold().fg_color(clap(Role::Label)))
      .literal(Style::new().fg_color(clap(Role::Success)))
      .placeholder(Style::new().fg_color(clap(Role::Detail)))
      .error(Style::new().bold().fg_color(clap(Role::Alert)))
      .valid(Style::new().fg_color(clap(Role::Success)))
      .invalid(Style::new().bold().fg_color(clap(Role::Alert)))
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => detect_terminal_theme(),
  }
}

/// `COLORFGBG` is `fg;bg`, a background of 8 or above is light.
fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
  let bg = value.split(';').next_back()?.parse::<u8>().ok()?;
  Some(if bg >= 8 { Theme::Light } else { Theme::Dark })
}

fn detect_terminal_theme() -> Theme {
  if let Ok(colorfgbg) = std::env::var("COLORFGBG")
    && let Some(theme) = theme_from_colorfgbg(&colorfgbg)
  {
    return theme;
  }

  if let Ok(term_program) = std::env::var("TERM_PROGRAM")
    && (term_program == "Apple_Terminal" || term_program == "iTerm.app")
    && let Ok(profile) = std::env::var("ITERM_PROFILE")
    && profile.to_lowercase().contains("light")
  {
    return Theme::Light;
  }

  Theme::Dark
}
