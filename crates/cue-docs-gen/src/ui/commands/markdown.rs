use std::path::PathBuf;

use anyhow::Context;

use crate::{
  markdown::{MarkdownRenderer, RenderMode, RenderStats, RenderedPage, load_manifest, load_nav},
  schema::SchemaDocument,
  ui::{Colors, Logger, MarkdownCommand},
  utils::spec::SpecLoader,
};

/// Page layout requested on the command line, before its inputs are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeSource {
  Nav(PathBuf),
  Manifest(PathBuf),
  Roots(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct MarkdownConfig {
  pub input: PathBuf,
  pub output: PathBuf,
  pub mode: ModeSource,
  pub verbose: bool,
  pub quiet: bool,
}

impl MarkdownConfig {
  pub fn from_command(command: MarkdownCommand) -> anyhow::Result<Self> {
    let MarkdownCommand {
      input,
      output,
      manifest,
      nav,
      roots,
      verbose,
      quiet,
    } = command;

    let roots: Vec<String> = roots
      .unwrap_or_default()
      .into_iter()
      .map(|root| root.trim().to_string())
      .filter(|root| !root.is_empty())
      .collect();

    let mode = match (nav, manifest) {
      (Some(nav), _) => ModeSource::Nav(nav),
      (None, Some(manifest)) => ModeSource::Manifest(manifest),
      (None, None) if roots.is_empty() => {
        anyhow::bail!("--roots is required when --manifest and --nav are not set")
      }
      (None, None) => ModeSource::Roots(roots),
    };

    Ok(Self {
      input,
      output,
      mode,
      verbose,
      quiet,
    })
  }

  async fn load_document(&self) -> anyhow::Result<SchemaDocument> {
    let spec = SpecLoader::open(&self.input)
      .await
      .context("failed to read OpenAPI file")?
      .parse()
      .context("failed to parse OpenAPI document")?;
    SchemaDocument::from_spec(&spec)
  }

  async fn load_mode(&self) -> anyhow::Result<RenderMode> {
    Ok(match &self.mode {
      ModeSource::Nav(path) => RenderMode::Nav(load_nav(path).await?),
      ModeSource::Manifest(path) => RenderMode::Manifest(load_manifest(path).await?),
      ModeSource::Roots(roots) => RenderMode::Roots(roots.clone()),
    })
  }

  async fn write_pages(&self, pages: &[RenderedPage]) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(&self.output)
      .await
      .context("failed to create output directory")?;

    for page in pages {
      let path = self.output.join(&page.file_name);
      tokio::fs::write(&path, &page.content)
        .await
        .with_context(|| format!("write {}", path.display()))?;
    }

    Ok(())
  }
}

fn print_statistics(logger: &Logger<'_>, stats: &RenderStats) {
  logger.stat("Pages written:", stats.pages_written.to_string());
  logger.stat("", format!("{} schema sections", stats.sections_rendered));
  logger.stat("", format!("{} alias blocks", stats.aliases_rendered));
  logger.stat("Schemas linked:", stats.links_collected.to_string());
  logger.cycles(stats.cycles_detected, &stats.cycle_details);
  logger.warnings(&stats.warnings);
}

pub async fn generate_markdown(config: MarkdownConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = Logger::new(colors, config.verbose, config.quiet);

  logger.step(&format!("Loading OpenAPI document from: {}", config.input.display()));
  let document = config.load_document().await?;
  let mode = config.load_mode().await?;

  logger.step(&format!("Rendering markdown ({} mode)...", mode.name()));
  let output = MarkdownRenderer::new(&document).render(&mode)?;
  print_statistics(&logger, &output.stats);

  logger.step(&format!("Writing to: {}/", config.output.display()));
  config.write_pages(&output.pages).await?;
  for page in &output.pages {
    logger.detail(&page.file_name);
  }

  logger.success(&format!(
    "Markdown documentation generated successfully in {}/",
    config.output.display()
  ));
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ui::colors::Theme;

  fn command() -> MarkdownCommand {
    MarkdownCommand {
      input: PathBuf::from("openapi.yaml"),
      output: PathBuf::from("spec"),
      manifest: None,
      nav: None,
      roots: None,
      verbose: false,
      quiet: true,
    }
  }

  #[test]
  fn test_mode_precedence() {
    let mut command = command();
    command.roots = Some(vec!["Directory".to_string()]);
    command.manifest = Some(PathBuf::from("schema-manifest.json"));
    command.nav = Some(PathBuf::from("schema-nav.yml"));
    let config = MarkdownConfig::from_command(command.clone()).unwrap();
    assert_eq!(config.mode, ModeSource::Nav(PathBuf::from("schema-nav.yml")));

    command.nav = None;
    let config = MarkdownConfig::from_command(command.clone()).unwrap();
    assert_eq!(config.mode, ModeSource::Manifest(PathBuf::from("schema-manifest.json")));

    command.manifest = None;
    let config = MarkdownConfig::from_command(command).unwrap();
    assert_eq!(config.mode, ModeSource::Roots(vec!["Directory".to_string()]));
  }

  #[test]
  fn test_roots_required_without_other_modes() {
    let mut command = command();
    command.roots = Some(vec![" ".to_string(), String::new()]);
    let err = MarkdownConfig::from_command(command).unwrap_err();
    assert_eq!(
      err.to_string(),
      "--roots is required when --manifest and --nav are not set"
    );
  }

  #[test]
  fn test_roots_are_trimmed() {
    let mut command = command();
    command.roots = Some(vec![" Directory ".to_string(), "Contact".to_string()]);
    let config = MarkdownConfig::from_command(command).unwrap();
    assert_eq!(
      config.mode,
      ModeSource::Roots(vec!["Directory".to_string(), "Contact".to_string()])
    );
  }

  #[tokio::test]
  async fn test_renders_nav_pages_from_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let openapi = dir.path().join("openapi.yaml");
    tokio::fs::write(
      &openapi,
      "openapi: 3.0.3\ninfo:\n  title: T\n  version: '1'\ncomponents:\n  schemas:\n    Email:\n      type: string\n      pattern: ^x$\n",
    )
    .await
    .unwrap();
    let nav = dir.path().join("nav.yml");
    tokio::fs::write(&nav, "pages:\n  - title: Contact Types\n    schemas: [Email]\n")
      .await
      .unwrap();

    let mut command = command();
    command.input = openapi;
    command.output = dir.path().join("docs");
    command.nav = Some(nav);
    let config = MarkdownConfig::from_command(command).unwrap();
    generate_markdown(config, &Colors::new(false, Theme::Dark)).await.unwrap();

    let page = tokio::fs::read_to_string(dir.path().join("docs/contact-types.md")).await.unwrap();
    assert!(page.contains("- **Value**: `^x$`"));
  }

  #[tokio::test]
  async fn test_missing_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut command = command();
    command.input = dir.path().join("nope.yaml");
    command.roots = Some(vec!["A".to_string()]);
    let config = MarkdownConfig::from_command(command).unwrap();

    let err = generate_markdown(config, &Colors::new(false, Theme::Dark)).await.unwrap_err();
    assert!(err.to_string().starts_with("failed to read OpenAPI file"));
  }
}
