use std::path::PathBuf;

use anyhow::Context;

use super::UNKNOWN_VERSION;
use crate::{
  converter::{ConversionOutput, ConversionStats, SchemaTreeBuilder},
  openapi::OpenApiDocument,
  ui::{Colors, Logger, OpenapiCommand},
  utils::spec::SpecLoader,
};

#[derive(Debug, Clone)]
pub struct OpenApiConfig {
  pub input: PathBuf,
  pub output: PathBuf,
  pub title: String,
  pub schema_version: Option<String>,
  pub version_file: Option<PathBuf>,
  pub verbose: bool,
  pub quiet: bool,
}

impl OpenApiConfig {
  pub fn from_command(command: OpenapiCommand) -> Self {
    let OpenapiCommand {
      input,
      output,
      title,
      schema_version,
      version_file,
      verbose,
      quiet,
    } = command;

    Self {
      input,
      output,
      title,
      schema_version: schema_version.filter(|version| !version.trim().is_empty()),
      version_file,
      verbose,
      quiet,
    }
  }

  /// `--schema-version`, else the trimmed version file, else [`UNKNOWN_VERSION`].
  pub async fn resolve_version(&self) -> String {
    if let Some(version) = &self.schema_version {
      return version.trim().to_string();
    }

    if let Some(path) = &self.version_file
      && let Ok(contents) = tokio::fs::read_to_string(path).await
    {
      let version = contents.trim();
      if !version.is_empty() {
        return version.to_string();
      }
    }

    UNKNOWN_VERSION.to_string()
  }

  async fn convert(&self) -> anyhow::Result<ConversionOutput> {
    let loader = SpecLoader::open(&self.input).await?;
    let file = loader
      .parse_cue()
      .with_context(|| format!("failed to parse CUE schema {}", self.input.display()))?;
    let version = self.resolve_version().await;
    Ok(SchemaTreeBuilder::new(self.title.clone(), version).build(&file))
  }

  async fn write_output(&self, contents: String) -> anyhow::Result<()> {
    if let Some(parent) = self.output.parent()
      && !parent.as_os_str().is_empty()
    {
      tokio::fs::create_dir_all(parent)
        .await
        .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    tokio::fs::write(&self.output, contents)
      .await
      .with_context(|| format!("failed to write {}", self.output.display()))
  }
}

fn print_statistics(logger: &Logger<'_>, stats: &ConversionStats) {
  logger.stat("Definitions converted:", stats.definitions_converted.to_string());
  logger.stat("", format!("{} objects", stats.objects_converted));
  logger.stat("", format!("{} aliases", stats.aliases_converted));
  logger.stat("Properties converted:", stats.properties_converted.to_string());
  logger.stat("Patterns extracted:", stats.patterns_extracted.to_string());
  if stats.fallbacks > 0 {
    logger.stat("Untyped fallbacks:", stats.fallbacks.to_string());
  }
  logger.warnings(&stats.warnings);
}

pub async fn generate_openapi(config: OpenApiConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = Logger::new(colors, config.verbose, config.quiet);

  logger.step(&format!("Loading CUE schema from: {}", config.input.display()));
  let output = config.convert().await?;
  logger.detail(&format!(
    "Document: {} ({})",
    output.document.title, output.document.version
  ));

  logger.step("Generating OpenAPI schema...");
  print_statistics(&logger, &output.stats);
  let contents = OpenApiDocument::from(&output.document).render_for(&config.output)?;

  logger.step(&format!("Writing to: {}", config.output.display()));
  config.write_output(contents).await?;

  logger.success(&format!(
    "OpenAPI schema generated successfully at {}",
    config.output.display()
  ));
  Ok(())
}
