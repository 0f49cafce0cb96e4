use std::{ffi::OsStr, path::Path};

use anyhow::Context;
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use oas3::OpenApiV3Spec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
  #[default]
  Json,
  Yaml,
  Cue,
}

impl SpecFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Self {
    match ext {
      "yaml" | "yml" => Self::Yaml,
      "cue" => Self::Cue,
      _ => Self::Json,
    }
  }

  #[must_use]
  pub fn from_path(path: &Path) -> Self {
    path
      .extension()
      .and_then(OsStr::to_str)
      .map_or(Self::default(), Self::from_extension)
  }
}

/// Memory-mapped input document: a CUE schema or an OpenAPI file.
pub struct SpecLoader {
  file: AsyncMmapFile,
  format: SpecFormat,
}

impl SpecLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let format = SpecFormat::from_path(path);
    let file = AsyncMmapFile::open(path)
      .await
      .with_context(|| format!("failed to read {}", path.display()))?;

    Ok(Self { file, format })
  }

  pub const fn format(&self) -> SpecFormat {
    self.format
  }

  fn text(&self) -> anyhow::Result<&str> {
    std::str::from_utf8(self.file.as_slice()).context("input is not valid UTF-8")
  }

  /// Parses the file as an OpenAPI document.
  pub fn parse(&self) -> anyhow::Result<oas3::Spec> {
    match self.format {
      SpecFormat::Json => Ok(serde_json::from_slice::<OpenApiV3Spec>(self.file.as_slice())?),
      SpecFormat::Yaml => Ok(oas3::from_yaml(self.text()?)?),
      SpecFormat::Cue => anyhow::bail!("expected an OpenAPI YAML or JSON document, found a CUE file"),
    }
  }

  pub fn parse_cue(&self) -> anyhow::Result<cue_syntax::File> {
    Ok(cue_syntax::parse_file(self.text()?)?)
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;

  #[test]
  fn test_format_from_extension() {
    assert_eq!(SpecFormat::from_extension("yml"), SpecFormat::Yaml);
    assert_eq!(SpecFormat::from_extension("cue"), SpecFormat::Cue);
    assert_eq!(SpecFormat::from_extension("json"), SpecFormat::Json);
    assert_eq!(SpecFormat::from_path(Path::new("spec/schema")), SpecFormat::Json);
  }

  #[tokio::test]
  async fn test_loads_yaml_document() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(
      file,
      "openapi: 3.0.3\ninfo:\n  title: Test\n  version: 1.0.0\ncomponents:\n  schemas:\n    Email:\n      type: string\n"
    )
    .unwrap();

    let loader = SpecLoader::open(file.path()).await.unwrap();
    assert_eq!(loader.format(), SpecFormat::Yaml);
    let spec = loader.parse().unwrap();
    assert_eq!(spec.info.title, "Test");
    assert!(spec.components.unwrap().schemas.contains_key("Email"));
  }

  #[tokio::test]
  async fn test_cue_file_is_not_an_openapi_document() {
    let mut file = tempfile::Builder::new().suffix(".cue").tempfile().unwrap();
    write!(file, "#Email: string\n").unwrap();

    let loader = SpecLoader::open(file.path()).await.unwrap();
    assert!(loader.parse().is_err());
    assert_eq!(loader.parse_cue().unwrap().fields().count(), 1);
  }

  #[tokio::test]
  async fn test_missing_file_names_path() {
    let Err(err) = SpecLoader::open(Path::new("does/not/exist.yaml")).await else {
      panic!("expected error");
    };
    assert!(err.to_string().contains("does/not/exist.yaml"));
  }
}
