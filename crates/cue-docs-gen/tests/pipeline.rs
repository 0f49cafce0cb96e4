//! Runs the built binary over the fixture schema, from CUE to OpenAPI to Markdown.

use std::{
  fs,
  path::{Path, PathBuf},
  process::{Command, Output},
};

fn fixture(name: &str) -> PathBuf {
  Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

fn run(args: &[&str]) -> Output {
  Command::new(env!("CARGO_BIN_EXE_cue-docs-gen"))
    .args(["--color", "never"])
    .args(args)
    .output()
    .unwrap()
}

fn generate_openapi(dir: &Path) -> PathBuf {
  let output = dir.join("openapi.yaml");
  let result = run(&[
    "openapi",
    "-i",
    fixture("directory.cue").to_str().unwrap(),
    "-o",
    output.to_str().unwrap(),
    "--title",
    "Directory Schema",
    "--schema-version",
    "1.0.0",
    "-q",
  ]);
  assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));
  output
}

#[test]
fn test_openapi_then_roots_page() {
  let temp_dir = tempfile::tempdir().unwrap();
  let openapi = generate_openapi(temp_dir.path());

  let yaml = fs::read_to_string(&openapi).unwrap();
  assert!(yaml.starts_with("openapi: 3.0.3"));
  assert!(yaml.contains("title: Directory Schema"));
  assert!(yaml.contains("#/components/schemas/Contact"));

  let docs = temp_dir.path().join("docs");
  let result = run(&[
    "markdown",
    "-i",
    openapi.to_str().unwrap(),
    "-o",
    docs.to_str().unwrap(),
    "--roots",
    "Directory",
    "-q",
  ]);
  assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));

  let page = fs::read_to_string(docs.join("schema.md")).unwrap();
  assert!(page.starts_with("# Directory Schema _(1.0.0)_\n"));
  assert!(page.contains("## #Directory\n"));
  assert!(page.contains("## Aliases\n"));
  assert!(page.ends_with("\n[URL]: #url"));
}

#[test]
fn test_manifest_mode_writes_one_page_per_source_file() {
  let temp_dir = tempfile::tempdir().unwrap();
  let openapi = generate_openapi(temp_dir.path());
  let docs = temp_dir.path().join("docs");

  let result = run(&[
    "markdown",
    "-i",
    openapi.to_str().unwrap(),
    "-o",
    docs.to_str().unwrap(),
    "--manifest",
    fixture("schema-manifest.json").to_str().unwrap(),
  ]);
  assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));

  assert!(docs.join("directory.md").exists());
  assert!(docs.join("aliases.md").exists());
  assert!(!docs.join("legacy.md").exists());
  assert!(!docs.join("empty.md").exists());

  let stdout = String::from_utf8_lossy(&result.stdout);
  assert!(stdout.contains("Markdown documentation generated successfully"));
}

#[test]
fn test_nav_mode_uses_page_filenames() {
  let temp_dir = tempfile::tempdir().unwrap();
  let openapi = generate_openapi(temp_dir.path());
  let docs = temp_dir.path().join("docs");

  let result = run(&[
    "markdown",
    "-i",
    openapi.to_str().unwrap(),
    "-o",
    docs.to_str().unwrap(),
    "--nav",
    fixture("schema-nav.yml").to_str().unwrap(),
    "-q",
  ]);
  assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));

  assert!(docs.join("people--contacts.md").exists());
  assert!(docs.join("directory-index.md").exists());
}

#[test]
fn test_markdown_without_mode_fails() {
  let temp_dir = tempfile::tempdir().unwrap();
  let openapi = generate_openapi(temp_dir.path());

  let result = run(&[
    "markdown",
    "-i",
    openapi.to_str().unwrap(),
    "-o",
    temp_dir.path().join("docs").to_str().unwrap(),
  ]);

  assert!(!result.status.success());
  let stderr = String::from_utf8_lossy(&result.stderr);
  assert!(stderr.contains("--roots is required when --manifest and --nav are not set"));
}

#[test]
fn test_openapi_reports_parse_errors() {
  let temp_dir = tempfile::tempdir().unwrap();
  let input = temp_dir.path().join("broken.cue");
  fs::write(&input, "#Broken: {\n  name: string\n").unwrap();

  let result = run(&[
    "openapi",
    "-i",
    input.to_str().unwrap(),
    "-o",
    temp_dir.path().join("openapi.yaml").to_str().unwrap(),
  ]);

  assert!(!result.status.success());
  assert!(String::from_utf8_lossy(&result.stderr).contains("failed to parse CUE schema"));
  assert!(!temp_dir.path().join("openapi.yaml").exists());
}
