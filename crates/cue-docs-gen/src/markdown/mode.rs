use super::config::{Manifest, NavConfig};

/// Page layout of a markdown run.
///
/// Selection precedence when several inputs are given is nav, then manifest,
/// then explicit roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderMode {
  /// One page per nav entry, with cross-page links.
  Nav(NavConfig),
  /// One page per source file listed in the manifest.
  Manifest(Manifest),
  /// A single `schema.md` led by the given root schemas.
  Roots(Vec<String>),
}

impl RenderMode {
  pub const fn name(&self) -> &'static str {
    match self {
      Self::Nav(_) => "nav",
      Self::Manifest(_) => "manifest",
      Self::Roots(_) => "roots",
    }
  }
}
