//! Markdown reference pages from an OpenAPI schema document.

mod config;
mod graph;
mod metrics;
mod mode;
mod renderer;

pub use config::{Manifest, NavConfig, NavPage, load_manifest, load_nav, parse_manifest, parse_nav, slugify};
pub use graph::SchemaGraph;
pub use metrics::{RenderStats, RenderWarning};
pub use mode::RenderMode;
pub use renderer::{LinkedHeaders, MarkdownRenderer, RenderOutput, RenderedPage};

#[cfg(test)]
mod tests;
