pub mod list;
pub mod markdown;
pub mod openapi;

pub use list::list_schemas;
pub use markdown::{MarkdownConfig, generate_markdown};
pub use openapi::{OpenApiConfig, generate_openapi};

/// Written when neither `--schema-version` nor a usable version file is given.
pub const UNKNOWN_VERSION: &str = "unknown version";
