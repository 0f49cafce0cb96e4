mod document;
mod fragment;

pub use document::SchemaDocument;
pub use fragment::{SchemaFragment, SchemaKind};
