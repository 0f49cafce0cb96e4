//! CUE definitions to schema fragments.

mod builder;
mod classifier;
mod metrics;

pub use builder::{ConversionOutput, SchemaTreeBuilder};
pub use classifier::ExprClassifier;
pub use metrics::{ConversionStats, ConversionWarning};

/// Format and pattern assigned to `time.Format(...)` values.
pub const DATE_FORMAT: &str = "date";
pub const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";

#[cfg(test)]
mod tests;
