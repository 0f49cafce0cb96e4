
use cue_syntax::{parse_expr, parse_file};

use super::{ConversionOutput, ConversionStats, ExprClassifier, SchemaTreeBuilder};
use crate::schema::SchemaFragment;

pub(crate) const DIRECTORY_CUE: &str = include_str!("../../../fixtures/directory.cue");
pub(crate) const CYCLE_CUE: &str = include_str!("../../../fixtures/cycle.cue");

pub(super) fn classify(source: &str) -> (SchemaFragment, ConversionStats) {
  let expr = parse_expr(source).unwrap();
  let mut stats = ConversionStats::default();
  let fragment = ExprClassifier::new(&mut stats).classify(&expr, None, "#Test");
  (fragment, stats)
}

pub(crate) fn convert(source: &str) -> ConversionOutput {
  let file = parse_file(source).unwrap();
  SchemaTreeBuilder::new("Directory Schema", "1.2.0").build(&file)
}
