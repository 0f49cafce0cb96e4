use std::collections::BTreeSet;

use super::{CYCLE_CUE, DIRECTORY_CUE, document};
use crate::markdown::SchemaGraph;

#[test]
fn test_two_schema_cycle() {
  let graph = SchemaGraph::new(&document(CYCLE_CUE));
  assert_eq!(graph.detect_cycles(), vec![vec!["A".to_string(), "B".to_string()]]);
}

#[test]
fn test_self_reference_is_a_cycle() {
  let graph = SchemaGraph::new(&document(DIRECTORY_CUE));
  assert_eq!(graph.detect_cycles(), vec![vec!["Contact".to_string()]]);

  let directory_deps = graph.dependencies("Directory").unwrap();
  assert_eq!(
    directory_deps.iter().map(String::as_str).collect::<Vec<_>>(),
    vec!["Contact", "Date"]
  );
}

#[test]
fn test_dangling_references() {
  let graph = SchemaGraph::new(&document("#A: {b: #Missing, c: [...#A]}\n"));
  assert_eq!(graph.dangling_references(), BTreeSet::from(["Missing"]));
  assert_eq!(graph.detect_cycles().len(), 1);
}
