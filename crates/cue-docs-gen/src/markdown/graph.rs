use std::collections::{BTreeMap, BTreeSet};

use crate::schema::SchemaDocument;

/// Reference graph between the schemas of a document.
#[derive(Debug, Default)]
pub struct SchemaGraph {
  /// schema name -> names it references
  dependencies: BTreeMap<String, BTreeSet<String>>,
}

impl SchemaGraph {
  pub fn new(document: &SchemaDocument) -> Self {
    let dependencies = document
      .schemas
      .iter()
      .map(|(name, schema)| {
        let deps = schema.referenced_names().into_iter().map(str::to_string).collect();
        (name.clone(), deps)
      })
      .collect();
    Self { dependencies }
  }

  pub fn dependencies(&self, name: &str) -> Option<&BTreeSet<String>> {
    self.dependencies.get(name)
  }

  /// Referenced names with no schema of their own.
  pub fn dangling_references(&self) -> BTreeSet<&str> {
    self
      .dependencies
      .values()
      .flatten()
      .filter(|dep| !self.dependencies.contains_key(*dep))
      .map(String::as_str)
      .collect()
  }

  /// Detect cycles in the reference graph using DFS
  pub fn detect_cycles(&self) -> Vec<Vec<String>> {
    let mut visited = BTreeSet::new();
    let mut rec_stack = BTreeSet::new();
    let mut cycles = Vec::new();
    let mut path = Vec::new();

    for name in self.dependencies.keys() {
      if !visited.contains(name) {
        self.dfs_detect_cycle(name, &mut visited, &mut rec_stack, &mut path, &mut cycles);
      }
    }

    cycles
  }

  fn dfs_detect_cycle(
    &self,
    node: &str,
    visited: &mut BTreeSet<String>,
    rec_stack: &mut BTreeSet<String>,
    path: &mut Vec<String>,
    cycles: &mut Vec<Vec<String>>,
  ) {
    visited.insert(node.to_string());
    rec_stack.insert(node.to_string());
    path.push(node.to_string());

    if let Some(deps) = self.dependencies.get(node) {
      for dep in deps {
        if !visited.contains(dep) {
          self.dfs_detect_cycle(dep, visited, rec_stack, path, cycles);
        } else if rec_stack.contains(dep)
          && let Some(cycle_start) = path.iter().position(|n| n == dep)
        {
          cycles.push(path[cycle_start..].to_vec());
        }
      }
    }

    path.pop();
    rec_stack.remove(node);
  }
}
