//! Unvalidated, string-typed graph records as extracted from GraphML.

use std::collections::{HashMap, HashSet};

use super::RawAttributes;

/// A `<node>` element: its id and merged attribute values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawNode {
  pub id: String,
  pub attributes: RawAttributes,
}

/// An `<edge>` element. The id is not used for output; edge ids are positional.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawEdge {
  pub id: Option<String>,
  pub source: String,
  pub target: String,
  pub attributes: RawAttributes,
}

/// Nodes keyed by id (document order of first appearance) plus edges in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawGraph {
  nodes: Vec<RawNode>,
  index: HashMap<String, usize>,
  pub edges: Vec<RawEdge>,
}

impl RawGraph {
  pub fn new() -> Self {
    Self::default()
  }

  /// Inserts a node. A node whose id was already seen replaces the earlier
  /// record but keeps its position.
  pub fn insert_node(&mut self, node: RawNode) {
    match self.index.get(&node.id) {
      Some(&i) => self.nodes[i] = node,
      None => {
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
      }
    }
  }

  pub fn push_edge(&mut self, edge: RawEdge) {
    self.edges.push(edge);
  }

  pub fn nodes(&self) -> &[RawNode] {
    &self.nodes
  }

  /// Every node id, regardless of whether the node will pass validation.
  pub fn node_ids(&self) -> HashSet<&str> {
    self.nodes.iter().map(|n| n.id.as_str()).collect()
  }
}
