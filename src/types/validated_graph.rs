//! Final conversion output.

use serde::Serialize;

use super::{ValidatedEdge, ValidatedNode};

/// Final conversion output, serialized as `{"nodes": [...], "edges": [...]}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ValidatedGraph {
  pub nodes: Vec<ValidatedNode>,
  pub edges: Vec<ValidatedEdge>,
}
