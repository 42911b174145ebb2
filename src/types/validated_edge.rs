//! An edge that passed schema validation.

use serde::Serialize;

use super::{Criticality, EdgeKind};

/// Weight used when the document gives none or an unparsable one.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// An edge that passed schema validation. `id` is `e<n>` for the n-th edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedEdge {
  pub id: String,
  pub source: String,
  pub target: String,
  pub label: String,
  pub kind: EdgeKind,
  pub criticality: Criticality,
  pub protocol: Option<String>,
  pub weight: f64,
  pub env: Option<String>,
  pub tags: Vec<String>,
}

impl ValidatedEdge {
  /// Output id for the edge at 1-based `position`.
  pub fn positional_id(position: usize) -> String {
    format!("e{}", position)
  }
}
