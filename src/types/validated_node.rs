//! A node that passed schema validation.

use serde::Serialize;

use super::NodeType;

/// A node that passed schema validation. Optional fields serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedNode {
  pub id: String,
  pub label: String,
  #[serde(rename = "type")]
  pub node_type: NodeType,
  pub env: Option<String>,
  pub domain: Option<String>,
  pub tags: Vec<String>,
  pub tier: Option<String>,
  pub x: Option<f64>,
  pub y: Option<f64>,
}
