//! Schema enforcement: raw records to typed, defaulted node and edge records.
//!
//! Fails fast. Every node id is collected before any node is checked, then
//! nodes are validated in order, then edges in order; the first violation
//! anywhere aborts the whole conversion.

use crate::error::ValidationError;
use crate::types::{
  Criticality, DEFAULT_WEIGHT, EdgeKind, NodeType, RawAttributes, RawEdge, RawGraph, RawNode,
  ValidatedEdge, ValidatedGraph, ValidatedNode,
};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Validates and normalizes every node and edge of `raw`.
#[instrument(level = "trace", skip(raw), fields(nodes = raw.nodes().len(), edges = raw.edges.len()))]
pub fn validate(raw: &RawGraph) -> Result<ValidatedGraph, ValidationError> {
  let node_ids = raw.node_ids();

  let nodes = raw
    .nodes()
    .iter()
    .map(validate_node)
    .collect::<Result<Vec<_>, _>>()?;

  let edges = raw
    .edges
    .iter()
    .enumerate()
    .map(|(i, edge)| validate_edge(i + 1, edge, &node_ids))
    .collect::<Result<Vec<_>, _>>()?;

  debug!(nodes = nodes.len(), edges = edges.len(), "graph validated");
  Ok(ValidatedGraph { nodes, edges })
}

/// Checks `label` and `type`, then normalizes the optional fields.
pub(crate) fn validate_node(raw: &RawNode) -> Result<ValidatedNode, ValidationError> {
  let attrs = &raw.attributes;
  let missing = |field| ValidationError::MissingNodeField {
    node: raw.id.clone(),
    field,
  };

  let label = required(attrs, "label").ok_or_else(|| missing("label"))?;
  let type_value = required(attrs, "type").ok_or_else(|| missing("type"))?;
  let node_type =
    NodeType::parse(type_value).ok_or_else(|| ValidationError::InvalidNodeValue {
      node: raw.id.clone(),
      field: "type",
      value: type_value.to_string(),
      allowed: NodeType::allowed(),
    })?;

  Ok(ValidatedNode {
    id: raw.id.clone(),
    label: label.to_string(),
    node_type,
    env: attrs.get("env").cloned(),
    domain: attrs.get("domain").cloned(),
    tags: parse_tags(attrs.get("tags").map(String::as_str)),
    tier: attrs.get("tier").cloned(),
    x: parse_float(attrs.get("x").map(String::as_str)),
    y: parse_float(attrs.get("y").map(String::as_str)),
  })
}

/// Checks endpoints against `node_ids`, then the required and enumerated fields.
/// `position` is 1-based and becomes the output id.
pub(crate) fn validate_edge(
  position: usize,
  raw: &RawEdge,
  node_ids: &HashSet<&str>,
) -> Result<ValidatedEdge, ValidationError> {
  if !node_ids.contains(raw.source.as_str()) || !node_ids.contains(raw.target.as_str()) {
    return Err(ValidationError::DanglingEdge {
      from: raw.source.clone(),
      to: raw.target.clone(),
    });
  }

  let attrs = &raw.attributes;
  let missing = |field| ValidationError::MissingEdgeField {
    from: raw.source.clone(),
    to: raw.target.clone(),
    field,
  };
  let invalid = |field, value: &str, allowed| ValidationError::InvalidEdgeValue {
    from: raw.source.clone(),
    to: raw.target.clone(),
    field,
    value: value.to_string(),
    allowed,
  };

  let label = required(attrs, "label").ok_or_else(|| missing("label"))?;
  let kind_value = required(attrs, "kind").ok_or_else(|| missing("kind"))?;
  let criticality_value = required(attrs, "criticality").ok_or_else(|| missing("criticality"))?;

  let kind =
    EdgeKind::parse(kind_value).ok_or_else(|| invalid("kind", kind_value, EdgeKind::allowed()))?;
  let criticality = Criticality::parse(criticality_value)
    .ok_or_else(|| invalid("criticality", criticality_value, Criticality::allowed()))?;

  Ok(ValidatedEdge {
    id: ValidatedEdge::positional_id(position),
    source: raw.source.clone(),
    target: raw.target.clone(),
    label: label.to_string(),
    kind,
    criticality,
    protocol: attrs.get("protocol").cloned(),
    weight: parse_weight(attrs.get("weight").map(String::as_str)),
    env: attrs.get("env").cloned(),
    tags: parse_tags(attrs.get("tags").map(String::as_str)),
  })
}

/// Non-empty value of `field`, if any.
fn required<'a>(attrs: &'a RawAttributes, field: &str) -> Option<&'a str> {
  attrs
    .get(field)
    .map(String::as_str)
    .filter(|v| !v.is_empty())
}

/// Splits on commas, trims each tag and drops empty ones.
pub fn parse_tags(value: Option<&str>) -> Vec<String> {
  value
    .unwrap_or_default()
    .split(',')
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .map(str::to_string)
    .collect()
}

/// Best-effort float: surrounding whitespace is ignored; unparsable or
/// non-finite input yields `None`.
pub fn parse_float(value: Option<&str>) -> Option<f64> {
  value
    .and_then(|v| v.trim().parse::<f64>().ok())
    .filter(|f| f.is_finite())
}

/// Edge weight, [DEFAULT_WEIGHT] when absent or unparsable.
pub fn parse_weight(value: Option<&str>) -> f64 {
  parse_float(value).unwrap_or(DEFAULT_WEIGHT)
}
