//! GraphML extraction: XML element tree to raw, string-typed node and edge records.
//!
//! Handles GraphML with or without its XML namespace, and attributes given
//! either as `<data key="...">` children or directly on the element.

use crate::error::ConvertError;
use crate::types::{RawAttributes, RawEdge, RawGraph, RawNode};
use crate::xml_tree::{self, XmlElement};
use tracing::{debug, instrument, trace};

/// The GraphML XML namespace.
pub const GRAPHML_NS: &str = "http://graphml.graphdrawing.org/xmlns";

/// Namespaces an element may be in, in lookup order.
const NAMESPACE_FALLBACK: [Option<&str>; 2] = [None, Some(GRAPHML_NS)];

/// Node attributes read directly from `<node>` when no `<data>` child supplies them.
pub const NODE_ATTRIBUTES: [&str; 8] = ["label", "type", "env", "domain", "tags", "tier", "x", "y"];

/// Edge attributes read directly from `<edge>` when no `<data>` child supplies them.
pub const EDGE_ATTRIBUTES: [&str; 7] = [
  "label",
  "kind",
  "criticality",
  "protocol",
  "env",
  "tags",
  "weight",
];

/// Parses `bytes` and extracts raw nodes and edges from the first `<graph>` element.
#[instrument(level = "trace", skip(bytes), fields(len = bytes.len()))]
pub fn extract(bytes: &[u8]) -> Result<RawGraph, ConvertError> {
  let root = xml_tree::parse_document(bytes)?;
  extract_from_tree(&root)
}

/// Extracts raw nodes and edges from an already parsed document.
pub fn extract_from_tree(root: &XmlElement) -> Result<RawGraph, ConvertError> {
  let graph = find_first(root, "graph")
    .ok_or_else(|| ConvertError::Extraction("Graph element not found".to_string()))?;

  let mut raw = RawGraph::new();
  for el in graph.descendants() {
    if matches_name(el, "node") {
      if let Some(node) = read_node(el) {
        raw.insert_node(node);
      }
    } else if matches_name(el, "edge") {
      if let Some(edge) = read_edge(el) {
        raw.push_edge(edge);
      }
    }
  }

  debug!(
    nodes = raw.nodes().len(),
    edges = raw.edges.len(),
    "extracted graphml records"
  );
  Ok(raw)
}

/// First descendant named `name`, trying each namespace of [NAMESPACE_FALLBACK] in turn.
pub(crate) fn find_first<'a>(root: &'a XmlElement, name: &str) -> Option<&'a XmlElement> {
  NAMESPACE_FALLBACK
    .iter()
    .find_map(|ns| root.descendants().find(|el| el.is(*ns, name)))
}

/// True if `el` is named `name` in any namespace of [NAMESPACE_FALLBACK].
pub(crate) fn matches_name(el: &XmlElement, name: &str) -> bool {
  NAMESPACE_FALLBACK.iter().any(|ns| el.is(*ns, name))
}

/// Builds a node record. Nodes without a non-empty `id` are skipped.
pub(crate) fn read_node(el: &XmlElement) -> Option<RawNode> {
  let Some(id) = el.attribute("id").filter(|id| !id.is_empty()) else {
    trace!("skipping <node> without id");
    return None;
  };
  Some(RawNode {
    id: id.to_string(),
    attributes: merge_attributes(el, &NODE_ATTRIBUTES),
  })
}

/// Builds an edge record. Edges missing `id`, `source` or `target` are skipped.
pub(crate) fn read_edge(el: &XmlElement) -> Option<RawEdge> {
  let required = |key: &str| el.attribute(key).filter(|v| !v.is_empty());
  let (Some(id), Some(source), Some(target)) =
    (required("id"), required("source"), required("target"))
  else {
    trace!(id = ?el.attribute("id"), "skipping <edge> without id, source or target");
    return None;
  };
  Some(RawEdge {
    id: Some(id.to_string()),
    source: source.to_string(),
    target: target.to_string(),
    attributes: merge_attributes(el, &EDGE_ATTRIBUTES),
  })
}

/// Collects `<data key="k">` children first, then fills any of `whitelist`
/// still missing from same-named element attributes. `<data>` values always win.
pub(crate) fn merge_attributes(el: &XmlElement, whitelist: &[&str]) -> RawAttributes {
  let mut attrs = RawAttributes::new();

  for data in el.children.iter().filter(|c| matches_name(c, "data")) {
    let Some(key) = data.attribute("key").filter(|k| !k.is_empty()) else {
      continue;
    };
    let value = if data.text.is_empty() {
      data.attribute("value").unwrap_or_default()
    } else {
      data.text.as_str()
    };
    if !value.is_empty() {
      attrs.insert(key.to_string(), value.to_string());
    }
  }

  for &name in whitelist {
    if attrs.contains_key(name) {
      continue;
    }
    if let Some(value) = el.attribute(name) {
      attrs.insert(name.to_string(), value.to_string());
    }
  }

  attrs
}
