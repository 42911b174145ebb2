//! The conversion pipeline: XML check, GraphML extraction, schema validation.
//!
//! Each stage only reads the output of the one before it. The extractor
//! re-parses the bytes rather than reusing the validator's tree.

use crate::error::{ConvertError, UploadError};
use crate::graphml_extractor;
use crate::schema_validator;
use crate::types::ValidatedGraph;
use crate::xml_tree;
use tracing::{debug, instrument};

/// File extension accepted for uploads, compared case-insensitively.
pub const GRAPHML_EXTENSION: &str = ".graphml";

/// Converts a GraphML document into a validated graph.
#[instrument(level = "trace", skip(bytes), fields(len = bytes.len()))]
pub fn convert(bytes: &[u8]) -> Result<ValidatedGraph, ConvertError> {
  xml_tree::validate_xml(bytes)?;
  let raw = graphml_extractor::extract(bytes)?;
  let graph = schema_validator::validate(&raw)?;
  debug!(
    nodes = graph.nodes.len(),
    edges = graph.edges.len(),
    "graphml converted"
  );
  Ok(graph)
}

/// Converts a GraphML document and renders the result as JSON.
pub fn convert_to_json(bytes: &[u8], pretty: bool) -> Result<String, ConvertError> {
  let graph = convert(bytes)?;
  render_json(&graph, pretty).map_err(|e| ConvertError::Render(e.to_string()))
}

/// Renders a validated graph as JSON. Output is deterministic for a given graph.
pub fn render_json(graph: &ValidatedGraph, pretty: bool) -> serde_json::Result<String> {
  if pretty {
    serde_json::to_string_pretty(graph)
  } else {
    serde_json::to_string(graph)
  }
}

/// Checks made on an upload before conversion: name ends in `.graphml`
/// (any case) and the body is not empty.
pub fn check_upload(filename: &str, bytes: &[u8]) -> Result<(), UploadError> {
  if !has_graphml_extension(filename) {
    return Err(UploadError::BadExtension);
  }
  if bytes.is_empty() {
    return Err(UploadError::Empty);
  }
  Ok(())
}

pub fn has_graphml_extension(filename: &str) -> bool {
  filename.len() >= GRAPHML_EXTENSION.len()
    && filename
      .get(filename.len() - GRAPHML_EXTENSION.len()..)
      .is_some_and(|ext| ext.eq_ignore_ascii_case(GRAPHML_EXTENSION))
}
