//! Conversion failures. Every failure is terminal for the document being converted.

use thiserror::Error;

/// Why a document could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
  /// The bytes are not well-formed XML.
  #[error("Invalid XML: {0}")]
  MalformedXml(String),

  /// The XML is well-formed but not usable as GraphML.
  #[error("Invalid GraphML: {0}")]
  Extraction(String),

  #[error(transparent)]
  Validation(#[from] ValidationError),

  /// The validated graph could not be written as JSON.
  #[error("Could not render JSON: {0}")]
  Render(String),
}

impl ConvertError {
  /// Stable machine-readable tag for the failure class.
  pub fn kind(&self) -> &'static str {
    match self {
      ConvertError::MalformedXml(_) => "malformed_xml",
      ConvertError::Extraction(_) => "extraction_failure",
      ConvertError::Validation(_) => "validation_failure",
      ConvertError::Render(_) => "render_failure",
    }
  }
}

/// First schema violation found, in node-then-edge document order.
///
/// Edge endpoints are named `from`/`to` rather than `source`/`target` so the
/// derive does not mistake them for an error source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("Node '{node}' missing required field: {field}")]
  MissingNodeField { node: String, field: &'static str },

  #[error("Node '{node}' has invalid {field} '{value}'. Allowed: {allowed}")]
  InvalidNodeValue {
    node: String,
    field: &'static str,
    value: String,
    allowed: String,
  },

  #[error("Edge {from}->{to} references missing node(s)")]
  DanglingEdge { from: String, to: String },

  #[error("Edge {from}->{to} missing required field: {field}")]
  MissingEdgeField {
    from: String,
    to: String,
    field: &'static str,
  },

  #[error("Edge {from}->{to} has invalid {field} '{value}'. Allowed: {allowed}")]
  InvalidEdgeValue {
    from: String,
    to: String,
    field: &'static str,
    value: String,
    allowed: String,
  },
}

impl ValidationError {
  /// Name of the offending field, or `None` for a dangling edge.
  pub fn field(&self) -> Option<&'static str> {
    match self {
      ValidationError::MissingNodeField { field, .. }
      | ValidationError::InvalidNodeValue { field, .. }
      | ValidationError::MissingEdgeField { field, .. }
      | ValidationError::InvalidEdgeValue { field, .. } => Some(*field),
      ValidationError::DanglingEdge { .. } => None,
    }
  }
}

/// Rejections made before a document reaches the converter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
  #[error("File must have .graphml extension")]
  BadExtension,

  #[error("Empty file")]
  Empty,
}
