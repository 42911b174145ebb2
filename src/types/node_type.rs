//! Allowed values for a node's `type` field.

use std::fmt;

use serde::Serialize;

/// Kind of component a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
  Service,
  Db,
  Cache,
  Queue,
  External,
}

impl NodeType {
  /// Every accepted value, in the order used by error messages.
  pub const ALL: [NodeType; 5] = [
    NodeType::Service,
    NodeType::Db,
    NodeType::Cache,
    NodeType::Queue,
    NodeType::External,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      NodeType::Service => "service",
      NodeType::Db => "db",
      NodeType::Cache => "cache",
      NodeType::Queue => "queue",
      NodeType::External => "external",
    }
  }

  /// Exact, case-sensitive match against [NodeType::ALL].
  pub fn parse(value: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|t| t.as_str() == value)
  }

  /// Comma-separated list of accepted values.
  pub fn allowed() -> String {
    Self::ALL.map(Self::as_str).join(", ")
  }
}

impl fmt::Display for NodeType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
