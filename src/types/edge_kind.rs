//! Allowed values for an edge's `kind` field.

use std::fmt;

use serde::Serialize;

/// How the source talks to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
  Sync,
  Async,
  Stream,
}

impl EdgeKind {
  pub const ALL: [EdgeKind; 3] = [EdgeKind::Sync, EdgeKind::Async, EdgeKind::Stream];

  pub fn as_str(self) -> &'static str {
    match self {
      EdgeKind::Sync => "sync",
      EdgeKind::Async => "async",
      EdgeKind::Stream => "stream",
    }
  }

  pub fn parse(value: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|k| k.as_str() == value)
  }

  pub fn allowed() -> String {
    Self::ALL.map(Self::as_str).join(", ")
  }
}

impl fmt::Display for EdgeKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
