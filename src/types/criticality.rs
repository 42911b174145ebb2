//! Allowed values for an edge's `criticality` field.

use std::fmt;

use serde::Serialize;

/// Business impact of the dependency an edge describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Criticality {
  Low,
  Medium,
  High,
}

impl Criticality {
  pub const ALL: [Criticality; 3] = [Criticality::Low, Criticality::Medium, Criticality::High];

  pub fn as_str(self) -> &'static str {
    match self {
      Criticality::Low => "low",
      Criticality::Medium => "medium",
      Criticality::High => "high",
    }
  }

  pub fn parse(value: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|c| c.as_str() == value)
  }

  pub fn allowed() -> String {
    Self::ALL.map(Self::as_str).join(", ")
  }
}

impl fmt::Display for Criticality {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
