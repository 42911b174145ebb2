//! Graph records at each stage of the conversion: raw (string-typed, as
//! extracted from GraphML) and validated (typed, defaulted, ready for JSON).

use std::collections::HashMap;

mod criticality;
mod edge_kind;
mod node_type;
mod raw_graph;
mod validated_edge;
mod validated_graph;
mod validated_node;

pub use criticality::Criticality;
pub use edge_kind::EdgeKind;
pub use node_type::NodeType;
pub use raw_graph::{RawEdge, RawGraph, RawNode};
pub use validated_edge::{DEFAULT_WEIGHT, ValidatedEdge};
pub use validated_graph::ValidatedGraph;
pub use validated_node::ValidatedNode;

/// Attribute name to value, both as written in the document.
pub type RawAttributes = HashMap<String, String>;
