//! # graphml-json
//!
//! Converts an uploaded GraphML document into a validated JSON graph of
//! services and their dependencies, or a precise rejection reason.
//!
//! ## Pipeline
//!
//! bytes → [xml_tree::validate_xml] → [graphml_extractor::extract] →
//! [schema_validator::validate] → [types::ValidatedGraph]
//!
//! Each stage fails fast with a [ConvertError]. [convert::convert] runs the
//! whole pipeline; [server] exposes it over HTTP.

pub mod config;
pub mod convert;
#[cfg(test)]
mod convert_test;
pub mod error;
pub mod graphml_extractor;
pub mod schema_validator;
pub mod server;
pub mod types;
pub mod xml_tree;

pub use config::ServerConfig;
pub use convert::{check_upload, convert, convert_to_json};
pub use error::{ConvertError, UploadError, ValidationError};
pub use types::{ValidatedEdge, ValidatedGraph, ValidatedNode};
