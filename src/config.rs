//! HTTP service configuration.
//!
//! Values come from command-line flags; the `GRAPHML_*` environment
//! variables override them when set.

use tracing::warn;

/// Default bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default bind port.
pub const DEFAULT_PORT: u16 = 8000;
/// Default request body limit (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub const HOST_VAR: &str = "GRAPHML_HOST";
pub const PORT_VAR: &str = "GRAPHML_PORT";
pub const MAX_UPLOAD_BYTES_VAR: &str = "GRAPHML_MAX_UPLOAD_BYTES";

/// Settings for [crate::server].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
  /// Largest accepted request body, in bytes.
  pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host: DEFAULT_HOST.to_string(),
      port: DEFAULT_PORT,
      max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
    }
  }
}

impl ServerConfig {
  /// `host:port` for binding.
  pub fn bind_addr(&self) -> String {
    format!("{}:{}", self.host, self.port)
  }

  /// Applies overrides from the process environment.
  pub fn with_env_overrides(self) -> Self {
    self.with_overrides(|key| std::env::var(key).ok())
  }

  /// Applies overrides from `lookup`. Unparsable numbers are logged and ignored.
  pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
    if let Some(host) = lookup(HOST_VAR).filter(|h| !h.is_empty()) {
      self.host = host;
    }
    if let Some(port) = lookup(PORT_VAR) {
      match port.trim().parse() {
        Ok(p) => self.port = p,
        Err(e) => warn!(var = PORT_VAR, value = %port, error = %e, "ignoring invalid port"),
      }
    }
    if let Some(limit) = lookup(MAX_UPLOAD_BYTES_VAR) {
      match limit.trim().parse() {
        Ok(n) => self.max_upload_bytes = n,
        Err(e) => {
          warn!(var = MAX_UPLOAD_BYTES_VAR, value = %limit, error = %e, "ignoring invalid upload limit")
        }
      }
    }
    self
  }
}
