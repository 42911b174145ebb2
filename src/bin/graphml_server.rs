//! HTTP service: converts uploaded GraphML files to validated JSON.
//!
//! Usage: `graphml_server [--host HOST] [--port PORT] [--max-upload-bytes N]`
//!
//! Set RUST_LOG=graphml_json=trace for span enter/exit of each pipeline stage.

use clap::Parser;
use graphml_json::ServerConfig;
use graphml_json::config::{DEFAULT_HOST, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PORT};
use std::process;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

/// Serve the GraphML to JSON conversion API.
#[derive(Parser, Debug)]
#[command(name = "graphml_server", version)]
#[command(
  after_help = r#"Environment variables (override the flags when set):
  GRAPHML_HOST               Bind host
  GRAPHML_PORT               Bind port
  GRAPHML_MAX_UPLOAD_BYTES   Largest accepted request body in bytes"#
)]
struct Args {
  /// Bind host.
  #[arg(long, default_value = DEFAULT_HOST)]
  host: String,

  /// Bind port.
  #[arg(long, default_value_t = DEFAULT_PORT)]
  port: u16,

  /// Largest accepted request body in bytes.
  #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
  max_upload_bytes: usize,
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_span_events(FmtSpan::CLOSE)
    .init();

  let args = Args::parse();
  let config = ServerConfig {
    host: args.host,
    port: args.port,
    max_upload_bytes: args.max_upload_bytes,
  }
  .with_env_overrides();

  info!(?config, "graphml_server starting");

  if let Err(e) = graphml_json::server::serve(config).await {
    error!(error = %e, "server failed");
    eprintln!("Error: {}", e);
    process::exit(1);
  }
}
