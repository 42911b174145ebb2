//! CLI: convert a .graphml file to the validated JSON graph on stdout.
//!
//! Usage: `graphml_to_json [--pretty] <path-to-graphml-file>`
//!
//! Exits 1 and prints `Error: <reason>` on stderr when the file is rejected.

use clap::Parser;
use graphml_json::{check_upload, convert_to_json};
use std::fs;
use std::path::PathBuf;
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Convert a GraphML file to validated JSON.
#[derive(Parser, Debug)]
#[command(name = "graphml_to_json", version)]
struct Args {
  /// Indent the JSON output.
  #[arg(long)]
  pretty: bool,

  /// Path to the .graphml file
  #[arg(value_name = "path-to-graphml-file")]
  path: PathBuf,
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();
  let path = &args.path;
  debug!(path = %path.display(), "reading");

  let bytes = match fs::read(path) {
    Ok(b) => b,
    Err(e) => {
      eprintln!("Error reading {}: {}", path.display(), e);
      process::exit(1);
    }
  };

  let filename = path
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_default();
  if let Err(e) = check_upload(&filename, &bytes) {
    eprintln!("Error: {}", e);
    process::exit(1);
  }

  match convert_to_json(&bytes, args.pretty) {
    Ok(json) => {
      info!(path = %path.display(), "converted");
      println!("{}", json);
    }
    Err(e) => {
      eprintln!("Error: {}", e);
      process::exit(1);
    }
  }
}
