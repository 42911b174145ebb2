//! Integration tests for the graphml_to_json CLI.
//!
//! Runs the built binary against the fixtures in tests/fixtures/ and against
//! temporary files.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
  Path::new(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

fn run(args: &[&str]) -> Output {
  Command::new(env!("CARGO_BIN_EXE_graphml_to_json"))
    .args(args)
    .output()
    .expect("run graphml_to_json")
}

fn run_on(path: &Path) -> Output {
  run(&[path.to_str().expect("path")])
}

fn stdout_json(out: &Output) -> serde_json::Value {
  serde_json::from_slice(&out.stdout).expect("stdout is json")
}

fn write_temp(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> PathBuf {
  let path = dir.path().join(name);
  std::fs::write(&path, content).expect("write fixture");
  path
}

#[test]
fn converts_services_fixture() {
  let out = run_on(&fixture("services.graphml"));
  assert!(
    out.status.success(),
    "stderr={}",
    String::from_utf8_lossy(&out.stderr)
  );
  let json = stdout_json(&out);
  let nodes = json["nodes"].as_array().unwrap();
  let edges = json["edges"].as_array().unwrap();
  assert_eq!(nodes.len(), 5);
  assert_eq!(edges.len(), 5);

  assert_eq!(nodes[0]["tags"], serde_json::json!(["public", "critical"]));
  assert_eq!(nodes[0]["x"], 0.0);
  assert_eq!(nodes[1]["domain"], "commerce");
  assert!(nodes[1]["env"].is_null());

  let ids: Vec<&str> = edges.iter().map(|e| e["id"].as_str().unwrap()).collect();
  assert_eq!(ids, ["e1", "e2", "e3", "e4", "e5"]);
  assert_eq!(edges[0]["protocol"], "http");
  assert_eq!(edges[1]["weight"], 3.0);
  assert_eq!(edges[2]["kind"], "stream");
  assert_eq!(edges[2]["tags"], serde_json::json!(["events", "audit"]));
  assert_eq!(edges[3]["weight"], 1.0);
  assert_eq!(edges[4]["source"], edges[4]["target"]);
}

#[test]
fn output_is_identical_across_runs() {
  let a = run_on(&fixture("services.graphml"));
  let b = run_on(&fixture("services.graphml"));
  assert!(a.status.success());
  assert_eq!(a.stdout, b.stdout);
}

#[test]
fn pretty_output_is_same_document() {
  let path = fixture("services.graphml");
  let compact = run_on(&path);
  let pretty = run(&["--pretty", path.to_str().unwrap()]);
  assert!(pretty.status.success());
  assert!(String::from_utf8_lossy(&pretty.stdout).contains("\n  "));
  assert_eq!(stdout_json(&compact), stdout_json(&pretty));
}

#[test]
fn dangling_edge_fails_with_both_ids() {
  let out = run_on(&fixture("dangling_edge.graphml"));
  assert!(!out.status.success());
  let stderr = String::from_utf8_lossy(&out.stderr);
  assert!(stderr.contains("a->missing"), "stderr: {}", stderr);
  assert!(out.stdout.is_empty());
}

#[test]
fn broken_xml_fails() {
  let dir = tempfile::tempdir().expect("temp dir");
  let path = write_temp(&dir, "broken.graphml", b"<graphml><graph><node id=\"n1\"></graph>");
  let out = run_on(&path);
  assert!(!out.status.success());
  assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid XML"));
}

#[test]
fn wrong_extension_is_rejected() {
  let dir = tempfile::tempdir().expect("temp dir");
  let path = write_temp(&dir, "graph.xml", b"<graphml><graph/></graphml>");
  let out = run_on(&path);
  assert!(!out.status.success());
  assert!(String::from_utf8_lossy(&out.stderr).contains(".graphml extension"));
}

#[test]
fn empty_file_is_rejected() {
  let dir = tempfile::tempdir().expect("temp dir");
  let path = write_temp(&dir, "empty.graphml", b"");
  let out = run_on(&path);
  assert!(!out.status.success());
  assert!(String::from_utf8_lossy(&out.stderr).contains("Empty file"));
}

#[test]
fn missing_file_is_reported() {
  let out = run(&["/nonexistent/graph.graphml"]);
  assert!(!out.status.success());
  assert!(String::from_utf8_lossy(&out.stderr).contains("Error reading"));
}

#[test]
fn usage_without_args() {
  let out = run(&[]);
  assert!(!out.status.success());
  assert!(String::from_utf8_lossy(&out.stderr).contains("Usage"));
}

#[test]
fn empty_graph_converts_to_empty_lists() {
  let dir = tempfile::tempdir().expect("temp dir");
  let path = write_temp(&dir, "empty-graph.graphml", b"<graphml><graph/></graphml>");
  let out = run_on(&path);
  assert!(out.status.success());
  assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), r#"{"nodes":[],"edges":[]}"#);
}

#[test]
fn latin1_fixture_is_decoded() {
  let out = run_on(&fixture("latin1.graphml"));
  assert!(
    out.status.success(),
    "stderr={}",
    String::from_utf8_lossy(&out.stderr)
  );
  let json = stdout_json(&out);
  assert_eq!(json["nodes"][0]["label"], "Caf\u{e9} API");
  assert_eq!(json["nodes"][0]["domain"], "z\u{fc}rich");
  assert_eq!(json["nodes"][1]["label"], "Base de donn\u{e9}es");
  assert_eq!(json["edges"][0]["label"], "Requ\u{ea}te");
}
