//! Tests for the conversion pipeline.

use crate::convert::{check_upload, convert, convert_to_json, has_graphml_extension};
use crate::error::{ConvertError, UploadError, ValidationError};

const VALID: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
  <graph id="G" edgedefault="directed">
    <node id="n1" label="Service A" type="service" env="prod"/>
    <node id="n2" label="Database" type="db" env="prod"/>
    <node id="n3" label="Cache" type="cache" env="prod"/>

    <edge id="e1" source="n1" target="n2" label="Query" kind="sync" criticality="high" weight="1.0"/>
    <edge id="e2" source="n1" target="n3" label="Get Cache" kind="async" criticality="medium" weight="0.5"/>
  </graph>
</graphml>"#;

#[test]
fn converts_valid_document() {
  let g = convert(VALID).unwrap();
  assert_eq!(g.nodes.len(), 3);
  assert_eq!(g.edges.len(), 2);
  assert_eq!(g.edges[1].weight, 0.5);
  assert_eq!(g.nodes[0].env.as_deref(), Some("prod"));
}

#[test]
fn json_output_is_idempotent() {
  let first = convert_to_json(VALID, false).unwrap();
  let second = convert_to_json(VALID, false).unwrap();
  assert_eq!(first, second);
  let pretty = convert_to_json(VALID, true).unwrap();
  assert_eq!(
    serde_json::from_str::<serde_json::Value>(&first).unwrap(),
    serde_json::from_str::<serde_json::Value>(&pretty).unwrap()
  );
}

#[test]
fn json_shape() {
  let json: serde_json::Value = serde_json::from_str(&convert_to_json(VALID, false).unwrap()).unwrap();
  let node = &json["nodes"][0];
  assert_eq!(node["id"], "n1");
  assert_eq!(node["type"], "service");
  assert!(node["tags"].as_array().unwrap().is_empty());
  assert!(node["x"].is_null());
  let edge = &json["edges"][0];
  assert_eq!(edge["id"], "e1");
  assert_eq!(edge["kind"], "sync");
  assert_eq!(edge["criticality"], "high");
  assert_eq!(edge["weight"], 1.0);
}

#[test]
fn broken_xml_fails_before_extraction() {
  let broken = br#"<?xml version="1.0"?>
<graphml>
  <graph>
    <node id="n1" label="Test"
  </graph>
</graphml>"#;
  let err = convert(broken).unwrap_err();
  assert_eq!(err.kind(), "malformed_xml");
  assert!(err.to_string().starts_with("Invalid XML: "));
}

#[test]
fn latin1_document_converts() {
  let xml = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\
<graphml><graph><node id=\"n1\" label=\"Caf\xE9\" type=\"service\"/></graph></graphml>";
  let g = convert(xml).unwrap();
  assert_eq!(g.nodes[0].label, "Caf\u{e9}");
}

#[test]
fn deeply_nested_document_is_malformed() {
  let depth = 100_000;
  let xml = format!(
    r#"<graphml><graph><node id="n1" label="A" type="service"/>{}{}</graph></graphml>"#,
    "<x>".repeat(depth),
    "</x>".repeat(depth)
  );
  let err = convert(xml.as_bytes()).unwrap_err();
  assert_eq!(err.kind(), "malformed_xml");
  assert!(err.to_string().contains("nested too deeply"), "{}", err);
}

#[test]
fn missing_graph_is_extraction_failure() {
  let err = convert(b"<graphml/>").unwrap_err();
  assert_eq!(err.kind(), "extraction_failure");
}

#[test]
fn missing_edge_criticality_is_validation_failure() {
  let xml = br#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns"><graph>
    <node id="n1" label="Service A" type="service"/>
    <node id="n2" label="Database" type="db"/>
    <edge id="e1" source="n1" target="n2" label="Query" kind="sync"/>
  </graph></graphml>"#;
  let err = convert(xml).unwrap_err();
  assert_eq!(
    err,
    ConvertError::Validation(ValidationError::MissingEdgeField {
      from: "n1".to_string(),
      to: "n2".to_string(),
      field: "criticality",
    })
  );
  assert_eq!(err.kind(), "validation_failure");
}

#[test]
fn edge_to_node_that_later_fails_reports_node_error() {
  let xml = br#"<graphml><graph>
    <node id="a" label="A" type="service"/>
    <node id="b" label="B" type="mainframe"/>
    <edge id="e1" source="a" target="b" label="x" kind="sync" criticality="low"/>
  </graph></graphml>"#;
  let err = convert(xml).unwrap_err();
  assert!(err.to_string().contains("invalid type 'mainframe'"), "{}", err);
}

#[test]
fn skipped_elements_do_not_error() {
  let xml = br#"<graphml><graph>
    <node id="a" label="A" type="service"/>
    <node label="orphan"/>
    <edge source="a" target="a" label="no id" kind="sync" criticality="low"/>
    <edge id="e9" source="a" label="no target"/>
  </graph></graphml>"#;
  let g = convert(xml).unwrap();
  assert_eq!(g.nodes.len(), 1);
  assert!(g.edges.is_empty());
}

#[test]
fn data_children_document() {
  let xml = br#"<?xml version="1.0"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
  <key id="label" for="all" attr.name="label" attr.type="string"/>
  <graph edgedefault="directed">
    <node id="api"><data key="label">API</data><data key="type">service</data><data key="tags">critical, api</data></node>
    <node id="q"><data key="label">Jobs</data><data key="type">queue</data><data key="x">12</data><data key="y">oops</data></node>
    <edge id="x" source="api" target="q"><data key="label">enqueue</data><data key="kind">async</data><data key="criticality">low</data><data key="weight">abc</data></edge>
  </graph>
</graphml>"#;
  let g = convert(xml).unwrap();
  assert_eq!(g.nodes[0].tags, ["critical", "api"]);
  assert_eq!(g.nodes[1].x, Some(12.0));
  assert_eq!(g.nodes[1].y, None);
  assert_eq!(g.edges[0].id, "e1");
  assert_eq!(g.edges[0].weight, 1.0);
}

#[test]
fn upload_checks() {
  assert_eq!(check_upload("graph.graphml", b"<a/>"), Ok(()));
  assert_eq!(check_upload("GRAPH.GraphML", b"<a/>"), Ok(()));
  assert_eq!(check_upload("test.txt", b"<a/>"), Err(UploadError::BadExtension));
  assert_eq!(check_upload("test.graphml", b""), Err(UploadError::Empty));
  assert_eq!(check_upload("", b""), Err(UploadError::BadExtension));
}

#[test]
fn extension_matching() {
  assert!(has_graphml_extension(".graphml"));
  assert!(!has_graphml_extension("graphml"));
  assert!(!has_graphml_extension("a.graphml.bak"));
  assert!(!has_graphml_extension("ä"));
}
