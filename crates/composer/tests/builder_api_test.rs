//! Integration tests for the DiagramBuilder API
//!
//! These tests drive the public API the way the statement editor does:
//! parse a statement, assemble it, save the layout and assemble again.

use composer::{
    ComposerError, DiagramBuilder, NodeId, NodeKind, config::AppConfig, identifier::EntityId,
};

const STATEMENT: &str = r#"{
    "origins": [
        {"id": 1, "simple_entity": {"name": "Superior cervical ganglion", "ontology_uri": "UBERON:0001989"}},
        {"id": 2, "simple_entity": {"name": "Stellate ganglion", "ontology_uri": "UBERON:0002440"}}
    ],
    "vias": [
        {
            "id": 10,
            "order": 0,
            "type": "AXON",
            "anatomical_entities": [
                {"id": 3, "simple_entity": {"name": "Cardiac nerve", "ontology_uri": "UBERON:0011907"}}
            ],
            "from_entities": [
                {"id": 1, "simple_entity": {"name": "Superior cervical ganglion", "ontology_uri": "UBERON:0001989"}},
                {"id": 2, "simple_entity": {"name": "Stellate ganglion", "ontology_uri": "UBERON:0002440"}}
            ]
        }
    ],
    "destinations": [
        {
            "id": 20,
            "type": "AXON-T",
            "anatomical_entities": [
                {"id": 4, "simple_entity": null, "region_layer": {
                    "region": {"name": "Heart", "ontology_uri": "UBERON:0000948"},
                    "layer": {"name": "epicardium", "ontology_uri": "UBERON:0002348"}
                }}
            ],
            "from_entities": [
                {"id": 3, "simple_entity": {"name": "Cardiac nerve", "ontology_uri": "UBERON:0011907"}}
            ]
        }
    ],
    "forward_connections": [
        {"id": 99, "knowledge_statement": "heart to brainstem", "origins": [{"id": 4}]}
    ]
}"#;

#[test]
fn test_builder_api_exists() {
    let _builder = DiagramBuilder::default();
}

#[test]
fn test_parse_and_assemble_statement() {
    let builder = DiagramBuilder::new(AppConfig::default());
    let statement = builder.parse_statement(STATEMENT).expect("Failed to parse");

    let diagram = builder.assemble(
        statement.details(),
        statement.forward_connections(),
        &Default::default(),
    );

    assert_eq!(diagram.nodes().len(), 4);
    assert_eq!(diagram.links().len(), 3);
    assert!(diagram.gaps().is_empty());

    let destination = diagram
        .nodes_of_kind(NodeKind::Destination)
        .next()
        .expect("destination node");
    assert_eq!(destination.name(), "Heart(epicardium)");
    assert_eq!(destination.ontology_uri(), "UBERON:0000948, UBERON:0002348");
    assert_eq!(destination.forward_connections().len(), 1);

    let via = diagram
        .node(NodeId::via(0, EntityId::new(3)))
        .expect("via node");
    assert_eq!(via.from().len(), 2);
    assert_eq!(via.to().len(), 1);
}

#[test]
fn test_render_json_shape() {
    let builder = DiagramBuilder::default();
    let statement = builder.parse_statement(STATEMENT).expect("Failed to parse");
    let diagram = builder.assemble_with_graph(
        statement.details(),
        statement.forward_connections(),
        None,
    );

    let json = builder.render_json(&diagram).expect("Failed to render");
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["nodes"].as_array().unwrap().len(), 4);
    assert_eq!(value["links"][0]["sourcePort"], "out");
    assert_eq!(value["links"][0]["targetPort"], "in");
    assert_eq!(value["nodes"][3]["anatomicalType"], "AXON-T");
    assert_eq!(value["nodes"][3]["forward_connection"][0]["id"], 99);
}

#[test]
fn test_saved_layout_round_trip() {
    let builder = DiagramBuilder::default();
    let statement = builder.parse_statement(STATEMENT).expect("Failed to parse");
    let first = builder.assemble(
        statement.details(),
        statement.forward_connections(),
        &Default::default(),
    );

    let saved = builder.serialize_layout(&first);
    let prior = builder.parse_serialized_graph(&saved.to_string());
    let second = builder.assemble(
        statement.details(),
        statement.forward_connections(),
        &prior,
    );

    assert_eq!(first, second);
}

#[test]
fn test_largest_via_order_assembles() {
    let source = r#"{
        "origins": [{"id": 1, "simple_entity": {"name": "Ganglion", "ontology_uri": "u:1"}}],
        "vias": [{
            "order": 4294967295,
            "type": "AXON",
            "anatomical_entities": [{"id": 2, "simple_entity": {"name": "Nerve", "ontology_uri": "u:2"}}],
            "from_entities": [{"id": 1, "simple_entity": {"name": "Ganglion", "ontology_uri": "u:1"}}]
        }]
    }"#;

    let builder = DiagramBuilder::default();
    let statement = builder.parse_statement(source).expect("Failed to parse");
    let diagram = builder.assemble(
        statement.details(),
        statement.forward_connections(),
        &Default::default(),
    );

    assert_eq!(diagram.links().len(), 1);
    let link = diagram.links()[0];
    assert_eq!(link.source(), NodeId::origin(EntityId::new(1)));
    assert_eq!(link.target(), NodeId::via(u32::MAX, EntityId::new(2)));
    assert!(link.source().layer() < link.target().layer());
    assert_eq!(link.target().to_string(), "via-4294967295-2");

    // The saved layout reloads onto the same node
    let prior = builder.parse_serialized_graph(&builder.serialize_layout(&diagram).to_string());
    let reloaded = builder.assemble(statement.details(), statement.forward_connections(), &prior);
    assert_eq!(reloaded, diagram);
}

#[test]
fn test_malformed_entity_is_reported() {
    let source = r#"{"origins": [{"id": 5, "simple_entity": null, "region_layer": null}]}"#;

    let builder = DiagramBuilder::default();
    let err = builder.parse_statement(source).unwrap_err();

    assert!(err.is_data_integrity());
    assert!(matches!(err, ComposerError::Statement { .. }));
    assert!(err.to_string().contains("anatomical entity 5"));
}

#[test]
fn test_parse_invalid_json_returns_error() {
    let builder = DiagramBuilder::default();
    let err = builder.parse_statement("{ this is not json").unwrap_err();
    assert!(!err.is_data_integrity());
}

#[test]
fn test_garbage_layout_falls_back_to_defaults() {
    let builder = DiagramBuilder::default();
    let statement = builder.parse_statement(STATEMENT).expect("Failed to parse");

    let prior = builder.parse_serialized_graph("<html>not a layout</html>");
    let diagram = builder.assemble(statement.details(), statement.forward_connections(), &prior);
    let defaults = builder.assemble_with_graph(
        statement.details(),
        statement.forward_connections(),
        None,
    );

    assert_eq!(diagram, defaults);
}
