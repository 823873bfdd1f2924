//! Example: Assembling a path diagram from the statement model
//!
//! This example builds a statement programmatically, assembles its diagram,
//! simulates the editor moving a node, and reassembles from the saved layout.

use composer::{
    DiagramBuilder, NodeId,
    entity::{AnatomicalEntity, OntologyTerm},
    geometry::Point,
    identifier::EntityId,
    layout::PriorPositions,
    statement::{
        ConnectivityDetails, Destination, DestinationType, ForwardConnection, OriginRef, Via,
        ViaType,
    },
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building statement...\n");

    let ganglion = AnatomicalEntity::simple(
        EntityId::new(1),
        OntologyTerm::new("Dorsal root ganglion", "UBERON:0000044"),
    );
    let root = AnatomicalEntity::simple(
        EntityId::new(2),
        OntologyTerm::new("Dorsal root", "UBERON:0002261"),
    );
    let horn = AnatomicalEntity::region_layer(
        EntityId::new(3),
        OntologyTerm::new("Dorsal horn", "UBERON:0002256"),
        OntologyTerm::new("lamina I", "UBERON:0006118"),
    );

    let details = ConnectivityDetails::new(
        vec![ganglion.clone()],
        vec![
            Via::new(0, ViaType::Axon)
                .with_entities(vec![root.clone()])
                .with_from_entities(vec![ganglion]),
        ],
        vec![
            Destination::new(DestinationType::AxonTerminal)
                .with_entities(vec![horn])
                .with_from_entities(vec![root]),
        ],
    );
    let forward = vec![
        ForwardConnection::new(vec![OriginRef::Id(EntityId::new(3))])
            .with_knowledge_statement("lamina I projection to thalamus"),
    ];

    let builder = DiagramBuilder::default();
    let diagram = builder.assemble(&details, &forward, &PriorPositions::new());

    println!("Assembled diagram:");
    for node in diagram.nodes() {
        println!(
            "  {:<16} {:<28} at ({}, {})",
            node.id().to_string(),
            node.name(),
            node.position().x(),
            node.position().y()
        );
    }
    for link in diagram.links() {
        println!("  link {link}");
    }
    println!();

    // Pretend the user dragged the origin somewhere else and saved.
    let mut prior = builder.parse_serialized_graph(&builder.serialize_layout(&diagram).to_string());
    prior.insert_node("origin-1", Point::new(600.0, 40.0));

    let reloaded = builder.assemble(&details, &forward, &prior);
    let origin = reloaded
        .node(NodeId::origin(EntityId::new(1)))
        .ok_or("origin node missing")?;
    println!(
        "Origin after reload: ({}, {})",
        origin.position().x(),
        origin.position().y()
    );

    let json = builder.render_json(&reloaded)?;
    let output_path = "from_statement_output.json";
    std::fs::write(output_path, &json)?;
    println!("Diagram written to: {}", output_path);

    Ok(())
}
