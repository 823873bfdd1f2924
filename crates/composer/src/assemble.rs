//! One-call assembly of a statement's path diagram.

use log::{debug, info};
use serde_json::Value;

use composer_core::statement::{ConnectivityDetails, ForwardConnection};

use crate::{
    config::LayoutConfig, diagram::PathDiagram, layout::PriorPositions, serialized,
    structure::PathGraphBuilder,
};

/// Assembles the `{nodes, links}` graph of a statement.
///
/// Saved positions are read from `serialized_graph`; an absent or malformed
/// graph falls back to default placement. The same inputs always produce the
/// same diagram.
pub fn assemble(
    details: &ConnectivityDetails,
    forward_connections: &[ForwardConnection],
    serialized_graph: Option<&Value>,
    layout: &LayoutConfig,
) -> PathDiagram {
    let prior = serialized::prior_positions(serialized_graph);
    assemble_with_positions(details, forward_connections, &prior, layout)
}

/// Assembles a diagram from already extracted saved positions.
pub fn assemble_with_positions(
    details: &ConnectivityDetails,
    forward_connections: &[ForwardConnection],
    prior: &PriorPositions,
    layout: &LayoutConfig,
) -> PathDiagram {
    info!(
        origins = details.origins().len(),
        vias = details.vias().len(),
        destinations = details.destinations().len(),
        saved_positions = prior.len();
        "Assembling path diagram"
    );

    let diagram = PathGraphBuilder::new(layout, prior).build(details, forward_connections);

    if !diagram.gaps().is_empty() {
        info!(gaps = diagram.gaps().len(); "Diagram assembled with unresolved links");
    }
    debug!(nodes = diagram.nodes().len(), links = diagram.links().len(); "Diagram assembled");
    diagram
}

#[cfg(test)]
mod tests {
    use composer_core::{
        entity::{AnatomicalEntity, OntologyTerm},
        geometry::Point,
        identifier::EntityId,
        statement::{Destination, DestinationType, OriginRef, Via, ViaType},
    };
    use serde_json::json;

    use super::*;
    use crate::diagram::{NodeId, NodeKind};

    fn entity(id: u64, name: &str) -> AnatomicalEntity {
        AnatomicalEntity::simple(EntityId::new(id), OntologyTerm::new(name, ""))
    }

    #[test]
    fn test_scenario_single_chain() {
        let details = ConnectivityDetails::new(
            vec![entity(1, "O")],
            vec![
                Via::new(0, ViaType::Axon)
                    .with_entities(vec![entity(2, "V")])
                    .with_from_entities(vec![entity(1, "O")]),
            ],
            vec![
                Destination::new(DestinationType::AxonTerminal)
                    .with_entities(vec![entity(3, "D")])
                    .with_from_entities(vec![entity(2, "V")]),
            ],
        );

        let diagram = assemble(&details, &[], None, &LayoutConfig::default());
        assert_eq!(diagram.nodes().len(), 3);
        let pairs: Vec<(NodeId, NodeId)> = diagram
            .links()
            .iter()
            .map(|link| (link.source(), link.target()))
            .collect();
        assert_eq!(
            pairs,
            [
                (NodeId::origin(EntityId::new(1)), NodeId::via(0, EntityId::new(2))),
                (
                    NodeId::via(0, EntityId::new(2)),
                    NodeId::destination(2, EntityId::new(3))
                ),
            ]
        );
    }

    #[test]
    fn test_scenario_unresolved_predecessor() {
        let details = ConnectivityDetails::new(
            vec![entity(1, "O")],
            vec![
                Via::new(0, ViaType::Axon)
                    .with_entities(vec![entity(2, "V")])
                    .with_from_entities(vec![entity(404, "Missing")]),
            ],
            vec![],
        );

        let diagram = assemble(&details, &[], None, &LayoutConfig::default());
        let via = diagram.node(NodeId::via(0, EntityId::new(2))).unwrap();
        assert!(via.from().is_empty());
        assert!(diagram.links().is_empty());
        assert_eq!(diagram.gaps().len(), 1);
    }

    #[test]
    fn test_scenario_saved_position() {
        let details = ConnectivityDetails::new(vec![entity(7, "O")], vec![], vec![]);
        let saved = json!({
            "layers": [{ "type": "diagram-nodes", "models": {
                "x": { "externalId": "7", "customType": "Origin", "position": { "x": 500, "y": 500 } }
            }}]
        });

        let diagram = assemble(&details, &[], Some(&saved), &LayoutConfig::default());
        assert_eq!(diagram.nodes()[0].position(), Point::new(500.0, 500.0));
    }

    #[test]
    fn test_scenario_forward_connection() {
        let record = ForwardConnection::new(vec![OriginRef::Id(EntityId::new(3))])
            .with_knowledge_statement("continues elsewhere");
        let details = ConnectivityDetails::new(
            vec![],
            vec![],
            vec![Destination::new(DestinationType::AxonTerminal).with_entities(vec![entity(3, "D")])],
        );

        let diagram = assemble(&details, &[record.clone()], None, &LayoutConfig::default());
        let destination = diagram.nodes_of_kind(NodeKind::Destination).next().unwrap();
        assert_eq!(destination.forward_connections(), &[record]);
    }

    #[test]
    fn test_scenario_two_origins() {
        let details =
            ConnectivityDetails::new(vec![entity(1, "A"), entity(2, "B")], vec![], vec![]);

        let diagram = assemble(&details, &[], None, &LayoutConfig::default());
        let positions: Vec<Point> = diagram.nodes().iter().map(|n| n.position()).collect();
        assert_eq!(positions, [Point::new(100.0, 50.0), Point::new(350.0, 50.0)]);
    }

    #[test]
    fn test_saved_position_pushes_default_aside() {
        // Origin 2 has no saved position but its default spot is taken by origin 1.
        let details =
            ConnectivityDetails::new(vec![entity(1, "A"), entity(2, "B")], vec![], vec![]);
        let mut prior = PriorPositions::new();
        prior.insert(NodeKind::Origin, "1", Point::new(360.0, 60.0));

        let diagram = assemble_with_positions(&details, &[], &prior, &LayoutConfig::default());
        assert_eq!(diagram.nodes()[0].position(), Point::new(360.0, 60.0));
        assert_eq!(diagram.nodes()[1].position(), Point::new(450.0, 150.0));
    }
}
