//! Reading and writing saved diagram layouts.
//!
//! The editor persists a diagram as a layered model: a list of `layers`, one
//! of type `diagram-nodes` whose `models` map node ids to
//! `{externalId, customType, x, y}` records (or a nested `position`), and
//! one of type `diagram-links`. Only node positions are read back; anything
//! unusable is skipped so a damaged layout degrades to default placement.

use log::{debug, warn};
use serde_json::{Map, Value, json};

use composer_core::geometry::Point;

use crate::{
    diagram::{NodeKind, PathDiagram},
    layout::PriorPositions,
};

/// Layer type holding node models.
pub const NODES_LAYER: &str = "diagram-nodes";
/// Layer type holding link models.
pub const LINKS_LAYER: &str = "diagram-links";

/// Extracts saved node positions from a serialized diagram.
///
/// An absent graph, or one without a usable `diagram-nodes` layer, yields an
/// empty map.
pub fn prior_positions(graph: Option<&Value>) -> PriorPositions {
    let mut positions = PriorPositions::new();
    let Some(graph) = graph else {
        return positions;
    };
    if graph.is_null() {
        return positions;
    }

    let Some(layers) = graph.get("layers").and_then(Value::as_array) else {
        warn!("Saved layout has no `layers` list, using default placement");
        return positions;
    };

    let node_layers = layers
        .iter()
        .filter(|layer| layer.get("type").and_then(Value::as_str) == Some(NODES_LAYER));

    for layer in node_layers {
        let Some(models) = layer.get("models").and_then(Value::as_object) else {
            warn!("Saved node layer has no `models` map, skipping");
            continue;
        };
        for (model_id, model) in models {
            match read_model(model) {
                Some((kind, external_id, position)) => {
                    positions.insert(kind, external_id, position);
                    positions.insert_node(model_id.as_str(), position);
                }
                None => debug!(model_id; "Skipping unusable node model"),
            }
        }
    }

    debug!(positions = positions.len(); "Recovered saved positions");
    positions
}

/// Parses a serialized diagram from JSON text.
///
/// Text that is not valid JSON is treated as "no saved layout".
pub fn parse_serialized_graph(source: &str) -> PriorPositions {
    if source.trim().is_empty() {
        return PriorPositions::new();
    }
    match serde_json::from_str::<Value>(source) {
        Ok(graph) => prior_positions(Some(&graph)),
        Err(err) => {
            warn!(err:%; "Saved layout is not valid JSON, using default placement");
            PriorPositions::new()
        }
    }
}

fn read_model(model: &Value) -> Option<(NodeKind, String, Point)> {
    let external_id = match model.get("externalId")? {
        Value::String(id) => id.clone(),
        Value::Number(id) => id.to_string(),
        _ => return None,
    };
    let kind = model.get("customType")?.as_str()?.parse().ok()?;

    let coordinates = model.get("position").unwrap_or(model);
    let position = Point::new(
        coordinates.get("x")?.as_f64()?,
        coordinates.get("y")?.as_f64()?,
    );
    position.is_finite().then_some((kind, external_id, position))
}

/// Serializes the layout of an assembled diagram in the saved-layout shape.
///
/// Node models are keyed by node id, so feeding the result back through
/// [`prior_positions`] reproduces every node position exactly.
pub fn serialize_layout(diagram: &PathDiagram) -> Value {
    let mut link_models = Map::new();
    for (index, link) in diagram.links().iter().enumerate() {
        let id = format!("link-{index}");
        link_models.insert(
            id.clone(),
            json!({
                "id": id,
                "type": "default",
                "source": link.source().to_string(),
                "sourcePort": format!("{}:{}", link.source(), link.source_port()),
                "target": link.target().to_string(),
                "targetPort": format!("{}:{}", link.target(), link.target_port()),
            }),
        );
    }

    let mut node_models = Map::new();
    for node in diagram.nodes() {
        let id = node.id().to_string();
        let ports: Vec<String> = node
            .ports()
            .iter()
            .map(|port| format!("{id}:{port}"))
            .collect();
        node_models.insert(
            id.clone(),
            json!({
                "id": id,
                "type": "custom",
                "externalId": node.external_id(),
                "customType": node.kind().to_string(),
                "name": node.name(),
                "x": node.position().x(),
                "y": node.position().y(),
                "ports": ports,
            }),
        );
    }

    json!({
        "layers": [
            { "type": LINKS_LAYER, "isSvg": true, "models": link_models },
            { "type": NODES_LAYER, "isSvg": false, "models": node_models },
        ]
    })
}
