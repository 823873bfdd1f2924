//! Node and link construction for path diagrams.
//!
//! The builder walks a statement layer by layer: origins first, then vias by
//! ascending order, then destinations. Each layer remembers which entity ids
//! it shows, so a `from_entities` reference is resolved by scanning the
//! preceding layers from the nearest one outward. References that resolve
//! nowhere are recorded as [`LinkGap`]s and never abort the build.

mod graph_base;

use std::collections::BTreeMap;

use indexmap::IndexMap;
use log::{debug, warn};

use composer_core::{
    entity::AnatomicalEntity,
    geometry::Point,
    identifier::EntityId,
    statement::{ConnectivityDetails, Destination, ForwardConnection, Via},
};

use crate::{
    config::LayoutConfig,
    diagram::{
        Adjacency, AnatomicalType, DiagramLink, DiagramNode, GapReason, LinkGap, NodeId,
        NodeKind, PathDiagram, PortKind,
    },
    layout::{PositionResolver, PriorPositions, RowCursor},
};

use graph_base::GraphInternal;

/// Entity ids shown by one layer, mapped to the node showing them.
#[derive(Debug, Default)]
struct Layer {
    nodes: IndexMap<EntityId, NodeId>,
}

/// Builds the nodes and links of one statement.
pub(crate) struct PathGraphBuilder<'a> {
    layout: &'a LayoutConfig,
    resolver: PositionResolver<'a>,
    graph: GraphInternal,
    layers: Vec<Layer>,
    placed: Vec<Point>,
    gaps: Vec<LinkGap>,
}

impl<'a> PathGraphBuilder<'a> {
    pub(crate) fn new(layout: &'a LayoutConfig, prior: &'a PriorPositions) -> Self {
        Self {
            layout,
            resolver: PositionResolver::new(layout, prior),
            graph: GraphInternal::new(),
            layers: Vec::new(),
            placed: Vec::new(),
            gaps: Vec::new(),
        }
    }

    /// Builds the diagram of a statement in a single pass.
    pub(crate) fn build(
        mut self,
        details: &ConnectivityDetails,
        forward_connections: &[ForwardConnection],
    ) -> PathDiagram {
        self.add_origins(details.origins());

        let mut vias_by_order: BTreeMap<u32, Vec<&Via>> = BTreeMap::new();
        for via in details.vias() {
            vias_by_order.entry(via.order()).or_default().push(via);
        }
        let via_rows = vias_by_order
            .keys()
            .next_back()
            .map_or(0, |max_order| u64::from(*max_order) + 1);

        for (order, vias) in &vias_by_order {
            self.add_via_layer(*order, vias);
        }

        self.add_destinations(details.destinations(), forward_connections, via_rows);

        self.finish()
    }

    fn add_origins(&mut self, origins: &[AnatomicalEntity]) {
        let mut cursor = RowCursor::new(
            Point::new(self.layout.origin_start_x(), self.layout.origin_row_y()),
            self.layout.column_spacing(),
        );
        self.layers.push(Layer::default());

        for entity in origins {
            let id = NodeId::origin(entity.id());
            if self.in_current_layer(entity.id()) {
                debug!(node_id:% = id; "Duplicate origin entity, keeping first");
                continue;
            }
            let default = cursor.advance();
            self.add_node(id, entity, default, |node| node);
        }
    }

    fn add_via_layer(&mut self, order: u32, vias: &[&Via]) {
        // Entities of every via sharing this order are packed into one row.
        let mut cursor = RowCursor::new(
            Point::new(self.layout.via_start_x(), self.layout.via_row_y(order)),
            self.layout.column_spacing(),
        );
        self.layers.push(Layer::default());
        let layer_index = self.layers.len() - 1;

        for via in vias {
            let mut targets: Vec<NodeId> = Vec::new();
            for entity in via.anatomical_entities() {
                let id = NodeId::via(order, entity.id());
                if targets.contains(&id) {
                    continue;
                }
                if !self.in_current_layer(entity.id()) {
                    let default = cursor.advance();
                    let via_type = via.via_type();
                    self.add_node(id, entity, default, |node| {
                        node.with_anatomical_type(AnatomicalType::Via(via_type))
                    });
                }
                targets.push(id);
            }

            for target in targets {
                self.link_predecessors(target, via.from_entities(), layer_index);
            }
        }
    }

    fn add_destinations(
        &mut self,
        destinations: &[Destination],
        forward_connections: &[ForwardConnection],
        via_rows: u64,
    ) {
        let mut cursor = RowCursor::new(
            Point::new(
                self.layout.destination_start_x(),
                self.layout.destination_row_y(via_rows),
            ),
            self.layout.column_spacing(),
        );
        self.layers.push(Layer::default());
        let layer_index = self.layers.len() - 1;
        // Destinations sit one row below the deepest via order.
        let layer_tag = via_rows + 1;

        for destination in destinations {
            let mut targets: Vec<NodeId> = Vec::new();
            for entity in destination.anatomical_entities() {
                let id = NodeId::destination(layer_tag, entity.id());
                if targets.contains(&id) {
                    continue;
                }
                if !self.in_current_layer(entity.id()) {
                    let default = cursor.advance();
                    let destination_type = destination.destination_type();
                    let records: Vec<ForwardConnection> = forward_connections
                        .iter()
                        .filter(|record| record.targets(entity.id()))
                        .cloned()
                        .collect();
                    self.add_node(id, entity, default, |node| {
                        node.with_anatomical_type(AnatomicalType::Destination(destination_type))
                            .with_forward_connections(records)
                    });
                }
                targets.push(id);
            }

            for target in targets {
                self.link_predecessors(target, destination.from_entities(), layer_index);
            }
        }
    }

    fn in_current_layer(&self, entity_id: EntityId) -> bool {
        self.layers
            .last()
            .is_some_and(|layer| layer.nodes.contains_key(&entity_id))
    }

    fn add_node(
        &mut self,
        id: NodeId,
        entity: &AnatomicalEntity,
        default: Point,
        decorate: impl FnOnce(DiagramNode) -> DiagramNode,
    ) {
        let name = entity.display_name();
        let position = self.resolver.resolve(id, default, &self.placed);

        let node = DiagramNode::new(
            id,
            name.name().to_string(),
            name.ontology_uri().to_string(),
            position,
        );
        if self.graph.add_node(decorate(node)) {
            self.placed.push(position);
        }
        if let Some(layer) = self.layers.last_mut() {
            layer.nodes.insert(entity.id(), id);
        }
    }

    /// Links every declared predecessor of `target` that an earlier layer shows.
    fn link_predecessors(
        &mut self,
        target: NodeId,
        from_entities: &[AnatomicalEntity],
        layer_index: usize,
    ) {
        for predecessor in from_entities {
            let source = self.layers[..layer_index]
                .iter()
                .rev()
                .find_map(|layer| layer.nodes.get(&predecessor.id()).copied());

            match source {
                Some(source) => self.connect(source, target, predecessor.id()),
                None => {
                    debug!(
                        node_id:% = target,
                        predecessor:% = predecessor.id();
                        "Predecessor not found in any earlier layer, dropping link"
                    );
                    self.gaps.push(LinkGap::new(
                        target,
                        predecessor.id(),
                        GapReason::UnresolvedPredecessor,
                    ));
                }
            }
        }
    }

    fn connect(&mut self, source: NodeId, target: NodeId, predecessor: EntityId) {
        let endpoints = self
            .graph
            .node(source)
            .filter(|node| node.has_port(PortKind::Out))
            .zip(
                self.graph
                    .node(target)
                    .filter(|node| node.has_port(PortKind::In)),
            )
            .map(|(source_node, target_node)| {
                (
                    Adjacency::new(target_node.name(), target_node.kind()),
                    Adjacency::new(source_node.name(), source_node.kind()),
                )
            });

        let Some((to_entry, from_entry)) = endpoints else {
            warn!(from:% = source, to:% = target; "Link endpoint is missing a port, dropping link");
            self.gaps
                .push(LinkGap::new(target, predecessor, GapReason::MissingPort));
            return;
        };

        if let Some(node) = self.graph.node_mut(source) {
            node.push_to(to_entry);
        }
        if let Some(node) = self.graph.node_mut(target) {
            node.push_from(from_entry);
        }
        self.graph.add_edge(DiagramLink::new(source, target));
    }

    fn finish(self) -> PathDiagram {
        let dead_ends = self
            .graph
            .nodes()
            .filter(|node| node.kind() != NodeKind::Destination)
            .filter(|node| self.graph.outgoing_nodes(node.id()).next().is_none())
            .count();
        debug!(
            nodes = self.graph.nodes_count(),
            links = self.graph.edges().count(),
            roots = self.graph.roots().count(),
            dead_ends,
            gaps = self.gaps.len();
            "Path graph built"
        );

        let (nodes, links) = self.graph.into_parts();
        PathDiagram::new(nodes, links, self.gaps)
    }
}
