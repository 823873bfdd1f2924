//! Low-level graph storage for path diagrams.
//!
//! This module provides the directed graph the node/link builder writes into:
//! - [`EdgeIndex`]: Index of a link in insertion order
//! - [`GraphInternal`]: Node map plus link list with incoming and outgoing
//!   link indices per node
//!
//! Nodes are kept in insertion order so that the assembled diagram lists
//! origins, then vias by order, then destinations.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::diagram::{DiagramLink, DiagramNode, NodeId};

/// Index of a link in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct EdgeIndex(usize);

/// Directed graph of diagram nodes and links.
///
/// Parallel links between the same pair of nodes are allowed; each declared
/// predecessor relationship produces its own link.
#[derive(Debug, Default)]
pub(super) struct GraphInternal {
    nodes: IndexMap<NodeId, DiagramNode>,
    edges: Vec<DiagramLink>,
    income_edges: HashMap<NodeId, Vec<EdgeIndex>>,
    outgoing_edges: HashMap<NodeId, Vec<EdgeIndex>>,
}

impl GraphInternal {
    /// Creates a new empty graph.
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Returns the node for the given ID, if it exists.
    pub(super) fn node(&self, id: NodeId) -> Option<&DiagramNode> {
        self.nodes.get(&id)
    }

    /// Returns the node for the given ID mutably, if it exists.
    pub(super) fn node_mut(&mut self, id: NodeId) -> Option<&mut DiagramNode> {
        self.nodes.get_mut(&id)
    }

    /// Returns an iterator over all nodes in insertion order.
    pub(super) fn nodes(&self) -> impl Iterator<Item = &DiagramNode> {
        self.nodes.values()
    }

    /// Returns the total number of nodes in the graph.
    pub(super) fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns an iterator over all links in insertion order.
    pub(super) fn edges(&self) -> impl Iterator<Item = DiagramLink> + '_ {
        self.edges.iter().copied()
    }

    /// Returns an iterator over nodes with no incoming links.
    pub(super) fn roots(&self) -> impl Iterator<Item = &DiagramNode> {
        self.nodes
            .iter()
            .filter(|(id, _)| !self.income_edges.contains_key(*id))
            .map(|(_, node)| node)
    }

    /// Returns the IDs of nodes the given source links to.
    pub(super) fn outgoing_nodes(&self, source_id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.outgoing_edges
            .get(&source_id)
            .into_iter()
            .flatten()
            .map(|idx| self.edges[idx.0].target())
    }

    /// Adds a node to the graph.
    ///
    /// Returns `false` and leaves the graph untouched if a node with the same
    /// ID already exists.
    pub(super) fn add_node(&mut self, node: DiagramNode) -> bool {
        let id = node.id();
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.nodes.insert(id, node);
        true
    }

    /// Adds a directed link between two existing nodes.
    ///
    /// # Panics
    /// Panics in debug mode if either endpoint does not exist in the graph.
    pub(super) fn add_edge(&mut self, link: DiagramLink) {
        debug_assert!(
            self.nodes.contains_key(&link.source()),
            "Adding link: source node {} does not exist",
            link.source(),
        );
        debug_assert!(
            self.nodes.contains_key(&link.target()),
            "Adding link: target node {} does not exist",
            link.target(),
        );

        self.edges.push(link);

        let idx = EdgeIndex(self.edges.len() - 1);
        self.outgoing_edges
            .entry(link.source())
            .or_default()
            .push(idx);
        self.income_edges.entry(link.target()).or_default().push(idx);
    }

    /// Consumes the graph, returning nodes and links in insertion order.
    pub(super) fn into_parts(self) -> (Vec<DiagramNode>, Vec<DiagramLink>) {
        (self.nodes.into_values().collect(), self.edges)
    }
}

#[cfg(test)]
mod tests {
    use composer_core::{geometry::Point, identifier::EntityId};

    use super::*;

    fn node(id: NodeId) -> DiagramNode {
        DiagramNode::new(id, id.to_string(), String::new(), Point::default())
    }

    fn origin(id: u64) -> NodeId {
        NodeId::origin(EntityId::new(id))
    }

    fn via(order: u32, id: u64) -> NodeId {
        NodeId::via(order, EntityId::new(id))
    }

    #[test]
    fn test_graph_new() {
        let graph = GraphInternal::new();

        assert_eq!(graph.nodes_count(), 0);
        assert_eq!(graph.nodes().count(), 0);
        assert_eq!(graph.edges().count(), 0);
        assert_eq!(graph.roots().count(), 0);
    }

    #[test]
    fn test_add_node_keeps_first() {
        let mut graph = GraphInternal::new();
        let id = origin(1);

        assert!(graph.add_node(node(id)));
        assert!(!graph.add_node(
            DiagramNode::new(id, "other".to_string(), String::new(), Point::new(1.0, 1.0))
        ));

        assert_eq!(graph.nodes_count(), 1);
        assert_eq!(graph.node(id).map(|n| n.name()), Some("origin-1"));
    }

    #[test]
    fn test_insertion_order() {
        let mut graph = GraphInternal::new();
        let ids = [via(1, 9), origin(2), via(0, 4)];
        for id in ids {
            graph.add_node(node(id));
        }

        let order: Vec<NodeId> = graph.nodes().map(|n| n.id()).collect();
        assert_eq!(order, ids);
    }

    #[test]
    fn test_add_edge() {
        let mut graph = GraphInternal::new();
        graph.add_node(node(origin(1)));
        graph.add_node(node(via(0, 2)));

        let link = DiagramLink::new(origin(1), via(0, 2));
        graph.add_edge(link);

        assert_eq!(graph.edges().collect::<Vec<_>>(), [link]);
        assert_eq!(graph.outgoing_nodes(origin(1)).collect::<Vec<_>>(), [via(0, 2)]);
        assert_eq!(graph.outgoing_nodes(via(0, 2)).count(), 0);
    }

    #[test]
    fn test_roots() {
        let mut graph = GraphInternal::new();
        graph.add_node(node(origin(1)));
        graph.add_node(node(origin(2)));
        graph.add_node(node(via(0, 3)));
        graph.add_edge(DiagramLink::new(origin(1), via(0, 3)));

        let roots: Vec<NodeId> = graph.roots().map(|n| n.id()).collect();
        assert_eq!(roots, [origin(1), origin(2)]);
    }

    #[test]
    fn test_parallel_links() {
        let mut graph = GraphInternal::new();
        graph.add_node(node(origin(1)));
        graph.add_node(node(via(0, 2)));

        graph.add_edge(DiagramLink::new(origin(1), via(0, 2)));
        graph.add_edge(DiagramLink::new(origin(1), via(0, 2)));

        assert_eq!(graph.edges().count(), 2);
        assert_eq!(graph.outgoing_nodes(origin(1)).count(), 2);
    }

    #[test]
    fn test_missing_node_has_no_neighbours() {
        let graph = GraphInternal::new();
        assert_eq!(graph.outgoing_nodes(origin(5)).count(), 0);
    }

    #[test]
    fn test_into_parts() {
        let mut graph = GraphInternal::new();
        graph.add_node(node(origin(1)));
        graph.add_node(node(via(0, 2)));
        graph.add_edge(DiagramLink::new(origin(1), via(0, 2)));

        let (nodes, links) = graph.into_parts();
        assert_eq!(nodes.len(), 2);
        assert_eq!(links, [DiagramLink::new(origin(1), via(0, 2))]);
    }
}
