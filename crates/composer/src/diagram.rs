//! Assembled path diagram handed to the rendering surface.
//!
//! A [`PathDiagram`] is a plain `{nodes, links}` projection of a statement:
//! every [`DiagramNode`] carries its position, ports, display name and the
//! adjacency bookkeeping used for tooltips, and every [`DiagramLink`] joins a
//! source `out` port to a target `in` port.

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};

use composer_core::{
    geometry::Point,
    identifier::EntityId,
    statement::{DestinationType, ForwardConnection, ViaType},
};

/// Role of a node in the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum NodeKind {
    Origin,
    Via,
    Destination,
}

impl NodeKind {
    /// Ports exposed by nodes of this kind.
    pub fn ports(self) -> &'static [PortKind] {
        match self {
            NodeKind::Origin => &[PortKind::Out],
            NodeKind::Via => &[PortKind::In, PortKind::Out],
            NodeKind::Destination => &[PortKind::In],
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Origin => write!(f, "Origin"),
            NodeKind::Via => write!(f, "Via"),
            NodeKind::Destination => write!(f, "Destination"),
        }
    }
}

impl FromStr for NodeKind {
    type Err = String;

    /// Parses a saved `customType`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "origin" => Ok(NodeKind::Origin),
            "via" => Ok(NodeKind::Via),
            "destination" => Ok(NodeKind::Destination),
            _ => Err(format!("unknown node type `{s}`")),
        }
    }
}

/// Identity of a node: its kind, its layer and the entity it shows.
///
/// Two vias showing the same entity at different orders are distinct nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    kind: NodeKind,
    layer: u64,
    entity: EntityId,
}

impl NodeId {
    pub fn origin(entity: EntityId) -> Self {
        Self {
            kind: NodeKind::Origin,
            layer: 0,
            entity,
        }
    }

    pub fn via(order: u32, entity: EntityId) -> Self {
        Self {
            kind: NodeKind::Via,
            layer: u64::from(order) + 1,
            entity,
        }
    }

    pub fn destination(layer: u64, entity: EntityId) -> Self {
        Self {
            kind: NodeKind::Destination,
            layer,
            entity,
        }
    }

    pub fn kind(self) -> NodeKind {
        self.kind
    }

    /// Row index: 0 for origins, `order + 1` for vias, last for destinations.
    pub fn layer(self) -> u64 {
        self.layer
    }

    pub fn entity(self) -> EntityId {
        self.entity
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeKind::Origin => write!(f, "origin-{}", self.entity),
            NodeKind::Via => write!(f, "via-{}-{}", self.layer - 1, self.entity),
            NodeKind::Destination => write!(f, "destination-{}", self.entity),
        }
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Direction of a node port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortKind {
    In,
    Out,
}

impl fmt::Display for PortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortKind::In => write!(f, "in"),
            PortKind::Out => write!(f, "out"),
        }
    }
}

/// One entry of a node's `from`/`to` adjacency list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Adjacency {
    name: String,
    #[serde(rename = "type")]
    kind: NodeKind,
}

impl Adjacency {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }
}

/// Neurite or terminal type shown on via and destination nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnatomicalType {
    Via(ViaType),
    Destination(DestinationType),
}

/// A node of the path diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramNode {
    id: NodeId,
    custom_type: NodeKind,
    name: String,
    ontology_uri: String,
    external_id: String,
    position: Point,
    ports: Vec<PortKind>,
    from: Vec<Adjacency>,
    to: Vec<Adjacency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    anatomical_type: Option<AnatomicalType>,
    #[serde(rename = "forward_connection", skip_serializing_if = "Vec::is_empty")]
    forward_connection: Vec<ForwardConnection>,
}

impl DiagramNode {
    pub(crate) fn new(id: NodeId, name: String, ontology_uri: String, position: Point) -> Self {
        Self {
            id,
            custom_type: id.kind(),
            name,
            ontology_uri,
            external_id: id.entity().to_string(),
            position,
            ports: id.kind().ports().to_vec(),
            from: Vec::new(),
            to: Vec::new(),
            anatomical_type: None,
            forward_connection: Vec::new(),
        }
    }

    pub(crate) fn with_anatomical_type(mut self, anatomical_type: AnatomicalType) -> Self {
        self.anatomical_type = Some(anatomical_type);
        self
    }

    pub(crate) fn with_forward_connections(mut self, records: Vec<ForwardConnection>) -> Self {
        self.forward_connection = records;
        self
    }

    pub(crate) fn push_from(&mut self, entry: Adjacency) {
        self.from.push(entry);
    }

    pub(crate) fn push_to(&mut self, entry: Adjacency) {
        self.to.push(entry);
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.custom_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ontology_uri(&self) -> &str {
        &self.ontology_uri
    }

    /// String form of the entity id, used to match saved layouts.
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn ports(&self) -> &[PortKind] {
        &self.ports
    }

    pub fn has_port(&self, port: PortKind) -> bool {
        self.ports.contains(&port)
    }

    /// Nodes linking into this one, in link creation order.
    pub fn from(&self) -> &[Adjacency] {
        &self.from
    }

    /// Nodes this one links to, in link creation order.
    pub fn to(&self) -> &[Adjacency] {
        &self.to
    }

    pub fn anatomical_type(&self) -> Option<AnatomicalType> {
        self.anatomical_type
    }

    pub fn forward_connections(&self) -> &[ForwardConnection] {
        &self.forward_connection
    }
}

/// A link from a source node's `out` port to a target node's `in` port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramLink {
    source: NodeId,
    source_port: PortKind,
    target: NodeId,
    target_port: PortKind,
}

impl DiagramLink {
    pub(crate) fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            source_port: PortKind::Out,
            target,
            target_port: PortKind::In,
        }
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn source_port(&self) -> PortKind {
        self.source_port
    }

    pub fn target_port(&self) -> PortKind {
        self.target_port
    }
}

impl fmt::Display for DiagramLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}->{}:{}",
            self.source, self.source_port, self.target, self.target_port
        )
    }
}

/// Why a declared predecessor did not become a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GapReason {
    /// No earlier layer contains the referenced entity.
    UnresolvedPredecessor,
    /// The source has no `out` port or the target has no `in` port.
    MissingPort,
}

/// A predecessor reference that was dropped while wiring the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkGap {
    target: NodeId,
    predecessor: EntityId,
    reason: GapReason,
}

impl LinkGap {
    pub(crate) fn new(target: NodeId, predecessor: EntityId, reason: GapReason) -> Self {
        Self {
            target,
            predecessor,
            reason,
        }
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn predecessor(&self) -> EntityId {
        self.predecessor
    }

    pub fn reason(&self) -> GapReason {
        self.reason
    }
}

/// The assembled `{nodes, links}` graph of one statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PathDiagram {
    nodes: Vec<DiagramNode>,
    links: Vec<DiagramLink>,
    #[serde(skip)]
    gaps: Vec<LinkGap>,
}

impl PathDiagram {
    pub(crate) fn new(nodes: Vec<DiagramNode>, links: Vec<DiagramLink>, gaps: Vec<LinkGap>) -> Self {
        Self { nodes, links, gaps }
    }

    /// Nodes in construction order: origins, vias by order, destinations.
    pub fn nodes(&self) -> &[DiagramNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[DiagramLink] {
        &self.links
    }

    /// Predecessor references that could not be wired.
    pub fn gaps(&self) -> &[LinkGap] {
        &self.gaps
    }

    pub fn node(&self, id: NodeId) -> Option<&DiagramNode> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &DiagramNode> {
        self.nodes.iter().filter(move |node| node.kind() == kind)
    }
}
