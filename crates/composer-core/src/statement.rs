//! Connectivity statement records consumed by the diagram builder.
//!
//! These are the read-only snapshots fetched from the knowledge base:
//! - [`ConnectivityDetails`]: origins, vias and destinations of a statement
//! - [`ForwardConnection`]: annotations linking destinations to other statements
//! - [`StatementDocument`]: both of the above in one document

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{entity::AnatomicalEntity, identifier::EntityId};

/// Neurite type travelling through a via.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ViaType {
    #[default]
    #[serde(rename = "AXON")]
    Axon,
    #[serde(rename = "DENDRITE")]
    Dendrite,
}

impl fmt::Display for ViaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViaType::Axon => write!(f, "AXON"),
            ViaType::Dendrite => write!(f, "DENDRITE"),
        }
    }
}

impl<'de> Deserialize<'de> for ViaType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        match value.to_ascii_uppercase().as_str() {
            "AXON" => Ok(ViaType::Axon),
            "DENDRITE" => Ok(ViaType::Dendrite),
            other => Err(serde::de::Error::unknown_variant(
                other,
                &["AXON", "DENDRITE"],
            )),
        }
    }
}

/// Kind of terminal a destination represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum DestinationType {
    #[serde(rename = "AXON-T")]
    AxonTerminal,
    #[serde(rename = "AFFERENT-T")]
    AfferentTerminal,
    #[default]
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl fmt::Display for DestinationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinationType::AxonTerminal => write!(f, "AXON-T"),
            DestinationType::AfferentTerminal => write!(f, "AFFERENT-T"),
            DestinationType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl<'de> Deserialize<'de> for DestinationType {
    /// Unrecognised terminal kinds fall back to [`DestinationType::Unknown`].
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(match value.to_ascii_uppercase().as_str() {
            "AXON-T" => DestinationType::AxonTerminal,
            "AFFERENT-T" => DestinationType::AfferentTerminal,
            _ => DestinationType::Unknown,
        })
    }
}

/// An ordered waypoint of a connectivity statement.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Via {
    #[serde(default)]
    id: Option<EntityId>,
    #[serde(default)]
    order: u32,
    #[serde(rename = "type", default)]
    via_type: ViaType,
    #[serde(default)]
    anatomical_entities: Vec<AnatomicalEntity>,
    #[serde(default)]
    from_entities: Vec<AnatomicalEntity>,
}

impl Via {
    pub fn new(order: u32, via_type: ViaType) -> Self {
        Self {
            id: None,
            order,
            via_type,
            anatomical_entities: Vec::new(),
            from_entities: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_entities(mut self, entities: Vec<AnatomicalEntity>) -> Self {
        self.anatomical_entities = entities;
        self
    }

    pub fn with_from_entities(mut self, entities: Vec<AnatomicalEntity>) -> Self {
        self.from_entities = entities;
        self
    }

    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    /// Zero-based layer index of this via.
    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn via_type(&self) -> ViaType {
        self.via_type
    }

    pub fn anatomical_entities(&self) -> &[AnatomicalEntity] {
        &self.anatomical_entities
    }

    /// Entities of earlier layers that connect into this via.
    pub fn from_entities(&self) -> &[AnatomicalEntity] {
        &self.from_entities
    }
}

/// Terminal point of a connectivity statement.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Destination {
    #[serde(default)]
    id: Option<EntityId>,
    #[serde(rename = "type", default)]
    destination_type: DestinationType,
    #[serde(default)]
    anatomical_entities: Vec<AnatomicalEntity>,
    #[serde(default)]
    from_entities: Vec<AnatomicalEntity>,
}

impl Destination {
    pub fn new(destination_type: DestinationType) -> Self {
        Self {
            id: None,
            destination_type,
            anatomical_entities: Vec::new(),
            from_entities: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_entities(mut self, entities: Vec<AnatomicalEntity>) -> Self {
        self.anatomical_entities = entities;
        self
    }

    pub fn with_from_entities(mut self, entities: Vec<AnatomicalEntity>) -> Self {
        self.from_entities = entities;
        self
    }

    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    pub fn destination_type(&self) -> DestinationType {
        self.destination_type
    }

    pub fn anatomical_entities(&self) -> &[AnatomicalEntity] {
        &self.anatomical_entities
    }

    /// Origins or via entities that connect into this destination.
    pub fn from_entities(&self) -> &[AnatomicalEntity] {
        &self.from_entities
    }
}

/// An entry of a forward connection's `origins` list.
///
/// The knowledge base returns either bare ids or embedded entity objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OriginRef {
    Id(EntityId),
    Entity { id: EntityId },
}

impl OriginRef {
    pub fn id(self) -> EntityId {
        match self {
            OriginRef::Id(id) | OriginRef::Entity { id } => id,
        }
    }
}

/// Annotation linking a destination to statements that continue from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardConnection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    knowledge_statement: Option<String>,
    #[serde(default)]
    origins: Vec<OriginRef>,
}

impl ForwardConnection {
    pub fn new(origins: Vec<OriginRef>) -> Self {
        Self {
            id: None,
            knowledge_statement: None,
            origins,
        }
    }

    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_knowledge_statement(mut self, statement: impl Into<String>) -> Self {
        self.knowledge_statement = Some(statement.into());
        self
    }

    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    pub fn knowledge_statement(&self) -> Option<&str> {
        self.knowledge_statement.as_deref()
    }

    pub fn origins(&self) -> &[OriginRef] {
        &self.origins
    }

    /// Checks whether this record continues from the given entity.
    pub fn targets(&self, entity_id: EntityId) -> bool {
        self.origins.iter().any(|origin| origin.id() == entity_id)
    }
}

/// Origins, vias and destinations of one connectivity statement.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConnectivityDetails {
    #[serde(default)]
    origins: Vec<AnatomicalEntity>,
    #[serde(default)]
    vias: Vec<Via>,
    #[serde(default)]
    destinations: Vec<Destination>,
}

impl ConnectivityDetails {
    pub fn new(
        origins: Vec<AnatomicalEntity>,
        vias: Vec<Via>,
        destinations: Vec<Destination>,
    ) -> Self {
        Self {
            origins,
            vias,
            destinations,
        }
    }

    pub fn origins(&self) -> &[AnatomicalEntity] {
        &self.origins
    }

    pub fn vias(&self) -> &[Via] {
        &self.vias
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }
}

/// A statement's connectivity details together with its forward connections.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatementDocument {
    #[serde(flatten)]
    details: ConnectivityDetails,
    #[serde(default)]
    forward_connections: Vec<ForwardConnection>,
}

impl StatementDocument {
    pub fn new(details: ConnectivityDetails, forward_connections: Vec<ForwardConnection>) -> Self {
        Self {
            details,
            forward_connections,
        }
    }

    pub fn details(&self) -> &ConnectivityDetails {
        &self.details
    }

    pub fn forward_connections(&self) -> &[ForwardConnection] {
        &self.forward_connections
    }
}
