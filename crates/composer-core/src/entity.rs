//! Anatomical entities and their display names.
//!
//! An anatomical entity is either a *simple* entity (one ontology term) or a
//! *region/layer* composite (a region term qualified by a layer term). The
//! knowledge base ships both shapes in one record with two optional fields;
//! [`AnatomicalEntity`] turns that into an explicit [`EntityKind`] variant at
//! the deserialization boundary, so the rest of the pipeline never has to
//! guess which field is set.

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::identifier::EntityId;

/// Data-integrity errors raised while reading anatomical entities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    #[error("anatomical entity {id} has neither `simple_entity` nor `region_layer`")]
    Malformed { id: EntityId },
}

/// A single ontology term: a human-readable name plus its ontology URI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OntologyTerm {
    name: String,
    #[serde(default)]
    ontology_uri: String,
}

impl OntologyTerm {
    pub fn new(name: impl Into<String>, ontology_uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ontology_uri: ontology_uri.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ontology_uri(&self) -> &str {
        &self.ontology_uri
    }
}

/// A region qualified by a layer, e.g. a cortical area at a given lamina.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegionLayer {
    region: OntologyTerm,
    layer: OntologyTerm,
}

impl RegionLayer {
    pub fn new(region: OntologyTerm, layer: OntologyTerm) -> Self {
        Self { region, layer }
    }

    pub fn region(&self) -> &OntologyTerm {
        &self.region
    }

    pub fn layer(&self) -> &OntologyTerm {
        &self.layer
    }
}

/// The two shapes an anatomical entity can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKind {
    Simple(OntologyTerm),
    RegionLayer(RegionLayer),
}

/// Wire form of an anatomical entity as returned by the knowledge base.
#[derive(Debug, Deserialize)]
struct RawAnatomicalEntity {
    id: EntityId,
    #[serde(default)]
    simple_entity: Option<OntologyTerm>,
    #[serde(default)]
    region_layer: Option<RegionLayer>,
}

impl TryFrom<RawAnatomicalEntity> for AnatomicalEntity {
    type Error = EntityError;

    fn try_from(raw: RawAnatomicalEntity) -> Result<Self, Self::Error> {
        Self::from_parts(raw.id, raw.simple_entity, raw.region_layer)
    }
}

/// An anatomical entity referenced by a connectivity statement.
///
/// # Examples
///
/// ```
/// use composer_core::{
///     entity::{AnatomicalEntity, OntologyTerm},
///     identifier::EntityId,
/// };
///
/// let entity = AnatomicalEntity::simple(
///     EntityId::new(3),
///     OntologyTerm::new("Spinal cord", "http://purl.obolibrary.org/obo/UBERON_0002240"),
/// );
/// assert_eq!(entity.display_name().name(), "Spinal cord");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawAnatomicalEntity")]
pub struct AnatomicalEntity {
    id: EntityId,
    kind: EntityKind,
}

impl AnatomicalEntity {
    /// Creates a simple entity.
    pub fn simple(id: EntityId, term: OntologyTerm) -> Self {
        Self {
            id,
            kind: EntityKind::Simple(term),
        }
    }

    /// Creates a region/layer entity.
    pub fn region_layer(id: EntityId, region: OntologyTerm, layer: OntologyTerm) -> Self {
        Self {
            id,
            kind: EntityKind::RegionLayer(RegionLayer::new(region, layer)),
        }
    }

    /// Builds an entity from the two optional wire fields.
    ///
    /// The region/layer form takes precedence when both are present.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::Malformed`] when neither field is present.
    pub fn from_parts(
        id: EntityId,
        simple_entity: Option<OntologyTerm>,
        region_layer: Option<RegionLayer>,
    ) -> Result<Self, EntityError> {
        match (simple_entity, region_layer) {
            (simple, Some(region_layer)) => {
                if simple.is_some() {
                    debug!(entity_id:% = id; "Entity carries both forms, using region/layer");
                }
                Ok(Self {
                    id,
                    kind: EntityKind::RegionLayer(region_layer),
                })
            }
            (Some(simple), None) => Ok(Self {
                id,
                kind: EntityKind::Simple(simple),
            }),
            (None, None) => Err(EntityError::Malformed { id }),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    /// Derives the canonical display name and ontology URI of this entity.
    pub fn display_name(&self) -> EntityName {
        EntityName::of(self)
    }
}

/// Canonical display name and ontology URI of an anatomical entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityName {
    name: String,
    ontology_uri: String,
}

impl EntityName {
    /// Names an entity.
    ///
    /// Region/layer entities are rendered as `region(layer)` with both URIs
    /// joined by `", "`; simple entities use their term verbatim.
    pub fn of(entity: &AnatomicalEntity) -> Self {
        match &entity.kind {
            EntityKind::Simple(term) => Self {
                name: term.name.clone(),
                ontology_uri: term.ontology_uri.clone(),
            },
            EntityKind::RegionLayer(RegionLayer { region, layer }) => Self {
                name: format!("{}({})", region.name, layer.name),
                ontology_uri: format!("{}, {}", region.ontology_uri, layer.ontology_uri),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ontology_uri(&self) -> &str {
        &self.ontology_uri
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_entity_name() {
        let entity = AnatomicalEntity::simple(
            EntityId::new(1),
            OntologyTerm::new("Dorsal root ganglion", "UBERON:0000044"),
        );
        let name = entity.display_name();
        assert_eq!(name.name(), "Dorsal root ganglion");
        assert_eq!(name.ontology_uri(), "UBERON:0000044");
    }

    #[test]
    fn test_region_layer_entity_name() {
        let entity = AnatomicalEntity::region_layer(
            EntityId::new(2),
            OntologyTerm::new("Spinal cord", "UBERON:0002240"),
            OntologyTerm::new("lamina I", "UBERON:0006118"),
        );
        let name = entity.display_name();
        assert_eq!(name.name(), "Spinal cord(lamina I)");
        assert_eq!(name.ontology_uri(), "UBERON:0002240, UBERON:0006118");
    }

    #[test]
    fn test_deserialize_simple() {
        let entity: AnatomicalEntity = serde_json::from_str(
            r#"{"id": 5, "simple_entity": {"name": "Heart", "ontology_uri": "u:1"}, "region_layer": null}"#,
        )
        .unwrap();
        assert_eq!(entity.id(), EntityId::new(5));
        assert!(matches!(entity.kind(), EntityKind::Simple(_)));
    }

    #[test]
    fn test_deserialize_region_layer() {
        let entity: AnatomicalEntity = serde_json::from_str(
            r#"{
                "id": 6,
                "simple_entity": null,
                "region_layer": {
                    "region": {"name": "Cortex", "ontology_uri": "u:r"},
                    "layer": {"name": "L5", "ontology_uri": "u:l"}
                }
            }"#,
        )
        .unwrap();
        assert_eq!(entity.display_name().name(), "Cortex(L5)");
    }

    #[test]
    fn test_region_layer_wins_over_simple() {
        let entity = AnatomicalEntity::from_parts(
            EntityId::new(7),
            Some(OntologyTerm::new("ignored", "")),
            Some(RegionLayer::new(
                OntologyTerm::new("Region", "r"),
                OntologyTerm::new("Layer", "l"),
            )),
        )
        .unwrap();
        assert_eq!(entity.display_name().name(), "Region(Layer)");
    }

    #[test]
    fn test_malformed_entity_is_rejected() {
        let err = AnatomicalEntity::from_parts(EntityId::new(8), None, None).unwrap_err();
        assert_eq!(err, EntityError::Malformed { id: EntityId::new(8) });

        let result: Result<AnatomicalEntity, _> = serde_json::from_str(r#"{"id": 8}"#);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("neither `simple_entity` nor `region_layer`"));
    }
}
