//! Composer - builds connectivity path diagrams from knowledge-base statements.
//!
//! A connectivity statement lists the origins, ordered vias and destinations
//! of a neural pathway. This crate turns such a statement, together with a
//! layout saved by a previous editing session, into a `{nodes, links}` graph
//! ready for an interactive diagram surface.

pub mod config;
pub mod layout;
pub mod serialized;

mod assemble;
mod diagram;
mod error;
mod structure;

pub use composer_core::{entity, geometry, identifier, statement};

pub use assemble::{assemble, assemble_with_positions};
pub use diagram::{
    Adjacency, AnatomicalType, DiagramLink, DiagramNode, GapReason, LinkGap, NodeId, NodeKind,
    PathDiagram, PortKind,
};
pub use error::ComposerError;

use log::{debug, info, trace};
use serde_json::Value;

use composer_core::statement::{ConnectivityDetails, ForwardConnection, StatementDocument};

use config::AppConfig;
use layout::PriorPositions;

/// Builder for assembling path diagrams.
///
/// This provides an API for reading statements and saved layouts, assembling
/// the diagram, and writing it back out.
///
/// # Examples
///
/// ```rust
/// use composer::{DiagramBuilder, config::AppConfig};
///
/// let source = r#"{
///     "origins": [{"id": 1, "simple_entity": {"name": "Ganglion", "ontology_uri": "u:1"}}],
///     "destinations": [{
///         "type": "AXON-T",
///         "anatomical_entities": [{"id": 2, "simple_entity": {"name": "Heart", "ontology_uri": "u:2"}}],
///         "from_entities": [{"id": 1, "simple_entity": {"name": "Ganglion", "ontology_uri": "u:1"}}]
///     }]
/// }"#;
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let statement = builder.parse_statement(source).expect("Failed to parse");
/// let diagram = builder.assemble(
///     statement.details(),
///     statement.forward_connections(),
///     &Default::default(),
/// );
/// assert_eq!(diagram.links().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration used by this builder.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a statement document into connectivity details and forward
    /// connections.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::Statement`] for invalid JSON and for records
    /// that break data integrity, such as an anatomical entity with neither
    /// a simple nor a region/layer form.
    pub fn parse_statement(&self, source: &str) -> Result<StatementDocument, ComposerError> {
        info!("Parsing statement document");

        let statement: StatementDocument = serde_json::from_str(source)
            .map_err(|err| ComposerError::new_statement_error(err, source))?;

        debug!(
            forward_connections = statement.forward_connections().len();
            "Statement parsed successfully"
        );
        trace!(statement:?; "Parsed statement");

        Ok(statement)
    }

    /// Read saved node positions from a serialized layout.
    ///
    /// Never fails: unusable input yields an empty set of positions.
    pub fn parse_serialized_graph(&self, source: &str) -> PriorPositions {
        serialized::parse_serialized_graph(source)
    }

    /// Assemble the path diagram of a statement.
    pub fn assemble(
        &self,
        details: &ConnectivityDetails,
        forward_connections: &[ForwardConnection],
        prior: &PriorPositions,
    ) -> PathDiagram {
        assemble_with_positions(details, forward_connections, prior, self.config.layout())
    }

    /// Assemble the path diagram of a statement from a serialized layout value.
    pub fn assemble_with_graph(
        &self,
        details: &ConnectivityDetails,
        forward_connections: &[ForwardConnection],
        serialized_graph: Option<&Value>,
    ) -> PathDiagram {
        assemble(
            details,
            forward_connections,
            serialized_graph,
            self.config.layout(),
        )
    }

    /// Serialize the layout of a diagram so it can be saved and reloaded.
    pub fn serialize_layout(&self, diagram: &PathDiagram) -> Value {
        serialized::serialize_layout(diagram)
    }

    /// Render a diagram as pretty-printed JSON for the diagram surface.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::Export`] if serialization fails.
    pub fn render_json(&self, diagram: &PathDiagram) -> Result<String, ComposerError> {
        let json = serde_json::to_string_pretty(diagram).map_err(ComposerError::Export)?;
        info!(bytes = json.len(); "Diagram rendered to JSON");
        Ok(json)
    }
}
