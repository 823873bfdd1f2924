//! CLI logic for the Composer path diagram tool.
//!
//! This module contains the core CLI logic: read a statement document and an
//! optional saved layout, assemble the path diagram, and write it out.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{info, warn};

use composer::{ComposerError, DiagramBuilder, layout::PriorPositions};

/// Run the Composer CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ComposerError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid statement documents
/// - Serialization errors
pub fn run(args: &Args) -> Result<(), ComposerError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing statement"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let statement = builder.parse_statement(&source)?;

    // A saved layout that cannot be used only costs the saved positions
    let prior = match &args.layout {
        Some(path) => builder.parse_serialized_graph(&fs::read_to_string(path)?),
        None => PriorPositions::new(),
    };

    let diagram = builder.assemble(
        statement.details(),
        statement.forward_connections(),
        &prior,
    );
    for gap in diagram.gaps() {
        warn!(
            node_id:% = gap.target(),
            predecessor:% = gap.predecessor(),
            reason:? = gap.reason();
            "Link dropped"
        );
    }

    fs::write(&args.output, builder.render_json(&diagram)?)?;
    info!(output_file = args.output; "Diagram exported successfully");

    if let Some(path) = &args.save_layout {
        let layout = builder.serialize_layout(&diagram);
        let text = serde_json::to_string_pretty(&layout).map_err(ComposerError::Export)?;
        fs::write(path, text)?;
        info!(layout_file = path; "Layout saved");
    }

    Ok(())
}
