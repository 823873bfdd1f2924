//! Error types for Composer operations.
//!
//! This module provides the main error type [`ComposerError`]. Gaps inside a
//! statement's graph (unresolved predecessors, missing ports, unusable saved
//! layouts) are not errors; they are reported on the assembled
//! [`PathDiagram`](crate::PathDiagram) instead.

use std::io;

use serde_json::error::Category;
use thiserror::Error;

/// The main error type for Composer operations.
///
/// # Diagnostic Variants
///
/// The `Statement` variant keeps the offending source document so that the
/// line and column reported by the JSON reader can be shown in context.
#[derive(Debug, Error)]
pub enum ComposerError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid statement document: {err}")]
    Statement { err: serde_json::Error, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[source] serde_json::Error),
}

impl ComposerError {
    /// Create a new `Statement` error with the associated source document.
    pub fn new_statement_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Statement {
            err,
            src: src.into(),
        }
    }

    /// Checks whether this error reports well-formed JSON carrying invalid
    /// records, such as an anatomical entity with no name.
    pub fn is_data_integrity(&self) -> bool {
        matches!(self, Self::Statement { err, .. } if err.classify() == Category::Data)
    }
}
