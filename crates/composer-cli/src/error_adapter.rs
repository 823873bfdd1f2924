//! Error adapter for converting ComposerError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Statement errors
//! point at the line and column where the JSON reader gave up.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};
use serde_json::error::Category;

use composer::ComposerError;

/// Adapter for an invalid statement document.
///
/// This adapter wraps a [`serde_json::Error`] together with the document it
/// was raised for and implements [`MietteDiagnostic`] to show a source
/// snippet in the CLI.
pub struct StatementAdapter<'a> {
    /// The wrapped JSON error
    err: &'a serde_json::Error,
    /// Source document for displaying snippets
    src: &'a str,
}

impl<'a> StatementAdapter<'a> {
    /// Create a new statement adapter.
    pub fn new(err: &'a serde_json::Error, src: &'a str) -> Self {
        Self { err, src }
    }

    /// Byte span of the error location, if the reader reported one.
    fn span(&self) -> Option<SourceSpan> {
        let offset = line_column_to_offset(self.src, self.err.line(), self.err.column())?;
        let len = usize::from(offset < self.src.len());
        Some(SourceSpan::new(offset.into(), len))
    }
}

impl fmt::Debug for StatementAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatementAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for StatementAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid statement document")
    }
}

impl std::error::Error for StatementAdapter<'_> {}

impl MietteDiagnostic for StatementAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.err.classify() {
            Category::Data => "composer::statement::data",
            Category::Syntax | Category::Eof => "composer::statement::syntax",
            Category::Io => "composer::statement::io",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self.err.classify() {
            Category::Data => Some(Box::new(
                "every anatomical entity needs an `id` and either `simple_entity` or `region_layer`",
            )),
            Category::Eof => Some(Box::new("the document ends before it is complete")),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span()?;
        let message = Some(self.err.to_string());
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(message, span),
        )))
    }
}

/// Adapter for [`ComposerError`] variants without a source document.
pub struct ErrorAdapter<'a>(pub &'a ComposerError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ComposerError::Io(_) => "composer::io",
            ComposerError::Statement { .. } => return None,
            ComposerError::Config(_) => "composer::config",
            ComposerError::Export(_) => "composer::export",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// An invalid statement with source location information.
    Statement(StatementAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Statement(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Statement(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Statement(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Statement(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Statement(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Statement(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a 1-based line and column into a byte offset into `src`.
///
/// The JSON reader reports column 0 when it fails right after a newline.
fn line_column_to_offset(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start = if line == 1 {
        0
    } else {
        src.match_indices('\n').nth(line - 2).map(|(idx, _)| idx + 1)?
    };
    let offset = line_start + column.saturating_sub(1);
    Some(offset.min(src.len()))
}

/// Convert a [`ComposerError`] into a list of reportable errors.
pub fn to_reportables(err: &ComposerError) -> Vec<Reportable<'_>> {
    match err {
        ComposerError::Statement { err: json_err, src } => {
            vec![Reportable::Statement(StatementAdapter::new(json_err, src))]
        }
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
