//! Error types for the kickfilter pipelines.
//!
//! Errors come in two tiers:
//!
//! - [`LineError`] - a single source line could not be used. Logged and
//!   skipped, never aborts a run.
//! - [`SourceError`], [`OutputError`], [`ExportError`] - a whole phase
//!   failed (reading the dump, writing a report).
//! - [`PipelineError`] - top-level error of a filter run.
//!
//! Conversion is via `From` so `?` works across boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Per-record Errors
// =============================================================================

/// A source line that was skipped, with the line number it came from.
#[derive(Debug, Clone)]
pub struct LineError {
    pub line: usize,
    pub context: Option<String>,
    pub message: String,
}

impl std::fmt::Display for LineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.context {
            Some(ctx) => write!(f, "Line {} ({}): {}", self.line, ctx, self.message),
            None => write!(f, "Line {}: {}", self.line, self.message),
        }
    }
}

impl std::error::Error for LineError {}

impl LineError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            context: None,
            message: message.into(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

// =============================================================================
// Source Errors
// =============================================================================

/// Errors while reading the JSONL dump.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Source file could not be opened.
    #[error("Cannot open '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line could not be read (I/O or invalid UTF-8).
    #[error("Cannot read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Output Errors
// =============================================================================

/// Errors while writing a JSON or CSV report.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Output file could not be created or flushed.
    #[error("Cannot write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writer failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors from the standalone JSON to CSV exporter.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Input document could not be read.
    #[error("Cannot read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input is not an array of project records.
    #[error("'{}' is not an array of project records: {source}", .path.display())]
    Shape {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Writing the CSV file failed.
    #[error("Error writing CSV: {0}")]
    Output(#[from] OutputError),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level error of a filter run.
///
/// The variant tells which phase failed. A [`PipelineError::Tabular`]
/// means the JSON document was already written and stays on disk.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Reading the dump failed, nothing was written.
    #[error("Error reading file: {0}")]
    Source(#[from] SourceError),

    /// Writing the JSON document failed, CSV was not attempted.
    #[error("Error saving JSON: {0}")]
    Document(#[source] OutputError),

    /// Writing the CSV file failed.
    #[error("Error writing CSV: {0}")]
    Tabular(#[source] OutputError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for source reading.
pub type SourceResult<T> = Result<T, SourceError>;

/// Result type for report writing.
pub type OutputResult<T> = Result<T, OutputError>;

/// Result type for the exporter.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for a filter run.
pub type PipelineResult<T> = Result<T, PipelineError>;
