//! # kickfilter - successful Technology projects from a crowdfunding dump
//!
//! Reads a JSONL project dump, keeps the Technology projects that were
//! funded, and writes them as a JSON report and a CSV report. A second
//! entry point converts an existing JSON report to CSV.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ JSONL dump  │────▶│   Parser    │────▶│   Filter    │────▶│ JSON + CSV  │
//! │ {"data":..} │     │ (per line)  │     │ (+ derive)  │     │  reports    │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │ JSON report │────▶│  CSV report │      (export)
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kickfilter::{filter_projects, FilterOptions, RunLog};
//!
//! let mut log = RunLog::stdout();
//! let summary = filter_projects("dump.jsonl", "out.json", "out.csv", &FilterOptions::default(), &mut log)?;
//! println!("Selected {} of {} projects", summary.successful, summary.total_processed);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`logs`] - Per-run log sink
//! - [`models`] - Source payload and output record
//! - [`parser`] - JSONL line parsing
//! - [`transform`] - Selection, derivation and the filter run
//! - [`export`] - JSON / CSV writers and the JSON to CSV exporter

// Core modules
pub mod error;
pub mod logs;
pub mod models;

// Parsing
pub mod parser;

// Filtering
pub mod transform;

// Output
pub mod export;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ExportError,
    LineError,
    OutputError,
    PipelineError,
    SourceError,
};

// =============================================================================
// Re-exports - Logging
// =============================================================================

pub use logs::{LogEntry, LogLevel, RunLog};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    DaysLeft,
    Envelope,
    Project,
    ProjectRecord,
    COLUMNS,
};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{decode_project, open_jsonl, parse_line, JsonLines, SourceLine};

// =============================================================================
// Re-exports - Filter
// =============================================================================

pub use transform::{
    filter_projects,
    filter_projects_at,
    is_selected,
    select_projects,
    to_record,
    FilterOptions,
    FilterSummary,
    Selection,
};

// =============================================================================
// Re-exports - Export
// =============================================================================

pub use export::{export_json_to_csv, load_records, write_csv, write_json};
