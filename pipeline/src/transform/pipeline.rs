//! Filter run: JSONL dump to JSON report and CSV report.
//!
//! ```text
//! JSONL ──▶ parse line ──▶ unwrap `data` ──▶ count ──▶ select ──▶ derive ──▶ Vec<ProjectRecord>
//!                                                                              │
//!                                           CSV report ◀── JSON report ◀───────┘
//! ```
//!
//! Bad lines are logged and skipped. Failing to read the dump aborts the
//! run before anything is written. Failing to write the JSON report
//! aborts before the CSV report is attempted.
//!
//! # Example
//!
//! ```rust,ignore
//! use kickfilter::{filter_projects, FilterOptions, RunLog};
//!
//! let mut log = RunLog::stdout();
//! let summary = filter_projects(
//!     "kickstarter_dataset.json",
//!     "filtered_kickstarter_projects.json",
//!     "kickstarter_projects_FINAL.csv",
//!     &FilterOptions::default(),
//!     &mut log,
//! )?;
//! println!("{} projects selected", summary.successful);
//! ```

use chrono::{DateTime, Utc};
use std::io::Read;
use std::path::{Path, PathBuf};

use super::select::{is_selected, to_record, TECHNOLOGY_PARENT_ID};
use crate::error::{PipelineError, PipelineResult, SourceResult};
use crate::export::{write_csv, write_json};
use crate::logs::RunLog;
use crate::models::ProjectRecord;
use crate::parser::{decode_project, open_jsonl, JsonLines, SourceLine};

/// Options for a filter run
#[derive(Debug, Clone)]
pub struct FilterOptions {
    /// Category `parent_id` to keep
    pub parent_id: i64,

    /// Fewer selected projects than this triggers a warning
    pub expected_successful: usize,

    /// Emit a progress notice every this many records (0 disables)
    pub progress_interval: usize,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            parent_id: TECHNOLOGY_PARENT_ID,
            expected_successful: 14_000,
            progress_interval: 1_000,
        }
    }
}

/// Projects kept from one pass over the dump.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Selected records, in source order
    pub records: Vec<ProjectRecord>,

    /// Entries with a usable payload
    pub total_processed: usize,

    /// Entries that passed the selection predicate
    pub successful: usize,
}

/// Result of a complete filter run
#[derive(Debug, Clone)]
pub struct FilterSummary {
    pub total_processed: usize,
    pub successful: usize,
    pub json_path: PathBuf,
    pub csv_path: PathBuf,
    pub csv_rows: usize,
}

/// Run the filter with the current time as the days-left reference.
pub fn filter_projects(
    input: impl AsRef<Path>,
    json_output: impl AsRef<Path>,
    csv_output: impl AsRef<Path>,
    options: &FilterOptions,
    log: &mut RunLog,
) -> PipelineResult<FilterSummary> {
    filter_projects_at(input, json_output, csv_output, options, Utc::now(), log)
}

/// Run the filter with an explicit run time.
pub fn filter_projects_at(
    input: impl AsRef<Path>,
    json_output: impl AsRef<Path>,
    csv_output: impl AsRef<Path>,
    options: &FilterOptions,
    now: DateTime<Utc>,
    log: &mut RunLog,
) -> PipelineResult<FilterSummary> {
    let json_output = json_output.as_ref();
    let csv_output = csv_output.as_ref();

    log.info(format!(
        "Applying filters: Technology (parent_id={}), Successful (state='successful' or percent_funded>=100)",
        options.parent_id
    ));

    let lines = open_jsonl(input)?;
    let selection = select_projects(lines, options, now, log)?;

    log.info(format!("Total projects processed: {}", selection.total_processed));
    log.success(format!(
        "Total successful Technology projects: {}",
        selection.successful
    ));
    if selection.successful < options.expected_successful {
        log.warning(format!(
            "Found only {} successful Technology projects, expected ~{}. Check dataset for 'parent_id': {}.",
            selection.successful, options.expected_successful, options.parent_id
        ));
    }

    write_json(&selection.records, json_output).map_err(PipelineError::Document)?;
    log.success(format!(
        "Saved {} projects to {}",
        selection.records.len(),
        json_output.display()
    ));

    let csv_rows = write_csv(
        &selection.records,
        csv_output,
        options.progress_interval,
        |n| format!("Converted {} projects to CSV", n),
        log,
    )
    .map_err(PipelineError::Tabular)?;
    log.success(format!("Total projects converted to CSV: {}", csv_rows));
    log.success(format!("Saved to {}", csv_output.display()));

    Ok(FilterSummary {
        total_processed: selection.total_processed,
        successful: selection.successful,
        json_path: json_output.to_path_buf(),
        csv_path: csv_output.to_path_buf(),
        csv_rows,
    })
}

/// Single pass over the dump: parse, count, select, derive.
///
/// Only read failures are returned as errors. Lines that fail to parse or
/// decode are logged and skipped without being counted.
pub fn select_projects<R: Read>(
    lines: JsonLines<R>,
    options: &FilterOptions,
    now: DateTime<Utc>,
    log: &mut RunLog,
) -> SourceResult<Selection> {
    let mut selection = Selection::default();

    for item in lines {
        let (line_num, parsed) = item?;

        let payload = match parsed {
            Ok(SourceLine::Blank) => continue,
            Ok(SourceLine::Payload(payload)) => payload,
            Err(e) => {
                log.warning(format!("Skipping invalid entry: {}", e));
                continue;
            }
        };

        let project = match decode_project(payload, line_num) {
            Ok(project) => project,
            Err(e) => {
                log.error(format!("Error processing project: {}", e));
                continue;
            }
        };

        selection.total_processed += 1;
        if !is_selected(&project, options.parent_id) {
            continue;
        }

        selection.successful += 1;
        selection.records.push(to_record(&project, now));

        if options.progress_interval > 0 && selection.total_processed % options.progress_interval == 0 {
            log.info(format!(
                "Processed {} projects, {} successful Technology projects found",
                selection.total_processed, selection.successful
            ));
        }
    }

    Ok(selection)
}
