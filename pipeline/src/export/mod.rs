//! JSON and CSV report writers, and the standalone JSON to CSV exporter.
//!
//! Both reports use the fixed [`COLUMNS`] schema. The JSON report is a
//! pretty-printed array, the CSV report has a header row followed by one
//! row per record, CRLF-terminated, with minimal quoting.

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{ExportError, ExportResult, OutputError, OutputResult};
use crate::logs::RunLog;
use crate::models::{ProjectRecord, COLUMNS};

/// Progress notice interval of the standalone exporter.
pub const EXPORT_PROGRESS_INTERVAL: usize = 1_000;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> OutputError + '_ {
    move |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Two-space pretty printer that writes every non-ASCII character as a
/// `\uXXXX` escape (UTF-16 surrogate pairs above U+FFFF).
struct AsciiPretty<'a> {
    inner: PrettyFormatter<'a>,
}

impl AsciiPretty<'_> {
    fn new() -> Self {
        Self {
            inner: PrettyFormatter::with_indent(b"  "),
        }
    }
}

impl Formatter for AsciiPretty<'_> {
    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            if c.is_ascii() {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..i])?;
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + c.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

/// Write records as a pretty-printed, ASCII-only JSON array.
pub fn write_json(records: &[ProjectRecord], path: impl AsRef<Path>) -> OutputResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(io_error(path))?;
    let mut writer = BufWriter::new(file);
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, AsciiPretty::new());
    records.serialize(&mut ser)?;
    writer.flush().map_err(io_error(path))?;
    Ok(())
}

/// Write records as CSV and return the number of data rows.
///
/// `progress` builds the notice logged every `progress_interval` rows
/// (0 disables notices). A failure leaves whatever was already written.
pub fn write_csv(
    records: &[ProjectRecord],
    path: impl AsRef<Path>,
    progress_interval: usize,
    progress: impl Fn(usize) -> String,
    log: &mut RunLog,
) -> OutputResult<usize> {
    let path = path.as_ref();
    let file = File::create(path).map_err(io_error(path))?;
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(file);

    writer.write_record(COLUMNS)?;

    let mut written = 0;
    for record in records {
        writer.write_record(record.to_row())?;
        written += 1;
        if progress_interval > 0 && written % progress_interval == 0 {
            log.info(progress(written));
        }
    }

    writer.flush().map_err(io_error(path))?;
    Ok(written)
}

/// Load a JSON report back into records.
pub fn load_records(path: impl AsRef<Path>) -> ExportResult<Vec<ProjectRecord>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ExportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ExportError::Shape {
        path: path.to_path_buf(),
        source,
    })
}

/// Convert a JSON report into a CSV report.
///
/// Returns the number of rows written. Nothing is written when the input
/// cannot be loaded.
pub fn export_json_to_csv(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    log: &mut RunLog,
) -> ExportResult<usize> {
    let output = output.as_ref();
    let records = load_records(input)?;

    let rows = write_csv(
        &records,
        output,
        EXPORT_PROGRESS_INTERVAL,
        |n| format!("Processed {} projects", n),
        log,
    )?;

    log.success(format!("Total projects converted: {}", rows));
    log.success(format!("Saved to {}", output.display()));
    Ok(rows)
}
