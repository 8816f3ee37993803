//! JSONL reader for project dumps.
//!
//! Each non-empty line holds one JSON object with the project under
//! `data`. Reading fails as a whole only when the file cannot be opened
//! or a line cannot be read. A line that does not parse is reported as a
//! [`LineError`] and the caller decides what to do with it.

use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::{LineError, SourceError, SourceResult};
use crate::models::{Envelope, Project};

/// Outcome of parsing one source line.
#[derive(Debug, Clone)]
pub enum SourceLine {
    /// Blank or whitespace-only line.
    Blank,
    /// Valid envelope with a usable payload.
    Payload(Value),
}

/// Parse one line into its payload.
///
/// `line_num` is 1-based and only used for error context.
pub fn parse_line(line: &str, line_num: usize) -> Result<SourceLine, LineError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(SourceLine::Blank);
    }

    let value: Value = serde_json::from_str(trimmed)
        .map_err(|e| LineError::new(line_num, e.to_string()).with_context("invalid JSON"))?;
    let envelope = Envelope::from_value(value)
        .ok_or_else(|| LineError::new(line_num, "line is not a JSON object"))?;

    envelope
        .payload()
        .map(SourceLine::Payload)
        .ok_or_else(|| LineError::new(line_num, "no 'data' field or 'data' is empty"))
}

/// Wrap a payload as a [`Project`]. Fails only for non-object payloads.
pub fn decode_project(payload: Value, line_num: usize) -> Result<Project, LineError> {
    Project::from_value(payload).ok_or_else(|| {
        LineError::new(line_num, "'data' is not an object").with_context("unexpected payload")
    })
}

/// Iterator over the lines of a JSONL source.
///
/// Yields `(line_num, Ok(SourceLine) | Err(LineError))` for readable
/// lines, and stops with a [`SourceError`] on the first read failure.
pub struct JsonLines<R> {
    lines: std::io::Lines<BufReader<R>>,
    line_num: usize,
}

impl<R: Read> JsonLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
            line_num: 0,
        }
    }
}

impl<R: Read> Iterator for JsonLines<R> {
    type Item = SourceResult<(usize, Result<SourceLine, LineError>)>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        self.line_num += 1;
        let line_num = self.line_num;

        Some(
            line.map(|l| (line_num, parse_line(&l, line_num)))
                .map_err(|source| SourceError::Read { line: line_num, source }),
        )
    }
}

/// Open a JSONL file for line-by-line parsing.
pub fn open_jsonl<P: AsRef<Path>>(path: P) -> SourceResult<JsonLines<File>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SourceError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(JsonLines::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines() {
        assert!(matches!(parse_line("", 1), Ok(SourceLine::Blank)));
        assert!(matches!(parse_line("   \t ", 2), Ok(SourceLine::Blank)));
    }

    #[test]
    fn test_valid_envelope() {
        let line = r#"  {"data": {"name": "Widget", "state": "live"}}  "#;
        match parse_line(line, 1) {
            Ok(SourceLine::Payload(v)) => assert_eq!(v["name"], "Widget"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_line(r#"{"data": {"name": "#, 7).unwrap_err();
        assert_eq!(err.line, 7);
        assert_eq!(err.context.as_deref(), Some("invalid JSON"));
    }

    #[test]
    fn test_not_an_object() {
        assert!(parse_line("[1, 2, 3]", 1).is_err());
        assert!(parse_line("42", 1).is_err());

        let single = r#"[{"category": {"parent_id": 16}, "state": "successful", "name": "Arr"}]"#;
        let err = parse_line(single, 5).unwrap_err();
        assert_eq!(err.line, 5);
        assert!(err.message.contains("not a JSON object"));

        assert!(parse_line(r#"[{"data": {"name": "A"}}]"#, 6).is_err());
    }

    #[test]
    fn test_missing_or_null_data() {
        let err = parse_line(r#"{"id": 5}"#, 3).unwrap_err();
        assert!(err.message.contains("data"));
        assert!(parse_line(r#"{"data": null}"#, 4).is_err());
    }

    #[test]
    fn test_decode_project_requires_object() {
        let err = decode_project(serde_json::json!("just text"), 9).unwrap_err();
        assert_eq!(err.line, 9);
        assert_eq!(err.context.as_deref(), Some("unexpected payload"));

        let project = decode_project(serde_json::json!({"name": 42, "deadline": 1.5e9}), 10).unwrap();
        assert_eq!(project.display_name(), serde_json::json!(42));
    }

    #[test]
    fn test_json_lines_numbering() {
        let input = "{\"data\": {\"name\": \"a\"}}\n\nnot json\n{\"data\": {\"name\": \"b\"}}\n";
        let items: Vec<_> = JsonLines::new(input.as_bytes())
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(items.len(), 4);
        assert_eq!(items[0].0, 1);
        assert!(matches!(items[1].1, Ok(SourceLine::Blank)));
        assert!(items[2].1.is_err());
        assert_eq!(items[3].0, 4);
    }

    #[test]
    fn test_invalid_utf8_is_read_error() {
        let bytes: &[u8] = b"{\"data\": {\"name\": \"a\"}}\n\xff\xfe\n";
        let mut lines = JsonLines::new(bytes);
        assert!(lines.next().unwrap().is_ok());
        match lines.next().unwrap() {
            Err(SourceError::Read { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_open_missing_file() {
        let result = open_jsonl("/definitely/not/here.jsonl");
        assert!(matches!(result, Err(SourceError::Open { .. })));
    }
}
