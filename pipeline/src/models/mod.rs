//! Domain models for the kickfilter pipelines.
//!
//! - [`Envelope`] - one JSONL line, wrapping the payload in `data`
//! - [`Project`] - field-by-field view of the payload with per-field defaults
//! - [`ProjectRecord`] - the seven-field record written to JSON and CSV
//! - [`DaysLeft`] - remaining campaign days, or `"Expired"`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// CSV header, in output order.
pub const COLUMNS: [&str; 7] = [
    "name",
    "image_url",
    "video_url",
    "funding_amount",
    "funding_percent",
    "days_left",
    "end_date",
];

/// Placeholder for values the dump does not provide.
pub const UNKNOWN: &str = "Unknown";

/// Placeholder for a missing video or a finished campaign.
pub const EXPIRED: &str = "Expired";

// =============================================================================
// Source
// =============================================================================

/// One source line: a JSON object carrying the project under `data`.
#[derive(Debug, Clone)]
pub struct Envelope {
    fields: Map<String, Value>,
}

impl Envelope {
    /// Wrap a parsed line. Anything but a JSON object is not an envelope.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// The payload, if present and non-empty.
    ///
    /// `null`, `false`, `0`, `""`, `[]` and `{}` all count as missing.
    pub fn payload(mut self) -> Option<Value> {
        self.fields.remove("data").filter(is_truthy)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Numeric reading of a JSON value. Booleans count as 0 and 1.
pub fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// The project payload, read field by field.
///
/// No field is required and none is type-checked up front: each accessor
/// applies its own default, and values the output copies verbatim
/// (`name`, urls, funding figures) keep whatever JSON type they had.
#[derive(Debug, Clone, Default)]
pub struct Project {
    fields: Map<String, Value>,
}

impl Project {
    /// Wrap a payload. Only JSON objects are projects.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    fn nested(&self, key: &str, inner: &str) -> Option<&Value> {
        self.field(key).and_then(|v| v.as_object()).and_then(|o| o.get(inner))
    }

    /// `category.parent_id` as a number, so `16` and `16.0` compare equal.
    pub fn parent_id(&self) -> Option<f64> {
        self.nested("category", "parent_id").and_then(numeric)
    }

    pub fn state(&self) -> Option<&str> {
        self.field("state").and_then(|v| v.as_str())
    }

    pub fn percent_funded(&self) -> Option<&Value> {
        self.field("percent_funded")
    }

    pub fn converted_pledged_amount(&self) -> Option<&Value> {
        self.field("converted_pledged_amount")
    }

    /// `percent_funded` as a number for the threshold check.
    ///
    /// Missing or `null` reads as 0. Non-numeric values return `None`.
    pub fn percent_for_threshold(&self) -> Option<f64> {
        match self.percent_funded() {
            None | Some(Value::Null) => Some(0.0),
            Some(v) => numeric(v),
        }
    }

    pub fn display_name(&self) -> Value {
        self.field("name")
            .cloned()
            .unwrap_or_else(|| Value::from(UNKNOWN))
    }

    pub fn image_url(&self) -> Value {
        self.nested("photo", "ed")
            .cloned()
            .unwrap_or_else(|| Value::from(""))
    }

    /// `video.base`, or `"Expired"` when there is no usable video entry.
    pub fn video_url(&self) -> Value {
        match self.field("video") {
            Some(video) if is_truthy(video) => self.nested("video", "base").cloned(),
            _ => None,
        }
        .unwrap_or_else(|| Value::from(EXPIRED))
    }

    /// Deadline in epoch seconds, integer or fractional.
    ///
    /// Zero and non-numeric values are treated as missing.
    pub fn deadline(&self) -> Option<f64> {
        self.field("deadline")
            .and_then(numeric)
            .filter(|&d| d != 0.0)
    }
}

// =============================================================================
// Output
// =============================================================================

/// Remaining whole days of a live campaign, or `"Expired"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DaysLeft {
    Days(i64),
    Label(String),
}

impl DaysLeft {
    pub fn expired() -> Self {
        Self::Label(EXPIRED.to_string())
    }
}

impl fmt::Display for DaysLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Days(d) => write!(f, "{}", d),
            Self::Label(s) => f.write_str(s),
        }
    }
}

/// A selected project, as written to both output files.
///
/// Field order matches [`COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Source `name`, passed through, or `"Unknown"`.
    pub name: Value,
    pub image_url: Value,
    pub video_url: Value,
    /// `"$15,000"`, or the source value passed through.
    pub funding_amount: Value,
    /// `"150.00%"`, or the source value passed through.
    pub funding_percent: Value,
    pub days_left: DaysLeft,
    /// `YYYY-MM-DD` or `"Unknown"`.
    pub end_date: String,
}

impl ProjectRecord {
    /// Cell values in [`COLUMNS`] order.
    pub fn to_row(&self) -> [String; 7] {
        [
            cell_text(&self.name),
            cell_text(&self.image_url),
            cell_text(&self.video_url),
            cell_text(&self.funding_amount),
            cell_text(&self.funding_percent),
            self.days_left.to_string(),
            self.end_date.clone(),
        ]
    }
}

/// Text of a passthrough JSON value inside a CSV cell.
///
/// Strings are written verbatim and `null` becomes an empty cell.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn project(value: Value) -> Project {
        Project::from_value(value).unwrap()
    }

    fn envelope(line: &str) -> Option<Envelope> {
        Envelope::from_value(serde_json::from_str(line).unwrap())
    }

    #[test]
    fn test_envelope_payload() {
        assert!(envelope(r#"{"data": {"name": "A"}}"#).unwrap().payload().is_some());
        assert!(envelope(r#"{"data": null}"#).unwrap().payload().is_none());
        assert!(envelope(r#"{"data": {}}"#).unwrap().payload().is_none());
        assert!(envelope(r#"{"other": 1}"#).unwrap().payload().is_none());
    }

    #[test]
    fn test_envelope_requires_object() {
        assert!(envelope(r#"[{"category": {"parent_id": 16}, "name": "Arr"}]"#).is_none());
        assert!(envelope(r#"[{"data": {"name": "A"}}]"#).is_none());
        assert!(envelope("42").is_none());
        assert!(envelope(r#""data""#).is_none());
    }

    #[test]
    fn test_project_requires_object() {
        assert!(Project::from_value(json!("text")).is_none());
        assert!(Project::from_value(json!([{"name": "A"}])).is_none());
        assert!(Project::from_value(json!({})).is_some());
    }

    #[test]
    fn test_project_defaults() {
        let p = project(json!({}));
        assert_eq!(p.parent_id(), None);
        assert_eq!(p.display_name(), json!("Unknown"));
        assert_eq!(p.image_url(), json!(""));
        assert_eq!(p.video_url(), json!("Expired"));
        assert_eq!(p.percent_for_threshold(), Some(0.0));
        assert_eq!(p.deadline(), None);
    }

    #[test]
    fn test_project_video_without_base() {
        let p = project(json!({"video": {"high": "x.mp4"}}));
        assert_eq!(p.video_url(), json!("Expired"));

        let p = project(json!({"video": null}));
        assert_eq!(p.video_url(), json!("Expired"));

        let p = project(json!({"video": {"base": "https://v/1.mp4"}}));
        assert_eq!(p.video_url(), json!("https://v/1.mp4"));
    }

    #[test]
    fn test_project_field_access() {
        let p = project(json!({
            "category": {"parent_id": 16, "name": "Gadgets"},
            "state": "live",
            "percent_funded": 87.5,
            "photo": {"ed": "https://img/ed.jpg", "thumb": "t.jpg"},
            "deadline": 0
        }));
        assert_eq!(p.parent_id(), Some(16.0));
        assert_eq!(p.state(), Some("live"));
        assert_eq!(p.percent_for_threshold(), Some(87.5));
        assert_eq!(p.image_url(), json!("https://img/ed.jpg"));
        assert_eq!(p.deadline(), None);
    }

    #[test]
    fn test_loosely_typed_fields() {
        let p = project(json!({
            "category": {"parent_id": 16.0},
            "name": 42,
            "deadline": 1893456000.0
        }));
        assert_eq!(p.parent_id(), Some(16.0));
        assert_eq!(p.display_name(), json!(42));
        assert_eq!(p.deadline(), Some(1893456000.0));

        let p = project(json!({"name": null, "category": "tech", "deadline": "soon"}));
        assert_eq!(p.display_name(), json!(null));
        assert_eq!(p.parent_id(), None);
        assert_eq!(p.deadline(), None);
    }

    #[test]
    fn test_non_numeric_percent() {
        let p = project(json!({"percent_funded": "lots"}));
        assert_eq!(p.percent_for_threshold(), None);

        let p = project(json!({"percent_funded": null}));
        assert_eq!(p.percent_for_threshold(), Some(0.0));

        let p = project(json!({"percent_funded": true}));
        assert_eq!(p.percent_for_threshold(), Some(1.0));
    }

    #[test]
    fn test_days_left_serialization() {
        assert_eq!(serde_json::to_value(DaysLeft::Days(12)).unwrap(), json!(12));
        assert_eq!(serde_json::to_value(DaysLeft::expired()).unwrap(), json!("Expired"));

        let parsed: DaysLeft = serde_json::from_value(json!(3)).unwrap();
        assert_eq!(parsed, DaysLeft::Days(3));
    }

    #[test]
    fn test_record_row_order() {
        let record = ProjectRecord {
            name: json!(42),
            image_url: json!("i"),
            video_url: json!("v"),
            funding_amount: json!("$15,000"),
            funding_percent: json!(null),
            days_left: DaysLeft::Days(4),
            end_date: "2030-01-01".into(),
        };
        assert_eq!(
            record.to_row(),
            ["42", "i", "v", "$15,000", "", "4", "2030-01-01"].map(String::from)
        );
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&json!("Unknown")), "Unknown");
        assert_eq!(cell_text(&json!(12.5)), "12.5");
        assert_eq!(cell_text(&json!(true)), "True");
        assert_eq!(cell_text(&json!([1, 2])), "[1,2]");
    }
}
