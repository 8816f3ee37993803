//! Selection predicate and display-field derivation.
//!
//! ```text
//! Project ──▶ is_selected? ──▶ to_record ──▶ ProjectRecord
//!              parent_id == 16
//!              state == "successful" || percent_funded >= 100
//! ```

use chrono::{DateTime, Utc};
use serde_json::{Number, Value};

use crate::models::{numeric, DaysLeft, Project, ProjectRecord, UNKNOWN};

/// Category id of "Technology".
pub const TECHNOLOGY_PARENT_ID: i64 = 16;

/// `percent_funded` at or above this counts as funded.
pub const FUNDED_THRESHOLD: f64 = 100.0;

const SECONDS_PER_DAY: i64 = 86_400;

/// Whether a project belongs in the report.
pub fn is_selected(project: &Project, parent_id: i64) -> bool {
    if project.parent_id() != Some(parent_id as f64) {
        return false;
    }
    project.state() == Some("successful")
        || project
            .percent_for_threshold()
            .is_some_and(|p| p >= FUNDED_THRESHOLD)
}

/// Derive the output record of a selected project.
///
/// `now` is the run time used for the days-left computation.
pub fn to_record(project: &Project, now: DateTime<Utc>) -> ProjectRecord {
    let (days_left, end_date) = deadline_fields(project, now);

    ProjectRecord {
        name: project.display_name(),
        image_url: project.image_url(),
        video_url: project.video_url(),
        funding_amount: funding_amount(project.converted_pledged_amount()),
        funding_percent: funding_percent(project.percent_funded()),
        days_left,
        end_date,
    }
}

/// `days_left` and `end_date` from the deadline.
///
/// Only live projects get a day count, and only while the deadline has
/// not passed.
fn deadline_fields(project: &Project, now: DateTime<Utc>) -> (DaysLeft, String) {
    let Some(deadline) = project.deadline() else {
        return (DaysLeft::expired(), UNKNOWN.to_string());
    };
    let Some(end) = timestamp_to_utc(deadline) else {
        return (DaysLeft::expired(), UNKNOWN.to_string());
    };

    let end_date = end.format("%Y-%m-%d").to_string();
    let days_left = if project.state() == Some("live") {
        match days_between(now, end) {
            d if d < 0 => DaysLeft::expired(),
            d => DaysLeft::Days(d),
        }
    } else {
        DaysLeft::expired()
    };

    (days_left, end_date)
}

/// UTC time of a possibly fractional epoch-seconds value.
fn timestamp_to_utc(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::<Utc>::from_timestamp(whole as i64, nanos)
}

/// Whole days from `from` to `to`, rounded towards negative infinity.
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// `"$15,000"` for a numeric amount, otherwise the value passed through.
///
/// Booleans are numbers here: `true` becomes `"$1"`.
pub fn funding_amount(amount: Option<&Value>) -> Value {
    match amount {
        None => Value::String(UNKNOWN.to_string()),
        Some(Value::Number(n)) => Value::String(format!("${}", group_thousands(&number_text(n)))),
        Some(Value::Bool(b)) => Value::String(format!("${}", u8::from(*b))),
        Some(other) => other.clone(),
    }
}

/// `"150.00%"` for a numeric percentage, otherwise the value passed through.
pub fn funding_percent(percent: Option<&Value>) -> Value {
    match percent {
        None => Value::String(UNKNOWN.to_string()),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => match numeric(v) {
            Some(f) => Value::String(format!("{:.2}%", f)),
            None => v.clone(),
        },
        Some(other) => other.clone(),
    }
}

/// Decimal text of a JSON number. Integral floats keep a trailing `.0`.
fn number_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 => format!("{:.1}", f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Insert `,` between groups of three digits in the integer part.
fn group_thousands(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(idx) => unsigned.split_at(idx),
        None => (unsigned, ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}{}", sign, grouped, frac_part)
}
