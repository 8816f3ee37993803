//! Filter module.
//!
//! - Select: selection predicate and display-field derivation
//! - Pipeline: the JSONL to JSON + CSV run

pub mod pipeline;
pub mod select;

pub use pipeline::*;
pub use select::{is_selected, to_record, TECHNOLOGY_PARENT_ID};
