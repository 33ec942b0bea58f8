use crate::core::secondary::SecondaryStructure;
use serde::{Serialize, Serializer};
use std::fmt::Display;

/// ID results for one residue window, in scan order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowRecord {
    /// Residue number of the first residue in the window.
    pub start: isize,
    /// Residue number of the last residue in the window.
    pub end: isize,
    #[serde(rename = "entire simulation")]
    pub entire_simulation: f64,
    #[serde(rename = "last simulation")]
    pub last_simulation: f64,
    /// Per-frame series in local mode; empty in global mode.
    #[serde(serialize_with = "bracketed")]
    pub instantaneous: Vec<f64>,
}

/// ID results for one secondary-structure segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentRecord {
    pub start: isize,
    pub end: isize,
    #[serde(rename = "sec str type")]
    pub label: SecondaryStructure,
    /// Residue numbers of the segment's `CA` atoms.
    #[serde(serialize_with = "bracketed")]
    pub window: Vec<isize>,
    #[serde(rename = "entire simulation")]
    pub entire_simulation: f64,
    #[serde(rename = "last simulation")]
    pub last_simulation: f64,
    #[serde(serialize_with = "bracketed")]
    pub instantaneous: Vec<f64>,
}

/// Renders a list cell as `[a b c]`.
fn bracketed<T: Display, S: Serializer>(values: &[T], serializer: S) -> Result<S::Ok, S::Error> {
    let joined: Vec<String> = values.iter().map(ToString::to_string).collect();
    serializer.serialize_str(&format!("[{}]", joined.join(" ")))
}
