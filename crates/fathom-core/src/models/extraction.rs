//! Extracted-section records as returned by the relational extraction store.
//!
//! Section payloads arrive either as a list of items (coverages, exclusions)
//! or as a flat field map (declarations). The shape is decided once, when the
//! record is built, and consumers pattern-match on it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field name → value for one extracted item.
pub type FieldMap = BTreeMap<String, Value>;

/// Shape of an extracted section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ExtractedPayload {
    List(Vec<FieldMap>),
    Flat(FieldMap),
}

impl ExtractedPayload {
    /// Classify a raw JSON payload.
    ///
    /// Arrays become `List`. Objects holding an array of objects become a
    /// `List` of that array (the first such field); other objects are `Flat`.
    /// Scalars are wrapped as `Flat({"value": ..})`.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::List(items.into_iter().map(item_to_fields).collect()),
            Value::Object(map) => {
                let list_field = map.iter().find_map(|(_, v)| match v {
                    Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
                        Some(items.clone())
                    }
                    _ => None,
                });
                match list_field {
                    Some(items) => Self::List(items.into_iter().map(item_to_fields).collect()),
                    None => Self::Flat(map.into_iter().collect()),
                }
            }
            Value::Null => Self::Flat(FieldMap::new()),
            scalar => {
                let mut fields = FieldMap::new();
                fields.insert("value".to_string(), scalar);
                Self::Flat(fields)
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::List(items) => items.is_empty(),
            Self::Flat(fields) => fields.is_empty(),
        }
    }
}

fn item_to_fields(item: Value) -> FieldMap {
    match item {
        Value::Object(map) => map.into_iter().collect(),
        other => {
            let mut fields = FieldMap::new();
            fields.insert("value".to_string(), other);
            fields
        }
    }
}

/// Inclusive page span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    /// Every page in the range. An inverted range yields just `start`.
    pub fn pages(&self) -> Vec<u32> {
        if self.end < self.start {
            return vec![self.start];
        }
        (self.start..=self.end).collect()
    }
}

/// One extracted section of one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub document_id: String,
    pub workflow_id: String,
    pub section_type: String,
    pub payload: ExtractedPayload,
    #[serde(default)]
    pub page_numbers: Vec<u32>,
    #[serde(default)]
    pub page_range: Option<PageRange>,
}

impl SectionRecord {
    /// Explicit page numbers, else the expanded page range, else empty.
    pub fn pages(&self) -> Vec<u32> {
        if !self.page_numbers.is_empty() {
            return self.page_numbers.clone();
        }
        self.page_range.map(|r| r.pages()).unwrap_or_default()
    }
}

/// `deductible_amount` → `Deductible amount`.
pub fn humanize_key(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render a JSON value for display. Strings lose their quotes, arrays are
/// comma-joined, nulls render empty.
pub fn format_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(format_scalar)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}
