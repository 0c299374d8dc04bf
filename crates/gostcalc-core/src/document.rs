//! Document model for size estimation.
//!
//! A [`Document`] describes the shape of a stored record: where it lives,
//! which fields it carries and which index entries it produces. Only the
//! shape matters for pricing, so values are kept as a small closed set of
//! [`Value`] kinds.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CalculationError, Result};
use crate::size::DocumentSizeEstimator;

/// Field name to value mapping, used for document data and index entries.
pub type Fields = BTreeMap<String, Value>;

/// Key marking a JSON object as a timestamp, e.g. `{"$timestamp": "2024-01-01T00:00:00Z"}`.
pub const TIMESTAMP_KEY: &str = "$timestamp";

/// A single field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum Value {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Single byte.
    Byte(u8),
    /// 64-bit integer.
    Integer(i64),
    /// 64-bit floating-point number.
    Float(f64),
    /// Point in time.
    Timestamp(DateTime<Utc>),
    /// UTF-8 string.
    String(String),
    /// Nested map.
    Map(Fields),
    /// Array of values.
    Array(Vec<Value>),
}

impl Value {
    /// Get the value kind as a string.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Byte(_) => "byte",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Timestamp(_) => "timestamp",
            Self::String(_) => "string",
            Self::Map(_) => "map",
            Self::Array(_) => "array",
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Self::Byte(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Fields> for Value {
    fn from(v: Fields) -> Self {
        Self::Map(v)
    }
}

impl From<serde_json::Value> for Value {
    /// Convert a JSON value.
    ///
    /// Integers that fit `i64` become [`Value::Integer`], other numbers
    /// [`Value::Float`]. An object of the form `{"$timestamp": "<RFC 3339>"}`
    /// becomes [`Value::Timestamp`].
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => n.as_f64().map_or(Self::Null, Self::Float),
            },
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                if let Some(ts) = timestamp_literal(&map) {
                    return Self::Timestamp(ts);
                }
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

fn timestamp_literal(map: &serde_json::Map<String, serde_json::Value>) -> Option<DateTime<Utc>> {
    if map.len() != 1 {
        return None;
    }
    let raw = map.get(TIMESTAMP_KEY)?.as_str()?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Build a [`Fields`] map from key/value pairs.
pub fn fields<I, K, V>(pairs: I) -> Fields
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// A stored document and the index entries it produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    id: String,
    collection: String,
    data: Fields,
    single_field_indexes: Vec<Fields>,
    composite_indexes: Vec<Fields>,
}

impl Document {
    /// Create an empty document with the given ID inside `collection`.
    ///
    /// `collection` is a slash-delimited path such as `users/jeff/tasks`.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidCollectionPath`] if the path is
    /// empty or contains an empty segment.
    pub fn new(id: impl Into<String>, collection: impl Into<String>) -> Result<Self> {
        let collection = collection.into();
        if collection.is_empty() || collection.split('/').any(str::is_empty) {
            return Err(CalculationError::InvalidCollectionPath { path: collection });
        }

        Ok(Self {
            id: id.into(),
            collection,
            data: Fields::new(),
            single_field_indexes: Vec::new(),
            composite_indexes: Vec::new(),
        })
    }

    /// Set a single data field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(name.into(), value.into());
        self
    }

    /// Replace the document data.
    #[must_use]
    pub fn with_data(mut self, data: Fields) -> Self {
        self.data = data;
        self
    }

    /// Append a single-field index entry.
    #[must_use]
    pub fn with_single_field_index(mut self, entry: Fields) -> Self {
        self.single_field_indexes.push(entry);
        self
    }

    /// Append a composite index entry.
    #[must_use]
    pub fn with_composite_index(mut self, entry: Fields) -> Self {
        self.composite_indexes.push(entry);
        self
    }

    /// The document ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The slash-delimited collection path.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Collection path segments, never empty.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.collection.split('/')
    }

    /// Document fields.
    #[must_use]
    pub fn data(&self) -> &Fields {
        &self.data
    }

    /// Single-field index entries.
    #[must_use]
    pub fn single_field_indexes(&self) -> &[Fields] {
        &self.single_field_indexes
    }

    /// Composite index entries.
    #[must_use]
    pub fn composite_indexes(&self) -> &[Fields] {
        &self.composite_indexes
    }

    /// Total size in bytes using the default padding.
    #[must_use]
    pub fn size(&self) -> u64 {
        DocumentSizeEstimator::default().document_size(self)
    }
}

/// JSON description of a document, as read from a file.
///
/// ```json
/// {
///   "id": "my_task_id",
///   "collection": "users/jeff/tasks",
///   "data": { "done": false, "created": { "$timestamp": "2024-01-01T00:00:00Z" } },
///   "composite_indexes": [ { "done": false, "priority": 1 } ]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentSpec {
    /// Document ID.
    pub id: String,
    /// Slash-delimited collection path.
    pub collection: String,
    /// Document fields.
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
    /// Single-field index entries.
    #[serde(default)]
    pub single_field_indexes: Vec<serde_json::Map<String, serde_json::Value>>,
    /// Composite index entries.
    #[serde(default)]
    pub composite_indexes: Vec<serde_json::Map<String, serde_json::Value>>,
}

impl TryFrom<DocumentSpec> for Document {
    type Error = CalculationError;

    fn try_from(spec: DocumentSpec) -> Result<Self> {
        let convert = |map: serde_json::Map<String, serde_json::Value>| -> Fields {
            map.into_iter().map(|(k, v)| (k, Value::from(v))).collect()
        };

        let mut doc = Self::new(spec.id, spec.collection)?.with_data(convert(spec.data));
        for entry in spec.single_field_indexes {
            doc = doc.with_single_field_index(convert(entry));
        }
        for entry in spec.composite_indexes {
            doc = doc.with_composite_index(convert(entry));
        }
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_empty_collection() {
        assert!(matches!(
            Document::new("id", ""),
            Err(CalculationError::InvalidCollectionPath { .. })
        ));
        assert!(Document::new("id", "users//tasks").is_err());
        assert!(Document::new("id", "users/").is_err());
    }

    #[test]
    fn segments_split_on_slash() {
        let doc = Document::new("id", "users/jeff/tasks").unwrap();
        assert_eq!(doc.segments().collect::<Vec<_>>(), ["users", "jeff", "tasks"]);
    }

    #[test]
    fn builder_collects_fields_and_indexes() {
        let doc = Document::new("id", "tasks")
            .unwrap()
            .with_field("done", false)
            .with_field("priority", 1)
            .with_composite_index(fields([("done", false)]));

        assert_eq!(doc.data().len(), 2);
        assert_eq!(doc.data()["priority"], Value::Integer(1));
        assert!(doc.single_field_indexes().is_empty());
        assert_eq!(doc.composite_indexes().len(), 1);
    }

    #[test]
    fn json_conversion() {
        let value = Value::from(json!({
            "name": "apple",
            "count": 3,
            "ratio": 0.5,
            "tags": ["a"],
            "missing": null,
            "at": { "$timestamp": "2024-01-01T00:00:00Z" }
        }));

        let Value::Map(map) = value else {
            panic!("expected map");
        };
        assert_eq!(map["name"].kind(), "string");
        assert_eq!(map["count"].kind(), "integer");
        assert_eq!(map["ratio"].kind(), "float");
        assert_eq!(map["tags"].kind(), "array");
        assert_eq!(map["missing"].kind(), "null");
        assert_eq!(map["at"].kind(), "timestamp");
    }

    #[test]
    fn timestamp_key_needs_valid_rfc3339() {
        let value = Value::from(json!({ "$timestamp": "yesterday" }));
        assert_eq!(value.kind(), "map");
    }

    #[test]
    fn document_from_spec() {
        let spec: DocumentSpec = serde_json::from_value(json!({
            "id": "my_task_id",
            "collection": "users/jeff/tasks",
            "data": { "done": false },
            "single_field_indexes": [ { "done": false } ]
        }))
        .unwrap();

        let doc = Document::try_from(spec).unwrap();
        assert_eq!(doc.id(), "my_task_id");
        assert_eq!(doc.single_field_indexes().len(), 1);
        assert!(doc.composite_indexes().is_empty());
    }

    #[test]
    fn document_from_spec_validates_path() {
        let spec: DocumentSpec =
            serde_json::from_value(json!({ "id": "x", "collection": "" })).unwrap();
        assert!(Document::try_from(spec).is_err());
    }
}
