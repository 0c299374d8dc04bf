//! Document size estimation.
//!
//! Sizes follow the Cloud Firestore storage size rules: every stored
//! document pays for its name, its fields and one entry per index it
//! appears in.

use serde::{Deserialize, Serialize};

use crate::document::{Document, Fields, Value};

/// Extra bytes added to every document name.
pub const DOCUMENT_NAME_PADDING: u64 = 16;

/// Extra bytes added to every set of fields.
pub const DOCUMENT_FIELD_PADDING: u64 = 32;

/// Fixed padding constants used by the size rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentPadding {
    /// Bytes added to each document or parent name.
    pub name: u64,
    /// Bytes added to each field set (document data, nested map, index entry).
    pub fields: u64,
}

impl Default for DocumentPadding {
    fn default() -> Self {
        Self {
            name: DOCUMENT_NAME_PADDING,
            fields: DOCUMENT_FIELD_PADDING,
        }
    }
}

/// Computes the stored byte size of documents and values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentSizeEstimator {
    padding: DocumentPadding,
}

impl DocumentSizeEstimator {
    /// Create an estimator with explicit padding.
    #[must_use]
    pub const fn new(padding: DocumentPadding) -> Self {
        Self { padding }
    }

    /// Padding in use.
    #[must_use]
    pub const fn padding(&self) -> DocumentPadding {
        self.padding
    }

    /// Size of a single value.
    ///
    /// Null and array values are not sized and contribute nothing.
    #[must_use]
    pub fn value_size(&self, value: &Value) -> u64 {
        match value {
            Value::String(s) => width(s.len()) + 1,
            Value::Bool(_) | Value::Byte(_) => 1,
            Value::Integer(_) | Value::Float(_) | Value::Timestamp(_) => 8,
            Value::Map(fields) => self.fields_size(fields),
            Value::Null | Value::Array(_) => 0,
        }
    }

    /// Size of a field set: padding, one byte per field, then each key and value.
    #[must_use]
    pub fn fields_size(&self, fields: &Fields) -> u64 {
        fields.iter().fold(
            self.padding.fields + width(fields.len()),
            |size, (key, value)| size + width(key.len()) + self.value_size(value),
        )
    }

    /// Size of the document name: ID, collection path segments and padding.
    #[must_use]
    pub fn name_size(&self, doc: &Document) -> u64 {
        let id = width(doc.id().len()) + 1;
        id + path_size(doc.segments()) + self.padding.name
    }

    /// Size of the parent document name.
    ///
    /// Documents in a root collection (fewer than three path segments) have
    /// no parent document and the size is zero.
    #[must_use]
    pub fn parent_name_size(&self, doc: &Document) -> u64 {
        let segments: Vec<&str> = doc.segments().collect();
        if segments.len() < 3 {
            return 0;
        }

        let parent = &segments[..segments.len() - 1];
        path_size(parent.iter().copied()) + self.padding.name
    }

    /// Size of the document data.
    #[must_use]
    pub fn data_size(&self, doc: &Document) -> u64 {
        self.fields_size(doc.data())
    }

    /// Size of a list of index entries for `doc`.
    ///
    /// Each entry pays the document and parent names, field padding and its
    /// values. Field names are not part of index entries.
    #[must_use]
    pub fn index_size(&self, doc: &Document, entries: &[Fields]) -> u64 {
        let overhead = self.name_size(doc) + self.parent_name_size(doc) + self.padding.fields;

        entries
            .iter()
            .map(|entry| {
                overhead
                    + entry
                        .values()
                        .map(|value| self.value_size(value))
                        .sum::<u64>()
            })
            .sum()
    }

    /// Total stored size of the document including its index entries.
    #[must_use]
    pub fn document_size(&self, doc: &Document) -> u64 {
        let name = self.name_size(doc);
        let data = self.data_size(doc);
        let single = self.index_size(doc, doc.single_field_indexes());
        let composite = self.index_size(doc, doc.composite_indexes());

        tracing::trace!(
            id = %doc.id(),
            name,
            data,
            single_field_indexes = single,
            composite_indexes = composite,
            "Estimated document size"
        );

        name + data + single + composite
    }
}

/// Segment lengths plus one separator byte per segment.
fn path_size<'a>(segments: impl Iterator<Item = &'a str>) -> u64 {
    segments.map(|s| width(s.len()) + 1).sum()
}

fn width(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}
