//! The immutable document corpus searched by the overlay.

use crate::error::IndexError;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// A single searchable page.
///
/// The document's position in its [`DocumentIndex`] is its identity; ties in
/// ranking fall back to that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
}

impl Document {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: url.into(),
        }
    }

    /// Validates one raw record from the pre-built index.
    ///
    /// Returns `None` when `title` or `url` is absent, not a string, or blank.
    /// A missing `description` becomes an empty string.
    fn from_record(record: &Value) -> Option<Self> {
        let object = record.as_object()?;
        let title = object.get("title")?.as_str()?;
        let url = object.get("url")?.as_str()?;
        if title.trim().is_empty() || url.trim().is_empty() {
            return None;
        }
        let description = object
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default();

        Some(Self::new(title, description, url))
    }
}

/// Read-only collection of documents, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct DocumentIndex {
    documents: Vec<Document>,
}

impl DocumentIndex {
    /// Builds an index from already-validated documents.
    pub fn new(documents: Vec<Document>) -> Self {
        let mut seen_urls: AHashSet<&str> = AHashSet::with_capacity(documents.len());
        for doc in &documents {
            if !seen_urls.insert(doc.url.as_str()) {
                tracing::debug!("Duplicate url '{}' in search index", doc.url);
            }
        }
        Self { documents }
    }

    /// Parses a JSON array of `{title, description, url}` records.
    ///
    /// Malformed records are dropped with a warning; only a corpus that is not
    /// JSON, or not an array, fails as a whole.
    pub fn from_json(json: &str) -> Result<Self, IndexError> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Array(records) = value else {
            return Err(IndexError::NotAnArray {
                found: json_kind(&value),
            });
        };

        let mut documents = Vec::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            match Document::from_record(record) {
                Some(doc) => documents.push(doc),
                None => tracing::warn!(
                    "Dropping malformed search index record at position {}: {}",
                    position,
                    record
                ),
            }
        }

        let dropped = records.len() - documents.len();
        tracing::info!(
            "Loaded search index ({} documents, {} dropped)",
            documents.len(),
            dropped
        );
        Ok(Self::new(documents))
    }

    /// Reads and parses an index file.
    pub fn from_path(path: &Path) -> Result<Self, IndexError> {
        let json = std::fs::read_to_string(path).map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Document> {
        self.documents.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }
}

impl<'a> IntoIterator for &'a DocumentIndex {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
