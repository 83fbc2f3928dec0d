//! The report assembled from one run of the query catalog.

use crate::db::QueryResult;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value as JsonValue};

/// Result of a single operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEntry {
    /// Scalar status text.
    Status(String),
    /// Row set, serialized as an array of objects keyed by column name.
    Rows(QueryResult),
}

impl ReportEntry {
    /// Converts the entry to its JSON representation.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Status(status) => JsonValue::String(status.clone()),
            Self::Rows(result) => JsonValue::Array(
                result
                    .to_records()
                    .into_iter()
                    .map(JsonValue::Object)
                    .collect(),
            ),
        }
    }
}

/// An insertion-ordered mapping from operation key to result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    entries: Vec<(String, ReportEntry)>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, replacing an earlier entry with the same key in place.
    pub fn insert(&mut self, key: impl Into<String>, entry: ReportEntry) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((key, entry)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ReportEntry> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, entry)| entry)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts the report to a JSON object, keys in insertion order.
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(
            self.entries
                .iter()
                .map(|(key, entry)| (key.clone(), entry.to_json()))
                .collect::<Map<_, _>>(),
        )
    }
}

impl Serialize for Report {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, &entry.to_json())?;
        }
        map.end()
    }
}
