//! Reference index: id → display string.
//!
//! Link screens receive bare foreign keys and render them as names. The
//! index is built once per fetched collection with a caller-supplied
//! projection and consulted per row; a miss falls back to a literal
//! `ID: {id}` placeholder instead of failing. Keys are normalized through
//! [`RecordId::key`], so a numeric id from one endpoint resolves a record
//! whose id arrived as a string from another.

use std::collections::HashMap;

use crate::models::RecordId;

/// In-memory id→display lookup for one entity collection.
///
/// Immutable once built; rebuild whenever the backing collection changes.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    entries: HashMap<String, String>,
}

impl ReferenceIndex {
    /// Build the index from `records`, projecting each to its id and its
    /// display string. On a duplicate id the last record wins.
    pub fn build<T>(
        records: &[T],
        id: impl Fn(&T) -> &RecordId,
        label: impl Fn(&T) -> String,
    ) -> Self {
        let entries = records
            .iter()
            .map(|record| (id(record).key(), label(record)))
            .collect();
        Self { entries }
    }

    /// The display value for `id`, or exactly `"ID: {id}"` when absent.
    #[must_use]
    pub fn resolve(&self, id: &RecordId) -> String {
        self.entries
            .get(&id.key())
            .cloned()
            .unwrap_or_else(|| format!("ID: {id}"))
    }

    /// Whether `id` is present.
    #[must_use]
    pub fn contains(&self, id: &RecordId) -> bool {
        self.entries.contains_key(&id.key())
    }

    /// Number of indexed records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no records were indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
