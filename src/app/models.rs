//! Data models for trip processing
//!
//! The central model is [`StationNameMap`], the association from a numeric
//! station identifier to every textual name variant recorded for it in the
//! raw trip data. Bike-share exports are inconsistent about station naming
//! (punctuation, casing, renames over the years), so the set of variants is
//! preserved rather than collapsed to a single canonical name.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Mapping from station identifier to the set of observed name variants
///
/// Backed by ordered collections so that serialized forms are deterministic:
/// keys ascend numerically and, within a station, name variants are unique
/// and lexicographically ordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationNameMap {
    map: BTreeMap<i64, BTreeSet<String>>,
}

impl StationNameMap {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a name variant observed for a station
    pub fn record(&mut self, station_id: i64, name: impl Into<String>) {
        self.map.entry(station_id).or_default().insert(name.into());
    }

    /// Get the name variants observed for a station, if any
    pub fn names(&self, station_id: i64) -> Option<&BTreeSet<String>> {
        self.map.get(&station_id)
    }

    /// Number of distinct stations in the mapping
    pub fn station_count(&self) -> usize {
        self.map.len()
    }

    /// Whether the mapping contains no stations
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over `(station_id, name_variants)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&i64, &BTreeSet<String>)> {
        self.map.iter()
    }

    /// Derive the JSON-safe form: each variant set replaced by its sorted list
    ///
    /// JSON object keys are strings by syntax, so integer keys serialize as
    /// `"3"`; the values are plain lists sorted lexicographically.
    pub fn to_sorted_lists(&self) -> BTreeMap<i64, Vec<String>> {
        self.map
            .iter()
            .map(|(id, names)| (*id, names.iter().cloned().collect()))
            .collect()
    }
}

impl FromIterator<(i64, String)> for StationNameMap {
    fn from_iter<I: IntoIterator<Item = (i64, String)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (id, name) in iter {
            map.record(id, name);
        }
        map
    }
}
