use std::collections::HashMap;

use crate::model::WeatherRecord;

/// Normalized cache key for a city: trimmed and lowercased display name.
pub fn city_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Session-lifetime cache of the last fetched record per city.
///
/// Holds at most one record per normalized key; storing again overwrites.
/// Unbounded and never expired, since it lives only as long as the session.
#[derive(Debug, Default)]
pub struct CacheStore {
    records: HashMap<String, WeatherRecord>,
    // Keys ordered most-recently-stored first, for the recent-searches list.
    order: Vec<String>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a city. The key is normalized before the lookup, so
    /// `get("LONDON")` finds a record stored under "london".
    pub fn get(&self, key: &str) -> Option<&WeatherRecord> {
        self.records.get(&city_key(key))
    }

    /// Store a record under its own display name's key, never the key the
    /// user typed (the provider may have normalized the spelling or case).
    /// Returns the key the record was stored under.
    pub fn put(&mut self, record: WeatherRecord) -> String {
        let key = record.city_key();
        self.order.retain(|k| k != &key);
        self.order.insert(0, key.clone());
        self.records.insert(key.clone(), record);
        key
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(&city_key(key))
    }

    /// Cached city keys, most recently stored first.
    pub fn recent_keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
