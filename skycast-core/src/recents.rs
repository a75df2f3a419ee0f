//! Most-recently-used list of searched locations.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::{model::Location, storage::KeyValueStore};

/// Storage key holding the JSON array of recent locations.
pub const RECENTS_KEY: &str = "weather_recents_v1";

/// Maximum number of remembered locations.
pub const RECENTS_CAPACITY: usize = 5;

/// Move `location` to the front of `list`, dropping any entry with the same
/// name and anything past capacity.
pub fn push_recent(list: Vec<Location>, location: Location) -> Vec<Location> {
    let mut rest: Vec<Location> = list.into_iter().filter(|l| l.name != location.name).collect();
    rest.insert(0, location);
    rest.truncate(RECENTS_CAPACITY);
    rest
}

/// Recents backed by a [`KeyValueStore`].
#[derive(Debug)]
pub struct RecentsStore<S> {
    store: S,
}

impl<S: KeyValueStore> RecentsStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read the persisted list. Missing or unreadable data yields an empty list.
    pub fn load(&self) -> Vec<Location> {
        let raw = match self.store.get(RECENTS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Could not read recents: {e:#}");
                return Vec::new();
            }
        };

        let items = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => items,
            Ok(_) => {
                tracing::warn!("Ignoring recents: stored value is not an array");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("Ignoring recents: {e}");
                return Vec::new();
            }
        };

        items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<Location>(item) {
                Ok(loc) => Some(loc),
                Err(e) => {
                    tracing::debug!("Skipping malformed recents entry: {e}");
                    None
                }
            })
            .take(RECENTS_CAPACITY)
            .collect()
    }

    /// Record a successful search and persist the updated list.
    pub fn add(&mut self, location: Location) -> Result<Vec<Location>> {
        let next = push_recent(self.load(), location);

        let json = serde_json::to_string(&next).context("Failed to serialize recents")?;
        self.store.set(RECENTS_KEY, &json).context("Failed to persist recents")?;

        tracing::debug!(count = next.len(), "Recents updated");
        Ok(next)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
