//! Route state and Pro flag on top of a key/value store

use buspro_domain::model::RouteState;
use buspro_domain::repository::{ProStatusRepository, RouteStateRepository};
use buspro_domain::seed::seed_state;
use buspro_types::Result;

use super::KeyValueStore;

/// Key holding the serialized route state
pub const STORAGE_KEY: &str = "school_bus_pro_data";
/// Key holding `"true"` / `"false"`
pub const PRO_KEY: &str = "school_bus_pro_is_premium";

/// Persistence adapter for the stop repository
pub struct KvRouteStateRepository<S> {
    store: S,
}

impl<S: KeyValueStore> KvRouteStateRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Drop all stored data; the next load reseeds
    pub fn reset(&self) -> Result<()> {
        self.store.remove(STORAGE_KEY)?;
        self.store.remove(PRO_KEY)?;
        tracing::info!("stored route data cleared");
        Ok(())
    }
}

impl<S: KeyValueStore> RouteStateRepository for KvRouteStateRepository<S> {
    fn load(&self) -> RouteState {
        let blob = match self.store.get(STORAGE_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return seed_state(),
            Err(err) => {
                tracing::warn!(error = %err, "could not read route data, using defaults");
                return seed_state();
            }
        };

        serde_json::from_str(&blob).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "stored route data is malformed, using defaults");
            seed_state()
        })
    }

    fn save(&self, state: &RouteState) -> Result<()> {
        let blob = serde_json::to_string(state)?;
        self.store.set(STORAGE_KEY, &blob)
    }
}

impl<S: KeyValueStore> ProStatusRepository for KvRouteStateRepository<S> {
    fn load_pro_status(&self) -> bool {
        match self.store.get(PRO_KEY) {
            Ok(Some(value)) => value.trim() == "true",
            Ok(None) => false,
            Err(err) => {
                tracing::warn!(error = %err, "could not read pro status");
                false
            }
        }
    }

    fn save_pro_status(&self, is_pro: bool) -> Result<()> {
        self.store.set(PRO_KEY, if is_pro { "true" } else { "false" })
    }
}
