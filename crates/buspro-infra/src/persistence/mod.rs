//! Persistence implementations
//!
//! Stored data is a handful of string values under fixed keys. The
//! key/value store is the primitive; `KvRouteStateRepository` maps the
//! domain ports onto it.

mod kv_route_state_repo;
mod kv_store;

pub use kv_route_state_repo::{KvRouteStateRepository, PRO_KEY, STORAGE_KEY};
pub use kv_store::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
