//! Repository adapters for persistence layer

use std::path::PathBuf;

use buspro_infra::persistence::{FileKeyValueStore, KvRouteStateRepository, MemoryKeyValueStore};
use buspro_types::Result;

use crate::config::Config;

/// Route state and Pro flag stored as files in the data directory
pub type FileRouteStore = KvRouteStateRepository<FileKeyValueStore>;

/// Route state and Pro flag that live only as long as the process
pub type MemoryRouteStore = KvRouteStateRepository<MemoryKeyValueStore>;

/// Open the file-backed store in the configured data directory
pub fn open_route_store(config: &Config) -> Result<FileRouteStore> {
    open_route_store_at(config.data_dir()?)
}

/// Open the file-backed store at a custom directory
pub fn open_route_store_at(data_dir: PathBuf) -> Result<FileRouteStore> {
    Ok(KvRouteStateRepository::new(FileKeyValueStore::open(data_dir)?))
}

pub fn open_memory_route_store() -> MemoryRouteStore {
    KvRouteStateRepository::new(MemoryKeyValueStore::new())
}
