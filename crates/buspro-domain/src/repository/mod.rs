//! Persistence port definitions
//!
//! The stop repository only sees these traits; the key/value backed
//! implementation lives in `buspro-infra`.

use buspro_types::Result;

use crate::model::RouteState;

/// Storage for the whole route state blob
pub trait RouteStateRepository {
    /// Load the stored state
    ///
    /// Missing or malformed data yields the seed state; this never fails.
    fn load(&self) -> RouteState;

    /// Overwrite the stored state
    fn save(&self, state: &RouteState) -> Result<()>;
}

/// Storage for the Pro feature flag
pub trait ProStatusRepository {
    /// Stored flag, `false` when missing or malformed
    fn load_pro_status(&self) -> bool;

    fn save_pro_status(&self, is_pro: bool) -> Result<()>;
}
