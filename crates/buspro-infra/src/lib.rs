//! Infrastructure layer - key/value persistence, CSV export

pub mod persistence;
pub mod roster_csv;
