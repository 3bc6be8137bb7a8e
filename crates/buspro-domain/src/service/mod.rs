//! Domain services

pub mod stop_repository;

pub use stop_repository::{DeleteConfirmation, DragSession, StopRepository};
