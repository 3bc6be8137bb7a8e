//! Domain models, the stop repository service, and persistence ports

pub mod model;
pub mod repository;
pub mod seed;
pub mod service;
