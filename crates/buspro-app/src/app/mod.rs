//! Use cases the front end drives

pub mod driver_session;

pub use driver_session::DriverSession;
