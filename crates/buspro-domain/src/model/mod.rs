//! Domain model types

pub mod chat;
pub mod route_state;
pub mod stop;

pub use chat::{ChatLog, ChatMessage, ChatRole};
pub use route_state::{RouteLegs, RouteState};
pub use stop::{Stop, StopDraft};
