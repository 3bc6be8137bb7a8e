//! Application service layer - session, config, navigation, purchase, export

pub mod app;
pub mod config;
pub mod export;
pub mod navigation;
pub mod purchase;
pub mod repository;
