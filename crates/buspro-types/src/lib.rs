//! Core types for School Bus Pro

mod error;
mod route;

pub use error::*;
pub use route::*;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How command results are printed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text for the driver
    #[default]
    Table,
    /// Pretty-printed JSON for scripts
    Json,
}

impl OutputFormat {
    /// Name used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
