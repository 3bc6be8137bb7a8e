//! CLI definition using clap

use buspro_types::{Direction, OutputFormat, RouteSlot};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "buspro")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "School bus stop roster with navigation links and a route assistant")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Route shift to work on
    #[arg(long, short = 'r', global = true, value_enum, default_value_t = RouteSlot::Morning)]
    pub route: RouteSlot,

    /// Leg of the route to work on
    #[arg(long, short = 'd', global = true, value_enum, default_value_t = Direction::ToSchool)]
    pub direction: Direction,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Data directory override
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Editable stop fields
#[derive(Args, Debug, Clone, Default)]
pub struct StopFields {
    /// Student name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Pickup / drop-off address
    #[arg(long, short = 'a')]
    pub address: Option<String>,

    /// Parent or guardian name
    #[arg(long, short = 'p')]
    pub parent: Option<String>,

    /// Parent phone number
    #[arg(long, short = 'c')]
    pub contact: Option<String>,

    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the stops of the selected route and direction
    List,

    /// Add a stop at the end of the selected list
    Add {
        #[command(flatten)]
        fields: StopFields,
    },

    /// Edit a stop; omitted fields keep their value
    Edit {
        /// Stop id
        id: String,

        #[command(flatten)]
        fields: StopFields,
    },

    /// Remove a stop
    Remove {
        /// Stop id
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Move a stop to another position (1-based, as shown by list)
    Move {
        from: usize,
        to: usize,
    },

    /// Print or open directions to a stop
    Navigate {
        /// Stop id
        id: String,

        /// Open the link in the browser / maps app
        #[arg(long)]
        open: bool,
    },

    /// Ask the assistant one question about the selected list
    Ask {
        /// Question text
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Interactive assistant chat (empty line or "exit" quits)
    Chat,

    /// Export every list to CSV (Pro)
    Export {
        /// Output CSV path
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Unlock Pro
    Upgrade,

    /// Show Pro status and stop counts
    Status,

    /// Delete stored data and start over from the default roster
    Reset {
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set Gemini model
        #[arg(long)]
        set_model: Option<String>,

        /// Set API base URL
        #[arg(long)]
        set_api_base: Option<String>,

        /// Set API key (GEMINI_API_KEY / API_KEY take precedence)
        #[arg(long)]
        set_api_key: Option<String>,

        /// Set assistant timeout in seconds
        #[arg(long)]
        set_timeout: Option<u64>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set log level (error, warn, info, debug, trace)
        #[arg(long)]
        set_log_level: Option<String>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
