//! School Bus Pro - stop roster, navigation links and route assistant
//!
//! A CLI for a school-bus driver's pickup and drop-off lists.

mod cli;
mod commands;
mod output;

use buspro_app::config::Config;
use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

/// RUST_LOG wins; otherwise --verbose means debug, else the configured level
fn init_tracing(verbose: bool, config_level: &str) {
    let fallback_level = if verbose {
        "debug"
    } else {
        match config_level.trim().to_ascii_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "error" => "error",
            _ => "warn",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = Config::load()
        .map(|c| c.log_level)
        .unwrap_or_else(|_| "warn".to_string());
    init_tracing(cli.verbose, &log_level);

    if let Err(e) = commands::execute(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
