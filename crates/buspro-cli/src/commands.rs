//! Command handlers

use crate::cli::{Cli, Commands, StopFields};
use crate::output::{output_status, output_stop, output_stops};
use buspro_app::app::DriverSession;
use buspro_app::config::Config;
use buspro_app::export::default_export_path;
use buspro_app::navigation::open_url;
use buspro_app::purchase::{PurchaseOutcome, SimulatedPurchase};
use buspro_app::repository::{open_route_store, FileRouteStore};
use buspro_domain::model::StopDraft;
use buspro_types::{Error, OutputFormat, Result};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

type Session = DriverSession<FileRouteStore>;

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    // Config is handled before loading so a broken file can still be reset
    if let Commands::Config {
        show,
        set_model,
        set_api_base,
        set_api_key,
        set_timeout,
        set_output,
        set_data_dir,
        set_log_level,
        reset,
    } = &cli.command
    {
        let changes = ConfigChanges {
            show: *show,
            model: set_model.clone(),
            api_base: set_api_base.clone(),
            api_key: set_api_key.clone(),
            timeout: *set_timeout,
            output: *set_output,
            data_dir: set_data_dir.clone(),
            log_level: set_log_level.clone(),
            reset: *reset,
        };
        return cmd_config(&Config::config_path()?, changes);
    }

    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref dir) = cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    if let Commands::Reset { yes } = &cli.command {
        return cmd_reset(&config, *yes);
    }

    let store = open_route_store(&config)?;
    let mut session = DriverSession::with_config(store, &config);
    session.stops_mut().select(cli.route, cli.direction);

    match &cli.command {
        Commands::List => cmd_list(&session, output_format),
        Commands::Add { fields } => cmd_add(&mut session, fields, output_format),
        Commands::Edit { id, fields } => cmd_edit(&mut session, id, fields, output_format),
        Commands::Remove { id, yes } => cmd_remove(&mut session, id, *yes),
        Commands::Move { from, to } => cmd_move(&mut session, *from, *to, output_format),
        Commands::Navigate { id, open } => cmd_navigate(&session, id, *open),
        Commands::Ask { query } => cmd_ask(&mut session, &query.join(" ")).await,
        Commands::Chat => cmd_chat(&mut session).await,
        Commands::Export { output } => cmd_export(&session, output.clone()),
        Commands::Upgrade => cmd_upgrade(&mut session, &config).await,
        Commands::Status => cmd_status(&session, &config, output_format),
        Commands::Config { .. } | Commands::Reset { .. } => Ok(()),
    }
}

fn cmd_list(session: &Session, output_format: OutputFormat) -> Result<()> {
    let (route, direction) = session.stops().selection();
    output_stops(output_format, route, direction, session.stops().current())
}

fn cmd_add(session: &mut Session, fields: &StopFields, output_format: OutputFormat) -> Result<()> {
    let draft = StopDraft {
        name: fields.name.clone().unwrap_or_default(),
        address: fields.address.clone().unwrap_or_default(),
        parent_name: fields.parent.clone().unwrap_or_default(),
        parent_contact: fields.contact.clone().unwrap_or_default(),
        notes: fields.notes.clone().unwrap_or_default(),
    };

    let stop = session.stops_mut().create(draft)?;
    if output_format == OutputFormat::Table {
        println!("Added stop:");
    }
    output_stop(output_format, &stop)
}

fn cmd_edit(
    session: &mut Session,
    id: &str,
    fields: &StopFields,
    output_format: OutputFormat,
) -> Result<()> {
    let mut stop = session
        .stops()
        .get(id)
        .cloned()
        .ok_or_else(|| Error::StopNotFound(id.to_string()))?;

    if let Some(ref name) = fields.name {
        stop.name = name.clone();
    }
    if let Some(ref address) = fields.address {
        stop.address = address.clone();
    }
    if let Some(ref parent) = fields.parent {
        stop.parent_name = parent.clone();
    }
    if let Some(ref contact) = fields.contact {
        stop.parent_contact = contact.clone();
    }
    if let Some(ref notes) = fields.notes {
        stop.notes = notes.clone();
    }

    let stop = session.stops_mut().update(stop)?;
    if output_format == OutputFormat::Table {
        println!("Updated stop:");
    }
    output_stop(output_format, &stop)
}

fn cmd_remove(session: &mut Session, id: &str, yes: bool) -> Result<()> {
    let confirmation = session
        .stops()
        .request_delete(id)
        .ok_or_else(|| Error::StopNotFound(id.to_string()))?;

    // Confirmation
    if !yes {
        println!("{} [y/N]", confirmation.prompt());
        let mut input = String::new();
        std::io::stdin().read_line(&mut input).ok();
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    if let Some(removed) = session.stops_mut().delete(confirmation)? {
        println!("Removed {} [{}]", removed.name, removed.id);
    }
    Ok(())
}

fn cmd_move(
    session: &mut Session,
    from: usize,
    to: usize,
    output_format: OutputFormat,
) -> Result<()> {
    let moved = match (from.checked_sub(1), to.checked_sub(1)) {
        (Some(from), Some(to)) => session.stops_mut().reorder(from, to)?,
        _ => false,
    };

    if !moved {
        println!(
            "Nothing moved (positions must be between 1 and {} and differ)",
            session.stops().current().len()
        );
        return Ok(());
    }

    cmd_list(session, output_format)
}

fn cmd_navigate(session: &Session, id: &str, open: bool) -> Result<()> {
    let url = session.navigation_url(id)?;
    println!("{}", url);

    if open {
        if let Err(e) = open_url(&url) {
            tracing::warn!(error = %e, "could not launch navigation app");
            eprintln!("Could not open the link automatically; copy it into your browser.");
        }
    }
    Ok(())
}

async fn cmd_ask(session: &mut Session, query: &str) -> Result<()> {
    match session.ask_assistant(query).await {
        Some(reply) => println!("{}", reply),
        None => eprintln!("Nothing to ask."),
    }
    Ok(())
}

async fn cmd_chat(session: &mut Session) -> Result<()> {
    let (route, direction) = session.stops().selection();
    if let Some(greeting) = session.chat().last() {
        println!("BusPro Assistant ({} / {})", route, direction);
        println!("{}", greeting.text);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"\n> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() || line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit")
        {
            break;
        }

        println!("Thinking...");
        if let Some(reply) = session.ask_assistant(line).await {
            println!("{}", reply);
        }
    }

    Ok(())
}

fn cmd_export(session: &Session, output: Option<PathBuf>) -> Result<()> {
    let output = match output {
        Some(path) => path,
        None => default_export_path(&std::env::current_dir()?),
    };

    let written = session.export_csv(&output)?;
    println!("Exported roster to {}", written.display());
    Ok(())
}

async fn cmd_upgrade(session: &mut Session, config: &Config) -> Result<()> {
    if session.is_pro() {
        println!("Pro is already unlocked.");
        return Ok(());
    }

    println!("Processing purchase...");
    let provider = SimulatedPurchase::new(config.purchase_delay());
    match session.unlock_pro(&provider).await? {
        PurchaseOutcome::Success => {
            println!("Pro unlocked. CSV export is now available.");
            Ok(())
        }
        PurchaseOutcome::Failed(reason) => Err(Error::Purchase(reason)),
    }
}

fn cmd_status(session: &Session, config: &Config, output_format: OutputFormat) -> Result<()> {
    output_status(
        output_format,
        session.is_pro(),
        &config.data_dir()?,
        session.stops().state(),
    )
}

fn cmd_reset(config: &Config, yes: bool) -> Result<()> {
    let data_dir = config.data_dir()?;

    // Confirmation
    if !yes {
        println!(
            "Delete all stored stops and Pro status in {}? [y/N]",
            data_dir.display()
        );
        let mut input = String::new();
        std::io::stdin().read_line(&mut input).ok();
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    open_route_store(config)?.reset()?;
    println!("Stored data cleared. The default roster will be loaded next time.");
    Ok(())
}

#[derive(Default)]
struct ConfigChanges {
    show: bool,
    model: Option<String>,
    api_base: Option<String>,
    api_key: Option<String>,
    timeout: Option<u64>,
    output: Option<OutputFormat>,
    data_dir: Option<PathBuf>,
    log_level: Option<String>,
    reset: bool,
}

fn cmd_config(path: &Path, changes: ConfigChanges) -> Result<()> {
    if changes.reset {
        let config = Config::default();
        config.save_to(path)?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load_from(path)?;
    let mut modified = false;

    if let Some(model) = changes.model {
        config.model = model;
        modified = true;
    }

    if let Some(api_base) = changes.api_base {
        config.api_base = api_base;
        modified = true;
    }

    if let Some(api_key) = changes.api_key {
        config.api_key = Some(api_key).filter(|k| !k.trim().is_empty());
        modified = true;
    }

    if let Some(timeout) = changes.timeout {
        config.set_request_timeout(timeout)?;
        modified = true;
    }

    if let Some(output_format) = changes.output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(data_dir) = changes.data_dir {
        config.data_dir = Some(data_dir);
        modified = true;
    }

    if let Some(log_level) = changes.log_level {
        config.log_level = log_level;
        modified = true;
    }

    if modified {
        config.save_to(path)?;
        println!("Configuration updated");
    }

    if changes.show || !modified {
        println!("{}", config);
    }

    Ok(())
}
