//! Output formatting module

use buspro_domain::model::{RouteState, Stop};
use buspro_types::{Direction, OutputFormat, Result, RouteSlot};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct CellView<'a> {
    route: RouteSlot,
    direction: Direction,
    stops: &'a [Stop],
}

pub fn output_stops(
    output_format: OutputFormat,
    route: RouteSlot,
    direction: Direction,
    stops: &[Stop],
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let view = CellView {
            route,
            direction,
            stops,
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("\n{} / {}", route, direction);
    println!("{}", "=".repeat(route.label().len() + direction.label().len() + 3));
    if stops.is_empty() {
        println!("No stops yet. Add one with: buspro add --name <NAME>");
        return Ok(());
    }

    for (i, stop) in stops.iter().enumerate() {
        println!("{:>2}. {}  [{}]", i + 1, stop.name, stop.id);
        if !stop.address.is_empty() {
            println!("    Address: {}", stop.address);
        }
        if !stop.parent_name.is_empty() || !stop.parent_contact.is_empty() {
            println!("    Parent:  {} {}", stop.parent_name, stop.parent_contact);
        }
        if !stop.notes.is_empty() {
            println!("    Notes:   {}", stop.notes);
        }
    }

    Ok(())
}

pub fn output_stop(output_format: OutputFormat, stop: &Stop) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(stop)?);
    } else {
        println!("{}  [{}]", stop.name, stop.id);
        println!("Address: {}", stop.address);
        println!("Parent:  {}", stop.parent_name);
        println!("Contact: {}", stop.parent_contact);
        println!("Notes:   {}", stop.notes);
    }
    Ok(())
}

#[derive(Serialize)]
struct CellCount {
    route: RouteSlot,
    direction: Direction,
    stops: usize,
}

#[derive(Serialize)]
struct StatusView<'a> {
    is_pro: bool,
    data_dir: &'a Path,
    cells: Vec<CellCount>,
    total_stops: usize,
}

pub fn output_status(
    output_format: OutputFormat,
    is_pro: bool,
    data_dir: &Path,
    state: &RouteState,
) -> Result<()> {
    let cells: Vec<CellCount> = state
        .cells()
        .map(|(route, direction, stops)| CellCount {
            route,
            direction,
            stops: stops.len(),
        })
        .collect();

    if output_format == OutputFormat::Json {
        let view = StatusView {
            is_pro,
            data_dir,
            cells,
            total_stops: state.total_stops(),
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("Plan:      {}", if is_pro { "Pro" } else { "Free" });
    println!("Data dir:  {}", data_dir.display());
    println!();
    for cell in &cells {
        println!(
            "{:<16} {:<17} {:>3} stop(s)",
            cell.route.label(),
            cell.direction.label(),
            cell.stops
        );
    }
    println!("{:<34} {:>3} stop(s)", "Total", state.total_stops());
    Ok(())
}
