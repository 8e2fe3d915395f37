use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use planner::config::PlannerConfig;
use planner::doc::{Layout, PlacedItem, Room};
use planner::error::{ConfigError, LayoutError};
use planner::geometry::LayoutReport;
use planner::seed::{Product, seed_layout};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid planner config: {0}")]
    Config(#[from] ConfigError),
    #[error("layout has {0} problem item(s)")]
    Problems(usize),
}

#[derive(Parser, Debug)]
#[command(name = "planner", about = "Offline checks for room layouts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Re-validate a saved layout blob and print every item's flags.
    Validate {
        layout: PathBuf,
        /// Exit non-zero when any item collides or violates a wall.
        #[arg(long)]
        strict: bool,
        /// Print the re-validated blob instead of the summary.
        #[arg(long)]
        json: bool,
    },
    /// Build an initial layout from a product list and print the blob.
    Seed(SeedCommand),
    /// Print the effective planner config from `PLANNER_*` variables.
    Config,
}

#[derive(Args, Debug)]
struct SeedCommand {
    /// JSON array of products (`productId`, `name`, `width`, `depth`, `quantity`, ...).
    products: PathBuf,
    #[arg(long, env = "PLANNER_ROOM_WIDTH")]
    width: f64,
    #[arg(long, env = "PLANNER_ROOM_DEPTH")]
    depth: f64,
    #[arg(long, default_value_t = 0.0)]
    height: f64,
    #[arg(long)]
    door_x: f64,
    #[arg(long)]
    door_width: f64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Validate { layout, strict, json } => run_validate(&layout, strict, json),
        Command::Seed(seed) => run_seed(&seed),
        Command::Config => run_config(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "planner command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_owned(), source })
}

fn run_validate(path: &Path, strict: bool, json: bool) -> Result<(), CliError> {
    let layout = Layout::from_json(&read(path)?)?.validated();
    let report = LayoutReport::from_items(&layout.items);
    tracing::info!(
        items = report.items,
        collisions = report.collisions,
        wall_violations = report.wall_violations,
        "layout checked"
    );

    if json {
        println!("{}", layout.to_json()?);
    } else {
        print_summary(&layout.room, &layout.items, &report);
    }

    let problems = layout.items.iter().filter(|i| i.is_collision || i.is_wall_violation).count();
    if strict && problems > 0 {
        return Err(CliError::Problems(problems));
    }
    Ok(())
}

fn print_summary(room: &Room, items: &[PlacedItem], report: &LayoutReport) {
    println!(
        "room {}x{} cm, door {}..{} cm",
        room.width,
        room.depth,
        room.door_x,
        room.door_end()
    );
    for item in items {
        let mut flags = Vec::new();
        if item.is_collision {
            flags.push("collision");
        }
        if item.is_wall_violation {
            flags.push("wall");
        }
        let flags = if flags.is_empty() { "ok".to_owned() } else { flags.join(",") };
        println!(
            "{} {:<24} at ({}, {}) {}x{} [{}]",
            item.id, item.name, item.x, item.y, item.width, item.depth, flags
        );
        for warning in &item.warnings {
            println!("    - {warning}");
        }
    }
    println!(
        "{} item(s), {} collision(s), {} wall violation(s), {} warning(s)",
        report.items, report.collisions, report.wall_violations, report.warnings
    );
}

fn run_seed(cmd: &SeedCommand) -> Result<(), CliError> {
    let room = Room::try_new(cmd.width, cmd.depth, cmd.height, cmd.door_x, cmd.door_width)?;
    let products: Vec<Product> = serde_json::from_str(&read(&cmd.products)?)?;
    let items = seed_layout(&room, &products);
    let report = LayoutReport::from_items(&items);
    tracing::info!(items = report.items, clean = report.is_clean(), "layout seeded");
    println!("{}", Layout { room, items }.to_json()?);
    Ok(())
}

fn run_config() -> Result<(), CliError> {
    let config = PlannerConfig::from_env()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
