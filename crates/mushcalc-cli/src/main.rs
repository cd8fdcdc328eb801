//! Mushroom attempt planner
//!
//! Solves attempt plans, shares them as tokens and keeps a calendar of saved
//! attempts in a local database.

mod app;
mod commands;

use anyhow::Result;
use app::App;
use clap::Parser;
use commands::{Add, Calendar, CatalogList, Decode, Delete, Encode, List, Lock, Solve};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Mushroom attempt planner
#[derive(Parser)]
#[command(name = "mushcalc")]
#[command(about = "Plan, share and track mushroom attempts", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (RON)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Database file, overriding the configuration
    #[arg(long, global = true, value_name = "FILE")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Solve one of health, AP, start or end from the other three
    Solve(Solve),

    /// Hold one of health, AP or end time and solve from now
    Lock(Lock),

    /// Print the share token of a saved attempt
    Encode(Encode),

    /// Show the plan inside a share token
    Decode(Decode),

    /// Save an attempt
    Add(Add),

    /// List saved attempts
    List(List),

    /// Delete a saved attempt
    Delete(Delete),

    /// Show months with attempts and the days of one month
    Calendar(Calendar),

    /// List creature variants
    Catalog(CatalogList),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // The config picks the log filter, so it loads before tracing is up
    let config_path = cli.config.clone();
    let app = App::load(cli.config, cli.db)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&app.config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match &config_path {
        Some(path) => debug!(path = %path.display(), "loaded config"),
        None => debug!("using default config"),
    }
    debug!(database = %app.config.database_path.display(), "database path");

    match cli.command {
        Command::Solve(cmd) => cmd.execute(&app),
        Command::Lock(cmd) => cmd.execute(&app),
        Command::Encode(cmd) => cmd.execute(&app),
        Command::Decode(cmd) => cmd.execute(&app),
        Command::Add(cmd) => cmd.execute(&app),
        Command::List(cmd) => cmd.execute(&app),
        Command::Delete(cmd) => cmd.execute(&app),
        Command::Calendar(cmd) => cmd.execute(&app),
        Command::Catalog(cmd) => cmd.execute(&app),
    }
}
