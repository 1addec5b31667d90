//! To-Do Tracker
//!
//! A desktop-style to-do list application: tasks live in a local SQLite
//! file; an interactive session (or one-shot `list`) drives the store
//! through the interaction controller.

use anyhow::{Result, anyhow};
use clap::Parser;
use std::fs::OpenOptions;
use todo_tracker::cli::{Cli, Command};
use todo_tracker::controller::Controller;
use todo_tracker::db::Database;
use todo_tracker::format::{OutputFormat, format_task_lines, format_tasks_json};
use todo_tracker::paths::resolve_db_path;
use todo_tracker::types::TaskFilter;
use todo_tracker::ui;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    let db_path = resolve_db_path(cli.database.as_deref())?;
    info!(path = %db_path.display(), "opening task database");
    let db = Database::open(&db_path)?;

    match cli.command {
        Some(Command::List { filter, format }) => {
            run_list(db, filter.as_deref(), &format)?;
        }
        Some(Command::Run) | None => {
            let controller = Controller::new(db);
            ui::run(controller)?;
        }
    }

    Ok(())
}

/// Print the task list once and exit.
fn run_list(db: Database, filter: Option<&str>, format: &str) -> Result<()> {
    let format =
        OutputFormat::from_str(format).ok_or_else(|| anyhow!("unknown format '{format}'"))?;

    let filter = match filter {
        Some(text) => TaskFilter::parse(text).map_err(|reason| anyhow!(reason))?,
        None => None,
    };

    let tasks = db.get_all(filter.as_ref())?;
    match format {
        OutputFormat::Plain => {
            for line in format_task_lines(&tasks) {
                println!("{line}");
            }
        }
        OutputFormat::Json => {
            println!("{}", format_tasks_json(&tasks)?);
        }
    }

    Ok(())
}
