//! CLI definitions for the to-do tracker.
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use clap::{Parser, Subcommand};

/// To-do list tracker backed by a local SQLite store
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the database file (default: per-user data directory)
    #[arg(short, long, global = true)]
    pub database: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the interactive session (default if no subcommand given)
    Run,

    /// Print the task list once and exit
    List {
        /// Filter string, e.g. "priority:High", "due:2024-01-05", "status:pending"
        #[arg(short, long)]
        filter: Option<String>,

        /// Output format: plain (default) or json
        #[arg(long, default_value = "plain")]
        format: String,
    },
}
