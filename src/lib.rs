//! To-do list tracker: a task store over SQLite plus an event-driven
//! interaction controller that turns user intents into store calls and a
//! rendered task list.

pub mod cli;
pub mod controller;
pub mod db;
pub mod error;
pub mod format;
pub mod paths;
pub mod types;
pub mod ui;
