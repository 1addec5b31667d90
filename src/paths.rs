//! Storage-file location resolution.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// File name of the task database inside the app data directory.
const DB_FILE: &str = "todo.db";

/// Resolve the database path: an explicit CLI override wins, otherwise the
/// per-user data directory (created on demand), falling back to the current
/// directory when no data dir is available.
pub fn resolve_db_path(override_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(PathBuf::from(path));
    }

    let Some(data_dir) = dirs::data_dir() else {
        return Ok(PathBuf::from(DB_FILE));
    };

    let app_dir = data_dir.join("todo-tracker");
    std::fs::create_dir_all(&app_dir)
        .with_context(|| format!("creating data directory {}", app_dir.display()))?;
    Ok(app_dir.join(DB_FILE))
}
