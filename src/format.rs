//! Output formatting for task lists.

use crate::types::Task;

/// Output format for the one-shot `list` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Plain,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Some(OutputFormat::Plain),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Placeholder shown for unset priority/due-date fields.
const UNSET: &str = "-";

/// Format a single task as a display line:
/// `<description> | Priority: <priority> | Due: <due_date> | <Completed|Pending>`
pub fn format_task_line(task: &Task) -> String {
    format!(
        "{} | Priority: {} | Due: {} | {}",
        task.description,
        task.priority.map(|p| p.as_str()).unwrap_or(UNSET),
        task.due_date.as_deref().unwrap_or(UNSET),
        if task.completed { "Completed" } else { "Pending" },
    )
}

/// Render a full task list, one line per task, in the order given.
pub fn format_task_lines(tasks: &[Task]) -> Vec<String> {
    tasks.iter().map(format_task_line).collect()
}

/// Serialize a task list as pretty-printed JSON.
pub fn format_tasks_json(tasks: &[Task]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(tasks)?)
}
