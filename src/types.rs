//! Core types for the to-do tracker.

use serde::{Deserialize, Serialize};

/// Task priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Parse a priority string, case-insensitively.
    /// Returns `None` for unrecognized values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

/// A task in the to-do list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned id. Unique for the lifetime of the database file,
    /// never reused after deletion.
    pub id: i64,
    pub description: String,
    pub priority: Option<Priority>,
    /// Due date in `YYYY-MM-DD` form. Stored as entered, not validated.
    pub due_date: Option<String>,
    pub completed: bool,
    pub created_at: i64,
}

/// Input fields for creating or overwriting a task.
/// `update` replaces all three fields at once; there is no partial update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTask {
    pub description: String,
    pub priority: Option<Priority>,
    pub due_date: Option<String>,
}

impl NewTask {
    pub fn new(
        description: impl Into<String>,
        priority: Option<Priority>,
        due_date: Option<String>,
    ) -> Self {
        Self {
            description: description.into(),
            priority,
            due_date,
        }
    }
}

/// A single equality filter over the task list. No ranges, no combinators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskFilter {
    ByPriority(Priority),
    ByDueDate(String),
    /// `true` matches completed tasks, `false` pending ones.
    ByStatus(bool),
}

impl TaskFilter {
    /// Parse a free-text filter string of the form `<field>:<value>` where
    /// field is one of `priority`, `due`, `status`.
    ///
    /// Empty (or whitespace-only) input means "no filter" and returns
    /// `Ok(None)`. Anything else that does not match the three known forms
    /// is rejected.
    pub fn parse(input: &str) -> Result<Option<Self>, String> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        let (field, value) = input
            .split_once(':')
            .ok_or_else(|| format!("expected <field>:<value>, got '{input}'"))?;

        let value = value.trim();
        match field.trim().to_lowercase().as_str() {
            "priority" => {
                let priority = Priority::from_str(value)
                    .ok_or_else(|| format!("unknown priority '{value}' (High, Medium, Low)"))?;
                Ok(Some(TaskFilter::ByPriority(priority)))
            }
            "due" => {
                if value.is_empty() {
                    return Err("due filter requires a date value".to_string());
                }
                Ok(Some(TaskFilter::ByDueDate(value.to_string())))
            }
            "status" => match value.to_lowercase().as_str() {
                "completed" => Ok(Some(TaskFilter::ByStatus(true))),
                "pending" => Ok(Some(TaskFilter::ByStatus(false))),
                _ => Err(format!("unknown status '{value}' (completed or pending)")),
            },
            other => Err(format!(
                "unknown filter field '{other}' (priority, due, status)"
            )),
        }
    }
}
