//! Task CRUD and filter operations.

use super::{Database, now_ms};
use crate::error::AppError;
use crate::types::{NewTask, Priority, Task, TaskFilter};
use anyhow::Result;
use rusqlite::{Row, params};

/// Parse one `tasks` row. A stored priority string outside
/// High/Medium/Low (e.g. written by another tool) reads back as unset.
pub fn parse_task_row(row: &Row) -> rusqlite::Result<Task> {
    let id: i64 = row.get("id")?;
    let description: String = row.get("description")?;
    let priority: Option<String> = row.get("priority")?;
    let due_date: Option<String> = row.get("due_date")?;
    let completed: i64 = row.get("completed")?;
    let created_at: i64 = row.get("created_at")?;

    Ok(Task {
        id,
        description,
        priority: priority.as_deref().and_then(Priority::from_str),
        due_date,
        completed: completed != 0,
        created_at,
    })
}

/// Reject empty or whitespace-only descriptions before touching the store.
fn require_description(input: &NewTask) -> Result<()> {
    if input.description.trim().is_empty() {
        return Err(AppError::missing_field("description").into());
    }
    Ok(())
}

impl Database {
    /// Create a new task and durably persist it before returning.
    pub fn create_task(&self, input: &NewTask) -> Result<Task> {
        require_description(input)?;
        let now = now_ms();

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO tasks (description, priority, due_date, completed, created_at)
                 VALUES (?1, ?2, ?3, 0, ?4)",
                params![
                    &input.description,
                    input.priority.map(|p| p.as_str()),
                    &input.due_date,
                    now,
                ],
            )?;
            let id = conn.last_insert_rowid();

            let task = conn.query_row("SELECT * FROM tasks WHERE id = ?1", params![id], parse_task_row)?;
            Ok(task)
        })
    }

    /// Get a single task by id, or `None` if it does not exist.
    pub fn get_task(&self, task_id: i64) -> Result<Option<Task>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM tasks WHERE id = ?1")?;

            let result = stmt.query_row(params![task_id], parse_task_row);

            match result {
                Ok(task) => Ok(Some(task)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
    }

    /// List all tasks, or those matching `filter`, in insertion (id) order.
    /// Each call re-queries the full persisted state.
    pub fn get_all(&self, filter: Option<&TaskFilter>) -> Result<Vec<Task>> {
        self.with_conn(|conn| {
            let base = "SELECT * FROM tasks";
            let order = "ORDER BY id";

            let tasks = match filter {
                None => {
                    let mut stmt = conn.prepare(&format!("{base} {order}"))?;
                    let rows = stmt.query_map([], parse_task_row)?;
                    rows.collect::<rusqlite::Result<Vec<_>>>()?
                }
                Some(TaskFilter::ByPriority(priority)) => {
                    let mut stmt =
                        conn.prepare(&format!("{base} WHERE priority = ?1 {order}"))?;
                    let rows = stmt.query_map(params![priority.as_str()], parse_task_row)?;
                    rows.collect::<rusqlite::Result<Vec<_>>>()?
                }
                Some(TaskFilter::ByDueDate(due)) => {
                    let mut stmt =
                        conn.prepare(&format!("{base} WHERE due_date = ?1 {order}"))?;
                    let rows = stmt.query_map(params![due], parse_task_row)?;
                    rows.collect::<rusqlite::Result<Vec<_>>>()?
                }
                Some(TaskFilter::ByStatus(completed)) => {
                    let mut stmt =
                        conn.prepare(&format!("{base} WHERE completed = ?1 {order}"))?;
                    let rows =
                        stmt.query_map(params![*completed as i64], parse_task_row)?;
                    rows.collect::<rusqlite::Result<Vec<_>>>()?
                }
            };

            Ok(tasks)
        })
    }

    /// Map a display position to a task id under the unfiltered id ordering
    /// (the same ordering `get_all(None)` uses).
    ///
    /// The mapping is only meaningful if the caller's last listing matches
    /// the store's current state; any intervening mutation invalidates it.
    pub fn id_at_position(&self, index: usize) -> Result<i64> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id FROM tasks ORDER BY id")?;
            let ids: Vec<i64> = stmt
                .query_map([], |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            ids.get(index)
                .copied()
                .ok_or_else(|| AppError::index_out_of_range(index, ids.len()).into())
        })
    }

    /// Overwrite description, priority and due date of an existing task.
    /// The completion flag is untouched.
    pub fn update_task(&self, task_id: i64, input: &NewTask) -> Result<()> {
        require_description(input)?;

        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE tasks SET description = ?1, priority = ?2, due_date = ?3 WHERE id = ?4",
                params![
                    &input.description,
                    input.priority.map(|p| p.as_str()),
                    &input.due_date,
                    task_id,
                ],
            )?;

            if changed == 0 {
                return Err(AppError::task_not_found(task_id).into());
            }
            Ok(())
        })
    }

    /// Permanently remove a task.
    pub fn delete_task(&self, task_id: i64) -> Result<()> {
        self.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM tasks WHERE id = ?1", params![task_id])?;

            if changed == 0 {
                return Err(AppError::task_not_found(task_id).into());
            }
            Ok(())
        })
    }

    /// Set the completion flag. Idempotent while the task exists; never
    /// clears the flag.
    pub fn mark_complete(&self, task_id: i64) -> Result<()> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE tasks SET completed = 1 WHERE id = ?1",
                params![task_id],
            )?;

            if changed == 0 {
                return Err(AppError::task_not_found(task_id).into());
            }
            Ok(())
        })
    }
}
