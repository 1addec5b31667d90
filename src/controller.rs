//! Interaction controller: turns discrete user intents into store calls and
//! a re-rendered task list.
//!
//! The controller is a small state machine over two pieces of state: the
//! current filter and the current selection. The selection holds the task id
//! captured when the user picked a row, not the row position, so it stays
//! accurate when the list was filtered or reordered at selection time.

use crate::db::Database;
use crate::error::{AppError, AppResult};
use crate::format::format_task_lines;
use crate::types::{NewTask, TaskFilter};
use tracing::debug;

/// Result of an intent that needs (or validates) a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The store was called and the list re-rendered.
    Applied,
    /// Nothing is selected; the intent was not dispatched.
    NoSelection,
    /// Required input was blank; the intent was silently dropped.
    Ignored,
}

/// Event-driven controller over the task store.
pub struct Controller {
    db: Database,
    filter: Option<TaskFilter>,
    /// Selected task id, captured at selection time.
    selection: Option<i64>,
    /// Ids of the tasks in the last rendered list, in render order. Used to
    /// resolve row-based selection against what was actually shown.
    visible: Vec<i64>,
}

impl Controller {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            filter: None,
            selection: None,
            visible: Vec::new(),
        }
    }

    pub fn selection(&self) -> Option<i64> {
        self.selection
    }

    pub fn filter(&self) -> Option<&TaskFilter> {
        self.filter.as_ref()
    }

    /// Re-query the store with the current filter and render the full list.
    /// Replaces the previous rendering entirely.
    pub fn reload(&mut self) -> AppResult<Vec<String>> {
        let tasks = self.db.get_all(self.filter.as_ref())?;
        self.visible = tasks.iter().map(|t| t.id).collect();
        Ok(format_task_lines(&tasks))
    }

    /// Select the task shown at row `index` of the last rendered list.
    /// Returns the selected id.
    pub fn select_row(&mut self, index: usize) -> AppResult<i64> {
        let id = self
            .visible
            .get(index)
            .copied()
            .ok_or_else(|| AppError::index_out_of_range(index, self.visible.len()))?;
        debug!(row = index, task_id = id, "row selected");
        self.selection = Some(id);
        Ok(id)
    }

    /// Select a task directly by id.
    pub fn select_task(&mut self, id: i64) {
        self.selection = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Add a new task. A blank description means the user cancelled the
    /// prompt; the intent is dropped without touching the store. The
    /// selection is unaffected either way.
    pub fn add_task(&mut self, input: NewTask) -> AppResult<Outcome> {
        if input.description.trim().is_empty() {
            return Ok(Outcome::Ignored);
        }

        let task = self.db.create_task(&input)?;
        debug!(task_id = task.id, "task created");
        Ok(Outcome::Applied)
    }

    /// Overwrite the selected task's fields.
    pub fn update_selected(&mut self, input: NewTask) -> AppResult<Outcome> {
        let Some(id) = self.selection else {
            return Ok(Outcome::NoSelection);
        };
        if input.description.trim().is_empty() {
            return Ok(Outcome::Ignored);
        }

        self.dispatch(id, |db| db.update_task(id, &input))?;
        Ok(Outcome::Applied)
    }

    /// Delete the selected task. Clears the selection on success since the
    /// id it held no longer exists.
    pub fn delete_selected(&mut self) -> AppResult<Outcome> {
        let Some(id) = self.selection else {
            return Ok(Outcome::NoSelection);
        };

        self.dispatch(id, |db| db.delete_task(id))?;
        self.selection = None;
        Ok(Outcome::Applied)
    }

    /// Mark the selected task completed. Idempotent while the task exists.
    pub fn complete_selected(&mut self) -> AppResult<Outcome> {
        let Some(id) = self.selection else {
            return Ok(Outcome::NoSelection);
        };

        self.dispatch(id, |db| db.mark_complete(id))?;
        Ok(Outcome::Applied)
    }

    /// Run a store mutation against the selected id. If the task vanished
    /// between selection and dispatch, the selection is cleared and the
    /// not-found error surfaced to the presentation layer.
    fn dispatch<F>(&mut self, id: i64, op: F) -> AppResult<()>
    where
        F: FnOnce(&Database) -> anyhow::Result<()>,
    {
        match op(&self.db) {
            Ok(()) => Ok(()),
            Err(err) => {
                let err = AppError::from(err);
                if err.code == crate::error::ErrorCode::TaskNotFound {
                    debug!(task_id = id, "selection went stale, clearing");
                    self.selection = None;
                }
                Err(err)
            }
        }
    }

    /// Parse and apply a filter string (`priority:<v>`, `due:<v>`,
    /// `status:<completed|pending>`; empty resets to unfiltered). A
    /// malformed string fails with a validation error and leaves the
    /// current filter unchanged.
    pub fn set_filter(&mut self, input: &str) -> AppResult<()> {
        let parsed = TaskFilter::parse(input).map_err(AppError::invalid_filter)?;
        debug!(?parsed, "filter applied");
        self.filter = parsed;
        Ok(())
    }
}
