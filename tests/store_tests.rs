//! Integration tests for the task store.
//!
//! These tests verify the store operations using an in-memory SQLite
//! database, plus one on-disk durability check.

use todo_tracker::db::Database;
use todo_tracker::error::{AppError, ErrorCode};
use todo_tracker::types::{NewTask, Priority, TaskFilter};

/// Helper to create a fresh in-memory database for testing.
fn setup_db() -> Database {
    Database::open_in_memory().expect("Failed to create in-memory database")
}

fn new_task(description: &str, priority: Option<Priority>, due: Option<&str>) -> NewTask {
    NewTask::new(description, priority, due.map(String::from))
}

fn error_code(err: anyhow::Error) -> ErrorCode {
    err.downcast::<AppError>()
        .expect("expected a typed AppError")
        .code
}

mod create_tests {
    use super::*;

    #[test]
    fn create_returns_task_with_given_fields() {
        let db = setup_db();

        let task = db
            .create_task(&new_task("Buy milk", Some(Priority::Low), Some("2024-01-01")))
            .expect("Failed to create task");

        assert_eq!(task.description, "Buy milk");
        assert_eq!(task.priority, Some(Priority::Low));
        assert_eq!(task.due_date.as_deref(), Some("2024-01-01"));
        assert!(!task.completed);
        assert!(task.created_at > 0);
    }

    #[test]
    fn created_task_is_retrievable_via_get_all() {
        let db = setup_db();
        let created = db
            .create_task(&new_task("Pay bills", Some(Priority::High), Some("2024-01-05")))
            .unwrap();

        let all = db.get_all(None).unwrap();

        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, created.id);
        assert_eq!(all[0].description, "Pay bills");
        assert_eq!(all[0].priority, Some(Priority::High));
        assert_eq!(all[0].due_date.as_deref(), Some("2024-01-05"));
        assert!(!all[0].completed);
    }

    #[test]
    fn unknown_stored_priority_reads_back_as_unset() {
        let db = setup_db();

        // A row written by another tool with a priority outside the
        // High/Medium/Low set.
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO tasks (description, priority, due_date, completed, created_at)
                 VALUES ('legacy task', 'urgent', NULL, 0, 1)",
                [],
            )?;
            Ok(())
        })
        .unwrap();

        let all = db.get_all(None).unwrap();

        assert_eq!(all.len(), 1);
        assert_eq!(all[0].description, "legacy task");
        assert_eq!(all[0].priority, None);
    }

    #[test]
    fn priority_and_due_date_are_optional() {
        let db = setup_db();

        let task = db.create_task(&new_task("Untagged", None, None)).unwrap();

        assert_eq!(task.priority, None);
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn empty_description_is_rejected() {
        let db = setup_db();

        let err = db.create_task(&new_task("", None, None)).unwrap_err();

        assert_eq!(error_code(err), ErrorCode::MissingRequiredField);
        assert!(db.get_all(None).unwrap().is_empty());
    }

    #[test]
    fn whitespace_description_is_rejected_and_persists_nothing() {
        let db = setup_db();

        let err = db.create_task(&new_task("   ", None, None)).unwrap_err();

        assert_eq!(error_code(err), ErrorCode::MissingRequiredField);
        assert!(db.get_all(None).unwrap().is_empty());
    }
}

mod id_tests {
    use super::*;

    #[test]
    fn ids_are_pairwise_distinct() {
        let db = setup_db();

        let a = db.create_task(&new_task("a", None, None)).unwrap();
        let b = db.create_task(&new_task("b", None, None)).unwrap();
        let c = db.create_task(&new_task("c", None, None)).unwrap();

        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn ids_are_never_reused_after_deletion() {
        let db = setup_db();

        let a = db.create_task(&new_task("a", None, None)).unwrap();
        let b = db.create_task(&new_task("b", None, None)).unwrap();

        // Delete the highest id, then create again: the new id must be fresh.
        db.delete_task(b.id).unwrap();
        let c = db.create_task(&new_task("c", None, None)).unwrap();

        assert_ne!(c.id, a.id);
        assert_ne!(c.id, b.id);
        assert!(c.id > b.id);
    }

    #[test]
    fn ids_stay_fresh_across_delete_create_sequences() {
        let db = setup_db();
        let mut seen = Vec::new();

        for round in 0..5 {
            let task = db
                .create_task(&new_task(&format!("task {round}"), None, None))
                .unwrap();
            assert!(!seen.contains(&task.id));
            seen.push(task.id);
            db.delete_task(task.id).unwrap();
        }
    }
}

mod ordering_tests {
    use super::*;

    #[test]
    fn get_all_returns_insertion_order() {
        let db = setup_db();
        let first = db.create_task(&new_task("first", None, None)).unwrap();
        let second = db.create_task(&new_task("second", None, None)).unwrap();
        let third = db.create_task(&new_task("third", None, None)).unwrap();

        let ids: Vec<i64> = db.get_all(None).unwrap().iter().map(|t| t.id).collect();

        assert_eq!(ids, vec![first.id, second.id, third.id]);
    }

    #[test]
    fn id_at_position_follows_unfiltered_order() {
        let db = setup_db();
        let first = db.create_task(&new_task("first", None, None)).unwrap();
        let second = db.create_task(&new_task("second", None, None)).unwrap();

        assert_eq!(db.id_at_position(0).unwrap(), first.id);
        assert_eq!(db.id_at_position(1).unwrap(), second.id);
    }

    #[test]
    fn id_at_position_out_of_range_fails() {
        let db = setup_db();
        db.create_task(&new_task("only", None, None)).unwrap();

        let err = db.id_at_position(1).unwrap_err();

        assert_eq!(error_code(err), ErrorCode::IndexOutOfRange);
    }

    #[test]
    fn id_at_position_on_empty_store_fails() {
        let db = setup_db();

        let err = db.id_at_position(0).unwrap_err();

        assert_eq!(error_code(err), ErrorCode::IndexOutOfRange);
    }
}

mod update_tests {
    use super::*;

    #[test]
    fn update_overwrites_all_three_fields() {
        let db = setup_db();
        let task = db
            .create_task(&new_task("draft", Some(Priority::Low), Some("2024-01-01")))
            .unwrap();

        db.update_task(
            task.id,
            &new_task("final", Some(Priority::High), Some("2024-02-02")),
        )
        .unwrap();

        let all = db.get_all(None).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].description, "final");
        assert_eq!(all[0].priority, Some(Priority::High));
        assert_eq!(all[0].due_date.as_deref(), Some("2024-02-02"));
    }

    #[test]
    fn update_can_unset_optional_fields() {
        let db = setup_db();
        let task = db
            .create_task(&new_task("draft", Some(Priority::Low), Some("2024-01-01")))
            .unwrap();

        db.update_task(task.id, &new_task("draft", None, None)).unwrap();

        let updated = db.get_task(task.id).unwrap().unwrap();
        assert_eq!(updated.priority, None);
        assert_eq!(updated.due_date, None);
    }

    #[test]
    fn update_leaves_completed_unchanged() {
        let db = setup_db();
        let task = db.create_task(&new_task("chore", None, None)).unwrap();
        db.mark_complete(task.id).unwrap();

        db.update_task(task.id, &new_task("renamed chore", None, None))
            .unwrap();

        let updated = db.get_task(task.id).unwrap().unwrap();
        assert!(updated.completed);
        assert_eq!(updated.description, "renamed chore");
    }

    #[test]
    fn update_unknown_id_fails_with_not_found() {
        let db = setup_db();

        let err = db.update_task(999, &new_task("ghost", None, None)).unwrap_err();

        assert_eq!(error_code(err), ErrorCode::TaskNotFound);
    }

    #[test]
    fn update_with_empty_description_is_rejected() {
        let db = setup_db();
        let task = db.create_task(&new_task("keep me", None, None)).unwrap();

        let err = db.update_task(task.id, &new_task("  ", None, None)).unwrap_err();

        assert_eq!(error_code(err), ErrorCode::MissingRequiredField);
        assert_eq!(db.get_task(task.id).unwrap().unwrap().description, "keep me");
    }
}

mod delete_tests {
    use super::*;

    #[test]
    fn deleted_task_never_appears_in_get_all() {
        let db = setup_db();
        let a = db.create_task(&new_task("a", None, None)).unwrap();
        let b = db.create_task(&new_task("b", None, None)).unwrap();

        db.delete_task(a.id).unwrap();

        let ids: Vec<i64> = db.get_all(None).unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![b.id]);
    }

    #[test]
    fn second_delete_of_same_id_fails_with_not_found() {
        let db = setup_db();
        let task = db.create_task(&new_task("once", None, None)).unwrap();

        db.delete_task(task.id).unwrap();
        let err = db.delete_task(task.id).unwrap_err();

        assert_eq!(error_code(err), ErrorCode::TaskNotFound);
    }

    #[test]
    fn delete_unknown_id_fails_with_not_found() {
        let db = setup_db();

        let err = db.delete_task(42).unwrap_err();

        assert_eq!(error_code(err), ErrorCode::TaskNotFound);
    }
}

mod complete_tests {
    use super::*;

    #[test]
    fn mark_complete_sets_the_flag() {
        let db = setup_db();
        let task = db.create_task(&new_task("todo", None, None)).unwrap();

        db.mark_complete(task.id).unwrap();

        assert!(db.get_task(task.id).unwrap().unwrap().completed);
    }

    #[test]
    fn mark_complete_is_idempotent() {
        let db = setup_db();
        let task = db.create_task(&new_task("todo", None, None)).unwrap();

        db.mark_complete(task.id).unwrap();
        db.mark_complete(task.id).unwrap();

        assert!(db.get_task(task.id).unwrap().unwrap().completed);
    }

    #[test]
    fn mark_complete_on_deleted_task_fails_with_not_found() {
        let db = setup_db();
        let task = db.create_task(&new_task("gone", None, None)).unwrap();
        db.delete_task(task.id).unwrap();

        let err = db.mark_complete(task.id).unwrap_err();

        assert_eq!(error_code(err), ErrorCode::TaskNotFound);
    }

    #[test]
    fn mark_complete_never_unsets() {
        let db = setup_db();
        let task = db.create_task(&new_task("done", None, None)).unwrap();
        db.mark_complete(task.id).unwrap();

        // A repeat call must leave the flag set, not toggle it.
        db.mark_complete(task.id).unwrap();
        assert!(db.get_task(task.id).unwrap().unwrap().completed);
    }
}

mod filter_tests {
    use super::*;

    fn seed(db: &Database) -> (i64, i64, i64) {
        let a = db
            .create_task(&new_task("Buy milk", Some(Priority::Low), Some("2024-01-01")))
            .unwrap();
        let b = db
            .create_task(&new_task("Pay bills", Some(Priority::High), Some("2024-01-05")))
            .unwrap();
        let c = db
            .create_task(&new_task("Walk dog", Some(Priority::High), Some("2024-01-01")))
            .unwrap();
        (a.id, b.id, c.id)
    }

    #[test]
    fn filter_by_priority_returns_exact_subset_in_store_order() {
        let db = setup_db();
        let (_, b, c) = seed(&db);

        let high = db
            .get_all(Some(&TaskFilter::ByPriority(Priority::High)))
            .unwrap();

        let ids: Vec<i64> = high.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![b, c]);
        assert!(high.iter().all(|t| t.priority == Some(Priority::High)));
    }

    #[test]
    fn filter_by_due_date_matches_equality_only() {
        let db = setup_db();
        let (a, _, c) = seed(&db);

        let due = db
            .get_all(Some(&TaskFilter::ByDueDate("2024-01-01".to_string())))
            .unwrap();

        let ids: Vec<i64> = due.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn filter_by_status_splits_completed_and_pending() {
        let db = setup_db();
        let (a, b, c) = seed(&db);
        db.mark_complete(a).unwrap();

        let completed = db.get_all(Some(&TaskFilter::ByStatus(true))).unwrap();
        let pending = db.get_all(Some(&TaskFilter::ByStatus(false))).unwrap();

        assert_eq!(completed.iter().map(|t| t.id).collect::<Vec<_>>(), vec![a]);
        assert_eq!(
            pending.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![b, c]
        );
    }

    #[test]
    fn pending_then_completed_scenario() {
        let db = setup_db();
        let milk = db
            .create_task(&new_task("Buy milk", Some(Priority::Low), Some("2024-01-01")))
            .unwrap();
        let bills = db
            .create_task(&new_task("Pay bills", Some(Priority::High), Some("2024-01-05")))
            .unwrap();

        let pending = db.get_all(Some(&TaskFilter::ByStatus(false))).unwrap();
        assert_eq!(
            pending.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![milk.id, bills.id]
        );

        db.mark_complete(milk.id).unwrap();

        let completed = db.get_all(Some(&TaskFilter::ByStatus(true))).unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].description, "Buy milk");
    }

    #[test]
    fn filter_with_no_matches_returns_empty() {
        let db = setup_db();
        seed(&db);

        let medium = db
            .get_all(Some(&TaskFilter::ByPriority(Priority::Medium)))
            .unwrap();

        assert!(medium.is_empty());
    }
}

mod durability_tests {
    use super::*;

    #[test]
    fn tasks_survive_reopening_the_database_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("todo.db");

        let id = {
            let db = Database::open(&path).unwrap();
            let task = db
                .create_task(&new_task("persisted", Some(Priority::Medium), None))
                .unwrap();
            db.mark_complete(task.id).unwrap();
            task.id
        };

        let db = Database::open(&path).unwrap();
        let all = db.get_all(None).unwrap();

        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);
        assert_eq!(all[0].description, "persisted");
        assert!(all[0].completed);
    }

    #[test]
    fn schema_setup_is_idempotent_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todo.db");

        for _ in 0..3 {
            let db = Database::open(&path).unwrap();
            db.get_all(None).unwrap();
        }
    }
}
