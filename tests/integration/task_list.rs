//! Integration tests for the task list: store, controller and file storage.
//!
//! Tests persistence across reopen, legacy record migration, move-semantics
//! reordering, the drag-reorder protocol and the inline edit protocol,
//! all against a real `FileStorage` in a temporary directory.
//!
//! Verification command: `cargo test --test task_list`

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use focusboard::storage::{FileStorage, MemoryStorage, Storage};
use focusboard::tasks::{
    EditField, EditSignal, Intent, ItemBounds, Outcome, TaskError, TaskListController, TaskStore,
};
use focusboard::theme::ThemeSetting;
use focusboard_model::task::{Priority, Task};
use focusboard_model::theme::ThemePreference;
use focusboard_model::{TASKS_KEY, THEME_KEY};
use tempfile::TempDir;

// =============================================================================
// Test helpers
// =============================================================================

fn file_storage() -> (TempDir, Arc<dyn Storage>) {
    let dir = tempfile::tempdir().unwrap();
    let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(dir.path().join("board")));
    (dir, storage)
}

fn store_with(storage: &Arc<dyn Storage>, names: &[&str]) -> TaskStore {
    let mut store = TaskStore::open(storage.clone());
    for name in names {
        assert!(store.add(name));
    }
    store
}

fn names(store: &TaskStore) -> Vec<&str> {
    store.tasks().iter().map(|t| t.name.as_str()).collect()
}

fn reloaded(storage: &Arc<dyn Storage>) -> Vec<Task> {
    TaskStore::open(storage.clone()).snapshot()
}

/// One-row-per-slot geometry like the terminal renderer supplies.
fn rows(len: usize) -> Vec<ItemBounds> {
    (0..len)
        .map(|slot| ItemBounds::new(slot as f64, 1.0))
        .collect()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// =============================================================================
// Store + persistence
// =============================================================================

#[test]
fn every_mutation_survives_reopen() {
    let (_dir, storage) = file_storage();
    let mut store = store_with(&storage, &["A", "B", "C"]);
    assert_eq!(reloaded(&storage), store.snapshot());

    store.toggle_completion(1).unwrap();
    assert_eq!(reloaded(&storage), store.snapshot());

    store.edit_due_date(0, "2024-06-01").unwrap();
    assert_eq!(reloaded(&storage), store.snapshot());

    store.edit_priority(2, Priority::High).unwrap();
    assert_eq!(reloaded(&storage), store.snapshot());

    store.reorder(0, 2).unwrap();
    assert_eq!(reloaded(&storage), store.snapshot());

    store.edit_name(0, "  Renamed ").unwrap();
    assert_eq!(reloaded(&storage), store.snapshot());

    store.delete(1).unwrap();
    assert_eq!(reloaded(&storage), store.snapshot());

    store.clear_completed();
    assert_eq!(reloaded(&storage), store.snapshot());
}

#[test]
fn blank_adds_are_ignored_and_names_are_trimmed() {
    let (_dir, storage) = file_storage();
    let mut store = TaskStore::open(storage.clone());
    assert!(!store.add(""));
    assert!(!store.add("   "));
    assert!(store.is_empty());
    assert!(storage.get(TASKS_KEY).is_none());

    assert!(store.add(" Buy milk "));
    assert_eq!(
        store.tasks(),
        [Task {
            name: "Buy milk".to_string(),
            completed: false,
            due_date: None,
            priority: Priority::None,
        }]
    );
}

#[test]
fn empty_rename_deletes() {
    let (_dir, storage) = file_storage();
    let mut renamed = store_with(&storage, &["A", "B", "C"]);
    renamed.edit_name(1, "   ").unwrap();

    let (_dir2, storage2) = file_storage();
    let mut deleted = store_with(&storage2, &["A", "B", "C"]);
    deleted.delete(1).unwrap();

    assert_eq!(renamed.tasks(), deleted.tasks());
    assert_eq!(reloaded(&storage), reloaded(&storage2));
}

#[test]
fn legacy_records_are_migrated_on_load() {
    let (_dir, storage) = file_storage();
    storage
        .set(TASKS_KEY, r#"[{"name":"X","completed":true}]"#)
        .unwrap();
    let store = TaskStore::open(storage.clone());
    assert_eq!(
        store.tasks(),
        [Task {
            name: "X".to_string(),
            completed: true,
            due_date: None,
            priority: Priority::None,
        }]
    );
    // Loading alone does not rewrite storage.
    assert_eq!(
        storage.get(TASKS_KEY).as_deref(),
        Some(r#"[{"name":"X","completed":true}]"#)
    );
}

#[test]
fn malformed_blob_loads_empty() {
    let (_dir, storage) = file_storage();
    storage.set(TASKS_KEY, "{not json").unwrap();
    assert!(TaskStore::open(storage).is_empty());
}

#[test]
fn reorder_has_move_semantics() {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let mut store = store_with(&storage, &["A", "B", "C"]);
    store.reorder(0, 2).unwrap();
    assert_eq!(names(&store), ["B", "C", "A"]);

    let mut store = TaskStore::new(Arc::new(MemoryStorage::new()));
    for name in ["A", "B", "C"] {
        store.add(name);
    }
    store.reorder(2, 0).unwrap();
    assert_eq!(names(&store), ["C", "A", "B"]);
}

#[test]
fn clear_completed_keeps_order_of_the_rest() {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let mut store = store_with(&storage, &["done1", "open", "done2"]);
    store.toggle_completion(0).unwrap();
    store.toggle_completion(2).unwrap();
    assert_eq!(store.clear_completed(), 2);
    assert_eq!(names(&store), ["open"]);
}

#[test]
fn overdue_is_a_calendar_comparison() {
    let today = date(2024, 3, 10);
    let yesterday = today.checked_sub_days(Days::new(1)).unwrap();
    let mut task = Task::new("report").unwrap();

    task.due_date = Some(yesterday);
    assert!(task.is_overdue(today));
    task.completed = true;
    assert!(!task.is_overdue(today));

    task.completed = false;
    task.due_date = Some(today);
    assert!(!task.is_overdue(today));
}

#[test]
fn rejected_operations_do_not_persist() {
    let (_dir, storage) = file_storage();
    let mut store = store_with(&storage, &["A"]);
    let before = storage.get(TASKS_KEY);
    let revision = store.revision();

    assert!(matches!(
        store.delete(5),
        Err(TaskError::IndexOutOfRange { index: 5, len: 1 })
    ));
    assert!(matches!(
        store.edit_due_date(0, "31/12/2024"),
        Err(TaskError::InvalidDueDate(_))
    ));
    assert!(store.reorder(0, 1).is_err());

    assert_eq!(storage.get(TASKS_KEY), before);
    assert_eq!(store.revision(), revision);
}

// =============================================================================
// Controller: intents
// =============================================================================

#[test]
fn intent_table_reaches_the_store() {
    let (_dir, storage) = file_storage();
    let mut controller = TaskListController::new(TaskStore::open(storage.clone()));

    assert_eq!(
        controller.dispatch(Intent::Add("Write report".into())).unwrap(),
        Outcome::Changed
    );
    assert_eq!(
        controller.dispatch(Intent::Add("  ".into())).unwrap(),
        Outcome::Unchanged
    );
    controller
        .dispatch(Intent::EditDueDate(0, "2024-05-01".into()))
        .unwrap();
    controller
        .dispatch(Intent::EditPriority(0, "high".into()))
        .unwrap();
    assert_eq!(
        controller.dispatch(Intent::Toggle(0)).unwrap(),
        Outcome::TaskCompleted
    );

    let task = &reloaded(&storage)[0];
    assert_eq!(task.due_date, Some(date(2024, 5, 1)));
    assert_eq!(task.priority, Priority::High);
    assert!(task.completed);

    assert!(matches!(
        controller.dispatch(Intent::EditPriority(0, "urgent".into())),
        Err(TaskError::UnknownPriority(_))
    ));
    assert_eq!(reloaded(&storage)[0].priority, Priority::High);

    controller.dispatch(Intent::ClearCompleted).unwrap();
    assert!(reloaded(&storage).is_empty());
}

// =============================================================================
// Controller: drag reorder
// =============================================================================

#[test]
fn drag_to_bottom_then_drop_moves_task() {
    let (_dir, storage) = file_storage();
    let mut controller = TaskListController::new(store_with(&storage, &["A", "B", "C", "D"]));

    controller.dispatch(Intent::DragStart(0)).unwrap();
    let outcome = controller
        .dispatch(Intent::DragOver {
            pointer_y: 10.0,
            bounds: rows(4),
        })
        .unwrap();
    assert_eq!(outcome, Outcome::DragPreview);
    assert_eq!(controller.display_order(), [1, 2, 3, 0]);
    // Nothing persisted until the drop.
    assert_eq!(names(&TaskStore::open(storage.clone())), ["A", "B", "C", "D"]);

    assert_eq!(controller.dispatch(Intent::Drop).unwrap(), Outcome::Changed);
    assert!(controller.drag_session().is_none());
    assert_eq!(names(&TaskStore::open(storage)), ["B", "C", "D", "A"]);
}

#[test]
fn drag_places_before_nearest_item_below_pointer() {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let mut controller = TaskListController::new(store_with(&storage, &["A", "B", "C", "D"]));

    controller.dispatch(Intent::DragStart(3)).unwrap();
    // Just above B's midpoint (1.5): D goes in front of B.
    controller
        .dispatch(Intent::DragOver {
            pointer_y: 1.2,
            bounds: rows(4),
        })
        .unwrap();
    assert_eq!(controller.display_order(), [0, 3, 1, 2]);

    controller.dispatch(Intent::Drop).unwrap();
    assert_eq!(names(controller.store()), ["A", "D", "B", "C"]);
}

#[test]
fn drag_end_without_drop_changes_nothing() {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let mut controller = TaskListController::new(store_with(&storage, &["A", "B", "C"]));
    controller.dispatch(Intent::DragStart(0)).unwrap();
    controller
        .dispatch(Intent::DragOver {
            pointer_y: 5.0,
            bounds: rows(3),
        })
        .unwrap();
    controller.dispatch(Intent::DragEnd).unwrap();

    assert!(controller.drag_session().is_none());
    assert_eq!(controller.display_order(), [0, 1, 2]);
    assert_eq!(names(controller.store()), ["A", "B", "C"]);
}

#[test]
fn stale_drag_session_drops_as_noop() {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let mut controller = TaskListController::new(store_with(&storage, &["A", "B", "C"]));
    controller.dispatch(Intent::DragStart(0)).unwrap();
    controller
        .dispatch(Intent::DragOver {
            pointer_y: 5.0,
            bounds: rows(3),
        })
        .unwrap();

    // The list changes underneath the drag.
    controller.dispatch(Intent::Add("D".into())).unwrap();

    assert_eq!(controller.dispatch(Intent::Drop).unwrap(), Outcome::Unchanged);
    assert!(controller.drag_session().is_none());
    assert_eq!(names(controller.store()), ["A", "B", "C", "D"]);
}

// =============================================================================
// Controller: inline edit
// =============================================================================

#[test]
fn confirm_then_blur_commits_once() {
    let (_dir, storage) = file_storage();
    let mut controller = TaskListController::new(store_with(&storage, &["A", "B"]));
    let revision = controller.store().revision();

    controller.begin_edit(0, EditField::Name).unwrap();
    controller
        .edit_session_mut()
        .unwrap()
        .input_mut()
        .insert_char('!');
    assert_eq!(
        controller.signal_edit(EditSignal::Confirm).unwrap(),
        Outcome::Changed
    );
    assert_eq!(
        controller.signal_edit(EditSignal::Blur).unwrap(),
        Outcome::Unchanged
    );

    assert_eq!(controller.store().revision(), revision + 1);
    assert_eq!(names(&TaskStore::open(storage)), ["A!", "B"]);
}

#[test]
fn clearing_a_name_in_edit_deletes_the_task() {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let mut controller = TaskListController::new(store_with(&storage, &["A", "B"]));
    controller.begin_edit(1, EditField::Name).unwrap();
    controller
        .edit_session_mut()
        .unwrap()
        .input_mut()
        .backspace();
    controller.signal_edit(EditSignal::Changed).unwrap();
    assert_eq!(names(controller.store()), ["A"]);
}

#[test]
fn due_date_edit_prefills_and_clears() {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let mut store = store_with(&storage, &["A"]);
    store.edit_due_date(0, "2024-02-29").unwrap();
    let mut controller = TaskListController::new(store);

    controller.begin_edit(0, EditField::DueDate).unwrap();
    let session = controller.edit_session().unwrap();
    assert_eq!(session.input().text(), "2024-02-29");

    let input = controller.edit_session_mut().unwrap().input_mut();
    input.home();
    for _ in 0..10 {
        input.delete();
    }
    controller.signal_edit(EditSignal::Blur).unwrap();
    assert_eq!(controller.store().tasks()[0].due_date, None);
}

#[test]
fn starting_a_new_edit_commits_the_previous_one() {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let mut controller = TaskListController::new(store_with(&storage, &["A", "B"]));
    controller.begin_edit(0, EditField::Name).unwrap();
    controller
        .edit_session_mut()
        .unwrap()
        .input_mut()
        .insert_char('x');

    controller.begin_edit(1, EditField::Name).unwrap();
    assert_eq!(names(controller.store()), ["Ax", "B"]);
    assert_eq!(controller.edit_session().unwrap().index(), 1);
}

// =============================================================================
// Theme preference
// =============================================================================

#[test]
fn theme_toggle_round_trips_through_storage() {
    let (_dir, storage) = file_storage();
    let mut theme = ThemeSetting::load(storage.clone());
    assert_eq!(theme.current(), ThemePreference::Light);

    assert_eq!(theme.toggle(), ThemePreference::Dark);
    assert_eq!(storage.get(THEME_KEY).as_deref(), Some("dark"));
    assert_eq!(
        ThemeSetting::load(storage.clone()).current(),
        ThemePreference::Dark
    );

    theme.toggle();
    assert_eq!(
        ThemeSetting::load(storage).current(),
        ThemePreference::Light
    );
}
