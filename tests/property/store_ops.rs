//! Property-based tests for task store operation sequences.
//!
//! Uses proptest to verify, for arbitrary operation sequences:
//! 1. Every successful mutation is persisted: reopening the storage yields
//!    exactly the in-memory sequence.
//! 2. The store agrees with a plain `Vec` model of the same operations.
//! 3. Rejected operations leave the sequence untouched.
//! 4. Drag sessions always reorder as a single move.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use focusboard::storage::{MemoryStorage, Storage};
use focusboard::tasks::{DragSession, ItemBounds, TaskStore};
use focusboard_model::task::{Priority, Task};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    Delete(usize),
    Toggle(usize),
    Rename(usize, String),
    Priority(usize, Priority),
    ClearCompleted,
    Reorder(usize, usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => "[ a-z]{0,6}".prop_map(Op::Add),
        1 => (0usize..8).prop_map(Op::Delete),
        2 => (0usize..8).prop_map(Op::Toggle),
        1 => ((0usize..8), "[ a-z]{0,6}").prop_map(|(i, s)| Op::Rename(i, s)),
        1 => ((0usize..8), prop::sample::select(Priority::ALL.to_vec()))
            .prop_map(|(i, p)| Op::Priority(i, p)),
        1 => Just(Op::ClearCompleted),
        2 => ((0usize..8), (0usize..8)).prop_map(|(a, b)| Op::Reorder(a, b)),
    ]
}

/// Applies `op` to the reference model.
fn apply_model(model: &mut Vec<Task>, op: &Op) {
    let len = model.len();
    match op {
        Op::Add(name) => {
            if let Some(task) = Task::new(name) {
                model.push(task);
            }
        }
        Op::Delete(i) if *i < len => {
            model.remove(*i);
        }
        Op::Toggle(i) if *i < len => model[*i].completed = !model[*i].completed,
        Op::Rename(i, name) if *i < len => {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                model.remove(*i);
            } else {
                model[*i].name = trimmed.to_string();
            }
        }
        Op::Priority(i, p) if *i < len => model[*i].priority = *p,
        Op::ClearCompleted => model.retain(|t| !t.completed),
        Op::Reorder(from, to) if *from < len && *to < len => {
            let task = model.remove(*from);
            model.insert(*to, task);
        }
        _ => {}
    }
}

/// Applies `op` to the store, ignoring rejections.
fn apply_store(store: &mut TaskStore, op: &Op) {
    match op {
        Op::Add(name) => {
            store.add(name);
        }
        Op::Delete(i) => {
            let _ = store.delete(*i);
        }
        Op::Toggle(i) => {
            let _ = store.toggle_completion(*i);
        }
        Op::Rename(i, name) => {
            let _ = store.edit_name(*i, name);
        }
        Op::Priority(i, p) => {
            let _ = store.edit_priority(*i, *p);
        }
        Op::ClearCompleted => {
            store.clear_completed();
        }
        Op::Reorder(from, to) => {
            let _ = store.reorder(*from, *to);
        }
    }
}

proptest! {
    #[test]
    fn store_matches_model_and_storage(ops in prop::collection::vec(arb_op(), 0..40)) {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let mut store = TaskStore::open(storage.clone());
        let mut model = Vec::new();

        for op in &ops {
            apply_store(&mut store, op);
            apply_model(&mut model, op);
            prop_assert_eq!(store.tasks(), model.as_slice(), "after {:?}", op);
        }

        let reopened = TaskStore::open(storage);
        prop_assert_eq!(reopened.tasks(), store.tasks());
    }

    #[test]
    fn names_stay_trimmed_and_non_empty(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut store = TaskStore::open(Arc::new(MemoryStorage::new()));
        for op in &ops {
            apply_store(&mut store, op);
        }
        for task in store.tasks() {
            prop_assert!(!task.name.is_empty());
            prop_assert_eq!(task.name.trim(), task.name.as_str());
        }
    }

    #[test]
    fn drag_preview_is_a_single_move(
        len in 1usize..10,
        from_seed in any::<usize>(),
        pointers in prop::collection::vec(-1.0f64..12.0, 1..8),
    ) {
        let from = from_seed % len;
        let mut session = DragSession::start(from, len).unwrap();
        let bounds: Vec<ItemBounds> = (0..len)
            .map(|slot| ItemBounds::new(slot as f64, 1.0))
            .collect();
        for y in pointers {
            session.drag_over(y, &bounds);
        }

        let order = session.visual_order();
        let to = session.visual_position().unwrap();
        let mut expected: Vec<usize> = (0..len).collect();
        let moved = expected.remove(from);
        expected.insert(to, moved);
        prop_assert_eq!(order, expected.as_slice());
    }
}
