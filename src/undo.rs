//! Single-step undo of the most recent mutation.
//!
//! The log holds at most one [`Operation`]. Recording a new one replaces
//! whatever was there, and undoing consumes it. Callers that persist the
//! result use [`UndoLog::preview`] and [`UndoLog::clear`] so the entry is
//! only dropped once the write went through.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::task::{Collection, Task};
use crate::ops::task_ops;

/// A mutation that can be reversed, with the state needed to reverse it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// A task was added; carries the created task
    Add(Task),
    /// A task's done flag changed; carries the task before the change
    Update(Task),
    /// A task was deleted; carries the removed task
    Delete(Task),
    /// The list was cleared; carries the whole prior collection
    Clear(Collection),
}

impl Operation {
    pub fn kind(&self) -> ActionKind {
        match self {
            Operation::Add(_) => ActionKind::Add,
            Operation::Update(_) => ActionKind::Update,
            Operation::Delete(_) => ActionKind::Delete,
            Operation::Clear(_) => ActionKind::Clear,
        }
    }

    fn snapshot(&self) -> Snapshot {
        match self {
            Operation::Add(task) | Operation::Update(task) | Operation::Delete(task) => {
                Snapshot::Task(task.clone())
            }
            Operation::Clear(tasks) => Snapshot::Collection(tasks.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    None,
    Add,
    Update,
    Delete,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Snapshot {
    Task(Task),
    Collection(Collection),
}

/// Outcome of an undo request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UndoStatus {
    Success,
    NoAction,
}

/// Serializable view of the log's current entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LastAction {
    pub kind: ActionKind,
    pub snapshot: Option<Snapshot>,
    pub recorded_at: Option<DateTime<Utc>>,
}

impl LastAction {
    pub fn none() -> Self {
        LastAction {
            kind: ActionKind::None,
            snapshot: None,
            recorded_at: None,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    op: Operation,
    recorded_at: DateTime<Utc>,
}

/// The single-entry undo log
#[derive(Debug, Default)]
pub struct UndoLog {
    last: Option<Entry>,
}

impl UndoLog {
    pub fn new() -> Self {
        UndoLog { last: None }
    }

    /// Record an operation, replacing any entry not yet undone.
    pub fn record(&mut self, op: Operation) {
        self.record_at(op, Utc::now());
    }

    pub fn record_at(&mut self, op: Operation, recorded_at: DateTime<Utc>) {
        if let Some(prev) = &self.last {
            tracing::debug!(kind = ?prev.op.kind(), "undo entry replaced before use");
        }
        self.last = Some(Entry { op, recorded_at });
    }

    /// Reverse the recorded operation against `tasks`.
    ///
    /// With nothing recorded, `tasks` comes back unchanged with
    /// [`UndoStatus::NoAction`]. Otherwise the log is emptied whether or not
    /// the snapshot still matched live data.
    pub fn undo(&mut self, tasks: Collection) -> (Collection, UndoStatus) {
        let result = self.preview(tasks);
        self.clear();
        result
    }

    /// What [`UndoLog::undo`] would return, leaving the entry in place.
    pub fn preview(&self, tasks: Collection) -> (Collection, UndoStatus) {
        match &self.last {
            None => (tasks, UndoStatus::NoAction),
            Some(entry) => (apply_inverse(entry.op.clone(), tasks), UndoStatus::Success),
        }
    }

    /// Drop the recorded entry, if any.
    pub fn clear(&mut self) {
        self.last = None;
    }

    pub fn peek(&self) -> Option<&Operation> {
        self.last.as_ref().map(|e| &e.op)
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }

    pub fn last_action(&self) -> LastAction {
        match &self.last {
            None => LastAction::none(),
            Some(entry) => LastAction {
                kind: entry.op.kind(),
                snapshot: Some(entry.op.snapshot()),
                recorded_at: Some(entry.recorded_at),
            },
        }
    }
}

/// Apply the inverse of an operation
fn apply_inverse(op: Operation, tasks: Collection) -> Collection {
    match op {
        Operation::Add(task) => task_ops::discard(tasks, &task.id),
        Operation::Update(prior) => task_ops::restore_fields(tasks, &prior),
        // Restored at the end; the original position is not kept
        Operation::Delete(task) => task_ops::append(tasks, task),
        Operation::Clear(prior) => prior,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use proptest::sample::Index;
    use std::ops::Range;

    fn collection(len: Range<usize>) -> impl Strategy<Value = Collection> {
        prop::collection::vec(("[a-z ,\"]{1,10}", any::<bool>()), len).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (description, done))| Task::new(format!("t{}", i), description, done))
                .collect()
        })
    }

    fn task(id: &str, description: &str, done: bool) -> Task {
        Task::new(id.into(), description.into(), done)
    }

    fn sample() -> Collection {
        vec![task("a", "A", false), task("b", "B", true)]
    }

    #[test]
    fn new_log_is_empty() {
        let log = UndoLog::new();
        assert!(log.is_empty());
        assert!(log.peek().is_none());
        assert_eq!(log.last_action(), LastAction::none());
    }

    #[test]
    fn undo_on_empty_is_no_action() {
        let mut log = UndoLog::new();
        let (after, status) = log.undo(sample());
        assert_eq!(status, UndoStatus::NoAction);
        assert_eq!(after, sample());
    }

    #[test]
    fn record_replaces_previous_entry() {
        let mut log = UndoLog::new();
        log.record(Operation::Add(task("a", "A", false)));
        log.record(Operation::Delete(task("b", "B", true)));
        assert_eq!(log.peek(), Some(&Operation::Delete(task("b", "B", true))));
    }

    #[test]
    fn undo_add_removes_task() {
        let mut log = UndoLog::new();
        log.record(Operation::Add(task("b", "B", true)));
        let (after, status) = log.undo(sample());
        assert_eq!(status, UndoStatus::Success);
        assert_eq!(after, vec![task("a", "A", false)]);
        assert!(log.is_empty());
    }

    #[test]
    fn undo_add_of_missing_task_still_succeeds() {
        let mut log = UndoLog::new();
        log.record(Operation::Add(task("zzz", "Gone", false)));
        let (after, status) = log.undo(sample());
        assert_eq!(status, UndoStatus::Success);
        assert_eq!(after, sample());
        assert!(log.is_empty());
    }

    #[test]
    fn undo_update_restores_fields_in_place() {
        let mut log = UndoLog::new();
        log.record(Operation::Update(task("b", "B", false)));
        let (after, _) = log.undo(sample());
        assert_eq!(after, vec![task("a", "A", false), task("b", "B", false)]);
    }

    #[test]
    fn undo_update_of_missing_task_is_noop_but_consumed() {
        let mut log = UndoLog::new();
        log.record(Operation::Update(task("zzz", "Gone", false)));
        let (after, status) = log.undo(sample());
        assert_eq!(status, UndoStatus::Success);
        assert_eq!(after, sample());
        assert!(log.is_empty());
    }

    #[test]
    fn undo_delete_appends_at_end() {
        let mut log = UndoLog::new();
        let current = vec![task("b", "B", true)];
        log.record(Operation::Delete(task("a", "A", false)));
        let (after, _) = log.undo(current);
        assert_eq!(after, vec![task("b", "B", true), task("a", "A", false)]);
    }

    #[test]
    fn undo_clear_replaces_everything() {
        let mut log = UndoLog::new();
        log.record(Operation::Clear(sample()));
        // Anything added after the clear is discarded
        let (after, status) = log.undo(vec![task("new", "New", false)]);
        assert_eq!(status, UndoStatus::Success);
        assert_eq!(after, sample());

        let (again, status) = log.undo(after.clone());
        assert_eq!(status, UndoStatus::NoAction);
        assert_eq!(again, after);
    }

    #[test]
    fn preview_keeps_the_entry() {
        let mut log = UndoLog::new();
        log.record(Operation::Delete(task("c", "C", false)));

        let (first, status) = log.preview(sample());
        assert_eq!(status, UndoStatus::Success);
        assert_eq!(first.last(), Some(&task("c", "C", false)));
        assert_eq!(log.last_action().kind, ActionKind::Delete);

        // Previewing again gives the same answer until the entry is cleared
        assert_eq!(log.preview(sample()).0, first);
        log.clear();
        assert_eq!(log.preview(sample()), (sample(), UndoStatus::NoAction));
    }

    #[test]
    fn last_action_json_shapes() {
        let mut log = UndoLog::new();
        assert_eq!(
            serde_json::to_value(log.last_action()).unwrap(),
            serde_json::json!({"kind": "none", "snapshot": null, "recorded_at": null})
        );

        let at = Utc.with_ymd_and_hms(2025, 5, 14, 9, 30, 0).unwrap();
        log.record_at(Operation::Update(task("a", "A", false)), at);
        assert_eq!(
            serde_json::to_value(log.last_action()).unwrap(),
            serde_json::json!({
                "kind": "update",
                "snapshot": {"id": "a", "task": "A", "done": "false"},
                "recorded_at": "2025-05-14T09:30:00Z"
            })
        );

        log.record_at(Operation::Clear(sample()), at);
        let json = serde_json::to_value(log.last_action()).unwrap();
        assert_eq!(json["kind"], "clear");
        assert_eq!(json["snapshot"].as_array().map(|a| a.len()), Some(2));
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(UndoStatus::NoAction).unwrap(),
            serde_json::json!("no_action")
        );
        assert_eq!(
            serde_json::to_value(UndoStatus::Success).unwrap(),
            serde_json::json!("success")
        );
    }

    proptest! {
        #[test]
        fn undo_after_add_restores(tasks in collection(0..10), done: bool) {
            let mut log = UndoLog::new();
            let (after, created) = task_ops::add(tasks.clone(), "new", done).unwrap();
            log.record(Operation::Add(created));
            prop_assert_eq!(log.undo(after), (tasks, UndoStatus::Success));
            prop_assert!(log.is_empty());
        }

        #[test]
        fn undo_after_update_restores(tasks in collection(1..10), pick: Index, done: bool) {
            let mut log = UndoLog::new();
            let id = tasks[pick.index(tasks.len())].id.clone();
            let (after, prior) = task_ops::set_done(tasks.clone(), &id, done).unwrap();
            log.record(Operation::Update(prior));
            prop_assert_eq!(log.undo(after).0, tasks);
        }

        #[test]
        fn undo_after_delete_moves_task_to_end(tasks in collection(1..10), pick: Index) {
            let mut log = UndoLog::new();
            let at = pick.index(tasks.len());
            let (after, removed) = task_ops::remove(tasks.clone(), &tasks[at].id).unwrap();
            log.record(Operation::Delete(removed));

            let mut expected = tasks.clone();
            let moved = expected.remove(at);
            expected.push(moved);
            prop_assert_eq!(log.undo(after).0, expected);
        }

        #[test]
        fn undo_after_clear_restores_everything(
            tasks in collection(0..10),
            added_since in collection(0..3)
        ) {
            let mut log = UndoLog::new();
            let (_, prior) = task_ops::clear(tasks.clone());
            log.record(Operation::Clear(prior));
            prop_assert_eq!(log.undo(added_since), (tasks.clone(), UndoStatus::Success));
            prop_assert_eq!(log.undo(tasks.clone()), (tasks, UndoStatus::NoAction));
        }
    }
}
