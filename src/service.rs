//! The read-modify-write cycle behind every request.
//!
//! Each operation loads the full collection from the store, applies one
//! pure operation from [`task_ops`], writes the full collection back, and
//! only then records the undo entry. Nothing is cached between calls.
//!
//! Mutations take the undo-log mutex for the whole cycle, so requests
//! within one process are applied one at a time. Reads do not take it, and
//! nothing coordinates with other processes writing the same file: the
//! last writer wins.

use std::sync::{Mutex, MutexGuard};

use crate::io::store::{RecordStore, StoreError};
use crate::model::task::{Collection, Task};
use crate::ops::task_ops::{self, TaskError};
use crate::undo::{LastAction, Operation, UndoLog, UndoStatus};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct TaskService<S: RecordStore> {
    store: S,
    undo: Mutex<UndoLog>,
}

impl<S: RecordStore> TaskService<S> {
    pub fn new(store: S) -> Self {
        TaskService {
            store,
            undo: Mutex::new(UndoLog::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn undo_log(&self) -> MutexGuard<'_, UndoLog> {
        self.undo
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The current collection, freshly loaded
    pub fn list(&self) -> Collection {
        self.store.load()
    }

    pub fn add(&self, description: &str, done: bool) -> Result<Task, ServiceError> {
        let mut undo = self.undo_log();
        let (tasks, created) = task_ops::add(self.store.load(), description, done)?;
        self.store.save(&tasks)?;
        undo.record(Operation::Add(created.clone()));
        tracing::info!(id = %created.id, total = tasks.len(), "task added");
        Ok(created)
    }

    /// Returns the task after the change
    pub fn set_done(&self, id: &str, done: bool) -> Result<Task, ServiceError> {
        let mut undo = self.undo_log();
        let (tasks, prior) = task_ops::set_done(self.store.load(), id, done)?;
        self.store.save(&tasks)?;
        let updated = Task { done, ..prior.clone() };
        undo.record(Operation::Update(prior));
        tracing::info!(id, done, "task updated");
        Ok(updated)
    }

    /// Returns the removed task
    pub fn delete(&self, id: &str) -> Result<Task, ServiceError> {
        let mut undo = self.undo_log();
        let (tasks, removed) = task_ops::remove(self.store.load(), id)?;
        self.store.save(&tasks)?;
        undo.record(Operation::Delete(removed.clone()));
        tracing::info!(id, total = tasks.len(), "task deleted");
        Ok(removed)
    }

    /// Returns the (empty) collection after clearing
    pub fn clear(&self) -> Result<Collection, ServiceError> {
        let mut undo = self.undo_log();
        let (tasks, prior) = task_ops::clear(self.store.load());
        self.store.reset()?;
        tracing::info!(removed = prior.len(), "task list cleared");
        undo.record(Operation::Clear(prior));
        Ok(tasks)
    }

    /// Reverse the last recorded mutation and persist the result.
    ///
    /// With nothing to undo the file is not touched. The entry is kept when
    /// the write fails, so the same undo can be tried again.
    pub fn undo(&self) -> Result<(Collection, UndoStatus), ServiceError> {
        let mut undo = self.undo_log();
        let current = self.store.load();
        let kind = undo.peek().map(Operation::kind);
        let (tasks, status) = undo.preview(current);
        if status == UndoStatus::Success {
            self.store.save(&tasks)?;
            undo.clear();
            tracing::info!(kind = ?kind, total = tasks.len(), "undo applied");
        } else {
            tracing::debug!("nothing to undo");
        }
        Ok((tasks, status))
    }

    pub fn last_action(&self) -> LastAction {
        self.undo_log().last_action()
    }
}
