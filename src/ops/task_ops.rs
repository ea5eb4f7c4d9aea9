use uuid::Uuid;

use crate::model::task::{Collection, Task, position_of};

/// Error type for task operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("task description must not be empty")]
    EmptyDescription,
    #[error("task not found: {0}")]
    NotFound(String),
}

/// Generate an id not already used in `tasks`.
pub fn new_task_id(tasks: &[Task]) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if position_of(tasks, &id).is_none() {
            return id;
        }
    }
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// Append a new task. Returns the new collection and the created task.
pub fn add(
    mut tasks: Collection,
    description: &str,
    done: bool,
) -> Result<(Collection, Task), TaskError> {
    if description.trim().is_empty() {
        return Err(TaskError::EmptyDescription);
    }
    let task = Task::new(new_task_id(&tasks), description.to_string(), done);
    tasks.push(task.clone());
    Ok((tasks, task))
}

/// Set a task's done flag. Returns the new collection and the task as it
/// was before the change.
pub fn set_done(
    mut tasks: Collection,
    id: &str,
    done: bool,
) -> Result<(Collection, Task), TaskError> {
    let idx = position_of(&tasks, id).ok_or_else(|| TaskError::NotFound(id.to_string()))?;
    let prior = tasks[idx].clone();
    tasks[idx].done = done;
    Ok((tasks, prior))
}

/// Remove a task. Returns the new collection and the removed task.
pub fn remove(mut tasks: Collection, id: &str) -> Result<(Collection, Task), TaskError> {
    let idx = position_of(&tasks, id).ok_or_else(|| TaskError::NotFound(id.to_string()))?;
    let removed = tasks.remove(idx);
    Ok((tasks, removed))
}

/// Remove every task. Returns the (empty) new collection and everything
/// that was there before.
pub fn clear(tasks: Collection) -> (Collection, Collection) {
    (Vec::new(), tasks)
}

// ---------------------------------------------------------------------------
// Snapshot restoration (used by undo)
// ---------------------------------------------------------------------------

/// Remove a task if present. Absence is not an error.
pub fn discard(mut tasks: Collection, id: &str) -> Collection {
    tasks.retain(|t| t.id != id);
    tasks
}

/// Overwrite the fields of the task sharing `snapshot`'s id, in place.
/// A task that no longer exists is left absent.
pub fn restore_fields(mut tasks: Collection, snapshot: &Task) -> Collection {
    if let Some(idx) = position_of(&tasks, &snapshot.id) {
        tasks[idx] = snapshot.clone();
    }
    tasks
}

/// Append a task at the end of the collection.
pub fn append(mut tasks: Collection, task: Task) -> Collection {
    tasks.push(task);
    tasks
}
