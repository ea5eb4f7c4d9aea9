use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;

use crate::model::task::{Collection, Task};
use crate::parse::{parse_records, serialize_records};

/// Error type for record store writes. Reads never fail; see [`RecordStore::load`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not create {path}: {source}")]
    CreateError {
        path: PathBuf,
        source: io::Error,
    },
}

/// Persistence for the whole task collection.
///
/// Every call works on the full collection; there is no partial update.
pub trait RecordStore: Send + Sync {
    /// Read the collection. Fails soft: a missing or unreadable backing
    /// store yields an empty collection and malformed rows are skipped.
    fn load(&self) -> Collection;

    /// Replace the stored collection with `tasks`, in order.
    fn save(&self, tasks: &[Task]) -> Result<(), StoreError>;

    /// Empty the backing store.
    fn reset(&self) -> Result<(), StoreError>;
}

/// Write `content` to `path` via a temp file in the same directory and an
/// atomic rename, so readers see either the old or the new contents.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Task collection stored as a CSV file, one `id,description,done` row per task.
#[derive(Debug, Clone)]
pub struct CsvFileStore {
    path: PathBuf,
}

impl CsvFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty file if none exists. An existing file is left untouched.
    pub fn ensure_exists(&self) -> Result<(), StoreError> {
        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(_) => {
                tracing::info!(path = %self.path.display(), "created empty task file");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(StoreError::CreateError {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    fn write_text(&self, content: &str) -> Result<(), StoreError> {
        atomic_write(&self.path, content.as_bytes()).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "task file write failed");
            StoreError::WriteError {
                path: self.path.clone(),
                source: e,
            }
        })
    }
}

impl RecordStore for CsvFileStore {
    fn load(&self) -> Collection {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "task file unreadable, treating as empty"
                );
                return Vec::new();
            }
        };

        let (tasks, dropped) = parse_records(&text);
        if !dropped.is_empty() {
            tracing::warn!(
                path = %self.path.display(),
                lines = ?dropped,
                "skipped rows with fewer than three fields"
            );
        }
        tasks
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        self.write_text(&serialize_records(tasks))
    }

    fn reset(&self) -> Result<(), StoreError> {
        self.write_text("")
    }
}

/// Collection held in memory. Nothing is persisted across processes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: Mutex<Collection>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Collection) -> Self {
        MemoryStore {
            tasks: Mutex::new(tasks),
        }
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Collection {
        self.tasks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        *self
            .tasks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = tasks.to_vec();
        Ok(())
    }

    fn reset(&self) -> Result<(), StoreError> {
        self.tasks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
        Ok(())
    }
}
