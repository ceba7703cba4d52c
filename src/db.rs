//! Task store: the ordered task list and its JSON persistence.
//!
//! Tasks are addressed by their position in the list, which is also their
//! display position. Every mutation is followed by a full rewrite of the
//! backing file, driven by the caller.

use std::fmt;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TodoError;
use crate::task::Task;

/// In-memory list of tasks, serialized as a bare JSON array.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Database {
    pub tasks: Vec<Task>,
}

/// Completion summary of the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub done: usize,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Total tasks: {}\ncompleted tasks: {}", self.total, self.done)
    }
}

impl Database {
    /// Load the task list, falling back to an empty list on any failure.
    ///
    /// A missing file and an unreadable or malformed one are all treated as
    /// "no saved tasks". The reason is logged, never surfaced.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(db) => db,
            Err(e) => {
                tracing::warn!(error = %e, "could not load tasks, starting empty");
                Database::default()
            }
        }
    }

    /// Load the task list, reporting why it could not be read.
    ///
    /// A file that does not exist is not an error and yields an empty list.
    pub fn try_load(path: &Path) -> Result<Self, TodoError> {
        if !path.exists() {
            return Ok(Database::default());
        }
        let mut buf = String::new();
        File::open(path)
            .and_then(|mut f| f.read_to_string(&mut buf))
            .map_err(|source| TodoError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_str(&buf).map_err(|source| TodoError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overwrite the file with the full task list (temp file + rename).
    pub fn save(&self, path: &Path) -> Result<(), TodoError> {
        let data = serde_json::to_string(self)?;
        let tmp = path.with_extension("json.tmp");
        let write_err = |source| TodoError::Write {
            path: path.to_path_buf(),
            source,
        };
        let written = File::create(&tmp)
            .and_then(|mut f| {
                f.write_all(data.as_bytes())?;
                f.flush()
            })
            .and_then(|()| fs::rename(&tmp, path));
        if let Err(source) = written {
            // Leave no partial temp file behind.
            let _ = fs::remove_file(&tmp);
            return Err(write_err(source));
        }
        tracing::debug!(path = %path.display(), count = self.tasks.len(), "saved tasks");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Get a task by position.
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Append a pending task and return its position.
    ///
    /// Text is stored as given: no trimming, no deduplication.
    pub fn add(&mut self, text: &str) -> Result<usize, TodoError> {
        if text.is_empty() {
            return Err(TodoError::InvalidTask);
        }
        self.tasks.push(Task::new(text));
        Ok(self.tasks.len() - 1)
    }

    /// Mark the task at `index` done. Returns false if there is no such task.
    ///
    /// A custom color loaded from the file is dropped; done tasks are green.
    pub fn mark_done(&mut self, index: usize) -> bool {
        match self.tasks.get_mut(index) {
            Some(task) => {
                task.complete();
                true
            }
            None => false,
        }
    }

    /// Remove and return the task at `index`, shifting later tasks down.
    pub fn remove(&mut self, index: usize) -> Option<Task> {
        if index < self.tasks.len() {
            Some(self.tasks.remove(index))
        } else {
            None
        }
    }

    pub fn stats(&self) -> Stats {
        Stats {
            total: self.tasks.len(),
            done: self.tasks.iter().filter(|t| t.done).count(),
        }
    }
}
