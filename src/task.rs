//! Task data structure and its on-disk record form.
//!
//! A `Task` carries an explicit completion flag. On disk each task is stored
//! as a `{ "text", "color" }` object where the color name stands in for the
//! flag: `"green"` for done, `"orange"` for pending. Any other color found
//! in the file is kept on the pending task and written back unchanged.

use serde::{Deserialize, Serialize};

/// Color name written for completed tasks.
pub const DONE_COLOR: &str = "green";
/// Color name written for pending tasks.
pub const PENDING_COLOR: &str = "orange";

/// A single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TaskRecord", into = "TaskRecord")]
pub struct Task {
    pub text: String,
    pub done: bool,
    /// Color loaded from the file that is neither green nor orange.
    /// Only meaningful while the task is pending.
    pub custom_color: Option<String>,
}

impl Task {
    /// Create a new pending task.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
            custom_color: None,
        }
    }

    /// Mark the task done, dropping any loaded custom color.
    pub fn complete(&mut self) {
        self.done = true;
        self.custom_color = None;
    }

    /// The color name this task is persisted with.
    pub fn color_name(&self) -> &str {
        match (&self.custom_color, self.done) {
            (_, true) => DONE_COLOR,
            (Some(color), false) => color,
            (None, false) => PENDING_COLOR,
        }
    }
}

/// Serialized shape of a task in the JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub text: String,
    pub color: String,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        let done = record.color == DONE_COLOR;
        let custom_color = if done || record.color == PENDING_COLOR {
            None
        } else {
            tracing::debug!(color = %record.color, "unknown task color, keeping it on a pending task");
            Some(record.color)
        };
        Task {
            text: record.text,
            done,
            custom_color,
        }
    }
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        TaskRecord {
            color: task.color_name().to_string(),
            text: task.text,
        }
    }
}
