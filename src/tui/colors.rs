//! Color constants for the terminal user interface.

use std::str::FromStr;

use ratatui::style::Color;

use crate::task::Task;

/// Used for completed tasks
pub const DONE_GREEN: Color = Color::Rgb(0, 160, 0);
/// Used for pending tasks
pub const PENDING_ORANGE: Color = Color::Rgb(255, 165, 0);
/// Used for the placeholder text
pub const MUTED_GRAY: Color = Color::Rgb(128, 128, 128);
/// Used for the warning dialog
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
/// Used for the statistics dialog
pub const DARK_BLUE: Color = Color::Rgb(0, 40, 100);

/// Display color of a task, derived from its completion flag.
///
/// A pending task loaded with some other color is drawn in that color when
/// ratatui knows the name, and in orange otherwise.
pub fn task_color(task: &Task) -> Color {
    if task.done {
        return DONE_GREEN;
    }
    task.custom_color
        .as_deref()
        .and_then(|name| Color::from_str(name).ok())
        .unwrap_or(PENDING_ORANGE)
}
