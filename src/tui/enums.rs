//! Enumerations for TUI state management.

/// Which part of the screen has focus, or which modal dialog is open.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    TaskList,
    Input,
    Warning,
    Stats,
    Help,
}

impl AppState {
    /// True while a modal dialog covers the main view.
    pub fn is_dialog(self) -> bool {
        matches!(self, AppState::Warning | AppState::Stats | AppState::Help)
    }
}

/// The clickable action buttons, in display order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Button {
    Add,
    Done,
    Delete,
    ViewStats,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::Add, Button::Done, Button::Delete, Button::ViewStats];

    pub fn label(self) -> &'static str {
        match self {
            Button::Add => "Add",
            Button::Done => "Done",
            Button::Delete => "Delete",
            Button::ViewStats => "View Stats",
        }
    }

    /// Key shown next to the label.
    pub fn hint(self) -> &'static str {
        match self {
            Button::Add => "Enter",
            Button::Done => "d",
            Button::Delete => "x",
            Button::ViewStats => "s",
        }
    }
}
