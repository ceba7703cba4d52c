//! Input field handling for the terminal user interface.

/// Hint shown in the empty input field.
pub const PLACEHOLDER: &str = "Enter your todo here...";

/// A single-line text input with a placeholder hint.
///
/// While unfocused and empty the field holds the placeholder text and is
/// drawn muted. `cursor` counts characters, not bytes.
#[derive(Clone, Debug)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
    pub active: bool,
    pub muted: bool,
}

impl InputField {
    /// Create an unfocused field showing the placeholder.
    pub fn new() -> Self {
        Self {
            value: PLACEHOLDER.to_string(),
            cursor: PLACEHOLDER.chars().count(),
            active: false,
            muted: true,
        }
    }

    /// True when the field holds nothing a user typed.
    pub fn is_blank(&self) -> bool {
        self.value.is_empty() || self.value == PLACEHOLDER
    }

    /// Take focus, clearing the placeholder if it is showing.
    pub fn focus(&mut self) {
        self.active = true;
        if self.value == PLACEHOLDER {
            self.value.clear();
            self.cursor = 0;
            self.muted = false;
        }
    }

    /// Drop focus, restoring the placeholder if nothing was typed.
    pub fn blur(&mut self) {
        self.active = false;
        if self.value.is_empty() {
            self.value = PLACEHOLDER.to_string();
            self.cursor = PLACEHOLDER.chars().count();
            self.muted = true;
        }
    }

    /// Empty the field without changing focus.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
        self.muted = false;
    }

    fn byte_offset(&self, cursor: usize) -> usize {
        self.value
            .char_indices()
            .nth(cursor)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Text to the left of the cursor.
    pub fn before_cursor(&self) -> &str {
        &self.value[..self.byte_offset(self.cursor)]
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert a character at the current cursor position.
    pub fn handle_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
        self.muted = false;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_offset(self.cursor - 1);
            self.value.remove(at);
            self.cursor -= 1;
        }
    }

    /// Delete the character at the cursor position.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_offset(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.char_len();
    }
}

impl Default for InputField {
    fn default() -> Self {
        Self::new()
    }
}
