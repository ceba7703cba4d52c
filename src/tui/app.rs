//! Main application logic for the terminal user interface.
//!
//! `App` owns the task list, the input field, the list selection and the
//! open dialog. Key and mouse events are routed to the add / done / delete /
//! stats operations, and every mutation is written straight back to disk.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::db::Database;
use crate::error::TodoError;
use crate::task::Task;
use crate::tui::{
    colors::{task_color, DARK_BLUE, DARK_RED, MUTED_GRAY},
    enums::{AppState, Button},
    input::InputField,
    utils::centered_rect,
};

/// Screen regions from the last render, used to hit-test mouse clicks.
#[derive(Default, Clone, Copy)]
struct ScreenLayout {
    input: Rect,
    list: Rect,
    buttons: [Rect; 4],
}

/// Main application state for the terminal user interface.
pub struct App {
    state: AppState,
    db: Database,
    db_path: PathBuf,
    list_state: ListState,
    input: InputField,
    status_message: String,
    dialog_title: &'static str,
    dialog_text: String,
    return_state: AppState,
    layout: ScreenLayout,
}

impl App {
    /// Create a new App, loading tasks from `db_path` (or starting empty).
    pub fn new(db_path: &Path) -> Self {
        let db = Database::load(db_path);
        tracing::info!(path = %db_path.display(), count = db.len(), "loaded tasks");

        App {
            state: AppState::TaskList,
            db,
            db_path: db_path.to_path_buf(),
            list_state: ListState::default(),
            input: InputField::new(),
            status_message: String::new(),
            dialog_title: "",
            dialog_text: String::new(),
            return_state: AppState::TaskList,
            layout: ScreenLayout::default(),
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn tasks(&self) -> &[Task] {
        &self.db.tasks
    }

    pub fn input(&self) -> &InputField {
        &self.input
    }

    /// Title and body of the open dialog, if any.
    pub fn dialog(&self) -> Option<(&str, &str)> {
        if self.state.is_dialog() {
            Some((self.dialog_title, self.dialog_text.as_str()))
        } else {
            None
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Select a row, or clear the selection. Out-of-range rows clear it.
    pub fn select(&mut self, index: Option<usize>) {
        self.list_state
            .select(index.filter(|&i| i < self.db.len()));
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    /// Give the input field focus.
    pub fn focus_input(&mut self) {
        self.input.focus();
        self.state = AppState::Input;
    }

    /// Move focus from the input field back to the task list.
    pub fn blur_input(&mut self) {
        self.input.blur();
        self.state = AppState::TaskList;
    }

    fn open_dialog(&mut self, state: AppState, title: &'static str, text: String) {
        if !self.state.is_dialog() {
            self.return_state = self.state;
        }
        self.state = state;
        self.dialog_title = title;
        self.dialog_text = text;
    }

    fn close_dialog(&mut self) {
        self.state = self.return_state;
        self.dialog_text.clear();
    }

    /// Write the list to disk. Failures are reported in the status bar and
    /// the in-memory list is kept.
    fn save_db(&mut self) {
        match self.db.save(&self.db_path) {
            Ok(()) => self.set_status_message(format!("Saved {} task(s)", self.db.len())),
            Err(e) => {
                tracing::error!(error = %e, "failed to save tasks");
                self.set_status_message(format!("Error saving tasks: {e}"));
            }
        }
    }

    /// Add the input field's text as a new pending task.
    ///
    /// An empty field, or one still showing the placeholder, opens the
    /// warning dialog instead.
    pub fn add_task(&mut self) {
        let result = if self.input.is_blank() {
            Err(TodoError::InvalidTask)
        } else {
            self.db.add(&self.input.value)
        };

        match result {
            Ok(index) => {
                tracing::debug!(index, text = %self.input.value, "added task");
                self.input.clear();
                if !self.input.active {
                    self.input.blur();
                }
                self.save_db();
            }
            Err(e) => self.open_dialog(AppState::Warning, "Input Error", e.to_string()),
        }
    }

    /// Mark the selected task done. Does nothing without a selection.
    pub fn mark_done(&mut self) {
        if let Some(index) = self.list_state.selected() {
            if self.db.mark_done(index) {
                tracing::debug!(index, "marked task done");
                self.save_db();
            }
        }
    }

    /// Delete the selected task. Does nothing without a selection.
    ///
    /// The selection moves to the task that took the deleted one's place.
    pub fn delete_task(&mut self) {
        if let Some(index) = self.list_state.selected() {
            if let Some(task) = self.db.remove(index) {
                tracing::debug!(index, text = %task.text, "deleted task");
                let next = if self.db.is_empty() {
                    None
                } else {
                    Some(index.min(self.db.len() - 1))
                };
                self.list_state.select(next);
                self.save_db();
            }
        }
    }

    /// Show the completion summary.
    pub fn view_stats(&mut self) {
        let stats = self.db.stats();
        self.open_dialog(AppState::Stats, "Task statistics", stats.to_string());
    }

    fn show_help(&mut self) {
        self.open_dialog(AppState::Help, "Help", HELP_TEXT.to_string());
    }

    fn press_button(&mut self, button: Button) {
        match button {
            Button::Add => self.add_task(),
            Button::Done => self.mark_done(),
            Button::Delete => self.delete_task(),
            Button::ViewStats => self.view_stats(),
        }
    }

    fn select_next(&mut self) {
        if self.db.is_empty() {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) if i + 1 < self.db.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    fn select_previous(&mut self) {
        if self.db.is_empty() {
            return;
        }
        let prev = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => self.db.len() - 1,
        };
        self.list_state.select(Some(prev));
    }

    /// Handle keyboard input when the task list has focus.
    ///
    /// Returns true if the application should quit.
    fn handle_task_list_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Home => self.select(Some(0)),
            KeyCode::End => self.select(self.db.len().checked_sub(1)),
            KeyCode::Esc => self.select(None),
            KeyCode::Tab | KeyCode::Char('i') => self.focus_input(),
            KeyCode::Char('a') => self.add_task(),
            KeyCode::Char('d') | KeyCode::Char(' ') => self.mark_done(),
            KeyCode::Char('x') | KeyCode::Delete => self.delete_task(),
            KeyCode::Char('s') => self.view_stats(),
            KeyCode::Char('h') | KeyCode::Char('?') => self.show_help(),
            _ => {}
        }
        false
    }

    /// Handle keyboard input while typing in the input field.
    fn handle_text_input(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Enter => self.add_task(),
            KeyCode::Esc | KeyCode::Tab | KeyCode::Down => self.blur_input(),
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.handle_char(c)
            }
            KeyCode::Backspace => self.input.handle_backspace(),
            KeyCode::Delete => self.input.handle_delete(),
            KeyCode::Left => self.input.move_cursor_left(),
            KeyCode::Right => self.input.move_cursor_right(),
            KeyCode::Home => self.input.move_cursor_home(),
            KeyCode::End => self.input.move_cursor_end(),
            _ => {}
        }
    }

    /// Handle keyboard input in a modal dialog.
    fn handle_dialog_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char(' ') => {
                self.close_dialog()
            }
            KeyCode::Char('h') | KeyCode::Char('?') if self.state == AppState::Help => {
                self.close_dialog()
            }
            _ => {}
        }
    }

    /// Dispatch a key press based on the current state.
    ///
    /// Returns true if the application should quit.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        self.clear_status_message();

        match self.state {
            AppState::TaskList => return self.handle_task_list_input(key.code),
            AppState::Input => self.handle_text_input(key.code, key.modifiers),
            AppState::Warning | AppState::Stats | AppState::Help => {
                self.handle_dialog_input(key.code)
            }
        }
        false
    }

    /// Route a left click to the widget under the pointer.
    ///
    /// Clicking the input focuses it, clicking anywhere else blurs it.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if self.state.is_dialog() {
            self.close_dialog();
            return;
        }
        self.clear_status_message();

        let pos = Position::new(mouse.column, mouse.row);
        if self.layout.input.contains(pos) {
            self.focus_input();
            return;
        }
        if self.state == AppState::Input {
            self.blur_input();
        }

        if self.layout.list.contains(pos) {
            let row = (pos.y - self.layout.list.y) as usize + self.list_state.offset();
            self.select(Some(row));
            return;
        }
        let hit = Button::ALL
            .iter()
            .zip(self.layout.buttons.iter())
            .find(|(_, area)| area.contains(pos))
            .map(|(&button, _)| button);
        if let Some(button) = hit {
            self.press_button(button);
        }
    }

    /// Poll for and handle terminal events.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => return Ok(self.handle_key_event(key)),
                Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                _ => {}
            }
        }
        Ok(false)
    }

    fn render_input(&mut self, f: &mut Frame, area: Rect) {
        self.layout.input = area;
        let text_style = if self.input.muted {
            Style::default().fg(MUTED_GRAY)
        } else {
            Style::default()
        };
        let border_style = if self.input.active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title("New task")
            .border_style(border_style);
        let inner = block.inner(area);
        let cursor_x = u16::try_from(Span::raw(self.input.before_cursor()).width())
            .unwrap_or(u16::MAX);
        let offset = input_scroll(cursor_x, inner.width);
        let paragraph = Paragraph::new(self.input.value.as_str())
            .style(text_style)
            .block(block)
            .scroll((0, offset));
        f.render_widget(paragraph, area);

        if self.input.active && self.state == AppState::Input {
            f.set_cursor_position((inner.x + cursor_x - offset, inner.y));
        }
    }

    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Tasks ({})", self.db.len()));
        self.layout.list = block.inner(area);

        let items: Vec<ListItem> = self
            .db
            .tasks
            .iter()
            .map(|t| ListItem::new(t.text.as_str()).style(Style::default().fg(task_color(t))))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD))
            .highlight_symbol("> ");
        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_buttons(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(area);

        for (i, button) in Button::ALL.iter().enumerate() {
            self.layout.buttons[i] = chunks[i];
            let style = match button {
                Button::Done => Style::default().fg(Color::Green),
                Button::Delete => Style::default().fg(Color::Red),
                Button::ViewStats => Style::default().fg(Color::Cyan),
                Button::Add => Style::default(),
            };
            let label = Line::from(vec![
                Span::styled(button.label(), style.add_modifier(Modifier::BOLD)),
                Span::raw(format!(" [{}]", button.hint())),
            ]);
            let widget = Paragraph::new(label)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(style));
            f.render_widget(widget, chunks[i]);
        }
    }

    fn render_dialog(&mut self, f: &mut Frame, area: Rect) {
        let bg = match self.state {
            AppState::Warning => DARK_RED,
            _ => DARK_BLUE,
        };
        let block = Block::default()
            .title(self.dialog_title)
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::White).bg(bg));

        let height = if self.state == AppState::Help { 80 } else { 40 };
        let area = centered_rect(50, height, area);
        f.render_widget(Clear, area);

        let mut text = vec![Line::from("")];
        text.extend(self.dialog_text.lines().map(Line::from));
        text.push(Line::from(""));
        text.push(Line::from("Press Enter to close"));

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status_bar(&mut self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.state {
                AppState::Input => "Typing | Enter to add, Esc to leave the field".to_string(),
                _ => format!(
                    "Tasks: {} | i: type  d: done  x: delete  s: stats  h: help  q: quit",
                    self.db.len()
                ),
            }
        };
        let status = Paragraph::new(status_text)
            .style(Style::default().bg(Color::Blue).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Draw the whole screen.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_input(f, chunks[0]);
        self.render_task_list(f, chunks[1]);
        self.render_buttons(f, chunks[2]);
        self.render_status_bar(f, chunks[3]);

        if self.state.is_dialog() {
            self.render_dialog(f, f.area());
        }
    }

    /// Main event loop for the TUI application.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

/// Columns to scroll the input line so the cursor stays inside `width`.
fn input_scroll(cursor_x: u16, width: u16) -> u16 {
    if width == 0 {
        0
    } else {
        cursor_x.saturating_sub(width - 1)
    }
}

const HELP_TEXT: &str = "\
Tab / i     type a new task
Enter       add the typed task
a           add (from the list)
Up / Down   select a task
Home / End  first / last task
Esc         clear the selection
d / Space   mark selected task done
x / Delete  delete selected task
s           view statistics
h / ?       toggle this help
q           quit";

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use ratatui::{backend::TestBackend, buffer::Buffer};
    use tempfile::{tempdir, TempDir};

    use crate::tui::colors::{DONE_GREEN, PENDING_ORANGE};
    use crate::tui::input::PLACEHOLDER;

    fn new_app() -> (TempDir, App) {
        let dir = tempdir().unwrap();
        let app = App::new(&dir.path().join("tasks.json"));
        (dir, app)
    }

    fn key(app: &mut App, code: KeyCode) -> bool {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            key(app, KeyCode::Char(c));
        }
    }

    fn add(app: &mut App, text: &str) {
        app.focus_input();
        type_text(app, text);
        key(app, KeyCode::Enter);
    }

    fn click(app: &mut App, column: u16, row: u16) {
        app.handle_mouse_event(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    fn draw(app: &mut App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal.backend().buffer().clone()
    }

    /// Position of the first cell where `text` starts.
    fn find_text(buffer: &Buffer, text: &str) -> Option<(u16, u16)> {
        let wanted: Vec<String> = text.chars().map(|c| c.to_string()).collect();
        let area = buffer.area;
        for y in 0..area.height {
            let row: Vec<&str> = (0..area.width)
                .map(|x| buffer.content[(y * area.width + x) as usize].symbol())
                .collect();
            if let Some(x) = row.windows(wanted.len()).position(|w| w == wanted.as_slice()) {
                return Some((x as u16, y));
            }
        }
        None
    }

    fn fg_at(buffer: &Buffer, (x, y): (u16, u16)) -> Color {
        buffer.content[(y * buffer.area.width + x) as usize].fg
    }

    #[test]
    fn test_add_valid_task() {
        let (_dir, mut app) = new_app();
        add(&mut app, "Buy milk");
        assert_eq!(app.tasks(), &[Task::new("Buy milk")]);
        assert_eq!(app.input().value, "");
        assert_eq!(app.state(), AppState::Input);
        assert!(app.dialog().is_none());
    }

    #[test]
    fn test_add_placeholder_shows_warning() {
        let (_dir, mut app) = new_app();
        assert_eq!(app.input().value, PLACEHOLDER);
        app.add_task();
        assert!(app.tasks().is_empty());
        assert_eq!(app.state(), AppState::Warning);
        assert_eq!(
            app.dialog(),
            Some(("Input Error", "please enter a valid task"))
        );

        key(&mut app, KeyCode::Enter);
        assert_eq!(app.state(), AppState::TaskList);
    }

    #[test]
    fn test_add_empty_shows_warning_and_returns_to_input() {
        let (_dir, mut app) = new_app();
        app.focus_input();
        key(&mut app, KeyCode::Enter);
        assert!(app.tasks().is_empty());
        assert_eq!(app.state(), AppState::Warning);

        key(&mut app, KeyCode::Esc);
        assert_eq!(app.state(), AppState::Input);
    }

    #[test]
    fn test_typing_placeholder_text_is_rejected() {
        let (_dir, mut app) = new_app();
        add(&mut app, PLACEHOLDER);
        assert!(app.tasks().is_empty());
        assert_eq!(app.state(), AppState::Warning);
    }

    #[test]
    fn test_leaving_empty_input_restores_placeholder() {
        let (_dir, mut app) = new_app();
        key(&mut app, KeyCode::Tab);
        assert_eq!(app.state(), AppState::Input);
        assert_eq!(app.input().value, "");
        key(&mut app, KeyCode::Esc);
        assert_eq!(app.state(), AppState::TaskList);
        assert_eq!(app.input().value, PLACEHOLDER);
        assert!(app.input().muted);
    }

    #[test]
    fn test_done_and_delete_without_selection_are_noops() {
        let (dir, mut app) = new_app();
        add(&mut app, "a");
        key(&mut app, KeyCode::Esc);
        let before = fs::read_to_string(dir.path().join("tasks.json")).unwrap();

        app.select(None);
        app.mark_done();
        app.delete_task();
        assert_eq!(app.tasks(), &[Task::new("a")]);
        assert_eq!(
            fs::read_to_string(dir.path().join("tasks.json")).unwrap(),
            before
        );
    }

    #[test]
    fn test_mark_done_twice_is_idempotent() {
        let (_dir, mut app) = new_app();
        add(&mut app, "a");
        app.select(Some(0));
        app.mark_done();
        let once = app.tasks().to_vec();
        app.mark_done();
        assert_eq!(app.tasks(), once.as_slice());
        assert!(app.tasks()[0].done);
    }

    #[test]
    fn test_delete_removes_selected_and_clamps_selection() {
        let (_dir, mut app) = new_app();
        for text in ["a", "b", "c"] {
            add(&mut app, text);
        }
        key(&mut app, KeyCode::Esc);

        app.select(Some(1));
        key(&mut app, KeyCode::Char('x'));
        let texts: Vec<&str> = app.tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["a", "c"]);
        assert_eq!(app.selected(), Some(1));

        key(&mut app, KeyCode::Char('x'));
        assert_eq!(app.selected(), Some(0));
        key(&mut app, KeyCode::Char('x'));
        assert!(app.tasks().is_empty());
        assert_eq!(app.selected(), None);
    }

    #[test]
    fn test_stats_after_three_adds_and_one_done() {
        let (_dir, mut app) = new_app();
        for text in ["a", "b", "c"] {
            add(&mut app, text);
        }
        key(&mut app, KeyCode::Esc);
        key(&mut app, KeyCode::Down);
        key(&mut app, KeyCode::Char('d'));
        key(&mut app, KeyCode::Char('s'));
        assert_eq!(
            app.dialog(),
            Some(("Task statistics", "Total tasks: 3\ncompleted tasks: 1"))
        );
    }

    #[test]
    fn test_selection_navigation() {
        let (_dir, mut app) = new_app();
        key(&mut app, KeyCode::Down);
        assert_eq!(app.selected(), None);

        for text in ["a", "b"] {
            add(&mut app, text);
        }
        key(&mut app, KeyCode::Esc);
        key(&mut app, KeyCode::Up);
        assert_eq!(app.selected(), Some(1));
        key(&mut app, KeyCode::Down);
        assert_eq!(app.selected(), Some(1));
        key(&mut app, KeyCode::Char('k'));
        key(&mut app, KeyCode::Char('k'));
        assert_eq!(app.selected(), Some(0));
        key(&mut app, KeyCode::Esc);
        assert_eq!(app.selected(), None);

        app.select(Some(7));
        assert_eq!(app.selected(), None);
    }

    #[test]
    fn test_quit_keys() {
        let (_dir, mut app) = new_app();
        app.focus_input();
        assert!(!key(&mut app, KeyCode::Char('q')));
        assert_eq!(app.input().value, "q");
        assert!(app.handle_key_event(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        app.blur_input();
        assert!(key(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_loads_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(
            &path,
            r#"[{"text":"old","color":"green"},{"text":"new","color":"orange"}]"#,
        )
        .unwrap();
        let app = App::new(&path);
        assert_eq!(app.tasks().len(), 2);
        assert!(app.tasks()[0].done);
        assert!(!app.tasks()[1].done);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "[{").unwrap();
        let app = App::new(&path);
        assert!(app.tasks().is_empty());
        assert!(app.dialog().is_none());
    }

    #[test]
    fn test_save_failure_keeps_task_in_memory() {
        let dir = tempdir().unwrap();
        let mut app = App::new(&dir.path().join("missing").join("tasks.json"));
        add(&mut app, "a");
        assert_eq!(app.tasks().len(), 1);
        assert!(app.status_message.starts_with("Error saving tasks"));
    }

    #[test]
    fn test_render_colors_follow_completion() {
        let (_dir, mut app) = new_app();
        add(&mut app, "Buy milk");
        add(&mut app, "Walk dog");
        app.blur_input();
        app.select(Some(0));
        app.mark_done();
        app.select(None);

        let buffer = draw(&mut app);
        let milk = find_text(&buffer, "Buy milk").unwrap();
        let dog = find_text(&buffer, "Walk dog").unwrap();
        assert_eq!(fg_at(&buffer, milk), DONE_GREEN);
        assert_eq!(fg_at(&buffer, dog), PENDING_ORANGE);
        assert!(find_text(&buffer, PLACEHOLDER).is_some());
        assert!(find_text(&buffer, "View Stats").is_some());
    }

    #[test]
    fn test_input_scroll_keeps_cursor_in_view() {
        assert_eq!(input_scroll(0, 18), 0);
        assert_eq!(input_scroll(17, 18), 0);
        assert_eq!(input_scroll(18, 18), 1);
        assert_eq!(input_scroll(30, 18), 13);
        assert_eq!(input_scroll(5, 0), 0);
    }

    #[test]
    fn test_render_long_input_shows_cursor_end() {
        let (_dir, mut app) = new_app();
        app.focus_input();
        type_text(&mut app, "abcdefghijklmnopqrstuvwxyz0123");

        let mut terminal = Terminal::new(TestBackend::new(20, 12)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        assert_eq!(find_text(&buffer, "xyz0123"), Some((11, 1)));
        assert!(find_text(&buffer, "abc").is_none());
        assert_eq!(
            terminal.get_cursor_position().unwrap(),
            Position::new(18, 1)
        );
    }

    #[test]
    fn test_help_lists_every_list_key() {
        let (_dir, mut app) = new_app();
        key(&mut app, KeyCode::Char('?'));
        assert_eq!(app.state(), AppState::Help);
        let (_, text) = app.dialog().unwrap();
        for hint in ["Home / End", "h / ?", "Tab / i", "d / Space", "x / Delete"] {
            assert!(text.contains(hint), "missing {hint}");
        }
        let buffer = draw(&mut app);
        assert!(find_text(&buffer, "toggle this help").is_some());

        key(&mut app, KeyCode::Char('h'));
        assert_eq!(app.state(), AppState::TaskList);
    }

    #[test]
    fn test_render_stats_dialog() {
        let (_dir, mut app) = new_app();
        add(&mut app, "a");
        app.blur_input();
        app.view_stats();
        let buffer = draw(&mut app);
        assert!(find_text(&buffer, "Task statistics").is_some());
        assert!(find_text(&buffer, "Total tasks: 1").is_some());
        assert!(find_text(&buffer, "completed tasks: 0").is_some());
    }

    #[test]
    fn test_mouse_focus_select_and_buttons() {
        let (_dir, mut app) = new_app();
        draw(&mut app);

        let (input, buttons) = (app.layout.input, app.layout.buttons);
        click(&mut app, input.x + 2, input.y + 1);
        assert_eq!(app.state(), AppState::Input);
        assert_eq!(app.input().value, "");

        type_text(&mut app, "Buy milk");
        let add_button = buttons[0];
        click(&mut app, add_button.x + 1, add_button.y + 1);
        assert_eq!(app.tasks(), &[Task::new("Buy milk")]);
        assert_eq!(app.state(), AppState::TaskList);
        assert_eq!(app.input().value, PLACEHOLDER);

        draw(&mut app);
        let list = app.layout.list;
        click(&mut app, list.x + 3, list.y);
        assert_eq!(app.selected(), Some(0));
        click(&mut app, list.x + 3, list.y + 5);
        assert_eq!(app.selected(), None);

        app.select(Some(0));
        let done_button = buttons[1];
        click(&mut app, done_button.x + 1, done_button.y + 1);
        assert!(app.tasks()[0].done);

        let stats_button = buttons[3];
        click(&mut app, stats_button.x + 1, stats_button.y + 1);
        assert_eq!(app.state(), AppState::Stats);
        click(&mut app, 0, 0);
        assert_eq!(app.state(), AppState::TaskList);

        let delete_button = buttons[2];
        click(&mut app, delete_button.x + 1, delete_button.y + 1);
        assert!(app.tasks().is_empty());
    }

    #[test]
    fn test_end_to_end_scenario() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let mut app = App::new(&path);
        assert!(!path.exists());

        add(&mut app, "Buy milk");
        add(&mut app, "Walk dog");
        app.blur_input();
        app.select(Some(0));
        app.mark_done();
        app.view_stats();
        assert_eq!(
            app.dialog(),
            Some(("Task statistics", "Total tasks: 2\ncompleted tasks: 1"))
        );
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            r#"[{"text":"Buy milk","color":"green"},{"text":"Walk dog","color":"orange"}]"#
        );
        key(&mut app, KeyCode::Enter);

        app.select(Some(1));
        app.delete_task();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            r#"[{"text":"Buy milk","color":"green"}]"#
        );

        let reloaded = App::new(&path);
        assert_eq!(reloaded.tasks(), app.tasks());
    }
}
