use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::io::task_store::{LoadOutcome, StoreError, TaskStore};
use crate::model::{Filter, Priority, Task, UiConfig};
use crate::ops::task_ops::TaskError;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a new task into the input bar
    Input,
    /// Rewriting an existing task in the input bar
    Edit,
}

/// Text being typed in the input bar, with its priority selector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
    /// Byte offset of the cursor in `text`
    pub cursor: usize,
    pub priority: Priority,
}

impl Draft {
    pub fn new(priority: Priority) -> Self {
        Draft {
            priority,
            ..Default::default()
        }
    }

    pub fn from_task(task: &Task) -> Self {
        Draft {
            text: task.text.clone(),
            cursor: task.text.len(),
            priority: task.priority,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// A modal message; any key dismisses it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub lines: Vec<String>,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: impl Into<String>, line: impl Into<String>) -> Self {
        Notice {
            kind,
            title: title.into(),
            lines: vec![line.into()],
        }
    }
}

/// What a mouse click on a screen region does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    /// Anywhere on a card: move the cursor to this index of the view
    Card(usize),
    Checkbox(String),
    Edit(String),
    Delete(String),
    Filter(Filter),
    Priority(Priority),
    InputField,
    AddButton,
}

/// A clickable region recorded while rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hitbox {
    pub area: Rect,
    pub target: ClickTarget,
}

/// Main application state
pub struct App {
    pub store: TaskStore,
    pub theme: Theme,
    pub filter: Filter,
    pub mode: Mode,
    pub should_quit: bool,
    /// Cursor index into the filtered view
    pub cursor: usize,
    /// First visible card
    pub scroll: usize,
    pub draft: Draft,
    /// Task being edited while in Edit mode
    pub editing_id: Option<String>,
    /// Priority preselected for the next new task
    pub new_task_priority: Priority,
    pub truncate_at: usize,
    pub notice: Option<Notice>,
    /// One-line message in the status row, cleared on the next key
    pub status_message: Option<String>,
    pub show_help: bool,
    /// Clickable regions from the last frame, topmost last
    pub hitboxes: Vec<Hitbox>,
    seen_revision: u64,
}

impl App {
    pub fn new(store: TaskStore, ui: &UiConfig) -> Self {
        let seen_revision = store.revision();
        App {
            store,
            theme: Theme::from_config(ui),
            filter: Filter::All,
            mode: Mode::Navigate,
            should_quit: false,
            cursor: 0,
            scroll: 0,
            draft: Draft::new(ui.default_priority),
            editing_id: None,
            new_task_priority: ui.default_priority,
            truncate_at: ui.truncate_at,
            notice: None,
            status_message: None,
            show_help: false,
            hitboxes: Vec::new(),
            seen_revision,
        }
    }

    /// Build the app from a load result, turning load problems into a notice
    pub fn from_load(outcome: LoadOutcome, ui: &UiConfig) -> Self {
        let LoadOutcome {
            store,
            error,
            record_errors,
        } = outcome;
        let protected = store.is_protected();
        let mut app = App::new(store, ui);

        let mut lines = Vec::new();
        if let Some(err) = &error {
            lines.push(format!("Failed to load tasks: {}", err));
            if protected {
                lines.push("Changes will not be saved over the existing file.".to_string());
            } else if matches!(err, StoreError::Parse { .. } | StoreError::NotAnArray { .. }) {
                lines.push("A copy of the file was kept with a .bak suffix.".to_string());
            }
        }
        lines.extend(record_errors.iter().map(|e| e.to_string()));
        if !lines.is_empty() {
            let kind = if error.is_some() || record_errors.iter().any(|e| e.is_skipped()) {
                NoticeKind::Error
            } else {
                NoticeKind::Warning
            };
            app.notice = Some(Notice {
                kind,
                title: "Loading tasks".into(),
                lines,
            });
        }
        app
    }

    /// Tasks shown under the current filter, in store order
    pub fn visible(&self) -> Vec<&Task> {
        self.store.view(self.filter)
    }

    pub fn cursor_task(&self) -> Option<&Task> {
        self.visible().get(self.cursor).copied()
    }

    pub fn set_filter(&mut self, filter: Filter) {
        if self.filter != filter {
            self.filter = filter;
            self.cursor = 0;
            self.scroll = 0;
        }
    }

    /// Keep the cursor inside the view after the store or filter changed
    pub fn sync_view(&mut self) {
        self.seen_revision = self.store.revision();
        let len = self.visible().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
        if self.scroll > self.cursor {
            self.scroll = self.cursor;
        }
    }

    /// True if the store changed since the view last synced
    pub fn store_changed(&self) -> bool {
        self.store.revision() != self.seen_revision
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.visible().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }

    // -----------------------------------------------------------------------
    // Store actions
    // -----------------------------------------------------------------------

    pub fn toggle(&mut self, id: &str) {
        if let Err(e) = self.store.toggle(id) {
            self.report(e);
        }
        self.sync_view();
    }

    /// Delete a task. Completed tasks have no delete affordance.
    pub fn delete(&mut self, id: &str) {
        if self.store.get(id).is_some_and(|t| t.completed) {
            self.status_message =
                Some("Completed tasks cannot be deleted; toggle it back first".into());
            return;
        }
        if let Err(e) = self.store.delete(id) {
            self.report(e);
        }
        self.sync_view();
    }

    pub fn begin_input(&mut self) {
        if self.mode != Mode::Input {
            self.draft = Draft::new(self.new_task_priority);
        }
        self.mode = Mode::Input;
        self.editing_id = None;
    }

    /// Start editing a task. Completed tasks have no edit affordance.
    pub fn begin_edit(&mut self, id: &str) {
        let Some(task) = self.store.get(id) else {
            return;
        };
        if task.completed {
            self.status_message =
                Some("Completed tasks cannot be edited; toggle it back first".into());
            return;
        }
        self.draft = Draft::from_task(task);
        self.editing_id = Some(task.id.clone());
        self.mode = Mode::Edit;
    }

    /// Add or save the draft. On validation failure the draft stays open.
    pub fn commit_draft(&mut self) {
        let result = match (self.mode, self.editing_id.clone()) {
            (Mode::Edit, Some(id)) => self
                .store
                .edit(&id, Some(&self.draft.text), Some(self.draft.priority))
                .map(|_| ()),
            (Mode::Input, _) => {
                self.new_task_priority = self.draft.priority;
                self.store
                    .add(&self.draft.text, self.draft.priority)
                    .map(|_| ())
            }
            _ => return,
        };

        match result {
            Ok(()) => self.finish_draft(),
            Err(e @ StoreError::Task(TaskError::EmptyText)) => self.report(e),
            Err(e) => {
                // The change is kept in memory even though saving failed
                self.report(e);
                self.finish_draft();
            }
        }
        self.sync_view();
    }

    pub fn cancel_draft(&mut self) {
        if self.mode == Mode::Input {
            self.new_task_priority = self.draft.priority;
        }
        self.draft = Draft::new(self.new_task_priority);
        self.editing_id = None;
        self.mode = Mode::Navigate;
    }

    fn finish_draft(&mut self) {
        match self.mode {
            // Stay in the input bar for the next task
            Mode::Input => self.draft = Draft::new(self.new_task_priority),
            _ => {
                self.draft = Draft::new(self.new_task_priority);
                self.editing_id = None;
                self.mode = Mode::Navigate;
            }
        }
    }

    /// Surface an error as a notice. Nothing here ends the session.
    pub fn report(&mut self, err: StoreError) {
        tracing::warn!(error = %err, "action failed");
        let notice = match &err {
            StoreError::Task(TaskError::EmptyText) => {
                Notice::new(NoticeKind::Warning, "Warning", "Please enter a task!")
            }
            e if e.is_persistence() => Notice::new(
                NoticeKind::Error,
                "Error",
                format!("Failed to save tasks: {}", e),
            ),
            e => Notice::new(NoticeKind::Info, "Info", e.to_string()),
        };
        self.notice = Some(notice);
    }
}

/// Run the TUI application over the given store
pub fn run(outcome: LoadOutcome, ui: &UiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::from_load(outcome, ui);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    if ui.mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    if ui.mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if app.store_changed() {
            app.sync_view();
        }
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
