mod edit;
mod mouse;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

use edit::handle_edit;
use navigate::handle_navigate;

pub use mouse::handle_mouse;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Notice popup swallows the key that dismisses it
    if app.notice.is_some() {
        app.notice = None;
        return;
    }
    if app.show_help {
        app.show_help = false;
        return;
    }

    app.status_message = None;
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Input | Mode::Edit => handle_edit(app, key),
    }
}

/// Pasted text goes into the input bar, opening it if needed
pub fn handle_paste(app: &mut App, text: &str) {
    if app.notice.is_some() || app.show_help {
        return;
    }
    if app.mode == Mode::Navigate {
        app.begin_input();
    }
    app.draft.insert_str(text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Filter, Priority};
    use crate::tui::app::{Notice, NoticeKind};
    use crate::tui::render::test_helpers::app_with_tasks;
    use crossterm::event::KeyEventKind;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn ctrl_c_quits_from_any_mode() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut app = app_with_tasks(&dir, &[]);
        app.begin_input();
        let mut key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        key.kind = KeyEventKind::Press;
        handle_key(&mut app, key);
        assert!(app.should_quit);
    }

    #[test]
    fn notice_swallows_one_key() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut app = app_with_tasks(&dir, &[]);
        app.notice = Some(Notice::new(NoticeKind::Info, "Info", "hi"));
        press(&mut app, KeyCode::Char('q'));
        assert!(app.notice.is_none());
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn add_task_by_typing() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut app = app_with_tasks(&dir, &[]);
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Buy milk");
        press(&mut app, KeyCode::Tab); // Medium -> Low
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.mode, Mode::Navigate);
        let tasks = app.store.tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "Buy milk");
        assert_eq!(tasks[0].priority, Priority::Low);
        assert!(!tasks[0].completed);

        // Persisted as well
        let reloaded = crate::io::task_store::TaskStore::load_all(app.store.path());
        assert_eq!(reloaded.store.tasks(), app.store.tasks());
    }

    #[test]
    fn filter_keys() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut app = app_with_tasks(
            &dir,
            &[("a", Priority::Medium, false), ("b", Priority::Medium, true)],
        );
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.filter, Filter::Completed);
        assert_eq!(app.visible().len(), 1);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.filter, Filter::All);
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.filter, Filter::Active);
    }
}
