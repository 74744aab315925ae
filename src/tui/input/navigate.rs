use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::Filter;
use crate::tui::app::App;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => app.should_quit = true,
        (_, KeyCode::Char('?')) => app.show_help = true,

        // Cursor
        (_, KeyCode::Char('j') | KeyCode::Down) => app.move_cursor(1),
        (_, KeyCode::Char('k') | KeyCode::Up) => app.move_cursor(-1),
        (_, KeyCode::Char('g') | KeyCode::Home) => app.cursor = 0,
        (_, KeyCode::Char('G') | KeyCode::End) => {
            app.cursor = app.visible().len().saturating_sub(1);
        }
        (_, KeyCode::PageDown) => app.move_cursor(5),
        (_, KeyCode::PageUp) => app.move_cursor(-5),

        // Task actions
        (_, KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter) => {
            if let Some(id) = cursor_id(app) {
                app.toggle(&id);
            }
        }
        (_, KeyCode::Char('d') | KeyCode::Delete) => {
            if let Some(id) = cursor_id(app) {
                app.delete(&id);
            }
        }
        (_, KeyCode::Char('e')) => {
            if let Some(id) = cursor_id(app) {
                app.begin_edit(&id);
            }
        }
        (_, KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Char('n')) => app.begin_input(),
        (_, KeyCode::Char('p')) => {
            app.new_task_priority = app.new_task_priority.next();
            app.draft.priority = app.new_task_priority;
            app.status_message = Some(format!("New tasks: {}", app.new_task_priority));
        }

        // Filters
        (KeyModifiers::NONE, KeyCode::Tab) | (_, KeyCode::Char('f')) => {
            app.set_filter(app.filter.next());
        }
        (_, KeyCode::BackTab) => app.set_filter(app.filter.next().next()),
        (_, KeyCode::Char('1')) => app.set_filter(Filter::All),
        (_, KeyCode::Char('2')) => app.set_filter(Filter::Active),
        (_, KeyCode::Char('3')) => app.set_filter(Filter::Completed),
        _ => {}
    }
}

fn cursor_id(app: &App) -> Option<String> {
    app.cursor_task().map(|t| t.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;
    use crate::tui::app::Mode;
    use crate::tui::render::test_helpers::app_with_tasks;

    fn press(app: &mut App, code: KeyCode) {
        handle_navigate(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn three(dir: &tempfile::TempDir) -> App {
        app_with_tasks(
            dir,
            &[
                ("one", Priority::High, false),
                ("two", Priority::Medium, false),
                ("three", Priority::Low, false),
            ],
        )
    }

    #[test]
    fn cursor_movement_is_clamped() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut app = three(&dir);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.cursor, 0);
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.cursor, 2);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor, 2);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn toggle_and_delete_at_cursor() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut app = three(&dir);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        assert!(app.store.tasks()[1].completed);

        // Completed tasks are not deleted
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.store.tasks().len(), 3);
        assert!(app.status_message.is_some());

        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Char('d'));
        let texts: Vec<&str> = app.store.tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "three"]);
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn delete_last_moves_cursor_up() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut app = three(&dir);
        press(&mut app, KeyCode::Char('G'));
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.cursor, 1);
        assert_eq!(app.cursor_task().unwrap().text, "two");
    }

    #[test]
    fn edit_key_opens_draft() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut app = three(&dir);
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.mode, Mode::Edit);
        assert_eq!(app.draft.text, "one");
        assert_eq!(app.draft.priority, Priority::High);
    }

    #[test]
    fn priority_key_cycles_new_task_priority() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut app = three(&dir);
        assert_eq!(app.new_task_priority, Priority::Medium);
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.new_task_priority, Priority::Low);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.draft.priority, Priority::Low);
    }

    #[test]
    fn filter_change_resets_cursor() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut app = three(&dir);
        press(&mut app, KeyCode::Char('G'));
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.cursor, 0);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.filter, Filter::Active);
    }
}
