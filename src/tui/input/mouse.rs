use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::tui::app::{App, ClickTarget, Mode};

/// Handle a mouse event against the hitboxes recorded by the last frame
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {}
        MouseEventKind::ScrollDown if app.notice.is_none() && !app.show_help => {
            app.move_cursor(1);
            return;
        }
        MouseEventKind::ScrollUp if app.notice.is_none() && !app.show_help => {
            app.move_cursor(-1);
            return;
        }
        _ => return,
    }

    // Overlays take the click that dismisses them
    if app.notice.is_some() {
        app.notice = None;
        return;
    }
    if app.show_help {
        app.show_help = false;
        return;
    }
    app.status_message = None;

    let pos = Position::new(mouse.column, mouse.row);
    let Some(target) = app
        .hitboxes
        .iter()
        .rev()
        .find(|h| h.area.contains(pos))
        .map(|h| h.target.clone())
    else {
        return;
    };
    tracing::debug!(?target, "click");

    let drafting = matches!(app.mode, Mode::Input | Mode::Edit);
    match target {
        ClickTarget::Card(index) => app.cursor = index,
        ClickTarget::Checkbox(id) => {
            select(app, &id);
            app.toggle(&id);
        }
        ClickTarget::Edit(id) => {
            select(app, &id);
            app.begin_edit(&id);
        }
        ClickTarget::Delete(id) => {
            select(app, &id);
            app.delete(&id);
        }
        ClickTarget::Filter(filter) => app.set_filter(filter),
        ClickTarget::Priority(priority) => {
            if !drafting {
                app.begin_input();
            }
            app.draft.priority = priority;
            if app.mode == Mode::Input {
                app.new_task_priority = priority;
            }
        }
        ClickTarget::InputField => {
            if !drafting {
                app.begin_input();
            }
        }
        ClickTarget::AddButton => {
            if drafting {
                app.commit_draft();
            } else {
                app.begin_input();
            }
        }
    }
}

/// Move the cursor onto the task with `id`, if it is in view
fn select(app: &mut App, id: &str) {
    let index = app.visible().iter().position(|t| t.id == id);
    if let Some(index) = index {
        app.cursor = index;
    }
}
