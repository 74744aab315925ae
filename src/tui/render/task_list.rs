use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::cli::output::checkbox;
use crate::model::Task;
use crate::ops::view::{relative_date, truncate_text};
use crate::tui::app::{App, ClickTarget, Hitbox};
use crate::util::unicode;

pub const EMPTY_MESSAGE: &str = "No tasks found. Add a new task to get started!";

/// Rows taken by one card, borders included
pub const CARD_HEIGHT: u16 = 3;

const EDIT_LABEL: &str = "[e]dit";
const DELETE_LABEL: &str = "[d]el";
const DATE_WIDTH: usize = 10;
const BADGE_WIDTH: usize = 6;
/// Columns of a card row not taken by the task text:
/// ` [ ] ` + ` ` + badge + ` ` + date + ` ` + `[e]dit [d]el` + ` `
const FIXED_WIDTH: usize = 5 + 1 + BADGE_WIDTH + 1 + DATE_WIDTH + 1 + 12 + 1;

/// Render the visible slice of cards, keeping the cursor card on screen
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let count = app.visible().len();

    if count == 0 {
        let y = area.y + area.height.saturating_sub(1) / 2;
        let row = Rect::new(area.x, y, area.width, 1.min(area.height));
        let msg = Paragraph::new(Span::styled(
            EMPTY_MESSAGE,
            Style::default().fg(app.theme.dim).bg(bg),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(msg, row);
        return;
    }

    let per_page = ((area.height / CARD_HEIGHT) as usize).max(1);
    if app.cursor < app.scroll {
        app.scroll = app.cursor;
    } else if app.cursor >= app.scroll + per_page {
        app.scroll = app.cursor + 1 - per_page;
    }
    app.scroll = app.scroll.min(count.saturating_sub(per_page));

    let now = Local::now();
    let end = (app.scroll + per_page).min(count);
    let mut cards: Vec<(Rect, Task)> = Vec::new();
    for (slot, task) in app.visible()[app.scroll..end].iter().enumerate() {
        let y = area.y + slot as u16 * CARD_HEIGHT;
        let height = CARD_HEIGHT.min(area.y + area.height - y);
        cards.push((Rect::new(area.x, y, area.width, height), (*task).clone()));
    }

    for (slot, (rect, task)) in cards.into_iter().enumerate() {
        let index = app.scroll + slot;
        render_card(frame, app, &task, index, rect, now);
    }
}

fn render_card(
    frame: &mut Frame,
    app: &mut App,
    task: &Task,
    index: usize,
    area: Rect,
    now: chrono::DateTime<Local>,
) {
    let theme = &app.theme;
    let selected = index == app.cursor;
    let bg = if selected {
        theme.selection_bg
    } else {
        theme.background
    };
    let priority_color = theme.priority_color(task.priority);
    let border_color = if selected {
        theme.highlight
    } else if task.completed {
        theme.dim
    } else {
        priority_color
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color).bg(theme.background))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);

    let text_w = (inner.width as usize).saturating_sub(FIXED_WIDTH);
    let text = truncate_text(&task.text, app.truncate_at);
    let text = unicode::pad_to_width(&text, text_w);

    let base = Style::default().bg(bg);
    let text_style = if task.completed {
        base.fg(theme.dim).add_modifier(Modifier::CROSSED_OUT)
    } else {
        base.fg(theme.text_bright)
    };
    let check_color = if task.completed {
        theme.green
    } else {
        theme.checkbox
    };
    let badge_style = Style::default()
        .fg(theme.badge_text)
        .bg(if task.completed { theme.dim } else { priority_color })
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled(" ", base),
        Span::styled(checkbox(task.completed), base.fg(check_color)),
        Span::styled(" ", base),
        Span::styled(text, text_style),
        Span::styled(" ", base),
        Span::styled(format!(" {:<4} ", task.priority.badge()), badge_style),
        Span::styled(" ", base),
        Span::styled(
            format!("{:<width$}", relative_date(task.created_at, now), width = DATE_WIDTH),
            base.fg(theme.dim),
        ),
        Span::styled(" ", base),
    ];
    if task.completed {
        spans.push(Span::styled(" ".repeat(12), base));
    } else {
        spans.push(Span::styled(EDIT_LABEL, base.fg(theme.highlight)));
        spans.push(Span::styled(" ", base));
        spans.push(Span::styled(DELETE_LABEL, base.fg(theme.red)));
    }
    spans.push(Span::styled(" ", base));

    frame.render_widget(block, area);
    if inner.height > 0 {
        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(base),
            Rect::new(inner.x, inner.y, inner.width, 1),
        );
    }

    // Whole card first so the specific targets on top of it win
    let clip = |x: usize, w: usize| -> Option<Rect> {
        let right = inner.x as usize + inner.width as usize;
        let x = inner.x as usize + x;
        (x < right).then(|| Rect::new(x as u16, inner.y, w.min(right - x) as u16, 1))
    };
    app.hitboxes.push(Hitbox {
        area,
        target: ClickTarget::Card(index),
    });
    if inner.height == 0 {
        return;
    }
    if let Some(rect) = clip(1, 3) {
        app.hitboxes.push(Hitbox {
            area: rect,
            target: ClickTarget::Checkbox(task.id.clone()),
        });
    }
    if !task.completed {
        let actions_x = 5 + text_w + 1 + BADGE_WIDTH + 1 + DATE_WIDTH + 1;
        if let Some(rect) = clip(actions_x, EDIT_LABEL.len()) {
            app.hitboxes.push(Hitbox {
                area: rect,
                target: ClickTarget::Edit(task.id.clone()),
            });
        }
        if let Some(rect) = clip(actions_x + EDIT_LABEL.len() + 1, DELETE_LABEL.len()) {
            app.hitboxes.push(Hitbox {
                area: rect,
                target: ClickTarget::Delete(task.id.clone()),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn empty_view_message() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut app = app_with_tasks(&dir, &[]);
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains(EMPTY_MESSAGE));
    }

    #[test]
    fn card_shows_checkbox_badge_date_and_actions() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut app = app_with_tasks(&dir, &[("Buy milk", Priority::Low, false)]);
        let out = render_app(&mut app, TERM_W, TERM_H);
        let row = out
            .lines()
            .find(|l| l.contains("Buy milk"))
            .expect("card row");
        assert!(row.contains("[ ] Buy milk"));
        assert!(row.contains(" LOW "));
        assert!(row.contains("today"));
        assert!(row.contains("[e]dit [d]el"));
    }

    #[test]
    fn completed_card_has_no_actions() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut app = app_with_tasks(&dir, &[("Walk dog", Priority::High, true)]);
        let out = render_app(&mut app, TERM_W, TERM_H);
        let row = out.lines().find(|l| l.contains("Walk dog")).unwrap();
        assert!(row.contains("[x] Walk dog"));
        assert!(!row.contains("[e]dit"));
        assert!(!app.hitboxes.iter().any(|h| matches!(
            h.target,
            ClickTarget::Edit(_) | ClickTarget::Delete(_)
        )));
    }

    #[test]
    fn long_text_is_truncated() {
        let dir = tempfile::TempDir::new().unwrap();
        let long = "x".repeat(60);
        let mut app = app_with_tasks(&dir, &[(long.as_str(), Priority::Medium, false)]);
        let out = render_app(&mut app, 120, TERM_H);
        assert!(out.contains(&format!("{}...", "x".repeat(47))));
        assert!(!out.contains(&"x".repeat(48)));
    }

    #[test]
    fn scroll_follows_cursor() {
        let dir = tempfile::TempDir::new().unwrap();
        let tasks: Vec<(String, Priority, bool)> = (0..10)
            .map(|i| (format!("task {}", i), Priority::Medium, false))
            .collect();
        let refs: Vec<(&str, Priority, bool)> =
            tasks.iter().map(|(t, p, c)| (t.as_str(), *p, *c)).collect();
        let mut app = app_with_tasks(&dir, &refs);
        app.cursor = 9;
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("task 9"));
        assert!(!out.contains("task 0 "));
        assert!(app.scroll > 0);
    }

    #[test]
    fn action_hitboxes_line_up_with_labels() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut app = app_with_tasks(&dir, &[("Buy milk", Priority::Low, false)]);
        let out = render_app(&mut app, TERM_W, TERM_H);
        let lines: Vec<&str> = out.lines().collect();

        let edit = app
            .hitboxes
            .iter()
            .find(|h| matches!(h.target, ClickTarget::Edit(_)))
            .unwrap();
        let row: Vec<char> = lines[edit.area.y as usize].chars().collect();
        let label: String = row[edit.area.x as usize..(edit.area.x + edit.area.width) as usize]
            .iter()
            .collect();
        assert_eq!(label, EDIT_LABEL);
    }
}
