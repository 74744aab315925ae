use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::model::Priority;
use crate::tui::app::{App, ClickTarget, Hitbox, Mode};
use crate::util::unicode;

use super::helpers::visible_columns;

const PLACEHOLDER: &str = "What needs to be done?";
/// Each priority chip is ` HIGH ` wide
const CHIP_WIDTH: u16 = 6;

/// Render the bordered input bar: text field, priority selector and add button
pub fn render_input_bar(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let focused = matches!(app.mode, Mode::Input | Mode::Edit);
    let border_color = if focused {
        app.theme.highlight
    } else {
        app.theme.card_border
    };
    let title = match app.mode {
        Mode::Edit => " Edit Task ",
        _ => " New Task ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color).bg(bg))
        .title(Span::styled(title, Style::default().fg(app.theme.dim).bg(bg)))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let button = match app.mode {
        Mode::Edit => "[ Save ]",
        _ => "[ Add Task ]",
    };
    let button_w = unicode::display_width(button) as u16;
    let controls_w = CHIP_WIDTH * Priority::ALL.len() as u16 + 1 + button_w + 1;
    let field_w = inner.width.saturating_sub(controls_w + 2);

    let mut spans: Vec<Span> = vec![Span::styled(" ", Style::default().bg(bg))];

    // Text field, scrolled horizontally so the cursor stays visible
    let field_x = inner.x + 1;
    let draft = &app.draft;
    if draft.text.is_empty() && !focused {
        let hint = visible_columns(PLACEHOLDER, 0, field_w as usize);
        spans.push(Span::styled(
            unicode::pad_to_width(&hint, field_w as usize),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    } else {
        let cursor_col = unicode::byte_offset_to_display_col(&draft.text, draft.cursor);
        let skip = (cursor_col + 1).saturating_sub(field_w as usize);
        let shown = visible_columns(&draft.text, skip, field_w as usize);
        spans.push(Span::styled(
            unicode::pad_to_width(&shown, field_w as usize),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
        if focused && app.notice.is_none() && !app.show_help && field_w > 0 {
            let x = field_x + (cursor_col - skip).min(field_w as usize - 1) as u16;
            frame.set_cursor_position((x, inner.y));
        }
    }
    app.hitboxes.push(Hitbox {
        area: Rect::new(inner.x, inner.y, field_w + 1, 1),
        target: ClickTarget::InputField,
    });
    spans.push(Span::styled(" ", Style::default().bg(bg)));

    // Priority chips
    let mut x = field_x + field_w + 1;
    for priority in Priority::ALL {
        let color = app.theme.priority_color(priority);
        let style = if priority == draft.priority {
            Style::default()
                .fg(app.theme.badge_text)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color).bg(bg)
        };
        spans.push(Span::styled(format!(" {:<4} ", priority.badge()), style));
        app.hitboxes.push(Hitbox {
            area: Rect::new(x, inner.y, CHIP_WIDTH, 1),
            target: ClickTarget::Priority(priority),
        });
        x += CHIP_WIDTH;
    }

    // Add button
    spans.push(Span::styled(" ", Style::default().bg(bg)));
    spans.push(Span::styled(
        button,
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ));
    app.hitboxes.push(Hitbox {
        area: Rect::new(x + 1, inner.y, button_w, 1),
        target: ClickTarget::AddButton,
    });

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        inner,
    );
}
