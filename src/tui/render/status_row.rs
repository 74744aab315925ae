use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

use super::helpers::push_right_hint;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let hint_style = Style::default().fg(app.theme.dim).bg(bg);
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    let hint = match app.mode {
        Mode::Navigate => {
            if let Some(msg) = &app.status_message {
                spans.push(Span::styled(
                    format!(" {}", msg),
                    Style::default().fg(app.theme.priority_medium).bg(bg),
                ));
            }
            "a add  space toggle  e edit  d del  f filter  ? help "
        }
        Mode::Input | Mode::Edit => {
            let label = if app.mode == Mode::Edit {
                " EDIT "
            } else {
                " INSERT "
            };
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(app.theme.badge_text)
                    .bg(app.theme.highlight)
                    .add_modifier(Modifier::BOLD),
            ));
            "Enter save  Tab priority  Esc cancel "
        }
    };
    push_right_hint(&mut spans, hint, width, hint_style, bg_style);

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}
