use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

use super::helpers::push_right_hint;

/// Render the title bar
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.header_bg;
    let bg_style = Style::default().bg(bg);

    let mut spans = vec![
        Span::styled(" \u{2713} ", Style::default().fg(app.theme.green).bg(bg)),
        Span::styled(
            "To-Do List",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    let stats = app.store.stats();
    let remaining = if stats.active == 1 {
        "1 task left ".to_string()
    } else {
        format!("{} tasks left ", stats.active)
    };
    push_right_hint(
        &mut spans,
        remaining,
        area.width as usize,
        Style::default().fg(app.theme.dim).bg(bg),
        bg_style,
    );

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}
