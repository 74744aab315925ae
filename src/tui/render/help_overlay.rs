use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::helpers::centered_rect_fixed;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Tasks", header_style)));
    add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Move cursor", key_style, desc_style);
    add_binding(&mut lines, " g/G", "First / last task", key_style, desc_style);
    add_binding(&mut lines, " Space/x", "Toggle completed", key_style, desc_style);
    add_binding(&mut lines, " e", "Edit task", key_style, desc_style);
    add_binding(&mut lines, " d", "Delete task", key_style, desc_style);
    add_binding(&mut lines, " a/i/n", "New task", key_style, desc_style);
    add_binding(&mut lines, " p", "Cycle new-task priority", key_style, desc_style);
    add_binding(&mut lines, " Tab/f", "Next filter", key_style, desc_style);
    add_binding(&mut lines, " 1/2/3", "All / Active / Completed", key_style, desc_style);
    add_binding(&mut lines, " q", "Quit", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Input", header_style)));
    add_binding(&mut lines, " Enter", "Add or save", key_style, desc_style);
    add_binding(&mut lines, " Tab", "Cycle priority", key_style, desc_style);
    add_binding(&mut lines, " Esc", "Cancel", key_style, desc_style);
    add_binding(&mut lines, " Ctrl-W", "Delete word", key_style, desc_style);

    let popup_w = 48.min(area.width.saturating_sub(2));
    let popup_h = (lines.len() as u16 + 2).min(area.height);
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 12;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}
