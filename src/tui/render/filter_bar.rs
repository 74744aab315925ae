use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Filter;
use crate::tui::app::{App, ClickTarget, Hitbox};
use crate::util::unicode;

/// Render the filter tabs, each with its task count
pub fn render_filter_bar(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let stats = app.store.stats();
    let mut spans: Vec<Span> = vec![Span::styled(" ", Style::default().bg(bg))];
    let mut x = area.x + 1;

    for filter in Filter::ALL {
        let label = format!(" {} ({}) ", filter.label(), stats.count(filter));
        let width = unicode::display_width(&label) as u16;
        let style = if filter == app.filter {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::styled(" ", Style::default().bg(bg)));

        let visible = width.min((area.x + area.width).saturating_sub(x));
        if visible > 0 {
            app.hitboxes.push(Hitbox {
                area: Rect::new(x, area.y, visible, 1),
                target: ClickTarget::Filter(filter),
            });
        }
        x = x.saturating_add(width + 1);
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

/// Render the counts line under the tabs. Counts cover the whole store.
pub fn render_stats_line(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let stats = app.store.stats();
    let line = Line::from(vec![Span::styled(
        format!(" Total: {} | Completed: {}", stats.total, stats.completed),
        Style::default().fg(app.theme.dim).bg(bg),
    )]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}
