pub mod filter_bar;
pub mod header;
pub mod help_overlay;
pub mod helpers;
pub mod input_bar;
pub mod notice_popup;
pub mod status_row;
pub mod task_list;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Draw one frame and record the clickable regions
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Hitboxes are rebuilt every frame
    app.hitboxes.clear();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(3), // input bar
            Constraint::Length(1), // filter tabs
            Constraint::Length(1), // stats line
            Constraint::Min(1),    // cards
            Constraint::Length(1), // status row
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    input_bar::render_input_bar(frame, app, chunks[1]);
    filter_bar::render_filter_bar(frame, app, chunks[2]);
    filter_bar::render_stats_line(frame, app, chunks[3]);
    task_list::render_task_list(frame, app, chunks[4]);
    status_row::render_status_row(frame, app, chunks[5]);

    // Overlays (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
    if app.notice.is_some() {
        notice_popup::render_notice_popup(frame, app, area);
    }
}
