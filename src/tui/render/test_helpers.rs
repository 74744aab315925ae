use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::io::task_store::TaskStore;
use crate::model::{Priority, UiConfig};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole screen for `app`
pub fn render_app(app: &mut App, w: u16, h: u16) -> String {
    render_to_string(w, h, |frame, _| super::render(frame, app))
}

/// An app over a store in `dir` holding the given `(text, priority, completed)` tasks
pub fn app_with_tasks(dir: &TempDir, tasks: &[(&str, Priority, bool)]) -> App {
    let mut store = TaskStore::new(dir.path().join("tasks.json"), Vec::new());
    for (text, priority, completed) in tasks {
        let id = store.add(text, *priority).unwrap();
        if *completed {
            store.toggle(&id).unwrap();
        }
    }
    App::new(store, &UiConfig::default())
}
