use chrono::{DateTime, Local};
use serde::Serialize;

use crate::model::task::Task;
use crate::ops::view::{Stats, relative_date, truncate_text};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ToggleJson<'a> {
    pub id: &'a str,
    pub completed: bool,
}

#[derive(Serialize)]
pub struct AddedJson<'a> {
    pub task: &'a Task,
}

#[derive(Serialize)]
pub struct DeletedJson<'a> {
    pub id: &'a str,
    pub deleted: bool,
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// One list line: `<short id>  [ ]  MED   <text>  (<date>)`
pub fn format_task_line(task: &Task, truncate_at: usize, now: DateTime<Local>) -> String {
    format!(
        "{}  {}  {:<4}  {}  ({})",
        task.short_id(),
        checkbox(task.completed),
        task.priority.badge(),
        truncate_text(&task.text, truncate_at),
        relative_date(task.created_at, now),
    )
}

pub fn format_stats(stats: &Stats) -> String {
    format!(
        "Total: {} | Active: {} | Completed: {}",
        stats.total, stats.active, stats.completed
    )
}

pub fn checkbox(completed: bool) -> &'static str {
    if completed { "[x]" } else { "[ ]" }
}
