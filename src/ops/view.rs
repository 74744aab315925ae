use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::model::filter::Filter;
use crate::model::task::Task;

/// The tasks visible under `filter`, in store order
pub fn filtered_view(tasks: &[Task], filter: Filter) -> Vec<&Task> {
    tasks.iter().filter(|t| filter.matches(t.completed)).collect()
}

/// Counts over the whole store, independent of the current filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

impl Stats {
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Stats {
            total: tasks.len(),
            active: tasks.len() - completed,
            completed,
        }
    }

    /// Number of tasks a given filter shows
    pub fn count(&self, filter: Filter) -> usize {
        match filter {
            Filter::All => self.total,
            Filter::Active => self.active,
            Filter::Completed => self.completed,
        }
    }
}

/// Shorten text longer than `max` graphemes to `max - 3` graphemes plus "...".
/// Text at or under the limit is returned unchanged. Below 4 there is no
/// room for the ellipsis, so the text is cut to `max` graphemes.
pub fn truncate_text(text: &str, max: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max {
        return text.to_string();
    }
    if max < 4 {
        return graphemes[..max].concat();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = graphemes[..keep].concat();
    out.push_str("...");
    out
}

/// Creation date relative to `now`: "today", "yesterday", "N days ago"
/// within a week, otherwise "Mon DD".
pub fn relative_date(created: DateTime<Local>, now: DateTime<Local>) -> String {
    let created_day: NaiveDate = created.date_naive();
    let days = (now.date_naive() - created_day).num_days();
    match days {
        0 => "today".to_string(),
        1 => "yesterday".to_string(),
        2..=6 => format!("{} days ago", days),
        _ => created.format("%b %d").to_string(),
    }
}
