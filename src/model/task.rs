use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Task priority, fixed at creation and changed only through an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// The lowercase name used in the task file and on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Short badge label shown on task cards
    pub fn badge(self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MED",
            Priority::Low => "LOW",
        }
    }

    /// Cycle high → medium → low → high
    pub fn next(self) -> Priority {
        match self {
            Priority::High => Priority::Medium,
            Priority::Medium => Priority::Low,
            Priority::Low => Priority::High,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority '{0}' (expected high, medium or low)")]
pub struct ParsePriorityError(pub String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" | "h" => Ok(Priority::High),
            "medium" | "med" | "m" => Ok(Priority::Medium),
            "low" | "l" => Ok(Priority::Low),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique id (hyphenated UUID v4)
    pub id: String,
    /// Full task text; only the display is truncated
    pub text: String,
    pub completed: bool,
    pub priority: Priority,
    /// Creation time, used for display only
    #[serde(rename = "createdAt", with = "created_at")]
    pub created_at: DateTime<Local>,
}

impl Task {
    /// Create an incomplete task with a fresh id
    pub fn new(text: String, priority: Priority, created_at: DateTime<Local>) -> Self {
        Task {
            id: new_task_id(),
            text,
            completed: false,
            priority,
            created_at,
        }
    }

    /// First eight characters of the id, enough to address it from the CLI
    pub fn short_id(&self) -> &str {
        let end = self
            .id
            .char_indices()
            .nth(8)
            .map_or(self.id.len(), |(i, _)| i);
        &self.id[..end]
    }
}

/// Generate a fresh task id
pub fn new_task_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// `createdAt` (de)serialization: RFC 3339 on write; RFC 3339 or naive
/// local ISO-8601 (`2024-05-01T09:30:00.123456`) on read.
pub mod created_at {
    use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Local>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, false))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Local>, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
    }

    /// Parse a timestamp in any of the accepted forms
    pub fn parse(raw: &str) -> Option<DateTime<Local>> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Local));
        }
        let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()?;
        Local.from_local_datetime(&naive).earliest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    #[test]
    fn priority_parse_and_display() {
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("MED".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!("l".parse::<Priority>().unwrap(), Priority::Low);
        assert!("urgent".parse::<Priority>().is_err());
        assert_eq!(Priority::Low.to_string(), "low");
    }

    #[test]
    fn priority_cycles_through_all() {
        let mut p = Priority::High;
        for expected in [Priority::Medium, Priority::Low, Priority::High] {
            p = p.next();
            assert_eq!(p, expected);
        }
    }

    #[test]
    fn new_task_is_incomplete_with_unique_id() {
        let now = Local::now();
        let a = Task::new("a".into(), Priority::Low, now);
        let b = Task::new("b".into(), Priority::Low, now);
        assert!(!a.completed);
        assert_ne!(a.id, b.id);
        assert_eq!(a.short_id().len(), 8);
        assert!(a.id.starts_with(a.short_id()));
    }

    #[test]
    fn serializes_with_camel_case_created_at() {
        let created = Local.with_ymd_and_hms(2025, 3, 9, 14, 5, 0).unwrap();
        let task = Task {
            id: "abc".into(),
            text: "Buy milk".into(),
            completed: false,
            priority: Priority::Low,
            created_at: created,
        };
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["priority"], "low");
        assert_eq!(value["completed"], false);
        let stamp = value["createdAt"].as_str().unwrap();
        assert!(stamp.starts_with("2025-03-09T14:05:00"));

        let back: Task = serde_json::from_value(value).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn parses_naive_and_utc_timestamps() {
        let naive = created_at::parse("2024-05-01T09:30:00.123456").unwrap();
        assert_eq!((naive.year(), naive.month(), naive.day()), (2024, 5, 1));
        assert_eq!((naive.hour(), naive.minute()), (9, 30));

        assert!(created_at::parse("2024-05-01T09:30:00Z").is_some());
        assert!(created_at::parse("2024-05-01T09:30:00+02:00").is_some());
        assert!(created_at::parse("yesterday").is_none());
    }
}
