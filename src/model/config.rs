use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::task::Priority;

/// Default task file name, relative to the working directory
pub const DEFAULT_TASK_FILE: &str = "tasks.json";

/// Optional configuration from taskdeck.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_task_file")]
    pub file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            file: default_task_file(),
        }
    }
}

fn default_task_file() -> String {
    DEFAULT_TASK_FILE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Task text longer than this many characters is shortened on cards
    #[serde(default = "default_truncate_at")]
    pub truncate_at: usize,
    /// Priority preselected for new tasks
    #[serde(default)]
    pub default_priority: Priority,
    /// Mouse capture: true = on (default), false = off.
    #[serde(default = "default_true")]
    pub mouse: bool,
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Overrides keyed by priority name (high, medium, low)
    #[serde(default)]
    pub priority_colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            truncate_at: default_truncate_at(),
            default_priority: Priority::default(),
            mouse: true,
            colors: HashMap::new(),
            priority_colors: HashMap::new(),
        }
    }
}

fn default_truncate_at() -> usize {
    50
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log file for the TUI. The CLI always logs to stderr.
    #[serde(default)]
    pub file: Option<String>,
    /// Filter directive (e.g. "info", "taskdeck=debug"); RUST_LOG wins
    #[serde(default)]
    pub level: Option<String>,
}
