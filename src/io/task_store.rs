use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::model::filter::Filter;
use crate::model::task::{self, Priority, Task};
use crate::ops::task_ops::{self, TaskError};
use crate::ops::view::{self, Stats};

/// Error type for task store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{path} does not contain a list of tasks")]
    NotAnArray { path: PathBuf },
    #[error("not overwriting {path}: it could not be read and no backup exists")]
    Protected { path: PathBuf },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("could not serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    /// True for failures of the backing file rather than of the request
    pub fn is_persistence(&self) -> bool {
        !matches!(self, StoreError::Task(_))
    }
}

/// A problem with one record of the task file. Skipped records are left out
/// of the store; the rest are loaded with defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("record {index} is not an object; skipped")]
    NotAnObject { index: usize },
    #[error("record {index} has no `{field}`; skipped")]
    MissingField { index: usize, field: &'static str },
    #[error("record {index} has an invalid `{field}`; using the default")]
    InvalidField { index: usize, field: &'static str },
    #[error("record {index} repeats id {id}; assigned a new one")]
    DuplicateId { index: usize, id: String },
}

impl RecordError {
    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            RecordError::NotAnObject { .. } | RecordError::MissingField { .. }
        )
    }
}

/// Result of opening the store. Loading never fails outright: a bad file
/// yields an empty store plus `error`.
#[derive(Debug)]
pub struct LoadOutcome {
    pub store: TaskStore,
    pub error: Option<StoreError>,
    pub record_errors: Vec<RecordError>,
}

impl LoadOutcome {
    /// An empty store after a failed load. Unless the file's bytes are safe
    /// in a backup, the store refuses to overwrite the file.
    fn failed(path: PathBuf, error: StoreError, backed_up: bool) -> Self {
        let mut store = TaskStore::new(path, Vec::new());
        store.protected = !backed_up;
        LoadOutcome {
            store,
            error: Some(error),
            record_errors: Vec::new(),
        }
    }
}

/// The ordered task list and the file it is persisted to.
///
/// Every mutation is applied in memory first, then the whole list is
/// written back. A failed write leaves the in-memory list authoritative.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
    revision: u64,
    /// Set when the file on disk could not be read and must not be replaced
    protected: bool,
}

impl TaskStore {
    /// A store over `tasks` that has not been read from `path`
    pub fn new(path: impl Into<PathBuf>, tasks: Vec<Task>) -> Self {
        TaskStore {
            path: path.into(),
            tasks,
            revision: 0,
            protected: false,
        }
    }

    /// Read the task file. A missing file is an empty store.
    pub fn load_all(path: impl Into<PathBuf>) -> LoadOutcome {
        let path = path.into();
        let content = match fs::read(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no task file yet");
                return LoadOutcome {
                    store: TaskStore::new(path, Vec::new()),
                    error: None,
                    record_errors: Vec::new(),
                };
            }
            Err(source) => {
                tracing::error!(path = %path.display(), error = %source, "task file unreadable");
                let error = StoreError::Read {
                    path: path.clone(),
                    source,
                };
                return LoadOutcome::failed(path, error, false);
            }
        };

        let (tasks, record_errors) = match decode_tasks(&content, Local::now()) {
            Ok(decoded) => decoded,
            Err(kind) => {
                let error = match kind {
                    DecodeError::Json(source) => StoreError::Parse {
                        path: path.clone(),
                        source,
                    },
                    DecodeError::NotAnArray => StoreError::NotAnArray { path: path.clone() },
                };
                tracing::error!(path = %path.display(), %error, "task file rejected");
                let backed_up = back_up(&path, &content);
                return LoadOutcome::failed(path, error, backed_up);
            }
        };

        for err in &record_errors {
            tracing::warn!(path = %path.display(), "{}", err);
        }
        tracing::info!(path = %path.display(), count = tasks.len(), "loaded tasks");

        LoadOutcome {
            store: TaskStore::new(path, tasks),
            error: None,
            record_errors,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// True when the file on disk could not be read or backed up, so saves are refused
    pub fn is_protected(&self) -> bool {
        self.protected
    }

    /// Incremented on every change; views rebuild when it moves
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn view(&self, filter: Filter) -> Vec<&Task> {
        view::filtered_view(&self.tasks, filter)
    }

    pub fn stats(&self) -> Stats {
        Stats::of(&self.tasks)
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        task_ops::find_task(&self.tasks, id)
    }

    /// Full id for an exact id or a unique prefix
    pub fn resolve(&self, id_or_prefix: &str) -> Result<String, StoreError> {
        Ok(task_ops::resolve_id(&self.tasks, id_or_prefix)?.to_string())
    }

    /// Append a task and persist. Returns the new id.
    pub fn add(&mut self, text: &str, priority: Priority) -> Result<String, StoreError> {
        let id = task_ops::add_task(&mut self.tasks, text, priority, Local::now())?
            .id
            .clone();
        tracing::info!(%id, %priority, "added task");
        self.changed();
        self.persist()?;
        Ok(id)
    }

    /// Flip completion and persist. Returns the new completion flag.
    pub fn toggle(&mut self, id: &str) -> Result<bool, StoreError> {
        let completed = task_ops::toggle_task(&mut self.tasks, id)?;
        tracing::info!(%id, completed, "toggled task");
        self.changed();
        self.persist()?;
        Ok(completed)
    }

    /// Remove a task and persist. An unknown id changes nothing.
    pub fn delete(&mut self, id: &str) -> Result<Option<Task>, StoreError> {
        let Some(removed) = task_ops::delete_task(&mut self.tasks, id) else {
            tracing::debug!(%id, "delete of unknown task ignored");
            return Ok(None);
        };
        tracing::info!(%id, "deleted task");
        self.changed();
        self.persist()?;
        Ok(Some(removed))
    }

    /// Replace text and/or priority and persist
    pub fn edit(
        &mut self,
        id: &str,
        text: Option<&str>,
        priority: Option<Priority>,
    ) -> Result<(), StoreError> {
        task_ops::edit_task(&mut self.tasks, id, text, priority)?;
        tracing::info!(%id, "edited task");
        self.changed();
        self.persist()
    }

    /// Overwrite the task file with the full list
    pub fn persist(&self) -> Result<(), StoreError> {
        if self.protected {
            tracing::error!(path = %self.path.display(), "refusing to overwrite unreadable task file");
            return Err(StoreError::Protected {
                path: self.path.clone(),
            });
        }
        let mut content = serde_json::to_string_pretty(&self.tasks)?;
        content.push('\n');
        atomic_write(&self.path, content.as_bytes()).map_err(|source| {
            tracing::error!(path = %self.path.display(), error = %source, "task file write failed");
            StoreError::Write {
                path: self.path.clone(),
                source,
            }
        })
    }

    fn changed(&mut self) {
        self.revision += 1;
    }
}

enum DecodeError {
    Json(serde_json::Error),
    NotAnArray,
}

/// Decode the task file, filling absent fields with creation defaults.
fn decode_tasks(
    content: &[u8],
    now: DateTime<Local>,
) -> Result<(Vec<Task>, Vec<RecordError>), DecodeError> {
    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok((Vec::new(), Vec::new()));
    }
    // Bytes that are not UTF-8 fail here and take the backup path
    let value: Value = serde_json::from_slice(content).map_err(DecodeError::Json)?;
    let Value::Array(items) = value else {
        return Err(DecodeError::NotAnArray);
    };

    let mut tasks = Vec::with_capacity(items.len());
    let mut errors = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (index, item) in items.into_iter().enumerate() {
        let Value::Object(fields) = item else {
            errors.push(RecordError::NotAnObject { index });
            continue;
        };
        let Some(mut task) = decode_record(index, &fields, now, &mut errors) else {
            continue;
        };
        if !seen.insert(task.id.clone()) {
            errors.push(RecordError::DuplicateId {
                index,
                id: task.id.clone(),
            });
            while seen.contains(&task.id) {
                task.id = task::new_task_id();
            }
            seen.insert(task.id.clone());
        }
        tasks.push(task);
    }

    Ok((tasks, errors))
}

fn decode_record(
    index: usize,
    fields: &Map<String, Value>,
    now: DateTime<Local>,
    errors: &mut Vec<RecordError>,
) -> Option<Task> {
    let text = match fields.get("text") {
        Some(Value::String(s)) => s.clone(),
        _ => {
            errors.push(RecordError::MissingField {
                index,
                field: "text",
            });
            return None;
        }
    };

    let mut invalid = |field: &'static str| errors.push(RecordError::InvalidField { index, field });

    let id = match fields.get("id") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        None | Some(Value::Null) => task::new_task_id(),
        Some(_) => {
            invalid("id");
            task::new_task_id()
        }
    };

    let completed = match fields.get("completed") {
        Some(Value::Bool(b)) => *b,
        None | Some(Value::Null) => false,
        Some(_) => {
            invalid("completed");
            false
        }
    };

    let priority = match fields.get("priority") {
        None | Some(Value::Null) => Priority::default(),
        Some(Value::String(s)) => s.parse::<Priority>().unwrap_or_else(|_| {
            invalid("priority");
            Priority::default()
        }),
        Some(_) => {
            invalid("priority");
            Priority::default()
        }
    };

    let created_at = match fields.get("createdAt") {
        None | Some(Value::Null) => now,
        Some(Value::String(s)) => task::created_at::parse(s).unwrap_or_else(|| {
            invalid("createdAt");
            now
        }),
        Some(_) => {
            invalid("createdAt");
            now
        }
    };

    Some(Task {
        id,
        text,
        completed,
        priority,
        created_at,
    })
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Path of the copy kept when a task file cannot be parsed
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".bak");
    path.with_file_name(name)
}

/// Copy the rejected file's bytes aside. Returns false if the copy failed.
fn back_up(path: &Path, content: &[u8]) -> bool {
    let backup = backup_path(path);
    match atomic_write(&backup, content) {
        Ok(()) => {
            tracing::warn!(backup = %backup.display(), "kept a copy of the unreadable task file");
            true
        }
        Err(e) => {
            tracing::error!(backup = %backup.display(), error = %e, "could not back up task file");
            false
        }
    }
}
