use chrono::{DateTime, Local};

use crate::model::task::{Priority, Task};

/// Error type for task operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("task text cannot be empty")]
    EmptyText,
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("task id '{0}' is ambiguous")]
    AmbiguousId(String),
}

/// Append a new task built from `text` (trimmed). Returns the new task.
pub fn add_task<'a>(
    tasks: &'a mut Vec<Task>,
    text: &str,
    priority: Priority,
    now: DateTime<Local>,
) -> Result<&'a Task, TaskError> {
    let text = validated_text(text)?;
    let mut task = Task::new(text, priority, now);
    // Ids stay unique across the store
    while tasks.iter().any(|t| t.id == task.id) {
        task.id = crate::model::task::new_task_id();
    }
    let index = tasks.len();
    tasks.push(task);
    Ok(&tasks[index])
}

/// Flip the completion flag. Returns the new value.
pub fn toggle_task(tasks: &mut [Task], id: &str) -> Result<bool, TaskError> {
    let task = find_task_mut(tasks, id).ok_or_else(|| TaskError::NotFound(id.to_string()))?;
    task.completed = !task.completed;
    Ok(task.completed)
}

/// Remove a task. An unknown id is not an error; it just removes nothing.
pub fn delete_task(tasks: &mut Vec<Task>, id: &str) -> Option<Task> {
    let idx = tasks.iter().position(|t| t.id == id)?;
    Some(tasks.remove(idx))
}

/// Replace the text and/or priority of an existing task.
/// Id, completion and creation time are left alone.
pub fn edit_task(
    tasks: &mut [Task],
    id: &str,
    text: Option<&str>,
    priority: Option<Priority>,
) -> Result<(), TaskError> {
    let text = text.map(validated_text).transpose()?;
    let task = find_task_mut(tasks, id).ok_or_else(|| TaskError::NotFound(id.to_string()))?;
    if let Some(text) = text {
        task.text = text;
    }
    if let Some(priority) = priority {
        task.priority = priority;
    }
    Ok(())
}

pub fn find_task<'a>(tasks: &'a [Task], id: &str) -> Option<&'a Task> {
    tasks.iter().find(|t| t.id == id)
}

pub fn find_task_mut<'a>(tasks: &'a mut [Task], id: &str) -> Option<&'a mut Task> {
    tasks.iter_mut().find(|t| t.id == id)
}

/// Resolve an exact id or a unique id prefix to the full id
pub fn resolve_id<'a>(tasks: &'a [Task], id_or_prefix: &str) -> Result<&'a str, TaskError> {
    let needle = id_or_prefix.trim();
    if needle.is_empty() {
        return Err(TaskError::NotFound(id_or_prefix.to_string()));
    }
    if let Some(task) = find_task(tasks, needle) {
        return Ok(&task.id);
    }
    let mut matches = tasks.iter().filter(|t| t.id.starts_with(needle));
    match (matches.next(), matches.next()) {
        (Some(task), None) => Ok(&task.id),
        (Some(_), Some(_)) => Err(TaskError::AmbiguousId(needle.to_string())),
        (None, _) => Err(TaskError::NotFound(needle.to_string())),
    }
}

fn validated_text(text: &str) -> Result<String, TaskError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TaskError::EmptyText);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Local> {
        Local::now()
    }

    fn task_with_id(id: &str, text: &str) -> Task {
        let mut task = Task::new(text.into(), Priority::Medium, now());
        task.id = id.into();
        task
    }

    #[test]
    fn add_appends_incomplete_task() {
        let mut tasks = Vec::new();
        for (i, text) in ["one", "  two  ", "three"].iter().enumerate() {
            let added = add_task(&mut tasks, text, Priority::High, now()).unwrap();
            assert!(!added.completed);
            assert_eq!(tasks.len(), i + 1);
        }
        let texts: Vec<&str> = tasks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn add_rejects_blank_text() {
        let mut tasks = Vec::new();
        assert_eq!(
            add_task(&mut tasks, "", Priority::Low, now()).unwrap_err(),
            TaskError::EmptyText
        );
        assert_eq!(
            add_task(&mut tasks, "   \t", Priority::Low, now()).unwrap_err(),
            TaskError::EmptyText
        );
        assert!(tasks.is_empty());
    }

    #[test]
    fn toggle_twice_restores_state() {
        let mut tasks = vec![task_with_id("a", "A")];
        assert_eq!(toggle_task(&mut tasks, "a"), Ok(true));
        assert_eq!(toggle_task(&mut tasks, "a"), Ok(false));
        assert!(!tasks[0].completed);
    }

    #[test]
    fn toggle_unknown_id() {
        let mut tasks = vec![task_with_id("a", "A")];
        assert_eq!(
            toggle_task(&mut tasks, "zzz"),
            Err(TaskError::NotFound("zzz".into()))
        );
        assert!(!tasks[0].completed);
    }

    #[test]
    fn delete_is_idempotent() {
        let mut tasks = vec![task_with_id("a", "A"), task_with_id("b", "B")];
        assert_eq!(delete_task(&mut tasks, "a").map(|t| t.text), Some("A".into()));
        assert!(delete_task(&mut tasks, "a").is_none());
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "b");
    }

    #[test]
    fn edit_changes_text_and_priority_only() {
        let mut tasks = vec![task_with_id("a", "Old")];
        tasks[0].completed = true;
        let created = tasks[0].created_at;

        edit_task(&mut tasks, "a", Some(" New "), Some(Priority::High)).unwrap();
        assert_eq!(tasks[0].text, "New");
        assert_eq!(tasks[0].priority, Priority::High);
        assert!(tasks[0].completed);
        assert_eq!(tasks[0].created_at, created);
        assert_eq!(tasks[0].id, "a");

        edit_task(&mut tasks, "a", None, Some(Priority::Low)).unwrap();
        assert_eq!(tasks[0].text, "New");
        assert_eq!(tasks[0].priority, Priority::Low);
    }

    #[test]
    fn edit_rejects_blank_text_and_unknown_id() {
        let mut tasks = vec![task_with_id("a", "Keep")];
        assert_eq!(
            edit_task(&mut tasks, "a", Some("  "), None),
            Err(TaskError::EmptyText)
        );
        assert_eq!(tasks[0].text, "Keep");
        assert_eq!(
            edit_task(&mut tasks, "b", Some("x"), None),
            Err(TaskError::NotFound("b".into()))
        );
    }

    #[test]
    fn resolve_exact_and_prefix() {
        let tasks = vec![
            task_with_id("abc123", "A"),
            task_with_id("abd456", "B"),
            task_with_id("ab", "C"),
        ];
        assert_eq!(resolve_id(&tasks, "abc"), Ok("abc123"));
        assert_eq!(resolve_id(&tasks, "abd456"), Ok("abd456"));
        // Exact match wins over prefix ambiguity
        assert_eq!(resolve_id(&tasks, "ab"), Ok("ab"));
        assert_eq!(
            resolve_id(&tasks, "a"),
            Err(TaskError::AmbiguousId("a".into()))
        );
        assert_eq!(resolve_id(&tasks, "x"), Err(TaskError::NotFound("x".into())));
        assert!(resolve_id(&tasks, "  ").is_err());
    }
}
