//! Task list.
//!
//! Stored under `zenflow-tasks` as a JSON array in board order, newest first.

use std::collections::{BTreeSet, HashSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, Result, ValidationError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(ValidationError::InvalidValue {
                field: "priority".into(),
                message: format!("'{other}' is not one of high, medium, low"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// todo -> in-progress -> completed -> todo
    pub fn next(self) -> Self {
        match self {
            TaskStatus::Todo => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Todo,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Percent complete, 0..=100.
    #[serde(default)]
    pub progress: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// The three tasks a first run starts with.
    pub fn sample() -> Self {
        let tags = |a: &str, b: &str| -> BTreeSet<String> {
            [a.to_string(), b.to_string()].into_iter().collect()
        };
        Self::new(vec![
            Task {
                id: "1".into(),
                title: "Complete Q4 Strategy Review".into(),
                description: Some("Finalize strategic planning documents for next quarter".into()),
                priority: Priority::High,
                status: TaskStatus::InProgress,
                due_date: Some("2024-01-15".into()),
                tags: tags("Strategy", "Planning"),
                progress: 75,
            },
            Task {
                id: "2".into(),
                title: "Team Performance Reviews".into(),
                description: None,
                priority: Priority::Medium,
                status: TaskStatus::Todo,
                due_date: Some("2024-01-20".into()),
                tags: tags("HR", "Management"),
                progress: 0,
            },
            Task {
                id: "3".into(),
                title: "Product Launch Preparation".into(),
                description: Some("Coordinate with marketing and engineering teams".into()),
                priority: Priority::High,
                status: TaskStatus::InProgress,
                due_date: None,
                tags: tags("Product", "Launch"),
                progress: 60,
            },
        ])
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks not yet completed.
    pub fn active_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status != TaskStatus::Completed)
            .count()
    }

    /// Prepend a new todo task and return its id.
    pub fn add(&mut self, title: &str, priority: Priority) -> Result<String> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::Empty("title").into());
        }
        let id = Uuid::new_v4().to_string();
        self.tasks.insert(
            0,
            Task {
                id: id.clone(),
                title: title.to_string(),
                description: None,
                priority,
                status: TaskStatus::Todo,
                due_date: None,
                tags: BTreeSet::new(),
                progress: 0,
            },
        );
        Ok(id)
    }

    /// Advance the task's status; completing it sets progress to 100.
    pub fn toggle_status(&mut self, id: &str) -> Result<TaskStatus> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found(id))?;
        task.status = task.status.next();
        if task.status == TaskStatus::Completed {
            task.progress = 100;
        }
        Ok(task.status)
    }

    pub fn remove(&mut self, id: &str) -> Result<Task> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| not_found(id))?;
        Ok(self.tasks.remove(pos))
    }

    /// Stored lists must have unique ids and progress within 0..=100.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for task in &self.tasks {
            if !seen.insert(task.id.as_str()) {
                return Err(ValidationError::InvalidValue {
                    field: "tasks".into(),
                    message: format!("duplicate id '{}'", task.id),
                });
            }
            if task.progress > 100 {
                return Err(ValidationError::InvalidValue {
                    field: "tasks".into(),
                    message: format!("progress {} out of range for '{}'", task.progress, task.id),
                });
            }
        }
        Ok(())
    }
}

fn not_found(id: &str) -> CoreError {
    CoreError::NotFound {
        kind: "task",
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_has_three_tasks() {
        let list = TaskList::sample();
        assert_eq!(list.len(), 3);
        assert_eq!(list.active_count(), 3);
        assert!(list.validate().is_ok());
    }

    #[test]
    fn add_prepends_todo() {
        let mut list = TaskList::sample();
        let id = list.add("  Write report ", Priority::Low).unwrap();
        let first = &list.tasks()[0];
        assert_eq!(first.id, id);
        assert_eq!(first.title, "Write report");
        assert_eq!(first.status, TaskStatus::Todo);
        assert_eq!(first.progress, 0);
        assert!(first.tags.is_empty());
    }

    #[test]
    fn add_rejects_blank_title() {
        let mut list = TaskList::default();
        assert!(matches!(
            list.add("   ", Priority::Medium),
            Err(CoreError::Validation(ValidationError::Empty("title")))
        ));
    }

    #[test]
    fn toggle_cycles_status_and_completes_progress() {
        let mut list = TaskList::default();
        let id = list.add("Cycle", Priority::Medium).unwrap();
        assert_eq!(list.toggle_status(&id).unwrap(), TaskStatus::InProgress);
        assert_eq!(list.get(&id).unwrap().progress, 0);
        assert_eq!(list.toggle_status(&id).unwrap(), TaskStatus::Completed);
        assert_eq!(list.get(&id).unwrap().progress, 100);
        assert_eq!(list.active_count(), 0);
        assert_eq!(list.toggle_status(&id).unwrap(), TaskStatus::Todo);
        assert_eq!(list.get(&id).unwrap().progress, 100);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut list = TaskList::sample();
        assert!(matches!(
            list.toggle_status("nope"),
            Err(CoreError::NotFound { kind: "task", .. })
        ));
        assert!(list.remove("nope").is_err());
    }

    #[test]
    fn json_shape_uses_camel_case_and_kebab_status() {
        let list = TaskList::sample();
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json[0]["status"], "in-progress");
        assert_eq!(json[0]["dueDate"], "2024-01-15");
        assert!(json[1].get("description").is_none());
    }

    #[test]
    fn validate_rejects_duplicates_and_bad_progress() {
        let mut list = TaskList::sample();
        let mut dup = list.tasks()[0].clone();
        dup.title = "copy".into();
        list.tasks.push(dup);
        assert!(list.validate().is_err());

        let mut list = TaskList::sample();
        list.tasks[0].progress = 150;
        assert!(list.validate().is_err());
    }
}
