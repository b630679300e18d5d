/// Task model and database operations
///
/// Tasks live inside a project and reach their organization only through it.
/// Status is a closed three-value enum stored as the `task_status` Postgres
/// type, so a row can never hold anything else.
///
/// # Status Values
///
/// ```text
/// todo ⇄ in-progress ⇄ done
/// ```
///
/// Any status may be set from any other; there is no transition table.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('todo', 'in-progress', 'done');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     status task_status NOT NULL DEFAULT 'todo',
///     created_by UUID NOT NULL REFERENCES users(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use uuid::Uuid;

/// Task status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status")]
pub enum TaskStatus {
    /// Not started (default for new tasks)
    #[default]
    #[sqlx(rename = "todo")]
    #[serde(rename = "todo")]
    Todo,

    /// Being worked on
    #[sqlx(rename = "in-progress")]
    #[serde(rename = "in-progress")]
    InProgress,

    /// Finished
    #[sqlx(rename = "done")]
    #[serde(rename = "done")]
    Done,
}

impl TaskStatus {
    /// All accepted status values
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    /// Wire/storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Done => "done",
        }
    }

    /// Parses a status from its wire representation
    ///
    /// Returns `None` for anything outside the three accepted values,
    /// including differently-cased or underscored spellings.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(TaskStatus::Todo),
            "in-progress" => Some(TaskStatus::InProgress),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task within a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,

    /// Owning project (and through it, the organization)
    pub project_id: Uuid,

    pub status: TaskStatus,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Task listing row annotated with the creator's display name
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskWithCreator {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub task: Task,

    pub created_by_name: String,
}

/// A task together with the project and organization it resolves to
///
/// Produced by a single task → project join so the organization cannot be
/// read from a different snapshot than the task itself.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskScope {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub task: Task,

    /// Name of the owning project
    pub project_name: String,

    /// Organization of the owning project
    pub organization_id: Uuid,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub project_id: Uuid,
    pub status: TaskStatus,
    pub created_by: Uuid,
}

impl Task {
    /// Creates a new task
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, project_id, status, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, project_id, status, created_by, created_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.project_id)
        .bind(data.status)
        .bind(data.created_by)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Loads a task with its project name and organization in one query
    pub async fn find_scope(pool: &PgPool, id: Uuid) -> Result<Option<TaskScope>, sqlx::Error> {
        let scope = sqlx::query_as::<_, TaskScope>(
            r#"
            SELECT t.id, t.title, t.description, t.project_id, t.status,
                   t.created_by, t.created_at,
                   p.name AS project_name, p.organization_id
            FROM tasks t
            JOIN projects p ON t.project_id = p.id
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(scope)
    }

    /// Lists a project's tasks, newest first, with creator names
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: Uuid,
    ) -> Result<Vec<TaskWithCreator>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, TaskWithCreator>(
            r#"
            SELECT t.id, t.title, t.description, t.project_id, t.status,
                   t.created_by, t.created_at,
                   u.name AS created_by_name
            FROM tasks t
            JOIN users u ON t.created_by = u.id
            WHERE t.project_id = $1
            ORDER BY t.created_at DESC
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Sets a task's status
    ///
    /// Returns the updated task, or `None` if it does not exist.
    pub async fn update_status(
        pool: &PgPool,
        id: Uuid,
        status: TaskStatus,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET status = $2
            WHERE id = $1
            RETURNING id, title, description, project_id, status, created_by, created_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_as_str() {
        assert_eq!(TaskStatus::Todo.as_str(), "todo");
        assert_eq!(TaskStatus::InProgress.as_str(), "in-progress");
        assert_eq!(TaskStatus::Done.as_str(), "done");
        assert_eq!(TaskStatus::default(), TaskStatus::Todo);
    }

    #[test]
    fn test_task_status_parse() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }

        assert_eq!(TaskStatus::parse("in_progress"), None);
        assert_eq!(TaskStatus::parse("DONE"), None);
        assert_eq!(TaskStatus::parse("archived"), None);
        assert_eq!(TaskStatus::parse(""), None);
    }

    #[test]
    fn test_task_status_serde_matches_wire_format() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(
            serde_json::from_str::<TaskStatus>("\"done\"").unwrap(),
            TaskStatus::Done
        );
        assert!(serde_json::from_str::<TaskStatus>("\"blocked\"").is_err());
    }
}
