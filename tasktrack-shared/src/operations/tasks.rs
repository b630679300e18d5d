/// Task operations: create, list, update status
///
/// Tasks are addressed by project or task ID, so every operation resolves the
/// owning organization before the membership check.

use tracing::info;
use uuid::Uuid;

use super::{optional, required, OperationError, OperationResult};
use crate::auth::authorization::authorize;
use crate::auth::resolver::{resolve_project, resolve_task};
use crate::models::activity::ActivityAction;
use crate::models::task::{CreateTask, Task, TaskStatus, TaskWithCreator};
use crate::recorder::ActivityRecorder;
use crate::store::Store;

/// Caller-supplied fields for a new task
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub project_id: Uuid,

    /// Defaults to `todo`
    pub status: Option<TaskStatus>,
}

pub async fn create_task(
    store: &dyn Store,
    user_id: Uuid,
    input: NewTask,
) -> OperationResult<Task> {
    let project = resolve_project(store, input.project_id).await?;
    let access = authorize(store, user_id, project.organization_id).await?;
    let title = required("Title", &input.title)?;

    let task = store
        .create_task(CreateTask {
            title,
            description: optional(input.description),
            project_id: project.id,
            status: input.status.unwrap_or_default(),
            created_by: user_id,
        })
        .await?;

    ActivityRecorder::new(store)
        .record(
            &access,
            ActivityAction::TaskCreated,
            format!("Created task \"{}\" in project \"{}\"", task.title, project.name),
        )
        .await;

    info!(
        task_id = %task.id,
        project_id = %project.id,
        organization_id = %access.organization_id(),
        user_id = %user_id,
        "Task created"
    );
    Ok(task)
}

/// Tasks of a project, newest first, with creator names
pub async fn list_tasks(
    store: &dyn Store,
    user_id: Uuid,
    project_id: Uuid,
) -> OperationResult<Vec<TaskWithCreator>> {
    let project = resolve_project(store, project_id).await?;
    authorize(store, user_id, project.organization_id).await?;

    Ok(store.list_tasks(project.id).await?)
}

/// Sets a task's status and records a `task_updated` activity
///
/// The status is already one of the three accepted values by type; parsing
/// untrusted input happens at the boundary with [`TaskStatus::parse`].
pub async fn update_task_status(
    store: &dyn Store,
    user_id: Uuid,
    task_id: Uuid,
    status: TaskStatus,
) -> OperationResult<Task> {
    let scope = resolve_task(store, task_id).await?;
    let access = authorize(store, user_id, scope.organization_id).await?;

    let task = store
        .update_task_status(scope.task.id, status)
        .await?
        .ok_or_else(|| OperationError::NotFound("Task".to_string()))?;

    ActivityRecorder::new(store)
        .record(
            &access,
            ActivityAction::TaskUpdated,
            format!("Updated task \"{}\" to {}", task.title, status),
        )
        .await;

    info!(
        task_id = %task.id,
        organization_id = %access.organization_id(),
        user_id = %user_id,
        status = status.as_str(),
        "Task status updated"
    );
    Ok(task)
}
