/// Resource hierarchy resolution
///
/// Project and task operations arrive with a project or task ID; the guard
/// needs an organization ID. These functions walk up the hierarchy
/// (task → project → organization) and report a missing resource as its own
/// error so callers can answer 404 rather than 403.
///
/// A task is resolved with one store read that returns the task, its project
/// name and the project's organization together. A project's organization is
/// fixed at creation and no code path rewrites it, so a resolved organization
/// stays valid for the guard check that follows.

use tracing::debug;
use uuid::Uuid;

use crate::models::project::Project;
use crate::models::task::TaskScope;
use crate::store::{Store, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Project {0} not found")]
    ProjectNotFound(Uuid),

    #[error("Task {0} not found")]
    TaskNotFound(Uuid),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Loads a project, whose `organization_id` is its owning organization
pub async fn resolve_project(store: &dyn Store, project_id: Uuid) -> Result<Project, ResolveError> {
    let project = store
        .find_project(project_id)
        .await?
        .ok_or(ResolveError::ProjectNotFound(project_id))?;

    debug!(
        project_id = %project_id,
        organization_id = %project.organization_id,
        "Resolved project"
    );
    Ok(project)
}

/// Loads a task together with its project name and organization
pub async fn resolve_task(store: &dyn Store, task_id: Uuid) -> Result<TaskScope, ResolveError> {
    let scope = store
        .find_task_scope(task_id)
        .await?
        .ok_or(ResolveError::TaskNotFound(task_id))?;

    debug!(
        task_id = %task_id,
        project_id = %scope.task.project_id,
        organization_id = %scope.organization_id,
        "Resolved task"
    );
    Ok(scope)
}

/// Organization owning a project
pub async fn organization_of_project(
    store: &dyn Store,
    project_id: Uuid,
) -> Result<Uuid, ResolveError> {
    Ok(resolve_project(store, project_id).await?.organization_id)
}

/// Organization and project owning a task
pub async fn organization_of_task(
    store: &dyn Store,
    task_id: Uuid,
) -> Result<(Uuid, Uuid), ResolveError> {
    let scope = resolve_task(store, task_id).await?;
    Ok((scope.organization_id, scope.task.project_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::organization::CreateOrganization;
    use crate::models::project::CreateProject;
    use crate::models::task::{CreateTask, TaskStatus};
    use crate::models::user::CreateUser;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_resolves_task_through_project() {
        let store = MemoryStore::new();
        let user = store
            .create_user(CreateUser {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();
        let (org, _) = store
            .create_organization(CreateOrganization {
                name: "Acme".to_string(),
                created_by: user.id,
            })
            .await
            .unwrap();
        let project = store
            .create_project(CreateProject {
                name: "Launch".to_string(),
                description: None,
                organization_id: org.id,
                created_by: user.id,
            })
            .await
            .unwrap();
        let task = store
            .create_task(CreateTask {
                title: "Write copy".to_string(),
                description: None,
                project_id: project.id,
                status: TaskStatus::Todo,
                created_by: user.id,
            })
            .await
            .unwrap();

        assert_eq!(organization_of_project(&store, project.id).await.unwrap(), org.id);
        assert_eq!(
            organization_of_task(&store, task.id).await.unwrap(),
            (org.id, project.id)
        );

        let scope = resolve_task(&store, task.id).await.unwrap();
        assert_eq!(scope.project_name, "Launch");
        assert_eq!(scope.task, task);
    }

    #[tokio::test]
    async fn test_missing_resources_are_not_found() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();

        assert!(matches!(
            resolve_project(&store, id).await,
            Err(ResolveError::ProjectNotFound(missing)) if missing == id
        ));
        assert!(matches!(
            resolve_task(&store, id).await,
            Err(ResolveError::TaskNotFound(missing)) if missing == id
        ));
    }
}
