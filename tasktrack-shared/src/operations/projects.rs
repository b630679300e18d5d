/// Project operations: create and list within an organization

use tracing::info;
use uuid::Uuid;

use super::{optional, required, OperationResult};
use crate::auth::authorization::authorize;
use crate::models::activity::ActivityAction;
use crate::models::project::{CreateProject, Project};
use crate::recorder::ActivityRecorder;
use crate::store::Store;

/// Caller-supplied fields for a new project
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub organization_id: Uuid,
}

pub async fn create_project(
    store: &dyn Store,
    user_id: Uuid,
    input: NewProject,
) -> OperationResult<Project> {
    let access = authorize(store, user_id, input.organization_id).await?;
    let name = required("Name", &input.name)?;

    let project = store
        .create_project(CreateProject {
            name,
            description: optional(input.description),
            organization_id: access.organization_id(),
            created_by: user_id,
        })
        .await?;

    ActivityRecorder::new(store)
        .record(
            &access,
            ActivityAction::ProjectCreated,
            format!("Created project \"{}\"", project.name),
        )
        .await;

    info!(
        project_id = %project.id,
        organization_id = %project.organization_id,
        user_id = %user_id,
        "Project created"
    );
    Ok(project)
}

/// Projects of an organization, newest first
pub async fn list_projects(
    store: &dyn Store,
    user_id: Uuid,
    organization_id: Uuid,
) -> OperationResult<Vec<Project>> {
    let access = authorize(store, user_id, organization_id).await?;
    Ok(store.list_projects(access.organization_id()).await?)
}
