/// Project endpoints
///
/// - `POST /api/projects`: create within an organization (201)
/// - `GET  /api/projects/organization/:organization_id`: list, newest first

use crate::{
    app::AppState,
    error::ApiResult,
    extract::{ApiJson, ApiPath},
};
use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use tasktrack_shared::{
    auth::identity::AuthContext,
    models::project::Project,
    operations::projects::{self, NewProject},
};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    pub description: Option<String>,

    pub organization_id: Uuid,
}

pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(req): ApiJson<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    req.validate()?;

    let project = projects::create_project(
        state.store.as_ref(),
        auth.user_id,
        NewProject {
            name: req.name,
            description: req.description,
            organization_id: req.organization_id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn list_projects(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiPath(organization_id): ApiPath<Uuid>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects =
        projects::list_projects(state.store.as_ref(), auth.user_id, organization_id).await?;

    Ok(Json(projects))
}
