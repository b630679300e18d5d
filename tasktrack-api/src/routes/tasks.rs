/// Task endpoints
///
/// - `POST  /api/tasks`: create within a project (201, status defaults to `todo`)
/// - `GET   /api/tasks/project/:project_id`: list, newest first
/// - `PATCH /api/tasks/:id/status`: set status to `todo`, `in-progress` or `done`
///
/// Status values arrive as plain strings and are parsed here, so an unknown
/// value is a 400 with a field detail before any lookup happens.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
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
    models::task::{Task, TaskStatus, TaskWithCreator},
    operations::tasks::{self, NewTask},
};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,

    pub description: Option<String>,

    pub project_id: Uuid,

    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

fn parse_status(raw: &str) -> ApiResult<TaskStatus> {
    TaskStatus::parse(raw).ok_or_else(|| {
        ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "status".to_string(),
            message: "Status must be one of: todo, in-progress, done".to_string(),
        }])
    })
}

pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(req): ApiJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate()?;
    let status = req.status.as_deref().map(parse_status).transpose()?;

    let task = tasks::create_task(
        state.store.as_ref(),
        auth.user_id,
        NewTask {
            title: req.title,
            description: req.description,
            project_id: req.project_id,
            status,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiPath(project_id): ApiPath<Uuid>,
) -> ApiResult<Json<Vec<TaskWithCreator>>> {
    let tasks = tasks::list_tasks(state.store.as_ref(), auth.user_id, project_id).await?;
    Ok(Json(tasks))
}

pub async fn update_task_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiPath(task_id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateStatusRequest>,
) -> ApiResult<Json<Task>> {
    let status = parse_status(&req.status)?;

    let task = tasks::update_task_status(state.store.as_ref(), auth.user_id, task_id, status).await?;
    Ok(Json(task))
}
