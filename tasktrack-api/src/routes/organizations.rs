/// Organization endpoints
///
/// - `POST /api/organizations`: create, caller becomes admin (201)
/// - `GET  /api/organizations`: organizations the caller belongs to
/// - `POST /api/organizations/:id/join`: join as member
///
/// The join path takes the raw ID string; its shape is validated by the
/// operation so a malformed ID is a 400 rather than a routing rejection.

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
use serde::{Deserialize, Serialize};
use tasktrack_shared::{
    auth::identity::AuthContext,
    models::{
        membership::MembershipRole,
        organization::{Organization, OrganizationWithRole},
    },
    operations::organizations,
};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrganizationRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JoinResponse {
    pub message: String,
    pub organization_id: Uuid,
    pub role: MembershipRole,
}

pub async fn create_organization(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(req): ApiJson<CreateOrganizationRequest>,
) -> ApiResult<(StatusCode, Json<Organization>)> {
    req.validate()?;

    let organization =
        organizations::create_organization(state.store.as_ref(), auth.user_id, &req.name).await?;

    Ok((StatusCode::CREATED, Json(organization)))
}

pub async fn list_organizations(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<OrganizationWithRole>>> {
    let organizations =
        organizations::list_organizations(state.store.as_ref(), auth.user_id).await?;

    Ok(Json(organizations))
}

pub async fn join_organization(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<JoinResponse>> {
    let joined = organizations::join_organization(state.store.as_ref(), auth.user_id, &id).await?;

    Ok(Json(JoinResponse {
        message: "Joined organization successfully".to_string(),
        organization_id: joined.organization.id,
        role: joined.membership.role,
    }))
}
