/// Activity feed endpoint
///
/// `GET /api/activities/organization/:organization_id` returns the newest 50
/// entries, each with the acting user's name.

use crate::{
    app::AppState,
    error::ApiResult,
    extract::ApiPath,
};
use axum::{
    extract::State,
    Extension, Json,
};
use tasktrack_shared::{
    auth::identity::AuthContext, models::activity::ActivityWithUser, operations::activities,
};
use uuid::Uuid;

pub async fn list_activities(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiPath(organization_id): ApiPath<Uuid>,
) -> ApiResult<Json<Vec<ActivityWithUser>>> {
    let feed =
        activities::list_activities(state.store.as_ref(), auth.user_id, organization_id).await?;

    Ok(Json(feed))
}
