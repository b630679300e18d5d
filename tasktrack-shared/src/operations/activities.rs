/// Activity feed query

use uuid::Uuid;

use super::OperationResult;
use crate::auth::authorization::authorize;
use crate::models::activity::ActivityWithUser;
use crate::store::Store;

/// Maximum number of entries returned by the feed
pub const ACTIVITY_FEED_LIMIT: i64 = 50;

/// Newest activities of an organization, at most [`ACTIVITY_FEED_LIMIT`]
pub async fn list_activities(
    store: &dyn Store,
    user_id: Uuid,
    organization_id: Uuid,
) -> OperationResult<Vec<ActivityWithUser>> {
    let access = authorize(store, user_id, organization_id).await?;
    Ok(store
        .list_activities(access.organization_id(), ACTIVITY_FEED_LIMIT)
        .await?)
}
