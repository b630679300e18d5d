/// Activity recorder
///
/// Appends feed entries after a mutation has succeeded. The organization comes
/// from the [`OrgAccess`] the mutation was authorized with and is never looked
/// up again, so an entry always lands in the feed of the organization that was
/// checked.
///
/// Recording is best effort. The mutation is already committed when the
/// recorder runs, so a failed append is logged at error level and reported as
/// `None` instead of failing the request. Callers that need the failure use
/// [`ActivityRecorder::try_record`].

use tracing::{debug, error};

use crate::auth::authorization::OrgAccess;
use crate::models::activity::{Activity, ActivityAction, CreateActivity};
use crate::store::{Store, StoreResult};

/// Writes activity entries through a [`Store`]
pub struct ActivityRecorder<'a> {
    store: &'a dyn Store,
}

impl<'a> ActivityRecorder<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Appends an entry, propagating storage failures
    pub async fn try_record(
        &self,
        access: &OrgAccess,
        action: ActivityAction,
        description: impl Into<String>,
    ) -> StoreResult<Activity> {
        let activity = self
            .store
            .append_activity(CreateActivity {
                organization_id: access.organization_id(),
                user_id: access.user_id(),
                action,
                description: description.into(),
            })
            .await?;

        debug!(
            organization_id = %activity.organization_id,
            user_id = %activity.user_id,
            action = action.as_str(),
            "Recorded activity"
        );
        Ok(activity)
    }

    /// Appends an entry; on failure logs it and returns `None`
    pub async fn record(
        &self,
        access: &OrgAccess,
        action: ActivityAction,
        description: impl Into<String>,
    ) -> Option<Activity> {
        match self.try_record(access, action, description).await {
            Ok(activity) => Some(activity),
            Err(e) => {
                error!(
                    organization_id = %access.organization_id(),
                    user_id = %access.user_id(),
                    action = action.as_str(),
                    error = %e,
                    "Failed to record activity"
                );
                None
            }
        }
    }
}
