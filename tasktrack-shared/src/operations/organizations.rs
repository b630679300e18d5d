/// Organization operations: create, list, join

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::{required, OperationError, OperationResult};
use crate::auth::authorization::OrgAccess;
use crate::models::activity::ActivityAction;
use crate::models::membership::{CreateMembership, Membership, MembershipRole};
use crate::models::organization::{
    parse_organization_id, CreateOrganization, Organization, OrganizationWithRole,
};
use crate::recorder::ActivityRecorder;
use crate::store::Store;

/// Result of a successful join
#[derive(Debug, Clone, Serialize)]
pub struct JoinedOrganization {
    pub organization: Organization,
    pub membership: Membership,
}

/// Creates an organization with the caller as its admin
///
/// The organization and the admin membership are written as one unit; the
/// `organization_created` activity follows.
pub async fn create_organization(
    store: &dyn Store,
    user_id: Uuid,
    name: &str,
) -> OperationResult<Organization> {
    let name = required("Name", name)?;

    let (organization, membership) = store
        .create_organization(CreateOrganization {
            name,
            created_by: user_id,
        })
        .await?;

    let access = OrgAccess::from_membership(membership);
    ActivityRecorder::new(store)
        .record(
            &access,
            ActivityAction::OrganizationCreated,
            format!("Created organization \"{}\"", organization.name),
        )
        .await;

    info!(
        organization_id = %organization.id,
        user_id = %user_id,
        "Organization created"
    );
    Ok(organization)
}

/// Organizations the caller belongs to, each with the caller's role
pub async fn list_organizations(
    store: &dyn Store,
    user_id: Uuid,
) -> OperationResult<Vec<OrganizationWithRole>> {
    Ok(store.list_organizations_for_user(user_id).await?)
}

/// Adds the caller to an organization as a `member`
///
/// Steps, in order: reject a malformed ID, reject an unknown organization,
/// reject an existing member, insert. The insert itself also reports
/// `AlreadyMember` when a concurrent join won the race, since the store
/// refuses a second membership row for the same pair.
pub async fn join_organization(
    store: &dyn Store,
    user_id: Uuid,
    raw_organization_id: &str,
) -> OperationResult<JoinedOrganization> {
    let organization_id = parse_organization_id(raw_organization_id)
        .ok_or_else(|| OperationError::Validation("Invalid organization ID".to_string()))?;

    let organization = store
        .find_organization(organization_id)
        .await?
        .ok_or_else(|| OperationError::NotFound("Organization".to_string()))?;

    if store.find_membership(organization_id, user_id).await?.is_some() {
        return Err(OperationError::AlreadyMember { organization_id });
    }

    let membership = store
        .create_membership(CreateMembership {
            organization_id,
            user_id,
            role: MembershipRole::Member,
        })
        .await
        .map_err(|e| {
            if e.is_duplicate() {
                OperationError::AlreadyMember { organization_id }
            } else {
                OperationError::Storage(e)
            }
        })?;

    let access = OrgAccess::from_membership(membership);
    ActivityRecorder::new(store)
        .record(
            &access,
            ActivityAction::MemberJoined,
            format!("Joined organization \"{}\"", organization.name),
        )
        .await;

    info!(
        organization_id = %organization_id,
        user_id = %user_id,
        "User joined organization"
    );
    Ok(JoinedOrganization {
        organization,
        membership: access.into_membership(),
    })
}
