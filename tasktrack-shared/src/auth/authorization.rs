/// Organization membership guard
///
/// Every organization-scoped operation starts with [`authorize`]. On success
/// it returns an [`OrgAccess`], which is the only way to obtain one outside
/// this crate; downstream steps (the activity recorder in particular) take an
/// `&OrgAccess` rather than a bare organization ID, so they cannot run for an
/// organization that was never checked.
///
/// The guard's only predicate is existence of a membership row. Role is
/// carried along for callers but does not gate anything here.
///
/// # Example
///
/// ```no_run
/// use tasktrack_shared::auth::authorization::{authorize, AuthzError};
/// use tasktrack_shared::store::Store;
/// use uuid::Uuid;
///
/// # async fn example(store: &dyn Store, user: Uuid, org: Uuid) -> Result<(), AuthzError> {
/// let access = authorize(store, user, org).await?;
/// println!("{} is {}", access.user_id(), access.role().as_str());
/// # Ok(())
/// # }
/// ```

use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::membership::{Membership, MembershipRole};
use crate::store::{Store, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// No membership row for (organization, user)
    #[error("Not a member of organization {organization_id}")]
    NotAMember { organization_id: Uuid },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Proof that a user is a member of an organization
///
/// Constructed only by [`authorize`] or from the membership written when an
/// organization is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgAccess {
    membership: Membership,
}

impl OrgAccess {
    pub(crate) fn from_membership(membership: Membership) -> Self {
        Self { membership }
    }

    pub fn organization_id(&self) -> Uuid {
        self.membership.organization_id
    }

    pub fn user_id(&self) -> Uuid {
        self.membership.user_id
    }

    pub fn role(&self) -> MembershipRole {
        self.membership.role
    }

    pub fn into_membership(self) -> Membership {
        self.membership
    }
}

/// Checks that `user_id` is a member of `organization_id`
///
/// # Errors
///
/// - [`AuthzError::NotAMember`] if there is no membership (logged at warn)
/// - [`AuthzError::Store`] if the lookup fails
pub async fn authorize(
    store: &dyn Store,
    user_id: Uuid,
    organization_id: Uuid,
) -> Result<OrgAccess, AuthzError> {
    match store.find_membership(organization_id, user_id).await? {
        Some(membership) => {
            debug!(
                organization_id = %organization_id,
                user_id = %user_id,
                role = membership.role.as_str(),
                "Membership check passed"
            );
            Ok(OrgAccess::from_membership(membership))
        }
        None => {
            warn!(
                organization_id = %organization_id,
                user_id = %user_id,
                "Access denied: not a member of organization"
            );
            Err(AuthzError::NotAMember { organization_id })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::organization::CreateOrganization;
    use crate::models::user::CreateUser;
    use crate::store::MemoryStore;

    async fn seed_user(store: &MemoryStore, email: &str) -> Uuid {
        store
            .create_user(CreateUser {
                name: "User".to_string(),
                email: email.to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_member_is_authorized() {
        let store = MemoryStore::new();
        let owner = seed_user(&store, "owner@example.com").await;
        let (org, _) = store
            .create_organization(CreateOrganization {
                name: "Acme".to_string(),
                created_by: owner,
            })
            .await
            .unwrap();

        let access = authorize(&store, owner, org.id).await.unwrap();
        assert_eq!(access.organization_id(), org.id);
        assert_eq!(access.user_id(), owner);
        assert_eq!(access.role(), MembershipRole::Admin);
    }

    #[tokio::test]
    async fn test_non_member_is_denied() {
        let store = MemoryStore::new();
        let owner = seed_user(&store, "owner@example.com").await;
        let outsider = seed_user(&store, "outsider@example.com").await;
        let (org, _) = store
            .create_organization(CreateOrganization {
                name: "Acme".to_string(),
                created_by: owner,
            })
            .await
            .unwrap();

        let err = authorize(&store, outsider, org.id).await.unwrap_err();
        assert!(matches!(err, AuthzError::NotAMember { organization_id } if organization_id == org.id));
    }

    #[tokio::test]
    async fn test_unknown_organization_is_denied() {
        let store = MemoryStore::new();
        let user = seed_user(&store, "user@example.com").await;

        assert!(matches!(
            authorize(&store, user, Uuid::new_v4()).await,
            Err(AuthzError::NotAMember { .. })
        ));
    }
}
