/// Organization model and database operations
///
/// Organizations are the tenant boundary: every project, task and activity
/// belongs to exactly one of them. An organization is never created without
/// its creator's `admin` membership; both rows are written in one transaction.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE organizations (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     created_by UUID NOT NULL REFERENCES users(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tasktrack_shared::models::organization::{CreateOrganization, Organization};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
/// let (org, membership) = Organization::create_with_admin(&pool, CreateOrganization {
///     name: "Acme".to_string(),
///     created_by: user_id,
/// }).await?;
/// assert!(membership.role.is_admin());
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::{Uuid, Variant};

use super::membership::{Membership, MembershipRole};

/// Organization (tenant)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Organization {
    /// Unique organization ID (UUID v4)
    pub id: Uuid,

    /// Organization name
    pub name: String,

    /// User who created the organization
    pub created_by: Uuid,

    /// When the organization was created
    pub created_at: DateTime<Utc>,
}

/// Organization as seen by one of its members, annotated with their role
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrganizationWithRole {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub organization: Organization,

    /// Role of the requesting user
    pub role: MembershipRole,
}

/// Input for creating a new organization
#[derive(Debug, Clone)]
pub struct CreateOrganization {
    pub name: String,
    pub created_by: Uuid,
}

/// Parses an organization identifier in canonical UUID v4 form
///
/// Accepts exactly the 8-4-4-4-12 hyphenated hexadecimal shape (either case)
/// with version nibble `4` and variant nibble in `{8, 9, a, b}`. Braced, URN
/// and unhyphenated forms, and other UUID versions, are rejected.
///
/// # Example
///
/// ```
/// use tasktrack_shared::models::organization::parse_organization_id;
///
/// assert!(parse_organization_id("3f2504e0-4f89-41d3-9a0c-0305e82c3301").is_some());
/// assert!(parse_organization_id("3f2504e0-4f89-11d3-9a0c-0305e82c3301").is_none());
/// assert!(parse_organization_id("not-a-uuid").is_none());
/// ```
pub fn parse_organization_id(raw: &str) -> Option<Uuid> {
    let bytes = raw.as_bytes();
    if bytes.len() != 36 {
        return None;
    }

    for (i, b) in bytes.iter().enumerate() {
        let ok = match i {
            8 | 13 | 18 | 23 => *b == b'-',
            _ => b.is_ascii_hexdigit(),
        };
        if !ok {
            return None;
        }
    }

    let id = Uuid::parse_str(raw).ok()?;
    (id.get_version_num() == 4 && id.get_variant() == Variant::RFC4122).then_some(id)
}

impl Organization {
    /// Creates an organization and its creator's admin membership atomically
    ///
    /// Both inserts run in one transaction; if either fails nothing is
    /// committed, so no organization can exist without an owning membership.
    pub async fn create_with_admin(
        pool: &PgPool,
        data: CreateOrganization,
    ) -> Result<(Self, Membership), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let organization = sqlx::query_as::<_, Organization>(
            r#"
            INSERT INTO organizations (name, created_by)
            VALUES ($1, $2)
            RETURNING id, name, created_by, created_at
            "#,
        )
        .bind(&data.name)
        .bind(data.created_by)
        .fetch_one(&mut *tx)
        .await?;

        let membership = sqlx::query_as::<_, Membership>(
            r#"
            INSERT INTO organization_members (organization_id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING organization_id, user_id, role, created_at
            "#,
        )
        .bind(organization.id)
        .bind(data.created_by)
        .bind(MembershipRole::Admin)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((organization, membership))
    }

    /// Finds an organization by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let organization = sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, name, created_by, created_at
            FROM organizations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(organization)
    }

    /// Lists the organizations a user belongs to, with the user's role in each
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<OrganizationWithRole>, sqlx::Error> {
        let organizations = sqlx::query_as::<_, OrganizationWithRole>(
            r#"
            SELECT o.id, o.name, o.created_by, o.created_at, om.role
            FROM organizations o
            JOIN organization_members om ON o.id = om.organization_id
            WHERE om.user_id = $1
            ORDER BY o.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(organizations)
    }
}
