/// Membership model and database operations
///
/// A membership grants a user a role inside one organization. The existence of
/// a membership row is the only predicate the authorization guard checks.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE membership_role AS ENUM ('admin', 'member');
///
/// CREATE TABLE organization_members (
///     organization_id UUID NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     role membership_role NOT NULL DEFAULT 'member',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT organization_members_pkey PRIMARY KEY (organization_id, user_id)
/// );
/// ```
///
/// The composite primary key makes a second insert for the same pair fail,
/// which is what turns two racing joins into one membership plus one
/// duplicate error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Roles within an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "membership_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MembershipRole {
    /// Creator of the organization
    Admin,

    /// Joined through the join endpoint
    Member,
}

impl MembershipRole {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipRole::Admin => "admin",
            MembershipRole::Member => "member",
        }
    }

    /// Whether this role carries administrative rights
    pub fn is_admin(&self) -> bool {
        matches!(self, MembershipRole::Admin)
    }
}

/// Membership of a user in an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Membership {
    /// Organization ID
    pub organization_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role within the organization
    pub role: MembershipRole,

    /// When the membership was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new membership
#[derive(Debug, Clone)]
pub struct CreateMembership {
    pub organization_id: Uuid,
    pub user_id: Uuid,
    pub role: MembershipRole,
}

impl Membership {
    /// Adds a user to an organization
    ///
    /// # Errors
    ///
    /// Returns a unique violation on `organization_members_pkey` when the user
    /// is already a member.
    pub async fn create(pool: &PgPool, data: CreateMembership) -> Result<Self, sqlx::Error> {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            INSERT INTO organization_members (organization_id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING organization_id, user_id, role, created_at
            "#,
        )
        .bind(data.organization_id)
        .bind(data.user_id)
        .bind(data.role)
        .fetch_one(pool)
        .await?;

        Ok(membership)
    }

    /// Finds the membership for an (organization, user) pair
    pub async fn find(
        pool: &PgPool,
        organization_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            SELECT organization_id, user_id, role, created_at
            FROM organization_members
            WHERE organization_id = $1 AND user_id = $2
            "#,
        )
        .bind(organization_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(membership)
    }

    /// Counts members in an organization
    pub async fn count_by_organization(pool: &PgPool, organization_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM organization_members WHERE organization_id = $1")
                .bind(organization_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }
}
