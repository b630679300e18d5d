/// Activity model and database operations
///
/// Activities form an append-only, per-organization audit feed. Rows are only
/// ever inserted; this module exposes no update or delete query.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE activity_action AS ENUM (
///     'organization_created', 'member_joined', 'project_created',
///     'task_created', 'task_updated'
/// );
///
/// CREATE TABLE activities (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     organization_id UUID NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id),
///     action activity_action NOT NULL,
///     description TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
/// );
/// ```
///
/// `clock_timestamp()` rather than `NOW()` keeps two activities written in
/// the same transaction from sharing a timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Kind of event recorded in the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "activity_action", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    OrganizationCreated,
    MemberJoined,
    ProjectCreated,
    TaskCreated,
    TaskUpdated,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::OrganizationCreated => "organization_created",
            ActivityAction::MemberJoined => "member_joined",
            ActivityAction::ProjectCreated => "project_created",
            ActivityAction::TaskCreated => "task_created",
            ActivityAction::TaskUpdated => "task_updated",
        }
    }
}

/// A single feed entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Activity {
    pub id: Uuid,

    /// Organization whose feed this entry belongs to
    pub organization_id: Uuid,

    /// Acting user
    pub user_id: Uuid,

    pub action: ActivityAction,

    /// Human-readable summary, e.g. `Created project "Website"`
    pub description: String,

    pub created_at: DateTime<Utc>,
}

/// Feed entry annotated with the acting user's display name
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ActivityWithUser {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub activity: Activity,

    pub user_name: String,
}

/// Input for appending an activity
#[derive(Debug, Clone)]
pub struct CreateActivity {
    pub organization_id: Uuid,
    pub user_id: Uuid,
    pub action: ActivityAction,
    pub description: String,
}

impl Activity {
    /// Appends an entry to an organization's feed
    pub async fn append(pool: &PgPool, data: CreateActivity) -> Result<Self, sqlx::Error> {
        let activity = sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO activities (organization_id, user_id, action, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id, organization_id, user_id, action, description, created_at
            "#,
        )
        .bind(data.organization_id)
        .bind(data.user_id)
        .bind(data.action)
        .bind(data.description)
        .fetch_one(pool)
        .await?;

        Ok(activity)
    }

    /// Returns the newest `limit` entries of an organization's feed, newest first
    pub async fn list_recent(
        pool: &PgPool,
        organization_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ActivityWithUser>, sqlx::Error> {
        let activities = sqlx::query_as::<_, ActivityWithUser>(
            r#"
            SELECT a.id, a.organization_id, a.user_id, a.action, a.description,
                   a.created_at, u.name AS user_name
            FROM activities a
            JOIN users u ON a.user_id = u.id
            WHERE a.organization_id = $1
            ORDER BY a.created_at DESC, a.id DESC
            LIMIT $2
            "#,
        )
        .bind(organization_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(activities)
    }
}
