/// Storage capability
///
/// Everything that reads or writes persistent state does so through a
/// [`Store`] passed in by the caller. There is no process-wide database
/// handle: the API keeps an `Arc<dyn Store>` in its state, and tests hand the
/// same code a [`MemoryStore`].
///
/// # Implementations
///
/// - [`PgStore`]: PostgreSQL via sqlx, delegating to the query functions in
///   [`crate::models`]
/// - [`MemoryStore`]: in-process tables behind a single `RwLock`, with the
///   same uniqueness rules as the SQL schema
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tasktrack_shared::store::{MemoryStore, Store};
///
/// let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
/// ```

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::activity::{Activity, ActivityWithUser, CreateActivity};
use crate::models::membership::{CreateMembership, Membership};
use crate::models::organization::{CreateOrganization, Organization, OrganizationWithRole};
use crate::models::project::{CreateProject, Project};
use crate::models::task::{CreateTask, Task, TaskScope, TaskStatus, TaskWithCreator};
use crate::models::user::{CreateUser, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Storage failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write (value is the constraint name)
    #[error("duplicate value violates {0}")]
    Duplicate(String),

    /// Any other database error
    #[error("database error: {0}")]
    Database(sqlx::Error),

    /// The backing store could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Whether this error is a uniqueness violation
    pub fn is_duplicate(&self) -> bool {
        matches!(self, StoreError::Duplicate(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return StoreError::Duplicate(db_err.constraint().unwrap_or("unique").to_string());
            }
        }

        if matches!(
            err,
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
        ) {
            return StoreError::Unavailable(err.to_string());
        }

        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Name of the unique constraint on user email
pub const USERS_EMAIL_KEY: &str = "users_email_key";

/// Name of the primary key on (organization_id, user_id)
pub const ORGANIZATION_MEMBERS_PKEY: &str = "organization_members_pkey";

/// Persistent storage for every TaskTrack entity
///
/// Each method is a single atomic operation; `create_organization` is the
/// only one that writes two rows, and it writes both or neither.
#[async_trait]
pub trait Store: Send + Sync {
    /// Verifies the store is reachable
    async fn ping(&self) -> StoreResult<()>;

    // Users

    async fn create_user(&self, data: CreateUser) -> StoreResult<User>;
    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    // Organizations and memberships

    /// Creates an organization and its creator's `admin` membership atomically
    async fn create_organization(
        &self,
        data: CreateOrganization,
    ) -> StoreResult<(Organization, Membership)>;

    async fn find_organization(&self, id: Uuid) -> StoreResult<Option<Organization>>;

    /// Organizations the user belongs to, oldest first, with the user's role
    async fn list_organizations_for_user(
        &self,
        user_id: Uuid,
    ) -> StoreResult<Vec<OrganizationWithRole>>;

    async fn find_membership(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<Membership>>;

    /// Inserts a membership; a second insert for the same pair is `Duplicate`
    async fn create_membership(&self, data: CreateMembership) -> StoreResult<Membership>;

    async fn count_members(&self, organization_id: Uuid) -> StoreResult<i64>;

    // Projects

    async fn create_project(&self, data: CreateProject) -> StoreResult<Project>;
    async fn find_project(&self, id: Uuid) -> StoreResult<Option<Project>>;

    /// Projects of an organization, newest first
    async fn list_projects(&self, organization_id: Uuid) -> StoreResult<Vec<Project>>;

    // Tasks

    async fn create_task(&self, data: CreateTask) -> StoreResult<Task>;

    /// Task plus its project's name and organization, read together
    async fn find_task_scope(&self, id: Uuid) -> StoreResult<Option<TaskScope>>;

    /// Tasks of a project, newest first, with creator names
    async fn list_tasks(&self, project_id: Uuid) -> StoreResult<Vec<TaskWithCreator>>;

    async fn update_task_status(&self, id: Uuid, status: TaskStatus) -> StoreResult<Option<Task>>;

    // Activities

    async fn append_activity(&self, data: CreateActivity) -> StoreResult<Activity>;

    /// Newest `limit` activities of an organization, strictly newest first
    async fn list_activities(
        &self,
        organization_id: Uuid,
        limit: i64,
    ) -> StoreResult<Vec<ActivityWithUser>>;
}
