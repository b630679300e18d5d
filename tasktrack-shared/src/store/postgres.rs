/// PostgreSQL-backed [`Store`]
///
/// A thin adapter: each method forwards to the matching model function and
/// converts `sqlx::Error` into [`StoreError`].

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::db::pool::health_check;
use crate::models::activity::{Activity, ActivityWithUser, CreateActivity};
use crate::models::membership::{CreateMembership, Membership};
use crate::models::organization::{CreateOrganization, Organization, OrganizationWithRole};
use crate::models::project::{CreateProject, Project};
use crate::models::task::{CreateTask, Task, TaskScope, TaskStatus, TaskWithCreator};
use crate::models::user::{CreateUser, User};

/// Store backed by a sqlx connection pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool, for migrations and shutdown
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        health_check(&self.pool).await.map_err(StoreError::from)
    }

    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        Ok(User::create(&self.pool, data).await?)
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(User::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_email(&self.pool, email).await?)
    }

    async fn create_organization(
        &self,
        data: CreateOrganization,
    ) -> StoreResult<(Organization, Membership)> {
        Ok(Organization::create_with_admin(&self.pool, data).await?)
    }

    async fn find_organization(&self, id: Uuid) -> StoreResult<Option<Organization>> {
        Ok(Organization::find_by_id(&self.pool, id).await?)
    }

    async fn list_organizations_for_user(
        &self,
        user_id: Uuid,
    ) -> StoreResult<Vec<OrganizationWithRole>> {
        Ok(Organization::list_for_user(&self.pool, user_id).await?)
    }

    async fn find_membership(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<Membership>> {
        Ok(Membership::find(&self.pool, organization_id, user_id).await?)
    }

    async fn create_membership(&self, data: CreateMembership) -> StoreResult<Membership> {
        Ok(Membership::create(&self.pool, data).await?)
    }

    async fn count_members(&self, organization_id: Uuid) -> StoreResult<i64> {
        Ok(Membership::count_by_organization(&self.pool, organization_id).await?)
    }

    async fn create_project(&self, data: CreateProject) -> StoreResult<Project> {
        Ok(Project::create(&self.pool, data).await?)
    }

    async fn find_project(&self, id: Uuid) -> StoreResult<Option<Project>> {
        Ok(Project::find_by_id(&self.pool, id).await?)
    }

    async fn list_projects(&self, organization_id: Uuid) -> StoreResult<Vec<Project>> {
        Ok(Project::list_by_organization(&self.pool, organization_id).await?)
    }

    async fn create_task(&self, data: CreateTask) -> StoreResult<Task> {
        Ok(Task::create(&self.pool, data).await?)
    }

    async fn find_task_scope(&self, id: Uuid) -> StoreResult<Option<TaskScope>> {
        Ok(Task::find_scope(&self.pool, id).await?)
    }

    async fn list_tasks(&self, project_id: Uuid) -> StoreResult<Vec<TaskWithCreator>> {
        Ok(Task::list_by_project(&self.pool, project_id).await?)
    }

    async fn update_task_status(&self, id: Uuid, status: TaskStatus) -> StoreResult<Option<Task>> {
        Ok(Task::update_status(&self.pool, id, status).await?)
    }

    async fn append_activity(&self, data: CreateActivity) -> StoreResult<Activity> {
        Ok(Activity::append(&self.pool, data).await?)
    }

    async fn list_activities(
        &self,
        organization_id: Uuid,
        limit: i64,
    ) -> StoreResult<Vec<ActivityWithUser>> {
        Ok(Activity::list_recent(&self.pool, organization_id, limit).await?)
    }
}
