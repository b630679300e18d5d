//! Shared helpers for the store-backed behavior tests
//!
//! Everything runs against `MemoryStore`; no database is needed.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tasktrack_shared::models::activity::{Activity, ActivityWithUser, CreateActivity};
use tasktrack_shared::models::membership::{CreateMembership, Membership};
use tasktrack_shared::models::organization::{CreateOrganization, Organization, OrganizationWithRole};
use tasktrack_shared::models::project::{CreateProject, Project};
use tasktrack_shared::models::task::{CreateTask, Task, TaskScope, TaskStatus, TaskWithCreator};
use tasktrack_shared::models::user::{CreateUser, User};
use tasktrack_shared::store::{MemoryStore, Store, StoreError, StoreResult};
use uuid::Uuid;

/// Registers a user directly in the store
pub async fn seed_user(store: &dyn Store, name: &str) -> User {
    store
        .create_user(CreateUser {
            name: name.to_string(),
            email: format!("{}-{}@example.com", name.to_lowercase(), Uuid::new_v4()),
            password_hash: "test_hash".to_string(),
        })
        .await
        .expect("seed user")
}

/// Memory store whose activity appends always fail
///
/// Counts attempted appends so tests can confirm the recorder was invoked.
#[derive(Default)]
pub struct FailingActivityStore {
    pub inner: MemoryStore,
    pub append_attempts: AtomicUsize,
}

impl FailingActivityStore {
    pub fn attempts(&self) -> usize {
        self.append_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Store for FailingActivityStore {
    async fn ping(&self) -> StoreResult<()> {
        self.inner.ping().await
    }

    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        self.inner.create_user(data).await
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        self.inner.find_user_by_id(id).await
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.inner.find_user_by_email(email).await
    }

    async fn create_organization(
        &self,
        data: CreateOrganization,
    ) -> StoreResult<(Organization, Membership)> {
        self.inner.create_organization(data).await
    }

    async fn find_organization(&self, id: Uuid) -> StoreResult<Option<Organization>> {
        self.inner.find_organization(id).await
    }

    async fn list_organizations_for_user(
        &self,
        user_id: Uuid,
    ) -> StoreResult<Vec<OrganizationWithRole>> {
        self.inner.list_organizations_for_user(user_id).await
    }

    async fn find_membership(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<Membership>> {
        self.inner.find_membership(organization_id, user_id).await
    }

    async fn create_membership(&self, data: CreateMembership) -> StoreResult<Membership> {
        self.inner.create_membership(data).await
    }

    async fn count_members(&self, organization_id: Uuid) -> StoreResult<i64> {
        self.inner.count_members(organization_id).await
    }

    async fn create_project(&self, data: CreateProject) -> StoreResult<Project> {
        self.inner.create_project(data).await
    }

    async fn find_project(&self, id: Uuid) -> StoreResult<Option<Project>> {
        self.inner.find_project(id).await
    }

    async fn list_projects(&self, organization_id: Uuid) -> StoreResult<Vec<Project>> {
        self.inner.list_projects(organization_id).await
    }

    async fn create_task(&self, data: CreateTask) -> StoreResult<Task> {
        self.inner.create_task(data).await
    }

    async fn find_task_scope(&self, id: Uuid) -> StoreResult<Option<TaskScope>> {
        self.inner.find_task_scope(id).await
    }

    async fn list_tasks(&self, project_id: Uuid) -> StoreResult<Vec<TaskWithCreator>> {
        self.inner.list_tasks(project_id).await
    }

    async fn update_task_status(&self, id: Uuid, status: TaskStatus) -> StoreResult<Option<Task>> {
        self.inner.update_task_status(id, status).await
    }

    async fn append_activity(&self, _data: CreateActivity) -> StoreResult<Activity> {
        self.append_attempts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("activity table offline".to_string()))
    }

    async fn list_activities(
        &self,
        organization_id: Uuid,
        limit: i64,
    ) -> StoreResult<Vec<ActivityWithUser>> {
        self.inner.list_activities(organization_id, limit).await
    }
}
