/// In-memory [`Store`]
///
/// All tables sit behind one `tokio::sync::RwLock`, so every method is atomic
/// with respect to every other. Uniqueness matches the SQL schema (user email,
/// membership per organization and user) and is reported as
/// [`StoreError::Duplicate`] with the same constraint names. Foreign keys are
/// not enforced.
///
/// Timestamps are strictly increasing across the whole store, which keeps
/// newest-first orderings total even when two writes land in the same
/// microsecond.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult, ORGANIZATION_MEMBERS_PKEY, USERS_EMAIL_KEY};
use crate::models::activity::{Activity, ActivityWithUser, CreateActivity};
use crate::models::membership::{CreateMembership, Membership, MembershipRole};
use crate::models::organization::{CreateOrganization, Organization, OrganizationWithRole};
use crate::models::project::{CreateProject, Project};
use crate::models::task::{CreateTask, Task, TaskScope, TaskStatus, TaskWithCreator};
use crate::models::user::{CreateUser, User};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    organizations: HashMap<Uuid, Organization>,
    memberships: HashMap<(Uuid, Uuid), Membership>,
    projects: HashMap<Uuid, Project>,
    tasks: HashMap<Uuid, Task>,
    activities: Vec<Activity>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl Tables {
    fn now(&mut self) -> DateTime<Utc> {
        let mut now = Utc::now();
        if let Some(last) = self.last_timestamp {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        self.last_timestamp = Some(now);
        now
    }
}

/// Store keeping everything in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.email == data.email) {
            return Err(StoreError::Duplicate(USERS_EMAIL_KEY.to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: data.name,
            email: data.email,
            password_hash: data.password_hash,
            created_at: tables.now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn create_organization(
        &self,
        data: CreateOrganization,
    ) -> StoreResult<(Organization, Membership)> {
        let mut tables = self.tables.write().await;
        let created_at = tables.now();

        let organization = Organization {
            id: Uuid::new_v4(),
            name: data.name,
            created_by: data.created_by,
            created_at,
        };
        let membership = Membership {
            organization_id: organization.id,
            user_id: data.created_by,
            role: MembershipRole::Admin,
            created_at,
        };

        tables.organizations.insert(organization.id, organization.clone());
        tables
            .memberships
            .insert((organization.id, data.created_by), membership.clone());

        Ok((organization, membership))
    }

    async fn find_organization(&self, id: Uuid) -> StoreResult<Option<Organization>> {
        Ok(self.tables.read().await.organizations.get(&id).cloned())
    }

    async fn list_organizations_for_user(
        &self,
        user_id: Uuid,
    ) -> StoreResult<Vec<OrganizationWithRole>> {
        let tables = self.tables.read().await;

        let mut organizations: Vec<OrganizationWithRole> = tables
            .memberships
            .values()
            .filter(|m| m.user_id == user_id)
            .filter_map(|m| {
                tables
                    .organizations
                    .get(&m.organization_id)
                    .map(|org| OrganizationWithRole {
                        organization: org.clone(),
                        role: m.role,
                    })
            })
            .collect();

        organizations.sort_by_key(|o| o.organization.created_at);
        Ok(organizations)
    }

    async fn find_membership(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<Membership>> {
        let tables = self.tables.read().await;
        Ok(tables.memberships.get(&(organization_id, user_id)).cloned())
    }

    async fn create_membership(&self, data: CreateMembership) -> StoreResult<Membership> {
        let mut tables = self.tables.write().await;
        let key = (data.organization_id, data.user_id);

        if tables.memberships.contains_key(&key) {
            return Err(StoreError::Duplicate(ORGANIZATION_MEMBERS_PKEY.to_string()));
        }

        let membership = Membership {
            organization_id: data.organization_id,
            user_id: data.user_id,
            role: data.role,
            created_at: tables.now(),
        };
        tables.memberships.insert(key, membership.clone());
        Ok(membership)
    }

    async fn count_members(&self, organization_id: Uuid) -> StoreResult<i64> {
        let tables = self.tables.read().await;
        let count = tables
            .memberships
            .keys()
            .filter(|(org, _)| *org == organization_id)
            .count();
        Ok(count as i64)
    }

    async fn create_project(&self, data: CreateProject) -> StoreResult<Project> {
        let mut tables = self.tables.write().await;

        let project = Project {
            id: Uuid::new_v4(),
            name: data.name,
            description: data.description,
            organization_id: data.organization_id,
            created_by: data.created_by,
            created_at: tables.now(),
        };
        tables.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn find_project(&self, id: Uuid) -> StoreResult<Option<Project>> {
        Ok(self.tables.read().await.projects.get(&id).cloned())
    }

    async fn list_projects(&self, organization_id: Uuid) -> StoreResult<Vec<Project>> {
        let tables = self.tables.read().await;

        let mut projects: Vec<Project> = tables
            .projects
            .values()
            .filter(|p| p.organization_id == organization_id)
            .cloned()
            .collect();

        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    async fn create_task(&self, data: CreateTask) -> StoreResult<Task> {
        let mut tables = self.tables.write().await;

        let task = Task {
            id: Uuid::new_v4(),
            title: data.title,
            description: data.description,
            project_id: data.project_id,
            status: data.status,
            created_by: data.created_by,
            created_at: tables.now(),
        };
        tables.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn find_task_scope(&self, id: Uuid) -> StoreResult<Option<TaskScope>> {
        let tables = self.tables.read().await;

        let scope = tables.tasks.get(&id).and_then(|task| {
            tables.projects.get(&task.project_id).map(|project| TaskScope {
                task: task.clone(),
                project_name: project.name.clone(),
                organization_id: project.organization_id,
            })
        });

        Ok(scope)
    }

    async fn list_tasks(&self, project_id: Uuid) -> StoreResult<Vec<TaskWithCreator>> {
        let tables = self.tables.read().await;

        let mut tasks: Vec<TaskWithCreator> = tables
            .tasks
            .values()
            .filter(|t| t.project_id == project_id)
            .filter_map(|t| {
                tables.users.get(&t.created_by).map(|u| TaskWithCreator {
                    task: t.clone(),
                    created_by_name: u.name.clone(),
                })
            })
            .collect();

        tasks.sort_by(|a, b| b.task.created_at.cmp(&a.task.created_at));
        Ok(tasks)
    }

    async fn update_task_status(&self, id: Uuid, status: TaskStatus) -> StoreResult<Option<Task>> {
        let mut tables = self.tables.write().await;

        Ok(tables.tasks.get_mut(&id).map(|task| {
            task.status = status;
            task.clone()
        }))
    }

    async fn append_activity(&self, data: CreateActivity) -> StoreResult<Activity> {
        let mut tables = self.tables.write().await;

        let activity = Activity {
            id: Uuid::new_v4(),
            organization_id: data.organization_id,
            user_id: data.user_id,
            action: data.action,
            description: data.description,
            created_at: tables.now(),
        };
        tables.activities.push(activity.clone());
        Ok(activity)
    }

    async fn list_activities(
        &self,
        organization_id: Uuid,
        limit: i64,
    ) -> StoreResult<Vec<ActivityWithUser>> {
        let tables = self.tables.read().await;
        let limit = usize::try_from(limit).unwrap_or(0);

        // appended in timestamp order, so reversing yields newest first
        let activities = tables
            .activities
            .iter()
            .rev()
            .filter(|a| a.organization_id == organization_id)
            .filter_map(|a| {
                tables.users.get(&a.user_id).map(|u| ActivityWithUser {
                    activity: a.clone(),
                    user_name: u.name.clone(),
                })
            })
            .take(limit)
            .collect();

        Ok(activities)
    }
}
