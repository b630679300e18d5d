/// Database models for TaskTrack
///
/// Each model owns its SQL and exposes async CRUD functions taking a `PgPool`.
/// Request code does not call these directly; it goes through
/// [`crate::store::Store`], whose Postgres implementation delegates here.
///
/// # Models
///
/// - `user`: Registered accounts
/// - `organization`: Tenants, created together with an admin membership
/// - `membership`: User-organization relationships with roles
/// - `project`: Projects owned by one organization
/// - `task`: Tasks owned by one project
/// - `activity`: Append-only per-organization feed
///
/// # Example
///
/// ```no_run
/// use tasktrack_shared::models::project::{CreateProject, Project};
/// use tasktrack_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example(org: Uuid, user: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let project = Project::create(&pool, CreateProject {
///     name: "Website".to_string(),
///     description: None,
///     organization_id: org,
///     created_by: user,
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod activity;
pub mod membership;
pub mod organization;
pub mod project;
pub mod task;
pub mod user;
