/// Authentication and authorization
///
/// # Modules
///
/// - [`password`]: Argon2id hashing
/// - [`jwt`]: access/refresh token issuance and validation
/// - [`identity`]: bearer header → [`identity::AuthContext`]
/// - [`authorization`]: the organization membership guard
/// - [`resolver`]: project/task → owning organization
///
/// # Example
///
/// ```no_run
/// use tasktrack_shared::auth::{authorization::authorize, resolver::resolve_project};
/// use tasktrack_shared::store::Store;
/// use uuid::Uuid;
///
/// # async fn example(store: &dyn Store, user: Uuid, project: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let project = resolve_project(store, project).await?;
/// let access = authorize(store, user, project.organization_id).await?;
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod identity;
pub mod jwt;
pub mod password;
pub mod resolver;
