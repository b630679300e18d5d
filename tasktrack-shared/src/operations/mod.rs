/// Resource operations
///
/// Each organization-scoped operation runs the same steps in the same order:
///
/// 1. Find the organization: given directly, or resolved from a project or
///    task ([`crate::auth::resolver`])
/// 2. Check membership ([`crate::auth::authorization::authorize`])
/// 3. Read or write storage
/// 4. After a successful write, append an activity
///    ([`crate::recorder::ActivityRecorder`]) with the `OrgAccess` from step 2
///
/// Nothing touches storage for a resource before step 2 has passed. The
/// operations take the caller's user ID as an already-authenticated identity
/// and the store as an explicit parameter.
///
/// # Example
///
/// ```no_run
/// use tasktrack_shared::operations::{organizations, projects, OperationError};
/// use tasktrack_shared::store::MemoryStore;
/// use uuid::Uuid;
///
/// # async fn example(user_id: Uuid) -> Result<(), OperationError> {
/// let store = MemoryStore::new();
/// let org = organizations::create_organization(&store, user_id, "Acme").await?;
/// let project = projects::create_project(
///     &store,
///     user_id,
///     projects::NewProject {
///         name: "Launch".to_string(),
///         description: None,
///         organization_id: org.id,
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod activities;
pub mod organizations;
pub mod projects;
pub mod tasks;

use uuid::Uuid;

use crate::auth::authorization::AuthzError;
use crate::auth::resolver::ResolveError;
use crate::store::StoreError;

/// Failures an operation reports to its caller
#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    /// Authenticated, but not a member of the organization
    #[error("Not a member of this organization")]
    NotAMember { organization_id: Uuid },

    /// Referenced organization, project or task does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Join attempted by an existing member
    #[error("Already a member of this organization")]
    AlreadyMember { organization_id: Uuid },

    /// Malformed identifier or missing required field
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl From<AuthzError> for OperationError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::NotAMember { organization_id } => {
                OperationError::NotAMember { organization_id }
            }
            AuthzError::Store(e) => OperationError::Storage(e),
        }
    }
}

impl From<ResolveError> for OperationError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::ProjectNotFound(_) => OperationError::NotFound("Project".to_string()),
            ResolveError::TaskNotFound(_) => OperationError::NotFound("Task".to_string()),
            ResolveError::Store(e) => OperationError::Storage(e),
        }
    }
}

pub type OperationResult<T> = Result<T, OperationError>;

/// Trims a required text field, rejecting it if nothing is left
pub(crate) fn required(field: &str, value: &str) -> OperationResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(OperationError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Drops blank optional text
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert_eq!(required("Name", "  Acme ").unwrap(), "Acme");
        assert!(matches!(
            required("Name", "   "),
            Err(OperationError::Validation(msg)) if msg == "Name is required"
        ));
    }

    #[test]
    fn test_optional() {
        assert_eq!(optional(Some(" x ".to_string())), Some("x".to_string()));
        assert_eq!(optional(Some("  ".to_string())), None);
        assert_eq!(optional(None), None);
    }

    #[test]
    fn test_resolve_errors_map_to_not_found() {
        let err: OperationError = ResolveError::TaskNotFound(Uuid::new_v4()).into();
        assert_eq!(err.to_string(), "Task not found");
    }
}
