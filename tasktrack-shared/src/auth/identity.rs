/// Request identity
///
/// Turns an `Authorization` header value into an [`AuthContext`]. The API's
/// middleware calls [`authenticate`] and stores the result in request
/// extensions; nothing downstream re-checks credentials.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::jwt::{validate_access_token, JwtError};
use crate::store::{Store, StoreError};

/// Authenticated caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    pub user_id: Uuid,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing credentials")]
    MissingCredentials,

    #[error("Invalid authorization header: {0}")]
    InvalidFormat(String),

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] JwtError),

    /// Token was valid but its user no longer exists
    #[error("Unknown user")]
    UnknownUser,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Extracts the token from a `Bearer <token>` header value
pub fn bearer_token(header: &str) -> Result<&str, AuthError> {
    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("expected 'Bearer <token>'".to_string()))?
        .trim();

    if token.is_empty() {
        return Err(AuthError::InvalidFormat("empty bearer token".to_string()));
    }
    Ok(token)
}

/// Validates a bearer header and confirms its user still exists
pub async fn authenticate(
    store: &dyn Store,
    secret: &str,
    header: Option<&str>,
) -> Result<AuthContext, AuthError> {
    let header = header.ok_or(AuthError::MissingCredentials)?;
    let claims = validate_access_token(bearer_token(header)?, secret)?;

    if store.find_user_by_id(claims.sub).await?.is_none() {
        return Err(AuthError::UnknownUser);
    }

    debug!(user_id = %claims.sub, "Authenticated request");
    Ok(AuthContext { user_id: claims.sub })
}
