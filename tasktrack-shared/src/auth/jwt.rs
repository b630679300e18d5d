/// JWT issuance and validation
///
/// Tokens are HS256-signed with the server secret and carry only the user ID;
/// organization access is never encoded in a token, it is looked up per
/// request by the guard in [`crate::auth::authorization`].
///
/// Two token types exist:
/// - **Access**: sent as `Authorization: Bearer <token>`; lifetime is
///   configurable (7 days by default)
/// - **Refresh**: 30 days; only accepted by the refresh endpoint
///
/// # Example
///
/// ```
/// use chrono::Duration;
/// use tasktrack_shared::auth::jwt::{create_token, validate_access_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "a-secret-of-at-least-thirty-two-bytes!";
/// let user_id = Uuid::new_v4();
///
/// let token = create_token(&Claims::access(user_id, Duration::hours(1)), secret)?;
/// let claims = validate_access_token(&token, secret)?;
/// assert_eq!(claims.sub, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Value of the `iss` claim on every token this service issues
pub const ISSUER: &str = "tasktrack";

/// Default access token lifetime
pub const DEFAULT_ACCESS_TTL_HOURS: i64 = 168;

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Failed to create token: {0}")]
    Create(String),

    #[error("Invalid token: {0}")]
    Invalid(String),

    #[error("Token has expired")]
    Expired,

    #[error("Wrong token type: expected {expected}")]
    WrongType { expected: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,

    /// Always [`ISSUER`]
    pub iss: String,

    /// Issued at (Unix seconds)
    pub iat: i64,

    /// Expiration (Unix seconds)
    pub exp: i64,

    /// Not before (Unix seconds)
    pub nbf: i64,

    pub token_type: TokenType,
}

impl Claims {
    fn build(user_id: Uuid, token_type: TokenType, expires_in: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
            nbf: now.timestamp(),
            token_type,
        }
    }

    /// Access token claims valid for `expires_in`
    pub fn access(user_id: Uuid, expires_in: Duration) -> Self {
        Self::build(user_id, TokenType::Access, expires_in)
    }

    /// Refresh token claims valid for 30 days
    pub fn refresh(user_id: Uuid) -> Self {
        Self::build(user_id, TokenType::Refresh, Duration::days(30))
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Signs claims with HS256
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::Create(e.to_string()))
}

/// Verifies signature, issuer, `exp` and `nbf`
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_nbf = true;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::Invalid(e.to_string()),
    })?;

    Ok(data.claims)
}

fn validate_typed(token: &str, secret: &str, expected: TokenType) -> Result<Claims, JwtError> {
    let claims = validate_token(token, secret)?;

    if claims.token_type != expected {
        return Err(JwtError::WrongType {
            expected: expected.as_str(),
        });
    }

    Ok(claims)
}

/// Validates a token and requires it to be an access token
pub fn validate_access_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    validate_typed(token, secret, TokenType::Access)
}

/// Validates a token and requires it to be a refresh token
pub fn validate_refresh_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    validate_typed(token, secret, TokenType::Refresh)
}

/// Exchanges a refresh token for a new access token for the same user
pub fn refresh_access_token(
    refresh_token: &str,
    secret: &str,
    access_ttl: Duration,
) -> Result<String, JwtError> {
    let claims = validate_refresh_token(refresh_token, secret)?;
    create_token(&Claims::access(claims.sub, access_ttl), secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_access_claims() {
        let user_id = Uuid::new_v4();
        let claims = Claims::access(user_id, Duration::hours(1));

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_round_trip() {
        let user_id = Uuid::new_v4();
        let token = create_token(&Claims::access(user_id, Duration::hours(1)), SECRET).unwrap();

        let claims = validate_access_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, user_id);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token(&Claims::access(Uuid::new_v4(), Duration::hours(1)), SECRET).unwrap();

        assert!(matches!(
            validate_token(&token, "another-secret-key-at-least-32-bytes"),
            Err(JwtError::Invalid(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = Claims::access(Uuid::new_v4(), Duration::hours(-1));
        let token = create_token(&claims, SECRET).unwrap();

        assert!(matches!(validate_token(&token, SECRET), Err(JwtError::Expired)));
    }

    #[test]
    fn test_token_types_not_interchangeable() {
        let user_id = Uuid::new_v4();
        let refresh = create_token(&Claims::refresh(user_id), SECRET).unwrap();
        let access = create_token(&Claims::access(user_id, Duration::hours(1)), SECRET).unwrap();

        assert!(matches!(
            validate_access_token(&refresh, SECRET),
            Err(JwtError::WrongType { expected: "access" })
        ));
        assert!(matches!(
            validate_refresh_token(&access, SECRET),
            Err(JwtError::WrongType { expected: "refresh" })
        ));
    }

    #[test]
    fn test_refresh_issues_access_token() {
        let user_id = Uuid::new_v4();
        let refresh = create_token(&Claims::refresh(user_id), SECRET).unwrap();

        let access = refresh_access_token(&refresh, SECRET, Duration::hours(2)).unwrap();
        let claims = validate_access_token(&access, SECRET).unwrap();
        assert_eq!(claims.sub, user_id);
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(validate_token("not.a.jwt", SECRET).is_err());
        assert!(validate_token("", SECRET).is_err());
    }
}
