/// Authentication endpoints
///
/// - `POST /api/auth/register`: create an account, returns tokens (201)
/// - `POST /api/auth/login`: exchange credentials for tokens
/// - `POST /api/auth/refresh`: exchange a refresh token for an access token
/// - `GET  /api/auth/me`: the authenticated user
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:5000/api/auth/register \
///   -H "Content-Type: application/json" \
///   -d '{"name":"Ada","email":"ada@example.com","password":"secret1"}'
/// ```

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
    extract::ApiJson,
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tasktrack_shared::{
    auth::{
        identity::AuthContext,
        jwt::{self, Claims},
        password,
    },
    models::user::{CreateUser, User},
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Valid email is required"))]
    pub email: String,

    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Valid email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Public view of a user
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Access token
    pub token: String,
    pub refresh_token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub token: String,
}

fn issue_tokens(state: &AppState, user: User) -> ApiResult<TokenResponse> {
    let secret = state.jwt_secret();
    let token = jwt::create_token(&Claims::access(user.id, state.config.jwt.access_ttl()), secret)?;
    let refresh_token = jwt::create_token(&Claims::refresh(user.id), secret)?;

    Ok(TokenResponse {
        token,
        refresh_token,
        user: user.into(),
    })
}

pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    req.validate()?;

    password::validate_password(&req.password).map_err(|message| {
        ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "password".to_string(),
            message,
        }])
    })?;

    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "name".to_string(),
            message: "Name is required".to_string(),
        }]));
    }

    if state.store.find_user_by_email(&req.email).await?.is_some() {
        return Err(ApiError::BadRequest("User already exists".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = state
        .store
        .create_user(CreateUser {
            name,
            email: req.email,
            password_hash,
        })
        .await
        .map_err(|e| {
            // lost a race with a concurrent registration for the same email
            if e.is_duplicate() {
                ApiError::BadRequest("User already exists".to_string())
            } else {
                e.into()
            }
        })?;

    info!(user_id = %user.id, "User registered");
    Ok((StatusCode::CREATED, Json(issue_tokens(&state, user)?)))
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    req.validate()?;

    let invalid = || ApiError::BadRequest("Invalid credentials".to_string());

    let user = state
        .store
        .find_user_by_email(&req.email)
        .await?
        .ok_or_else(invalid)?;

    if !password::verify_password(&req.password, &user.password_hash)? {
        tracing::warn!(user_id = %user.id, "Failed login attempt");
        return Err(invalid());
    }

    info!(user_id = %user.id, "User logged in");
    Ok(Json(issue_tokens(&state, user)?))
}

pub async fn refresh(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let token = jwt::refresh_access_token(
        &req.refresh_token,
        state.jwt_secret(),
        state.config.jwt.access_ttl(),
    )?;

    Ok(Json(RefreshResponse { token }))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .store
        .find_user_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}
