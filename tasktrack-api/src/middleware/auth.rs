/// Bearer token authentication
///
/// Applied to every route except health, register, login and refresh.
/// Validates the access token, confirms the user still exists and inserts an
/// [`AuthContext`] into request extensions for handlers to extract.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tasktrack_shared::auth::identity::{authenticate, AuthContext};

use crate::{app::AppState, error::ApiError};

pub async fn jwt_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let auth: AuthContext =
        authenticate(state.store.as_ref(), state.jwt_secret(), header_value).await?;

    req.extensions_mut().insert(auth);
    Ok(next.run(req).await)
}
