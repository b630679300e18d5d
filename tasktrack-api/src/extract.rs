/// Request extractors whose rejections are [`ApiError`]s
///
/// axum's own `Json` and `Path` reject with plain-text bodies (and 422 for
/// a body that parses but does not fit the target type). These wrappers
/// route those rejections through `ApiError`, so every failure a client
/// sees is a 400 with the usual JSON error body.

use crate::error::ApiError;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
