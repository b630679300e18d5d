/// HTTP route handlers
///
/// Handlers extract the request, call into `tasktrack_shared::operations`
/// and shape the response. Membership checks happen inside the operations,
/// not here.

pub mod activities;
pub mod auth;
pub mod health;
pub mod organizations;
pub mod projects;
pub mod tasks;
