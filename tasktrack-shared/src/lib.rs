//! # TaskTrack Shared Library
//!
//! Data model, storage and the multi-tenant access layer used by the TaskTrack
//! API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their SQL
//! - `store`: The `Store` capability with PostgreSQL and in-memory backends
//! - `auth`: Passwords, JWTs, request identity, the membership guard and the
//!   project/task → organization resolver
//! - `recorder`: Best-effort activity feed writer
//! - `operations`: Organization, project, task and activity operations
//! - `db`: Connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;
pub mod operations;
pub mod recorder;
pub mod store;

/// Current version of the TaskTrack shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
