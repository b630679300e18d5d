/// Database layer: connection pooling and migrations
///
/// Queries themselves live with their models in [`crate::models`].

pub mod migrations;
pub mod pool;
