//! `PostgreSQL` adapters for profile persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresProfileRepository, ProfilePgPool};
