//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Row model for task records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning charity identifier.
    pub charity_id: uuid::Uuid,
    /// Requesting or assigned benefactor identifier.
    pub assignee_id: Option<uuid::Uuid>,
    /// Lifecycle state.
    pub state: String,
    /// Task title.
    pub title: String,
    /// Volunteer gender restriction.
    pub gender_limit: Option<String>,
    /// Descriptive task fields as JSON.
    pub details: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset written by lifecycle transitions.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskTransitionChangeset {
    /// New assignee; `None` clears the column.
    pub assignee_id: Option<uuid::Uuid>,
    /// New lifecycle state.
    pub state: String,
    /// New update timestamp.
    pub updated_at: DateTime<Utc>,
}
