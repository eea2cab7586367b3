//! Diesel row models for profile persistence.

use super::schema::{benefactors, charities};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row model for charity records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = charities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CharityRow {
    /// Charity identifier.
    pub id: uuid::Uuid,
    /// Owning account identifier.
    pub account_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Unique registration number.
    pub registration_number: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Row model for benefactor records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = benefactors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BenefactorRow {
    /// Benefactor identifier.
    pub id: uuid::Uuid,
    /// Owning account identifier.
    pub account_id: uuid::Uuid,
    /// Experience tier.
    pub experience: i16,
    /// Weekly free time in hours.
    pub free_time_per_week: i16,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
