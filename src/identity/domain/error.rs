//! Error types for identity domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The charity name is empty after trimming.
    #[error("charity name must not be empty")]
    EmptyCharityName,

    /// The charity name exceeds the storage limit.
    #[error("charity name exceeds 50 character limit: {0}")]
    CharityNameTooLong(String),

    /// The registration number is empty, too long, or contains whitespace.
    #[error("invalid registration number '{0}', expected 1-10 non-whitespace characters")]
    InvalidRegistrationNumber(String),

    /// The experience level is not one of the known tiers.
    #[error(transparent)]
    InvalidExperience(#[from] ParseExperienceLevelError),

    /// The weekly free time exceeds the hours in a week.
    #[error("free time per week must be at most 168 hours, got {0}")]
    InvalidWeeklyHours(u16),
}

/// Error returned while parsing an experience level.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown experience level: {0}")]
pub struct ParseExperienceLevelError(pub String);

/// Error returned while parsing an actor role.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown actor role: {0}")]
pub struct ParseActorRoleError(pub String);
