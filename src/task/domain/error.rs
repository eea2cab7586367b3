//! Error types for task domain validation, authorization, and transitions.

use super::{TaskId, TaskOperation, TaskState};
use crate::identity::domain::AccountId;
use thiserror::Error;

/// Errors returned while constructing task values or firing transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the storage limit.
    #[error("task title exceeds 60 character limit: {0}")]
    TitleTooLong(String),

    /// The lower age limit is above the upper age limit.
    #[error("invalid age limit: from {from} is greater than to {to}")]
    InvalidAgeLimit {
        /// Lower bound supplied.
        from: u8,
        /// Upper bound supplied.
        to: u8,
    },

    /// The gender limit is not a known value.
    #[error("unknown gender limit: {0}")]
    InvalidGenderLimit(String),

    /// The charity response is neither an acceptance nor a rejection.
    #[error("invalid response '{0}', expected \"A\" for accepted or \"R\" for rejected")]
    InvalidResponse(String),

    /// The filter key is not one of the permitted task fields.
    #[error("unknown task filter key: {0}")]
    UnknownFilterKey(String),

    /// The filter value cannot be parsed for its key.
    #[error("invalid value '{value}' for task filter '{key}'")]
    InvalidFilterValue {
        /// Filter key.
        key: String,
        /// Rejected value.
        value: String,
    },

    /// The acting account may not perform the operation.
    #[error("account {account} may not {operation}")]
    AccessDenied {
        /// Operation that was attempted.
        operation: TaskOperation,
        /// Account that attempted it.
        account: AccountId,
    },

    /// The task is not in the state the transition requires.
    #[error("task {task_id} is {actual}, expected {expected}")]
    StateConflict {
        /// Task the transition targeted.
        task_id: TaskId,
        /// State the transition requires.
        expected: TaskState,
        /// State the task was found in.
        actual: TaskState,
    },
}

impl TaskDomainError {
    /// Classifies the error for callers that map outcomes to responses.
    #[must_use]
    pub const fn kind(&self) -> TaskErrorKind {
        match self {
            Self::AccessDenied { .. } => TaskErrorKind::Forbidden,
            Self::StateConflict { .. } => TaskErrorKind::StateConflict,
            Self::EmptyTitle
            | Self::TitleTooLong(_)
            | Self::InvalidAgeLimit { .. }
            | Self::InvalidGenderLimit(_)
            | Self::InvalidResponse(_)
            | Self::UnknownFilterKey(_)
            | Self::InvalidFilterValue { .. } => TaskErrorKind::Validation,
        }
    }
}

/// Coarse outcome taxonomy of task operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskErrorKind {
    /// The referenced entity does not exist.
    NotFound,
    /// The authorization predicate failed.
    Forbidden,
    /// The state precondition of a transition failed.
    StateConflict,
    /// Input data is malformed.
    Validation,
    /// Storage failed.
    Persistence,
}

/// Error returned while parsing task states from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task state: {0}")]
pub struct ParseTaskStateError(pub String);
