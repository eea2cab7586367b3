//! Lifecycle events, the operations that fire them, and charity responses.

use super::{TaskDomainError, TaskState};
use crate::identity::domain::BenefactorId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Actor-facing operation on tasks, used for authorization and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskOperation {
    /// Post a new task for a charity.
    Create,
    /// Ask to perform a pending task.
    Request,
    /// Accept or reject a benefactor's request.
    Respond,
    /// Mark an assigned task as done.
    MarkDone,
}

impl TaskOperation {
    /// Returns a short human-readable description.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create tasks for this charity",
            Self::Request => "request tasks",
            Self::Respond => "respond to requests for this task",
            Self::MarkDone => "mark this task as done",
        }
    }
}

impl fmt::Display for TaskOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A charity's decision on a waiting request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharityResponse {
    /// The benefactor is assigned to the task.
    Accepted,
    /// The request is declined and the task reopens.
    Rejected,
}

impl TryFrom<&str> for CharityResponse {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "a" | "accept" | "accepted" => Ok(Self::Accepted),
            "r" | "reject" | "rejected" => Ok(Self::Rejected),
            _ => Err(TaskDomainError::InvalidResponse(value.to_owned())),
        }
    }
}

/// Event that drives a task from one lifecycle state to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum TaskEvent {
    /// A benefactor asked to perform the task.
    Request(BenefactorId),
    /// The owning charity accepted the pending request.
    Accept,
    /// The owning charity rejected the pending request.
    Reject,
    /// The owning charity confirmed the work is finished.
    MarkDone,
}

impl TaskEvent {
    /// Returns the event for a charity response.
    #[must_use]
    pub const fn from_response(response: CharityResponse) -> Self {
        match response {
            CharityResponse::Accepted => Self::Accept,
            CharityResponse::Rejected => Self::Reject,
        }
    }

    /// State the task must be in for the event to apply.
    #[must_use]
    pub const fn source_state(self) -> TaskState {
        match self {
            Self::Request(_) => TaskState::Pending,
            Self::Accept | Self::Reject => TaskState::Waiting,
            Self::MarkDone => TaskState::Assigned,
        }
    }

    /// State the task moves to once the event applies.
    #[must_use]
    pub const fn target_state(self) -> TaskState {
        match self {
            Self::Request(_) => TaskState::Waiting,
            Self::Accept => TaskState::Assigned,
            Self::Reject => TaskState::Pending,
            Self::MarkDone => TaskState::Done,
        }
    }

    /// Operation whose authorization gates the event.
    #[must_use]
    pub const fn operation(self) -> TaskOperation {
        match self {
            Self::Request(_) => TaskOperation::Request,
            Self::Accept | Self::Reject => TaskOperation::Respond,
            Self::MarkDone => TaskOperation::MarkDone,
        }
    }
}
