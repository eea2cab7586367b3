//! Task aggregate root and its lifecycle state machine.

use super::{
    CharityResponse, ParseTaskStateError, TaskDetails, TaskDomainError, TaskEvent, TaskId,
    TaskOperation, policy,
};
use crate::identity::domain::{Actor, BenefactorId, CharityId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// Task is open for benefactor requests.
    Pending,
    /// A benefactor has requested the task and awaits the charity's response.
    Waiting,
    /// The charity accepted the benefactor's request.
    Assigned,
    /// The work is finished.
    Done,
}

impl TaskState {
    /// Every lifecycle state, in lifecycle order.
    pub const ALL: [Self; 4] = [Self::Pending, Self::Waiting, Self::Assigned, Self::Done];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Waiting => "waiting",
            Self::Assigned => "assigned",
            Self::Done => "done",
        }
    }

    /// Returns whether the lifecycle graph has an edge from `self` to `target`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Waiting)
                | (Self::Waiting, Self::Assigned | Self::Pending)
                | (Self::Assigned, Self::Done)
        )
    }

    /// Returns whether no transition leaves this state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns whether a task in this state carries an assignee.
    #[must_use]
    pub const fn has_assignee(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskState {
    type Error = ParseTaskStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "waiting" => Ok(Self::Waiting),
            "assigned" => Ok(Self::Assigned),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStateError(value.to_owned())),
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    charity: CharityId,
    assignee: Option<BenefactorId>,
    state: TaskState,
    details: TaskDetails,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning charity.
    pub charity: CharityId,
    /// Persisted assignee, if any.
    pub assignee: Option<BenefactorId>,
    /// Persisted lifecycle state.
    pub state: TaskState,
    /// Persisted descriptive fields.
    pub details: TaskDetails,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a pending, unassigned task owned by `charity`.
    #[must_use]
    pub fn new(charity: CharityId, details: TaskDetails, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            charity,
            assignee: None,
            state: TaskState::Pending,
            details,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            charity: data.charity,
            assignee: data.assignee,
            state: data.state,
            details: data.details,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning charity.
    #[must_use]
    pub const fn charity(&self) -> CharityId {
        self.charity
    }

    /// Returns the requesting or assigned benefactor, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<BenefactorId> {
        self.assignee
    }

    /// Returns the task lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        self.state
    }

    /// Returns the descriptive fields.
    #[must_use]
    pub const fn details(&self) -> &TaskDetails {
        &self.details
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Records a benefactor's request to perform the task.
    ///
    /// Moves `pending -> waiting` and records the actor's benefactor profile
    /// as assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AccessDenied`] when the actor is not a
    /// benefactor, or [`TaskDomainError::StateConflict`] when the task is not
    /// pending. Authorization is checked first; the task is left unchanged
    /// on error.
    pub fn request(&mut self, actor: &Actor, clock: &impl Clock) -> Result<(), TaskDomainError> {
        let benefactor = actor
            .benefactor_id()
            .ok_or_else(|| access_denied(actor, TaskOperation::Request))?;
        self.apply(actor, TaskEvent::Request(benefactor), clock)
    }

    /// Applies the owning charity's response to a waiting request.
    ///
    /// Acceptance moves `waiting -> assigned` and keeps the assignee;
    /// rejection moves `waiting -> pending` and clears it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AccessDenied`] when the actor does not own
    /// the task's charity, or [`TaskDomainError::StateConflict`] when the
    /// task is not waiting.
    pub fn respond(
        &mut self,
        actor: &Actor,
        response: CharityResponse,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.apply(actor, TaskEvent::from_response(response), clock)
    }

    /// Marks an assigned task as done.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AccessDenied`] when the actor does not own
    /// the task's charity, or [`TaskDomainError::StateConflict`] when the
    /// task is not assigned.
    pub fn mark_done(&mut self, actor: &Actor, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.apply(actor, TaskEvent::MarkDone, clock)
    }

    /// Authorizes `actor` for the event, then fires it.
    fn apply(
        &mut self,
        actor: &Actor,
        event: TaskEvent,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !policy::permits(actor, self, event) {
            return Err(access_denied(actor, event.operation()));
        }
        self.fire(event, clock)
    }

    /// Checks the state guard and applies the event's effect.
    fn fire(&mut self, event: TaskEvent, clock: &impl Clock) -> Result<(), TaskDomainError> {
        let expected = event.source_state();
        if self.state != expected {
            return Err(TaskDomainError::StateConflict {
                task_id: self.id,
                expected,
                actual: self.state,
            });
        }

        match event {
            TaskEvent::Request(benefactor) => self.assignee = Some(benefactor),
            TaskEvent::Reject => self.assignee = None,
            TaskEvent::Accept | TaskEvent::MarkDone => {}
        }
        self.state = event.target_state();
        self.touch(clock);
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

const fn access_denied(actor: &Actor, operation: TaskOperation) -> TaskDomainError {
    TaskDomainError::AccessDenied {
        operation,
        account: actor.account(),
    }
}
