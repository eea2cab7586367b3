//! Domain model for the task lifecycle.
//!
//! A task is owned by one charity and moves through
//! `pending -> waiting -> assigned -> done`, with `waiting -> pending` when
//! the charity rejects a benefactor's request. Every transition is gated by
//! an authorization predicate from [`policy`] before the state guard runs.

mod details;
mod error;
mod event;
mod ids;
pub mod policy;
mod query;
mod task;

pub use details::{AgeLimit, GenderLimit, TaskDetails, TaskTitle};
pub use error::{ParseTaskStateError, TaskDomainError, TaskErrorKind};
pub use event::{CharityResponse, TaskEvent, TaskOperation};
pub use ids::TaskId;
pub use query::{TaskField, TaskFilter, TaskQuery, TaskScope};
pub use task::{PersistedTaskData, Task, TaskState};
