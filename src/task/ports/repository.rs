//! Repository port for task persistence, listing, and atomic transitions.

use crate::task::domain::{Task, TaskDomainError, TaskId, TaskQuery, TaskScope};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Change applied to a stored task inside the repository's atomic section.
///
/// The mutation sees the current stored task. Returning an error discards
/// every change it made.
pub type TaskMutation = Box<dyn FnOnce(&mut Task) -> Result<(), TaskDomainError> + Send>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns tasks inside `scope` that pass `query`, oldest first.
    async fn list(&self, scope: &TaskScope, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>>;

    /// Applies `mutation` to the stored task and persists the result.
    ///
    /// Reading the task, running the mutation, and writing the result form a
    /// single atomic unit per task: no concurrent `modify` on the same task
    /// can observe or overwrite an intermediate state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist, or [`TaskRepositoryError::Rejected`] when the mutation fails;
    /// the stored task is unchanged in both cases.
    async fn modify(&self, id: TaskId, mutation: TaskMutation) -> TaskRepositoryResult<Task>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The mutation refused to apply.
    #[error(transparent)]
    Rejected(TaskDomainError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<diesel::result::Error> for TaskRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}
