//! Service layer for task creation, lookup, listing, and lifecycle
//! transitions.

use crate::identity::{
    domain::{Actor, CharityId},
    ports::{ProfileRepository, ProfileRepositoryError},
};
use crate::task::{
    domain::{
        AgeLimit, CharityResponse, GenderLimit, Task, TaskDetails, TaskDomainError,
        TaskErrorKind, TaskId, TaskOperation, TaskQuery, TaskScope, TaskTitle,
        policy::can_create_task,
    },
    ports::{TaskMutation, TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for posting a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    date: Option<NaiveDate>,
    age_from: Option<u8>,
    age_to: Option<u8>,
    gender_limit: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            date: None,
            age_from: None,
            age_to: None,
            gender_limit: None,
        }
    }

    /// Sets the free-form description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the date the task takes place.
    #[must_use]
    pub const fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the volunteer age bounds; either side may be open.
    #[must_use]
    pub const fn with_age_limit(mut self, from: Option<u8>, to: Option<u8>) -> Self {
        self.age_from = from;
        self.age_to = to;
        self
    }

    /// Sets the volunteer gender restriction (`male` or `female`).
    #[must_use]
    pub fn with_gender_limit(mut self, gender_limit: impl Into<String>) -> Self {
        self.gender_limit = Some(gender_limit.into());
        self
    }

    fn into_details(self) -> Result<TaskDetails, TaskDomainError> {
        let mut details = TaskDetails::new(TaskTitle::new(self.title)?)
            .with_age_limit(AgeLimit::new(self.age_from, self.age_to)?);
        if let Some(description) = self.description {
            details = details.with_description(description);
        }
        if let Some(date) = self.date {
            details = details.with_date(date);
        }
        if let Some(gender_limit) = self.gender_limit {
            details = details.with_gender_limit(GenderLimit::try_from(gender_limit.as_str())?);
        }
        Ok(details)
    }
}

/// Raw listing filters as received from a caller.
///
/// Keys and values are validated when the listing runs. A pair with a known
/// key and a blank value is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListRequest {
    filters: Vec<(String, String)>,
    excludes: Vec<(String, String)>,
}

impl TaskListRequest {
    /// Creates an unfiltered listing request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps only tasks whose `key` field equals `value`.
    #[must_use]
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Drops tasks whose `key` field equals `value`.
    #[must_use]
    pub fn with_exclude(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.excludes.push((key.into(), value.into()));
        self
    }

    fn to_query(&self) -> Result<TaskQuery, TaskDomainError> {
        TaskQuery::from_pairs(
            self.filters.iter().map(|(key, value)| (key.as_str(), value.as_str())),
            self.excludes.iter().map(|(key, value)| (key.as_str(), value.as_str())),
        )
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Validation, authorization, or a state guard failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task storage failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
    /// Charity profile lookup failed.
    #[error(transparent)]
    Profile(#[from] ProfileRepositoryError),
}

impl TaskLifecycleError {
    /// Classifies the error for callers that map outcomes to responses.
    #[must_use]
    pub const fn kind(&self) -> TaskErrorKind {
        match self {
            Self::NotFound(_) => TaskErrorKind::NotFound,
            Self::Domain(err) => err.kind(),
            Self::Repository(_) | Self::Profile(_) => TaskErrorKind::Persistence,
        }
    }

    /// Returns `true` when repeating the operation against fresh state may
    /// succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self.kind(), TaskErrorKind::StateConflict)
    }
}

impl From<TaskRepositoryError> for TaskLifecycleError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            TaskRepositoryError::Rejected(domain) => Self::Domain(domain),
            other => Self::Repository(other),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, P, C>
where
    R: TaskRepository,
    P: ProfileRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    profiles: Arc<P>,
    clock: Arc<C>,
}

impl<R, P, C> TaskLifecycleService<R, P, C>
where
    R: TaskRepository,
    P: ProfileRepository,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, profiles: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            repository,
            profiles,
            clock,
        }
    }

    /// Posts a new pending task for `charity`.
    ///
    /// Ownership is checked before the task fields are validated.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AccessDenied`] when the charity does not
    /// exist or the actor does not own it, a validation error for malformed
    /// fields, or a repository error when persistence fails.
    pub async fn create_task(
        &self,
        actor: &Actor,
        charity: CharityId,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let owner = self.profiles.find_charity(charity).await?;
        if !owner.is_some_and(|profile| can_create_task(actor, &profile)) {
            debug!(%charity, %actor, "task creation denied");
            return Err(TaskDomainError::AccessDenied {
                operation: TaskOperation::Create,
                account: actor.account(),
            }
            .into());
        }

        let task = Task::new(charity, request.into_details()?, &*self.clock);
        if let Err(err) = self.repository.store(&task).await {
            warn!(task_id = %task.id(), error = %err, "failed to store task");
            return Err(err.into());
        }
        info!(task_id = %task.id(), %charity, "task created");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist,
    /// or [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn find_by_id(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))
    }

    /// Lists the tasks visible to `actor` that pass the request's filters,
    /// oldest first.
    ///
    /// An actor whose claimed profile does not belong to its account sees
    /// only the open tasks an unaffiliated account would see.
    ///
    /// # Errors
    ///
    /// Returns a validation error for unknown filter keys or unparsable
    /// values before querying, or a repository error when the query fails.
    pub async fn list_for_actor(
        &self,
        actor: &Actor,
        request: &TaskListRequest,
    ) -> TaskLifecycleResult<Vec<Task>> {
        let query = request.to_query()?;
        let scope = if self.is_genuine(actor).await? {
            TaskScope::for_actor(actor)
        } else {
            TaskScope::Open
        };
        let tasks = self.repository.list(&scope, &query).await.map_err(|err| {
            warn!(%actor, error = %err, "task listing failed");
            TaskLifecycleError::from(err)
        })?;
        debug!(%actor, count = tasks.len(), "tasks listed");
        Ok(tasks)
    }

    /// Records a benefactor's request to perform a pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`], a `Forbidden` domain error
    /// when the actor is not a benefactor, or a `StateConflict` domain error
    /// when the task is not pending.
    pub async fn request_task(&self, actor: &Actor, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.transition(actor, task_id, TaskOperation::Request, |task, acting, clock| {
            task.request(acting, clock)
        })
        .await
    }

    /// Accepts or rejects the benefactor waiting on a task.
    ///
    /// `response` is `A`/`accept`/`accepted` or `R`/`reject`/`rejected`,
    /// case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidResponse`] for any other response,
    /// [`TaskLifecycleError::NotFound`], a `Forbidden` domain error when the
    /// actor does not own the task's charity, or a `StateConflict` domain
    /// error when the task is not waiting.
    pub async fn respond_to_request(
        &self,
        actor: &Actor,
        task_id: TaskId,
        response: &str,
    ) -> TaskLifecycleResult<Task> {
        let decision = CharityResponse::try_from(response)?;
        self.transition(actor, task_id, TaskOperation::Respond, move |task, acting, clock| {
            task.respond(acting, decision, clock)
        })
        .await
    }

    /// Marks an assigned task as done.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`], a `Forbidden` domain error
    /// when the actor does not own the task's charity, or a `StateConflict`
    /// domain error when the task is not assigned.
    pub async fn mark_done(&self, actor: &Actor, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.transition(actor, task_id, TaskOperation::MarkDone, |task, acting, clock| {
            task.mark_done(acting, clock)
        })
        .await
    }

    async fn transition<F>(
        &self,
        actor: &Actor,
        task_id: TaskId,
        operation: TaskOperation,
        apply: F,
    ) -> TaskLifecycleResult<Task>
    where
        F: FnOnce(&mut Task, &Actor, &C) -> Result<(), TaskDomainError> + Send + 'static,
    {
        let genuine = self.is_genuine(actor).await?;
        let acting = *actor;
        let clock = Arc::clone(&self.clock);
        let mutation: TaskMutation = Box::new(move |task| {
            if !genuine {
                return Err(TaskDomainError::AccessDenied {
                    operation,
                    account: acting.account(),
                });
            }
            apply(task, &acting, clock.as_ref())
        });

        match self.repository.modify(task_id, mutation).await {
            Ok(task) => {
                info!(%task_id, %operation, state = %task.state(), "task transitioned");
                Ok(task)
            }
            Err(err) => {
                let failure = TaskLifecycleError::from(err);
                if failure.kind() == TaskErrorKind::Persistence {
                    warn!(%task_id, %operation, error = %failure, "task transition failed");
                } else {
                    debug!(%task_id, %operation, %actor, error = %failure, "task transition rejected");
                }
                Err(failure)
            }
        }
    }

    /// Confirms that the profile an actor claims is owned by its account.
    async fn is_genuine(&self, actor: &Actor) -> TaskLifecycleResult<bool> {
        let genuine = match *actor {
            Actor::Charity { account, charity } => self
                .profiles
                .find_charity(charity)
                .await?
                .is_some_and(|profile| profile.account() == account),
            Actor::Benefactor {
                account,
                benefactor,
            } => self
                .profiles
                .find_benefactor(benefactor)
                .await?
                .is_some_and(|profile| profile.account() == account),
            Actor::Unaffiliated { .. } => true,
        };
        if !genuine {
            debug!(%actor, "actor does not match the stored profile");
        }
        Ok(genuine)
    }
}
