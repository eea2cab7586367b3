//! Visibility scopes and the closed set of task listing filters.

use super::{GenderLimit, Task, TaskDomainError, TaskState};
use crate::identity::domain::{Actor, BenefactorId, CharityId};
use std::fmt;
use uuid::Uuid;

/// Set of tasks an actor may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskScope {
    /// Tasks owned by the charity.
    Charity(CharityId),
    /// Pending tasks plus tasks assigned to the benefactor.
    Benefactor(BenefactorId),
    /// Pending tasks only.
    Open,
}

impl TaskScope {
    /// Returns the scope of tasks visible to `actor`.
    #[must_use]
    pub const fn for_actor(actor: &Actor) -> Self {
        match actor {
            Actor::Charity { charity, .. } => Self::Charity(*charity),
            Actor::Benefactor { benefactor, .. } => Self::Benefactor(*benefactor),
            Actor::Unaffiliated { .. } => Self::Open,
        }
    }

    /// Returns whether `task` falls inside the scope.
    #[must_use]
    pub fn includes(&self, task: &Task) -> bool {
        match self {
            Self::Charity(charity) => task.charity() == *charity,
            Self::Benefactor(benefactor) => {
                task.state() == TaskState::Pending || task.assignee() == Some(*benefactor)
            }
            Self::Open => task.state() == TaskState::Pending,
        }
    }
}

/// Task fields that listings may filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskField {
    /// Exact task title.
    Title,
    /// Lifecycle state.
    State,
    /// Owning charity identifier.
    Charity,
    /// Assigned benefactor identifier.
    Assignee,
    /// Volunteer gender restriction.
    GenderLimit,
}

impl TaskField {
    /// Returns the query key for the field.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::State => "state",
            Self::Charity => "charity",
            Self::Assignee => "assignee",
            Self::GenderLimit => "gender_limit",
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl TryFrom<&str> for TaskField {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "title" => Ok(Self::Title),
            "state" => Ok(Self::State),
            "charity" => Ok(Self::Charity),
            "assignee" => Ok(Self::Assignee),
            "gender_limit" => Ok(Self::GenderLimit),
            _ => Err(TaskDomainError::UnknownFilterKey(value.to_owned())),
        }
    }
}

/// A typed equality predicate on one [`TaskField`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFilter {
    /// Title equals the value.
    Title(String),
    /// State equals the value.
    State(TaskState),
    /// Owning charity equals the value.
    Charity(CharityId),
    /// Assignee equals the value.
    Assignee(BenefactorId),
    /// Gender restriction equals the value.
    GenderLimit(GenderLimit),
}

impl TaskFilter {
    /// Parses a raw `key=value` pair into a typed filter.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnknownFilterKey`] for keys outside
    /// [`TaskField`], or [`TaskDomainError::InvalidFilterValue`] when the
    /// value does not parse for its field.
    pub fn parse(key: &str, value: &str) -> Result<Self, TaskDomainError> {
        let field = TaskField::try_from(key)?;
        let invalid = || TaskDomainError::InvalidFilterValue {
            key: key.to_owned(),
            value: value.to_owned(),
        };
        let filter = match field {
            TaskField::Title => Self::Title(value.trim().to_owned()),
            TaskField::State => Self::State(TaskState::try_from(value).map_err(|_| invalid())?),
            TaskField::Charity => Self::Charity(CharityId::from_uuid(
                Uuid::parse_str(value.trim()).map_err(|_| invalid())?,
            )),
            TaskField::Assignee => Self::Assignee(BenefactorId::from_uuid(
                Uuid::parse_str(value.trim()).map_err(|_| invalid())?,
            )),
            TaskField::GenderLimit => {
                Self::GenderLimit(GenderLimit::try_from(value).map_err(|_| invalid())?)
            }
        };
        Ok(filter)
    }

    /// Returns the field the filter applies to.
    #[must_use]
    pub const fn field(&self) -> TaskField {
        match self {
            Self::Title(_) => TaskField::Title,
            Self::State(_) => TaskField::State,
            Self::Charity(_) => TaskField::Charity,
            Self::Assignee(_) => TaskField::Assignee,
            Self::GenderLimit(_) => TaskField::GenderLimit,
        }
    }

    /// Returns whether `task` has the filtered value.
    ///
    /// An unset optional field never matches.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::Title(title) => task.details().title().as_str() == title,
            Self::State(state) => task.state() == *state,
            Self::Charity(charity) => task.charity() == *charity,
            Self::Assignee(benefactor) => task.assignee() == Some(*benefactor),
            Self::GenderLimit(limit) => task.details().gender_limit() == Some(*limit),
        }
    }
}

/// Validated filter and exclude predicates for a task listing.
///
/// A task is kept when it matches every filter and none of the excludes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    filters: Vec<TaskFilter>,
    excludes: Vec<TaskFilter>,
}

impl TaskQuery {
    /// Creates a query that keeps every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a query from raw key/value pairs.
    ///
    /// Pairs with a blank value are ignored, as an absent query parameter
    /// would be.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaskDomainError`] raised while parsing a pair.
    pub fn from_pairs<'a, F, E>(filters: F, excludes: E) -> Result<Self, TaskDomainError>
    where
        F: IntoIterator<Item = (&'a str, &'a str)>,
        E: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Ok(Self {
            filters: parse_pairs(filters)?,
            excludes: parse_pairs(excludes)?,
        })
    }

    /// Adds a filter the task must match.
    #[must_use]
    pub fn with_filter(mut self, filter: TaskFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Adds an exclude the task must not match.
    #[must_use]
    pub fn with_exclude(mut self, exclude: TaskFilter) -> Self {
        self.excludes.push(exclude);
        self
    }

    /// Returns the filters.
    #[must_use]
    pub fn filters(&self) -> &[TaskFilter] {
        &self.filters
    }

    /// Returns the excludes.
    #[must_use]
    pub fn excludes(&self) -> &[TaskFilter] {
        &self.excludes
    }

    /// Returns whether `task` passes the query.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.filters.iter().all(|filter| filter.matches(task))
            && !self.excludes.iter().any(|exclude| exclude.matches(task))
    }
}

fn parse_pairs<'a>(
    pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Result<Vec<TaskFilter>, TaskDomainError> {
    let mut parsed = Vec::new();
    for (key, value) in pairs {
        TaskField::try_from(key)?;
        if !value.trim().is_empty() {
            parsed.push(TaskFilter::parse(key, value)?);
        }
    }
    Ok(parsed)
}
