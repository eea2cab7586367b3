//! Shared world state for task assignment BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use goodwill::identity::{
    adapters::memory::InMemoryProfileRepository, domain::Actor, services::ProfileService,
};
use goodwill::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{TaskLifecycleError, TaskLifecycleService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Task service type used by the BDD world.
pub type TestTaskService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryProfileRepository, DefaultClock>;

/// Profile service type used by the BDD world.
pub type TestProfileService = ProfileService<InMemoryProfileRepository, DefaultClock>;

/// Scenario world for task assignment behaviour tests.
pub struct TaskAssignmentWorld {
    pub profiles: TestProfileService,
    pub tasks: TestTaskService,
    pub charity: Option<Actor>,
    pub benefactors: HashMap<String, Actor>,
    pub task: Option<Task>,
    pub last_result: Option<Result<Task, TaskLifecycleError>>,
}

impl TaskAssignmentWorld {
    /// Creates a world over empty in-memory repositories.
    #[must_use]
    pub fn new() -> Self {
        let profile_store = Arc::new(InMemoryProfileRepository::new());
        let clock = Arc::new(DefaultClock);
        Self {
            profiles: ProfileService::new(Arc::clone(&profile_store), Arc::clone(&clock)),
            tasks: TaskLifecycleService::new(
                Arc::new(InMemoryTaskRepository::new()),
                profile_store,
                clock,
            ),
            charity: None,
            benefactors: HashMap::new(),
            task: None,
            last_result: None,
        }
    }

    /// Returns the charity actor registered by a given step.
    ///
    /// # Errors
    ///
    /// Returns an error when no charity has been registered.
    pub fn charity(&self) -> Result<Actor, eyre::Report> {
        self.charity
            .ok_or_else(|| eyre::eyre!("missing charity in scenario world"))
    }

    /// Returns the benefactor actor registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error when no benefactor has that name.
    pub fn benefactor(&self, name: &str) -> Result<Actor, eyre::Report> {
        self.benefactors
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown benefactor {name} in scenario world"))
    }

    /// Returns the posted task as last observed.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been posted.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing posted task in scenario world"))
    }

    /// Records an operation result, tracking the task when it succeeded.
    pub fn record(&mut self, result: Result<Task, TaskLifecycleError>) {
        if let Ok(ref updated) = result {
            self.task = Some(updated.clone());
        }
        self.last_result = Some(result);
    }
}

impl Default for TaskAssignmentWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskAssignmentWorld {
    TaskAssignmentWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
