//! Shared test helpers for `PostgreSQL` integration tests.

use std::sync::Arc;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use goodwill::identity::{
    adapters::postgres::PostgresProfileRepository,
    domain::{AccountId, Actor},
    services::{ProfileService, RegisterBenefactorRequest, RegisterCharityRequest},
};
use goodwill::task::{
    adapters::postgres::PostgresTaskRepository,
    domain::Task,
    services::{CreateTaskRequest, TaskLifecycleService},
};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use tokio::runtime::Runtime;

/// SQL creating the charity, benefactor, and task tables.
const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-10-18-000000_create_charities_benefactors_tasks/up.sql");

/// Template database name for the pre-migrated schema.
const TEMPLATE_DB: &str = "goodwill_test_template";

/// Connections per test database; more than one so transitions can contend.
const POOL_SIZE: u32 = 4;

/// Task service wired to `PostgreSQL` adapters.
pub type PgTaskService =
    TaskLifecycleService<PostgresTaskRepository, PostgresProfileRepository, DefaultClock>;

/// Profile service wired to `PostgreSQL` adapters.
pub type PgProfileService = ProfileService<PostgresProfileRepository, DefaultClock>;

/// Creates a tokio runtime for driving async services from sync tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be built.
pub fn test_runtime() -> eyre::Result<Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

/// Ensures the template database exists with the schema applied.
fn ensure_template(cluster: &TestCluster) -> eyre::Result<()> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(CREATE_SCHEMA_SQL)
                .map_err(|e| eyre::eyre!("schema setup failed: {e}"))?;
            Ok(())
        })
        .map_err(|e| eyre::eyre!("template setup failed: {e}"))
}

/// Database cloned from the migrated template, dropped with the value.
pub struct TestDatabase {
    cluster: &'static TestCluster,
    name: String,
}

impl TestDatabase {
    /// Creates a fresh database named after `label`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template or the database cannot be created.
    pub fn create(cluster: &'static TestCluster, label: &str) -> eyre::Result<Self> {
        ensure_template(cluster)?;
        let name = format!("test_{label}_{}", uuid::Uuid::new_v4().simple());
        cluster
            .create_database_from_template(name.as_str(), TEMPLATE_DB)
            .map_err(|e| eyre::eyre!("failed to create {name}: {e}"))?;
        Ok(Self { cluster, name })
    }

    /// Builds profile and task services over one shared connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot connect.
    pub fn platform(&self) -> eyre::Result<Platform> {
        let url = self.cluster.connection().database_url(&self.name);
        let pool = Pool::builder()
            .max_size(POOL_SIZE)
            .build(ConnectionManager::<PgConnection>::new(url))?;
        let profile_store = Arc::new(PostgresProfileRepository::new(pool.clone()));
        let clock = Arc::new(DefaultClock);
        Ok(Platform {
            profiles: ProfileService::new(Arc::clone(&profile_store), Arc::clone(&clock)),
            tasks: Arc::new(TaskLifecycleService::new(
                Arc::new(PostgresTaskRepository::new(pool)),
                profile_store,
                clock,
            )),
        })
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        drop(self.cluster.drop_database(self.name.as_str()));
    }
}

/// Profile and task services sharing one database.
pub struct Platform {
    pub profiles: PgProfileService,
    pub tasks: Arc<PgTaskService>,
}

impl Platform {
    /// Registers a charity on a fresh account and returns it as an actor.
    ///
    /// # Errors
    ///
    /// Returns an error if registration fails.
    pub async fn charity(&self, name: &str, registration_number: &str) -> eyre::Result<Actor> {
        let charity = self
            .profiles
            .register_charity(
                AccountId::new(),
                RegisterCharityRequest::new(name, registration_number),
            )
            .await?;
        Ok(Actor::for_charity(&charity))
    }

    /// Registers a benefactor on a fresh account and returns it as an actor.
    ///
    /// # Errors
    ///
    /// Returns an error if registration fails.
    pub async fn benefactor(&self) -> eyre::Result<Actor> {
        let benefactor = self
            .profiles
            .register_benefactor(AccountId::new(), RegisterBenefactorRequest::new())
            .await?;
        Ok(Actor::for_benefactor(&benefactor))
    }

    /// Posts a task built from `request` on behalf of `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if `owner` is not a charity or creation fails.
    pub async fn post(&self, owner: &Actor, request: CreateTaskRequest) -> eyre::Result<Task> {
        let charity = owner
            .charity_id()
            .ok_or_else(|| eyre::eyre!("{owner} is not acting as a charity"))?;
        Ok(self.tasks.create_task(owner, charity, request).await?)
    }
}
