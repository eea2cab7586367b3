//! `PostgreSQL` repository implementation for task lifecycle storage.

use super::{
    models::{TaskRow, TaskTransitionChangeset},
    schema::tasks,
};
use crate::identity::domain::{BenefactorId, CharityId};
use crate::task::{
    domain::{PersistedTaskData, Task, TaskDetails, TaskFilter, TaskId, TaskQuery, TaskScope, TaskState},
    ports::{TaskMutation, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

type BoxedTaskQuery = tasks::BoxedQuery<'static, Pg>;

/// `PostgreSQL`-backed task repository.
///
/// Transitions lock the task row with `SELECT ... FOR UPDATE` for the
/// duration of the mutation.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = task_to_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self, scope: &TaskScope, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        let visible = *scope;
        let criteria = query.clone();
        self.run_blocking(move |connection| {
            let mut statement = scoped(visible);
            for filter in criteria.filters() {
                statement = keep_matching(statement, filter);
            }
            for exclude in criteria.excludes() {
                statement = drop_matching(statement, exclude);
            }
            let rows = statement
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn modify(&self, id: TaskId, mutation: TaskMutation) -> TaskRepositoryResult<Task> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx_conn| {
                let row = tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .select(TaskRow::as_select())
                    .for_update()
                    .first::<TaskRow>(tx_conn)
                    .optional()?
                    .ok_or(TaskRepositoryError::NotFound(id))?;

                let mut task = row_to_task(row)?;
                mutation(&mut task).map_err(TaskRepositoryError::Rejected)?;

                diesel::update(tasks::table.filter(tasks::id.eq(id.into_inner())))
                    .set(&transition_changeset(&task))
                    .execute(tx_conn)?;
                Ok(task)
            })
        })
        .await
    }
}

fn scoped(scope: TaskScope) -> BoxedTaskQuery {
    let pending = TaskState::Pending.as_str();
    match scope {
        TaskScope::Charity(charity) => tasks::table
            .filter(tasks::charity_id.eq(charity.into_inner()))
            .into_boxed(),
        TaskScope::Benefactor(benefactor) => tasks::table
            .filter(
                tasks::state
                    .eq(pending)
                    .or(tasks::assignee_id.eq(benefactor.into_inner())),
            )
            .into_boxed(),
        TaskScope::Open => tasks::table.filter(tasks::state.eq(pending)).into_boxed(),
    }
}

fn keep_matching(statement: BoxedTaskQuery, filter: &TaskFilter) -> BoxedTaskQuery {
    match filter {
        TaskFilter::Title(title) => statement.filter(tasks::title.eq(title.clone())),
        TaskFilter::State(state) => statement.filter(tasks::state.eq(state.as_str())),
        TaskFilter::Charity(charity) => {
            statement.filter(tasks::charity_id.eq(charity.into_inner()))
        }
        TaskFilter::Assignee(benefactor) => {
            statement.filter(tasks::assignee_id.eq(benefactor.into_inner()))
        }
        TaskFilter::GenderLimit(limit) => statement.filter(tasks::gender_limit.eq(limit.as_str())),
    }
}

fn drop_matching(statement: BoxedTaskQuery, exclude: &TaskFilter) -> BoxedTaskQuery {
    match exclude {
        TaskFilter::Title(title) => statement.filter(tasks::title.ne(title.clone())),
        TaskFilter::State(state) => statement.filter(tasks::state.ne(state.as_str())),
        TaskFilter::Charity(charity) => {
            statement.filter(tasks::charity_id.ne(charity.into_inner()))
        }
        TaskFilter::Assignee(benefactor) => {
            statement.filter(tasks::assignee_id.is_distinct_from(benefactor.into_inner()))
        }
        TaskFilter::GenderLimit(limit) => {
            statement.filter(tasks::gender_limit.is_distinct_from(limit.as_str()))
        }
    }
}

fn task_to_row(task: &Task) -> TaskRepositoryResult<TaskRow> {
    let details = serde_json::to_value(task.details()).map_err(TaskRepositoryError::persistence)?;
    Ok(TaskRow {
        id: task.id().into_inner(),
        charity_id: task.charity().into_inner(),
        assignee_id: task.assignee().map(BenefactorId::into_inner),
        state: task.state().as_str().to_owned(),
        title: task.details().title().as_str().to_owned(),
        gender_limit: task
            .details()
            .gender_limit()
            .map(|limit| limit.as_str().to_owned()),
        details,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn transition_changeset(task: &Task) -> TaskTransitionChangeset {
    TaskTransitionChangeset {
        assignee_id: task.assignee().map(BenefactorId::into_inner),
        state: task.state().as_str().to_owned(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        charity_id,
        assignee_id,
        state: persisted_state,
        details: persisted_details,
        created_at,
        updated_at,
        ..
    } = row;

    let state =
        TaskState::try_from(persisted_state.as_str()).map_err(TaskRepositoryError::persistence)?;
    if state.has_assignee() != assignee_id.is_some() {
        return Err(TaskRepositoryError::persistence(std::io::Error::other(
            format!("task {id} is {state} but assignee presence disagrees"),
        )));
    }
    let details = serde_json::from_value::<TaskDetails>(persisted_details)
        .map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        charity: CharityId::from_uuid(charity_id),
        assignee: assignee_id.map(BenefactorId::from_uuid),
        state,
        details,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
