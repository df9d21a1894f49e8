//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        ExpectedVersion, PersistedTaskData, Task, TaskDescription, TaskId, TaskPatch, TaskStatus,
        TaskTitle, Version,
    },
    ports::{Page, TaskPage, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
///
/// Conditional updates run inside a transaction holding a `FOR UPDATE` row
/// lock, so the version check and the write see one consistent snapshot of
/// the task. Updates to different tasks lock different rows and never
/// block each other.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository<C = DefaultClock> {
    pool: TaskPgPool,
    clock: Arc<C>,
}

impl PostgresTaskRepository<DefaultClock> {
    /// Creates a new repository over a connection pool, using the system
    /// clock for update timestamps.
    #[must_use]
    pub fn new(pool: TaskPgPool) -> Self {
        Self::with_clock(pool, DefaultClock)
    }
}

impl<C> PostgresTaskRepository<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Creates a new repository with the given clock.
    #[must_use]
    pub fn with_clock(pool: TaskPgPool, clock: C) -> Self {
        Self {
            pool,
            clock: Arc::new(clock),
        }
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

// Diesel's `transaction` requires the closure error type to absorb
// rollback/commit failures.
impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl<C> TaskRepository for PostgresTaskRepository<C>
where
    C: Clock + Send + Sync + 'static,
{
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
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
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self, page: Page) -> TaskRepositoryResult<TaskPage> {
        self.run_blocking(move |connection| {
            let count = tasks::table
                .count()
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            let total = u64::try_from(count).map_err(TaskRepositoryError::persistence)?;

            let skip = i64::try_from(page.offset()).unwrap_or(i64::MAX);
            let take = i64::try_from(page.limit()).map_err(TaskRepositoryError::persistence)?;
            let rows = tasks::table
                .order((tasks::title.asc(), tasks::id.asc()))
                .offset(skip)
                .limit(take)
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;

            let items = rows
                .into_iter()
                .map(row_to_task)
                .collect::<TaskRepositoryResult<Vec<_>>>()?;
            Ok(TaskPage { items, total })
        })
        .await
    }

    async fn update(
        &self,
        id: TaskId,
        patch: TaskPatch,
        expected: Option<ExpectedVersion>,
    ) -> TaskRepositoryResult<Task> {
        let clock = Arc::clone(&self.clock);
        self.run_blocking(move |connection| {
            connection.transaction(|txn| -> TaskRepositoryResult<Task> {
                let row = tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .select(TaskRow::as_select())
                    .for_update()
                    .first::<TaskRow>(txn)
                    .optional()
                    .map_err(TaskRepositoryError::persistence)?
                    .ok_or(TaskRepositoryError::NotFound(id))?;
                let mut task = row_to_task(row)?;

                if let Some(token) = expected {
                    if !token.matches(task.version()) {
                        return Err(TaskRepositoryError::VersionMismatch {
                            expected: token.value(),
                            actual: task.version().value(),
                        });
                    }
                }

                task.apply(patch, &*clock)?;

                let next_version = i64::try_from(task.version().value())
                    .map_err(TaskRepositoryError::persistence)?;
                diesel::update(tasks::table.filter(tasks::id.eq(id.into_inner())))
                    .set((
                        tasks::title.eq(task.title().as_str().to_owned()),
                        tasks::description.eq(task.description().map(|d| d.as_str().to_owned())),
                        tasks::status.eq(task.status().as_str().to_owned()),
                        tasks::updated_at.eq(task.updated_at()),
                        tasks::version.eq(next_version),
                    ))
                    .execute(txn)
                    .map_err(TaskRepositoryError::persistence)?;
                Ok(task)
            })
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let version =
        i64::try_from(task.version().value()).map_err(TaskRepositoryError::persistence)?;
    Ok(NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(|d| d.as_str().to_owned()),
        status: task.status().as_str().to_owned(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
        version,
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        status,
        created_at,
        updated_at,
        version,
    } = row;

    let parsed_title = TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?;
    let parsed_description = description
        .map(TaskDescription::new)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;
    let parsed_status =
        TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let counter = u64::try_from(version).map_err(TaskRepositoryError::persistence)?;
    let parsed_version = Version::new(counter).map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title: parsed_title,
        description: parsed_description,
        status: parsed_status,
        created_at,
        updated_at,
        version: parsed_version,
    };
    Ok(Task::from_persisted(data))
}
