//! In-memory task repository for tests and local development.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{ExpectedVersion, Task, TaskId, TaskPatch},
    ports::{Page, TaskPage, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// The write lock is held across the whole read-check-apply-write sequence
/// of [`TaskRepository::update`], which gives the same per-task
/// serialization guarantee the `PostgreSQL` adapter gets from row locks.
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository<C = DefaultClock> {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
    clock: Arc<C>,
}

impl InMemoryTaskRepository<DefaultClock> {
    /// Creates an empty in-memory repository using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(DefaultClock)
    }
}

impl Default for InMemoryTaskRepository<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty in-memory repository with the given clock.
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self {
            tasks: Arc::new(RwLock::new(HashMap::new())),
            clock: Arc::new(clock),
        }
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl<C> TaskRepository for InMemoryTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(lock_poisoned)?;
        if tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let tasks = self.tasks.read().map_err(lock_poisoned)?;
        Ok(tasks.get(&id).cloned())
    }

    async fn list(&self, page: Page) -> TaskRepositoryResult<TaskPage> {
        let tasks = self.tasks.read().map_err(lock_poisoned)?;
        let total = u64::try_from(tasks.len()).map_err(TaskRepositoryError::persistence)?;

        let mut ordered: Vec<Task> = tasks.values().cloned().collect();
        ordered.sort_by(|a, b| a.title().cmp(b.title()).then_with(|| a.id().cmp(&b.id())));

        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit()).map_err(TaskRepositoryError::persistence)?;
        let items = ordered.into_iter().skip(skip).take(take).collect();

        Ok(TaskPage { items, total })
    }

    async fn update(
        &self,
        id: TaskId,
        patch: TaskPatch,
        expected: Option<ExpectedVersion>,
    ) -> TaskRepositoryResult<Task> {
        let mut tasks = self.tasks.write().map_err(lock_poisoned)?;
        let task = tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;

        if let Some(token) = expected {
            if !token.matches(task.version()) {
                return Err(TaskRepositoryError::VersionMismatch {
                    expected: token.value(),
                    actual: task.version().value(),
                });
            }
        }

        task.apply(patch, &*self.clock)?;
        Ok(task.clone())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(lock_poisoned)?;
        tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }
}
