//! In-memory adapters for task persistence.

mod tasks;

pub use tasks::InMemoryTaskRepository;
