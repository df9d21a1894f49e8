//! Taskboard: a task-tracking CRUD core.
//!
//! This crate provides the lifecycle state machine, partial-update
//! semantics, and optimistic-concurrency protocol for a task-tracking
//! service. The HTTP layer, settings loading, and operational logging live
//! outside this crate and call in through the service surface.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task records, lifecycle transitions, and conditional updates

pub mod task;
