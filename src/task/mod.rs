//! Task lifecycle management for Taskboard.
//!
//! This module implements task creation, retrieval, title-ordered listing
//! with pagination metadata, partial updates guarded by the lifecycle state
//! machine, conditional updates against a version counter, and permanent
//! deletion. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
