//! Unit tests for the task module.

mod domain_tests;
mod status_transition_tests;
