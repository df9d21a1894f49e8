//! Unit tests for status transition rules.

use crate::task::domain::{ParseTaskStatusError, TaskStatus};
use rstest::rstest;

#[rstest]
#[case(TaskStatus::Created, TaskStatus::Created, true)]
#[case(TaskStatus::Created, TaskStatus::InProgress, true)]
#[case(TaskStatus::Created, TaskStatus::Completed, true)]
#[case(TaskStatus::InProgress, TaskStatus::Created, false)]
#[case(TaskStatus::InProgress, TaskStatus::InProgress, true)]
#[case(TaskStatus::InProgress, TaskStatus::Completed, true)]
#[case(TaskStatus::Completed, TaskStatus::Created, false)]
#[case(TaskStatus::Completed, TaskStatus::InProgress, false)]
#[case(TaskStatus::Completed, TaskStatus::Completed, true)]
fn can_transition_to_returns_expected(
    #[case] from: TaskStatus,
    #[case] to: TaskStatus,
    #[case] expected: bool,
) {
    assert_eq!(from.can_transition_to(to), expected);
}

#[rstest]
#[case(TaskStatus::Created, false)]
#[case(TaskStatus::InProgress, false)]
#[case(TaskStatus::Completed, true)]
fn is_terminal_returns_expected(#[case] status: TaskStatus, #[case] expected: bool) {
    assert_eq!(status.is_terminal(), expected);
}

#[rstest]
#[case("created", TaskStatus::Created)]
#[case("in_progress", TaskStatus::InProgress)]
#[case("completed", TaskStatus::Completed)]
#[case("  Completed  ", TaskStatus::Completed)]
#[case("IN_PROGRESS", TaskStatus::InProgress)]
fn try_from_accepts_known_values(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw), Ok(expected));
}

#[rstest]
#[case("done")]
#[case("in-progress")]
#[case("")]
#[case("createdd")]
fn try_from_rejects_unknown_values(#[case] raw: &str) {
    assert_eq!(
        TaskStatus::try_from(raw),
        Err(ParseTaskStatusError(raw.to_owned()))
    );
}

#[rstest]
#[case(TaskStatus::Created, "created")]
#[case(TaskStatus::InProgress, "in_progress")]
#[case(TaskStatus::Completed, "completed")]
fn as_str_matches_storage_form(#[case] status: TaskStatus, #[case] expected: &str) {
    assert_eq!(status.as_str(), expected);
    assert_eq!(status.to_string(), expected);
}

#[rstest]
fn serializes_as_snake_case() {
    assert_eq!(
        serde_json::to_value(TaskStatus::InProgress).ok(),
        Some(serde_json::json!("in_progress"))
    );
}
