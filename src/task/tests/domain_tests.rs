//! Domain-focused tests for task creation and partial updates.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use crate::task::domain::{
    Task, TaskDescription, TaskDomainError, TaskPatch, TaskStatus, TaskTitle, Version,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn fresh_task(clock: &DefaultClock) -> Task {
    let title = TaskTitle::new("Write the quarterly report").expect("valid title");
    let description = TaskDescription::new("Cover Q3 numbers").expect("valid description");
    Task::new(title, Some(description), TaskStatus::Created, clock)
}

#[rstest]
fn title_rejects_empty_and_whitespace() {
    assert_eq!(TaskTitle::new(""), Err(TaskDomainError::EmptyTitle));
    assert_eq!(TaskTitle::new("   "), Err(TaskDomainError::EmptyTitle));
}

#[rstest]
fn title_rejects_values_over_maximum_length() {
    let raw = "x".repeat(TaskTitle::MAX_LENGTH + 1);
    assert_eq!(
        TaskTitle::new(raw),
        Err(TaskDomainError::TitleTooLong {
            max: TaskTitle::MAX_LENGTH,
            len: TaskTitle::MAX_LENGTH + 1,
        })
    );
}

#[rstest]
fn title_trims_surrounding_whitespace() {
    let title = TaskTitle::new("  Fix the build  ").expect("valid title");
    assert_eq!(title.as_str(), "Fix the build");
}

#[rstest]
fn description_accepts_empty_and_maximum_length() {
    assert!(TaskDescription::new("").is_ok());
    assert!(TaskDescription::new("y".repeat(TaskDescription::MAX_LENGTH)).is_ok());
}

#[rstest]
fn description_rejects_values_over_maximum_length() {
    let raw = "y".repeat(TaskDescription::MAX_LENGTH + 1);
    assert_eq!(
        TaskDescription::new(raw),
        Err(TaskDomainError::DescriptionTooLong {
            max: TaskDescription::MAX_LENGTH,
            len: TaskDescription::MAX_LENGTH + 1,
        })
    );
}

#[rstest]
fn new_task_starts_at_version_one_with_matching_timestamps(clock: DefaultClock) {
    let task = fresh_task(&clock);

    assert_eq!(task.version(), Version::INITIAL);
    assert_eq!(task.entity_tag(), "1");
    assert_eq!(task.status(), TaskStatus::Created);
    assert_eq!(task.created_at(), task.updated_at());
}

#[rstest]
fn apply_title_only_leaves_status_and_description_unchanged(
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut task = fresh_task(&clock);
    let patch = TaskPatch::new().with_title(TaskTitle::new("Renamed")?);

    task.apply(patch, &clock)?;

    assert_eq!(task.title().as_str(), "Renamed");
    assert_eq!(task.status(), TaskStatus::Created);
    assert_eq!(
        task.description().map(TaskDescription::as_str),
        Some("Cover Q3 numbers")
    );
    assert_eq!(task.version().value(), 2);
    Ok(())
}

#[rstest]
fn apply_without_description_twice_never_clears_it(clock: DefaultClock) -> eyre::Result<()> {
    let mut task = fresh_task(&clock);

    let first = TaskPatch::new().with_title(TaskTitle::new("First rename")?);
    task.apply(first, &clock)?;
    let second = TaskPatch::new().with_title(TaskTitle::new("Second rename")?);
    task.apply(second, &clock)?;

    assert_eq!(
        task.description().map(TaskDescription::as_str),
        Some("Cover Q3 numbers")
    );
    Ok(())
}

#[rstest]
fn apply_empty_patch_still_bumps_version(clock: DefaultClock) -> eyre::Result<()> {
    let mut task = fresh_task(&clock);
    let before = task.updated_at();

    task.apply(TaskPatch::new(), &clock)?;

    assert_eq!(task.version().value(), 2);
    assert!(task.updated_at() >= before);
    Ok(())
}

#[rstest]
fn version_equals_one_plus_update_count(clock: DefaultClock) -> eyre::Result<()> {
    let mut task = fresh_task(&clock);

    for _ in 0..3 {
        task.apply(TaskPatch::new(), &clock)?;
    }

    assert_eq!(task.version().value(), 4);
    assert_eq!(task.entity_tag(), "4");
    Ok(())
}

#[rstest]
fn apply_illegal_transition_leaves_task_untouched(clock: DefaultClock) {
    let title = TaskTitle::new("Done already").expect("valid title");
    let mut task = Task::new(title, None, TaskStatus::Completed, &clock);
    let task_id = task.id();

    let patch = TaskPatch::new()
        .with_title(TaskTitle::new("Should not apply").expect("valid title"))
        .with_status(TaskStatus::InProgress);
    let result = task.apply(patch, &clock);

    assert_eq!(
        result,
        Err(TaskDomainError::InvalidStatusTransition {
            task_id,
            from: TaskStatus::Completed,
            to: TaskStatus::InProgress,
        })
    );
    assert_eq!(task.title().as_str(), "Done already");
    assert_eq!(task.status(), TaskStatus::Completed);
    assert_eq!(task.version(), Version::INITIAL);
}

#[rstest]
fn apply_identity_status_is_always_legal(clock: DefaultClock) -> eyre::Result<()> {
    let title = TaskTitle::new("Stays completed")?;
    let mut task = Task::new(title, None, TaskStatus::Completed, &clock);

    let patch = TaskPatch::new().with_status(TaskStatus::Completed);
    task.apply(patch, &clock)?;

    assert_eq!(task.status(), TaskStatus::Completed);
    assert_eq!(task.version().value(), 2);
    Ok(())
}
