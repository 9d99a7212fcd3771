//! Then steps for task status workflow scenarios.

use super::world::WorkflowWorld;
use rstest_bdd_macros::then;
use taskdesk::auth::domain::AccessError;
use taskdesk::task::{
    domain::{TaskDomainError, TaskStatus},
    services::TaskLifecycleError,
};

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &WorkflowWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let actual = world.stored_status()?;
    eyre::ensure!(
        actual == expected,
        "expected status {expected}, found {actual}"
    );
    Ok(())
}

#[then("the action fails with an invalid status transition")]
fn fails_with_invalid_transition(world: &WorkflowWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing action result"))?;
    eyre::ensure!(
        matches!(
            result,
            Err(TaskLifecycleError::Domain(
                TaskDomainError::InvalidStateTransition { .. }
            ))
        ),
        "expected InvalidStateTransition error, got {result:?}"
    );
    Ok(())
}

#[then("the action is refused to a non-assignee")]
fn refused_to_non_assignee(world: &WorkflowWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing action result"))?;
    eyre::ensure!(
        matches!(
            result,
            Err(TaskLifecycleError::Access(AccessError::NotAssignee))
        ),
        "expected NotAssignee error, got {result:?}"
    );
    Ok(())
}

#[then("the action is refused to a non-assigner")]
fn refused_to_non_assigner(world: &WorkflowWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing action result"))?;
    eyre::ensure!(
        matches!(
            result,
            Err(TaskLifecycleError::Access(AccessError::NotAssigner))
        ),
        "expected NotAssigner error, got {result:?}"
    );
    Ok(())
}
