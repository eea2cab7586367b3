//! Then steps for task assignment BDD scenarios.

use super::world::{TaskAssignmentWorld, run_async};
use goodwill::task::domain::{TaskErrorKind, TaskState};
use rstest_bdd_macros::then;

fn expected_state(state: &str) -> Result<TaskState, eyre::Report> {
    TaskState::try_from(state).map_err(|err| eyre::eyre!("invalid expected state in scenario: {err}"))
}

fn last_failure_kind(world: &TaskAssignmentWorld) -> Result<TaskErrorKind, eyre::Report> {
    match world.last_result.as_ref() {
        Some(Err(err)) => Ok(err.kind()),
        Some(Ok(task)) => Err(eyre::eyre!("expected a failure, task is now {}", task.state())),
        None => Err(eyre::eyre!("no operation has run")),
    }
}

#[then(r#"the task state is "{state}""#)]
fn task_state_is(world: &TaskAssignmentWorld, state: String) -> Result<(), eyre::Report> {
    let expected = expected_state(&state)?;
    let task = world.task()?;
    eyre::ensure!(
        task.state() == expected,
        "expected state {expected}, found {}",
        task.state()
    );
    Ok(())
}

#[then(r#"the stored task state is "{state}""#)]
fn stored_task_state_is(world: &TaskAssignmentWorld, state: String) -> Result<(), eyre::Report> {
    let expected = expected_state(&state)?;
    let task_id = world.task()?.id();
    let stored = run_async(world.tasks.find_by_id(task_id))?;
    eyre::ensure!(
        stored.state() == expected,
        "expected stored state {expected}, found {}",
        stored.state()
    );
    Ok(())
}

#[then(r#"the task is assigned to "{name}""#)]
fn task_assigned_to(world: &TaskAssignmentWorld, name: String) -> Result<(), eyre::Report> {
    let expected = world.benefactor(&name)?.benefactor_id();
    let task = world.task()?;
    eyre::ensure!(
        task.assignee() == expected,
        "expected assignee {name}, found {:?}",
        task.assignee()
    );
    Ok(())
}

#[then("the task has no assignee")]
fn task_has_no_assignee(world: &TaskAssignmentWorld) -> Result<(), eyre::Report> {
    let task = world.task()?;
    eyre::ensure!(task.assignee().is_none(), "unexpected assignee {:?}", task.assignee());
    Ok(())
}

#[then("the operation fails with a state conflict")]
fn operation_conflicts(world: &TaskAssignmentWorld) -> Result<(), eyre::Report> {
    let kind = last_failure_kind(world)?;
    eyre::ensure!(kind == TaskErrorKind::StateConflict, "expected state conflict, got {kind:?}");
    Ok(())
}

#[then("the operation is forbidden")]
fn operation_forbidden(world: &TaskAssignmentWorld) -> Result<(), eyre::Report> {
    let kind = last_failure_kind(world)?;
    eyre::ensure!(kind == TaskErrorKind::Forbidden, "expected forbidden, got {kind:?}");
    Ok(())
}

#[then("the operation fails validation")]
fn operation_invalid(world: &TaskAssignmentWorld) -> Result<(), eyre::Report> {
    let kind = last_failure_kind(world)?;
    eyre::ensure!(kind == TaskErrorKind::Validation, "expected validation failure, got {kind:?}");
    Ok(())
}
