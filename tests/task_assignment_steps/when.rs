//! When steps for task assignment BDD scenarios.

use super::world::{TaskAssignmentWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#"benefactor "{name}" requests the task"#)]
fn benefactor_requests(world: &mut TaskAssignmentWorld, name: String) -> Result<(), eyre::Report> {
    let actor = world.benefactor(&name)?;
    let task_id = world.task()?.id();
    let result = run_async(world.tasks.request_task(&actor, task_id));
    world.record(result);
    Ok(())
}

#[when(r#"benefactor "{name}" responds "{response}""#)]
fn benefactor_responds(
    world: &mut TaskAssignmentWorld,
    name: String,
    response: String,
) -> Result<(), eyre::Report> {
    let actor = world.benefactor(&name)?;
    let task_id = world.task()?.id();
    let result = run_async(world.tasks.respond_to_request(&actor, task_id, &response));
    world.record(result);
    Ok(())
}

#[when(r#"the charity responds "{response}""#)]
fn charity_responds(world: &mut TaskAssignmentWorld, response: String) -> Result<(), eyre::Report> {
    let actor = world.charity()?;
    let task_id = world.task()?.id();
    let result = run_async(world.tasks.respond_to_request(&actor, task_id, &response));
    world.record(result);
    Ok(())
}

#[when("the charity marks the task done")]
fn charity_marks_done(world: &mut TaskAssignmentWorld) -> Result<(), eyre::Report> {
    let actor = world.charity()?;
    let task_id = world.task()?.id();
    let result = run_async(world.tasks.mark_done(&actor, task_id));
    world.record(result);
    Ok(())
}
