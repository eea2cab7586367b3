//! Given steps for task assignment BDD scenarios.

use super::world::{TaskAssignmentWorld, run_async};
use goodwill::identity::{
    domain::{AccountId, Actor},
    services::{RegisterBenefactorRequest, RegisterCharityRequest},
};
use goodwill::task::services::CreateTaskRequest;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a charity "{name}" with registration number "{registration_number}""#)]
fn charity_registered(
    world: &mut TaskAssignmentWorld,
    name: String,
    registration_number: String,
) -> Result<(), eyre::Report> {
    let charity = run_async(world.profiles.register_charity(
        AccountId::new(),
        RegisterCharityRequest::new(name, registration_number),
    ))
    .wrap_err("register charity for scenario")?;
    world.charity = Some(Actor::for_charity(&charity));
    Ok(())
}

#[given(r#"a benefactor named "{name}""#)]
fn benefactor_registered(world: &mut TaskAssignmentWorld, name: String) -> Result<(), eyre::Report> {
    let benefactor = run_async(
        world
            .profiles
            .register_benefactor(AccountId::new(), RegisterBenefactorRequest::new()),
    )
    .wrap_err("register benefactor for scenario")?;
    world
        .benefactors
        .insert(name, Actor::for_benefactor(&benefactor));
    Ok(())
}

#[given(r#"the charity has posted a task titled "{title}""#)]
fn task_posted(world: &mut TaskAssignmentWorld, title: String) -> Result<(), eyre::Report> {
    let owner = world.charity()?;
    let charity = owner
        .charity_id()
        .ok_or_else(|| eyre::eyre!("scenario charity has no profile"))?;
    let task = run_async(
        world
            .tasks
            .create_task(&owner, charity, CreateTaskRequest::new(title)),
    )
    .wrap_err("post task for scenario")?;
    world.task = Some(task);
    Ok(())
}
