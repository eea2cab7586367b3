//! Scope, filter, and exclude predicates evaluated by `PostgreSQL`.

use crate::postgres::helpers::{Platform, TestDatabase, test_runtime};
use goodwill::identity::domain::{AccountId, Actor};
use goodwill::task::domain::{Task, TaskId};
use goodwill::task::services::{CreateTaskRequest, TaskListRequest};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;

fn ids(tasks: &[Task]) -> Vec<TaskId> {
    tasks.iter().map(Task::id).collect()
}

/// Two charities' tasks in every visibility situation.
struct Board {
    owner: Actor,
    volunteer: Actor,
    women_only: Task,
    anyone: Task,
    requested: Task,
    elsewhere: Task,
}

async fn board(platform: &Platform) -> eyre::Result<Board> {
    let owner = platform.charity("Owner", "PG-1").await?;
    let other_owner = platform.charity("Other", "PG-2").await?;
    let volunteer = platform.benefactor().await?;

    let women_only = platform
        .post(
            &owner,
            CreateTaskRequest::new("Women's shelter night").with_gender_limit("female"),
        )
        .await?;
    let anyone = platform.post(&owner, CreateTaskRequest::new("Kitchen duty")).await?;
    let requested = platform
        .post(&owner, CreateTaskRequest::new("Drive the van"))
        .await?;
    let elsewhere = platform
        .post(
            &other_owner,
            CreateTaskRequest::new("Men's shelter night").with_gender_limit("male"),
        )
        .await?;
    platform.tasks.request_task(&volunteer, requested.id()).await?;

    Ok(Board {
        owner,
        volunteer,
        women_only,
        anyone,
        requested,
        elsewhere,
    })
}

#[rstest]
fn scopes_follow_the_acting_role(shared_test_cluster: &'static TestCluster) -> eyre::Result<()> {
    let database = TestDatabase::create(shared_test_cluster, "listing_scopes")?;
    let platform = database.platform()?;
    let rt = test_runtime()?;

    rt.block_on(async {
        let board = board(&platform).await?;
        let all = TaskListRequest::new();
        let unaffiliated = Actor::Unaffiliated {
            account: AccountId::new(),
        };

        let owner_view = platform.tasks.list_for_actor(&board.owner, &all).await?;
        let volunteer_view = platform.tasks.list_for_actor(&board.volunteer, &all).await?;
        let open_view = platform.tasks.list_for_actor(&unaffiliated, &all).await?;

        eyre::ensure!(
            ids(&owner_view)
                == vec![board.women_only.id(), board.anyone.id(), board.requested.id()]
        );
        eyre::ensure!(
            ids(&volunteer_view)
                == vec![
                    board.women_only.id(),
                    board.anyone.id(),
                    board.requested.id(),
                    board.elsewhere.id()
                ]
        );
        eyre::ensure!(
            ids(&open_view)
                == vec![board.women_only.id(), board.anyone.id(), board.elsewhere.id()]
        );
        Ok(())
    })
}

#[rstest]
fn excludes_keep_rows_with_missing_values(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let database = TestDatabase::create(shared_test_cluster, "listing_excludes")?;
    let platform = database.platform()?;
    let rt = test_runtime()?;

    rt.block_on(async {
        let board = board(&platform).await?;
        let assignee = board
            .volunteer
            .benefactor_id()
            .ok_or_else(|| eyre::eyre!("volunteer has a benefactor profile"))?
            .to_string();

        let not_female = platform
            .tasks
            .list_for_actor(
                &board.owner,
                &TaskListRequest::new().with_exclude("gender_limit", "female"),
            )
            .await?;
        let not_assigned_to_volunteer = platform
            .tasks
            .list_for_actor(
                &board.owner,
                &TaskListRequest::new().with_exclude("assignee", assignee.as_str()),
            )
            .await?;

        eyre::ensure!(ids(&not_female) == vec![board.anyone.id(), board.requested.id()]);
        eyre::ensure!(
            ids(&not_assigned_to_volunteer) == vec![board.women_only.id(), board.anyone.id()]
        );
        Ok(())
    })
}

#[rstest]
fn filters_and_excludes_combine(shared_test_cluster: &'static TestCluster) -> eyre::Result<()> {
    let database = TestDatabase::create(shared_test_cluster, "listing_filters")?;
    let platform = database.platform()?;
    let rt = test_runtime()?;

    rt.block_on(async {
        let board = board(&platform).await?;
        let charity = board
            .owner
            .charity_id()
            .ok_or_else(|| eyre::eyre!("owner acts as a charity"))?
            .to_string();

        let female = platform
            .tasks
            .list_for_actor(
                &board.owner,
                &TaskListRequest::new().with_filter("gender_limit", "female"),
            )
            .await?;
        let owned_open = platform
            .tasks
            .list_for_actor(
                &board.volunteer,
                &TaskListRequest::new()
                    .with_filter("charity", charity.as_str())
                    .with_exclude("state", "waiting"),
            )
            .await?;
        let titled = platform
            .tasks
            .list_for_actor(
                &board.volunteer,
                &TaskListRequest::new()
                    .with_filter("title", "Drive the van")
                    .with_filter("state", "waiting"),
            )
            .await?;

        eyre::ensure!(ids(&female) == vec![board.women_only.id()]);
        eyre::ensure!(ids(&owned_open) == vec![board.women_only.id(), board.anyone.id()]);
        eyre::ensure!(ids(&titled) == vec![board.requested.id()]);
        Ok(())
    })
}
