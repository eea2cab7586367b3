//! In-memory integration tests for task listings.

use super::helpers::Platform;
use goodwill::identity::domain::{AccountId, Actor};
use goodwill::task::domain::{Task, TaskErrorKind, TaskId};
use goodwill::task::services::{CreateTaskRequest, TaskListRequest};
use rstest::{fixture, rstest};

#[fixture]
fn platform() -> Platform {
    Platform::new()
}

fn ids(tasks: &[Task]) -> Vec<TaskId> {
    tasks.iter().map(Task::id).collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn each_role_sees_its_own_slice(platform: Platform) -> eyre::Result<()> {
    let owner = platform.charity("Owner", "LS-1").await?;
    let other_owner = platform.charity("Other", "LS-2").await?;
    let volunteer = platform.benefactor().await?;
    let rival = platform.benefactor().await?;

    let open = platform.post(&owner, "Open").await?;
    let mine = platform.post(&owner, "Mine").await?;
    let theirs = platform.post(&other_owner, "Theirs").await?;
    platform.tasks.request_task(&volunteer, mine.id()).await?;
    platform.tasks.request_task(&rival, theirs.id()).await?;

    let all = TaskListRequest::new();
    let owner_view = platform.tasks.list_for_actor(&owner, &all).await?;
    let volunteer_view = platform.tasks.list_for_actor(&volunteer, &all).await?;
    let anonymous_view = platform
        .tasks
        .list_for_actor(
            &Actor::Unaffiliated {
                account: AccountId::new(),
            },
            &all,
        )
        .await?;

    eyre::ensure!(ids(&owner_view) == vec![open.id(), mine.id()]);
    eyre::ensure!(ids(&volunteer_view) == vec![open.id(), mine.id()]);
    eyre::ensure!(ids(&anonymous_view) == vec![open.id()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn filters_and_excludes_combine(platform: Platform) -> eyre::Result<()> {
    let owner = platform.charity("Owner", "LS-3").await?;
    let charity = owner
        .charity_id()
        .ok_or_else(|| eyre::eyre!("owner has no charity"))?;
    let women_only = platform
        .tasks
        .create_task(
            &owner,
            charity,
            CreateTaskRequest::new("Women's shelter night").with_gender_limit("f"),
        )
        .await?;
    let men_only = platform
        .tasks
        .create_task(
            &owner,
            charity,
            CreateTaskRequest::new("Men's shelter night").with_gender_limit("m"),
        )
        .await?;
    let anyone = platform.post(&owner, "Kitchen duty").await?;

    let not_female = platform
        .tasks
        .list_for_actor(
            &owner,
            &TaskListRequest::new()
                .with_filter("charity", charity.to_string())
                .with_exclude("gender_limit", "female"),
        )
        .await?;
    let female = platform
        .tasks
        .list_for_actor(
            &owner,
            &TaskListRequest::new().with_filter("gender_limit", "female"),
        )
        .await?;
    let ignored_blank = platform
        .tasks
        .list_for_actor(&owner, &TaskListRequest::new().with_filter("title", ""))
        .await?;

    eyre::ensure!(ids(&not_female) == vec![men_only.id(), anyone.id()]);
    eyre::ensure!(ids(&female) == vec![women_only.id()]);
    eyre::ensure!(ignored_blank.len() == 3);
    Ok(())
}

#[rstest]
#[case("colour", "red")]
#[case("state", "in_review")]
#[case("assignee", "someone")]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_filters_fail_validation(
    platform: Platform,
    #[case] key: &str,
    #[case] value: &str,
) -> eyre::Result<()> {
    let owner = platform.charity("Owner", "LS-4").await?;

    let error = platform
        .tasks
        .list_for_actor(&owner, &TaskListRequest::new().with_exclude(key, value))
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("listing should fail"))?;

    eyre::ensure!(error.kind() == TaskErrorKind::Validation);
    Ok(())
}
