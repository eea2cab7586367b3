//! In-memory integration tests for competing transitions on one task.

use super::helpers::Platform;
use goodwill::task::domain::{TaskErrorKind, TaskState};
use rstest::{fixture, rstest};
use std::sync::Arc;

#[fixture]
fn platform() -> Arc<Platform> {
    Arc::new(Platform::new())
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_assign_exactly_one_benefactor(
    platform: Arc<Platform>,
) -> eyre::Result<()> {
    let owner = platform.charity("Owner", "CC-1").await?;
    let task = platform.post(&owner, "Only one volunteer").await?;
    let mut volunteers = Vec::new();
    for _ in 0..8 {
        volunteers.push(platform.benefactor().await?);
    }

    let handles: Vec<_> = volunteers
        .iter()
        .map(|volunteer| {
            let shared = Arc::clone(&platform);
            let actor = *volunteer;
            let task_id = task.id();
            tokio::spawn(async move { shared.tasks.request_task(&actor, task_id).await })
        })
        .collect();

    let mut winners = Vec::new();
    let mut conflicts = 0_usize;
    for handle in handles {
        match handle.await? {
            Ok(updated) => winners.push(updated),
            Err(err) if err.kind() == TaskErrorKind::StateConflict => conflicts += 1,
            Err(err) => eyre::bail!("unexpected failure: {err}"),
        }
    }

    eyre::ensure!(winners.len() == 1, "expected one winner, got {}", winners.len());
    eyre::ensure!(conflicts == volunteers.len() - 1);
    let stored = platform.tasks.find_by_id(task.id()).await?;
    eyre::ensure!(stored.state() == TaskState::Waiting);
    eyre::ensure!(Some(stored) == winners.pop());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_accept_and_reject_resolve_once(platform: Arc<Platform>) -> eyre::Result<()> {
    let owner = platform.charity("Owner", "CC-2").await?;
    let volunteer = platform.benefactor().await?;
    let task = platform.post(&owner, "Decide once").await?;
    platform.tasks.request_task(&volunteer, task.id()).await?;

    let accept = {
        let shared = Arc::clone(&platform);
        let task_id = task.id();
        tokio::spawn(async move { shared.tasks.respond_to_request(&owner, task_id, "A").await })
    };
    let reject = {
        let shared = Arc::clone(&platform);
        let task_id = task.id();
        tokio::spawn(async move { shared.tasks.respond_to_request(&owner, task_id, "R").await })
    };
    let outcomes = [accept.await?, reject.await?];

    let successes = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
    eyre::ensure!(successes == 1, "exactly one response may win");
    let stored = platform.tasks.find_by_id(task.id()).await?;
    eyre::ensure!(matches!(stored.state(), TaskState::Assigned | TaskState::Pending));
    eyre::ensure!(stored.state().has_assignee() == stored.assignee().is_some());
    Ok(())
}
