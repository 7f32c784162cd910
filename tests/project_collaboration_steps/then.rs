//! Then steps for project collaboration BDD scenarios.

use super::world::{CollaborationWorld, run_async};
use rstest_bdd_macros::then;
use taskboard::task::domain::TaskStatus;

fn sees_project(world: &CollaborationWorld, email: &str, title: &str) -> eyre::Result<bool> {
    let principal = world.principal(email)?;
    let projects = run_async(world.project_service().list_accessible(&principal))?;
    Ok(projects
        .iter()
        .any(|project| project.details().title() == title))
}

#[then(r#""{email}" can see the project "{title}""#)]
fn member_sees_project(
    world: &CollaborationWorld,
    email: String,
    title: String,
) -> Result<(), eyre::Report> {
    eyre::ensure!(
        sees_project(world, &email, &title)?,
        "{email} should see {title}"
    );
    Ok(())
}

#[then(r#""{email}" cannot see the project "{title}""#)]
fn outsider_cannot_see_project(
    world: &CollaborationWorld,
    email: String,
    title: String,
) -> Result<(), eyre::Report> {
    eyre::ensure!(
        !sees_project(world, &email, &title)?,
        "{email} should not see {title}"
    );
    Ok(())
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &CollaborationWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())?;
    let manager = world.manager()?;
    let task_id = world.task()?.id();
    let task = run_async(world.task_service().find_accessible(&manager, task_id))?
        .ok_or_else(|| eyre::eyre!("task should be visible to the manager"))?;

    eyre::ensure!(
        task.status() == expected,
        "expected status {expected}, found {}",
        task.status()
    );
    Ok(())
}

#[then(r#"the last operation fails with "{kind}""#)]
fn last_operation_fails(world: &CollaborationWorld, kind: String) -> Result<(), eyre::Report> {
    let actual = world
        .last_error
        .ok_or_else(|| eyre::eyre!("expected the last operation to fail"))?;
    eyre::ensure!(
        actual.as_str() == kind,
        "expected {kind} failure, got {actual}"
    );
    Ok(())
}

#[then("the task has {count:u64} comment")]
fn task_comment_count(world: &CollaborationWorld, count: u64) -> Result<(), eyre::Report> {
    let manager = world.manager()?;
    let task_id = world.task()?.id();
    let comments = run_async(world.comment_service().list_for_task(&manager, task_id))?;
    let found = u64::try_from(comments.len())?;

    eyre::ensure!(found == count, "expected {count} comments, found {found}");
    Ok(())
}

#[then("the last operation succeeded")]
fn last_operation_succeeded(world: &CollaborationWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.last_error.is_none(),
        "expected success, got {:?}",
        world.last_error
    );
    Ok(())
}
