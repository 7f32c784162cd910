//! In-memory integration tests for project membership over time.

use super::helpers::{Stores, stores};
use eyre::ensure;
use rstest::rstest;
use taskboard::error::ErrorKind;
use taskboard::project::services::ProjectRequest;
use taskboard::task::domain::TaskStatus;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn collaborator_sees_only_shared_projects(stores: Stores) -> eyre::Result<()> {
    let marta = stores.manager("marta@studio.example").await?;
    let noor = stores.manager("noor@studio.example").await?;
    let launch = stores.project(&marta, "Launch").await?;
    let research = stores.project(&noor, "Research").await?;
    stores.project(&noor, "Internal").await?;
    let ana = stores.invite(&marta, &launch, "ana@studio.example").await?;
    stores.invite(&noor, &research, "ana@studio.example").await?;

    let titles: Vec<String> = stores
        .projects()
        .list_accessible(&ana)
        .await?
        .iter()
        .map(|project| project.details().title().to_owned())
        .collect();

    ensure!(titles == ["Launch", "Research"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removal_hides_work_but_keeps_history(stores: Stores) -> eyre::Result<()> {
    let marta = stores.manager("marta@studio.example").await?;
    let launch = stores.project(&marta, "Launch").await?;
    let ana = stores.invite(&marta, &launch, "ana@studio.example").await?;
    let task = stores.task(&marta, &launch, &ana, "Design").await?;
    stores.comments().add(&ana, task.id(), "Started on the wireframes").await?;

    stores
        .invitations()
        .remove_collaborator(&marta, launch.id(), "ana@studio.example")
        .await?;

    ensure!(stores.tasks().list_assigned(&ana).await?.is_empty());
    ensure!(stores.tasks().find_accessible(&ana, task.id()).await?.is_none());
    let denied = stores
        .comments()
        .add(&ana, task.id(), "Still here?")
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("removed collaborator may not comment"))?;
    ensure!(denied.kind() == ErrorKind::Unauthorized);

    let history = stores.comments().list_for_task(&marta, task.id()).await?;
    ensure!(history.len() == 1);
    ensure!(history.first().map(|comment| comment.author()) == Some(ana.email()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reinvited_collaborator_regains_assigned_tasks(stores: Stores) -> eyre::Result<()> {
    let marta = stores.manager("marta@studio.example").await?;
    let launch = stores.project(&marta, "Launch").await?;
    let ana = stores.invite(&marta, &launch, "ana@studio.example").await?;
    let task = stores.task(&marta, &launch, &ana, "Design").await?;
    let invitations = stores.invitations();

    invitations
        .remove_collaborator(&marta, launch.id(), "ana@studio.example")
        .await?;
    invitations
        .invite(&marta, launch.id(), "ana@studio.example", None)
        .await?;

    let assigned = stores.tasks().list_assigned(&ana).await?;
    ensure!(assigned.iter().map(|found| found.id()).eq([task.id()]));
    let completed = stores.tasks().mark_completed(&ana, task.id()).await?;
    ensure!(completed.status() == TaskStatus::Completed);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn closed_project_is_read_only_for_everyone(stores: Stores) -> eyre::Result<()> {
    let marta = stores.manager("marta@studio.example").await?;
    let launch = stores.project(&marta, "Launch").await?;
    let ana = stores.invite(&marta, &launch, "ana@studio.example").await?;
    let task = stores.task(&marta, &launch, &ana, "Design").await?;
    stores.projects().close(&marta, launch.id()).await?;

    let edit = stores
        .projects()
        .update(&marta, launch.id(), ProjectRequest::new("Relaunch"))
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("closed project rejects edits"))?;
    ensure!(edit.kind() == ErrorKind::ProjectClosed);

    let delete = stores
        .tasks()
        .delete(&marta, task.id())
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("closed project rejects task deletion"))?;
    ensure!(delete.kind() == ErrorKind::ProjectClosed);

    ensure!(stores.tasks().list_for_project(&ana, launch.id()).await?.len() == 1);
    ensure!(stores.projects().can_access(&ana, launch.id()).await?);
    Ok(())
}
