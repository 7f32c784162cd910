//! In-memory integration tests for engine configuration.

use super::helpers::Stores;
use eyre::ensure;
use rstest::rstest;
use taskboard::config::EngineConfig;
use taskboard::error::ErrorKind;
use taskboard::task::domain::TaskStatus;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn configured_limits_apply_to_comments() -> eyre::Result<()> {
    let config = EngineConfig::from_json_str(r#"{"limits": {"max_comment_length": 10}}"#)?;
    let stores = Stores::with_config(config);
    let marta = stores.manager("marta@studio.example").await?;
    let launch = stores.project(&marta, "Launch").await?;
    let ana = stores.invite(&marta, &launch, "ana@studio.example").await?;
    let task = stores.task(&marta, &launch, &ana, "Design").await?;

    stores.comments().add(&ana, task.id(), "Short one").await?;
    let long = stores
        .comments()
        .add(&ana, task.id(), "Rather longer than ten")
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("comment above limit should fail"))?;

    ensure!(long.kind() == ErrorKind::Validation);
    Ok(())
}

#[rstest]
#[case(EngineConfig::default(), true)]
#[case(EngineConfig::strict(), false)]
#[tokio::test(flavor = "multi_thread")]
async fn closed_project_policy_controls_owner_override(
    #[case] config: EngineConfig,
    #[case] allowed: bool,
) -> eyre::Result<()> {
    let stores = Stores::with_config(config);
    let marta = stores.manager("marta@studio.example").await?;
    let launch = stores.project(&marta, "Launch").await?;
    let ana = stores.invite(&marta, &launch, "ana@studio.example").await?;
    let task = stores.task(&marta, &launch, &ana, "Design").await?;
    stores.projects().close(&marta, launch.id()).await?;

    let result = stores
        .tasks()
        .change_status(&marta, task.id(), TaskStatus::Completed)
        .await;

    match result {
        Ok(updated) => ensure!(allowed && updated.status() == TaskStatus::Completed),
        Err(err) => ensure!(!allowed && err.kind() == ErrorKind::ProjectClosed),
    }
    Ok(())
}
