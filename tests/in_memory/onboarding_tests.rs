//! In-memory integration tests for account onboarding.

use super::helpers::{Stores, stores};
use eyre::ensure;
use rstest::rstest;
use taskboard::error::ErrorKind;
use taskboard::identity::{
    domain::{PasswordHash, Role},
    services::{ProfileUpdate, RegisterManagerRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_registration_is_rejected(stores: Stores) -> eyre::Result<()> {
    stores.manager("marta@studio.example").await?;

    let result = stores
        .identity()
        .register_manager(RegisterManagerRequest::new(
            "  marta@studio.example ",
            "Marta",
            "Ruiz",
            "hash",
        ))
        .await;

    let err = result.err().ok_or_else(|| eyre::eyre!("duplicate should fail"))?;
    ensure!(err.kind() == ErrorKind::AlreadyExists);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invited_collaborator_sets_password_once(stores: Stores) -> eyre::Result<()> {
    let owner = stores.manager("marta@studio.example").await?;
    let project = stores.project(&owner, "Launch").await?;
    stores.invite(&owner, &project, "ana@studio.example").await?;
    let identity = stores.identity();

    let pending = identity
        .find_by_email("ana@studio.example")
        .await?
        .ok_or_else(|| eyre::eyre!("invited account should exist"))?;
    ensure!(pending.is_pending_password());

    let activated = identity
        .set_initial_password("ana@studio.example", PasswordHash::new("argon2-hash")?)
        .await?;
    ensure!(!activated.is_pending_password());

    let again = identity
        .set_initial_password("ana@studio.example", PasswordHash::new("other-hash")?)
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("second password set should fail"))?;
    ensure!(again.kind() == ErrorKind::Validation);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn directory_counts_roles(stores: Stores) -> eyre::Result<()> {
    let owner = stores.manager("marta@studio.example").await?;
    stores.manager("noor@studio.example").await?;
    let project = stores.project(&owner, "Launch").await?;
    stores.invite(&owner, &project, "ana@studio.example").await?;
    let identity = stores.identity();

    ensure!(identity.count_by_role(Role::Manager).await? == 2);
    ensure!(identity.count_by_role(Role::Collaborator).await? == 1);
    let collaborators = identity.list_collaborators().await?;
    ensure!(collaborators.len() == 1);

    let updated = identity
        .update_profile(
            "ana@studio.example",
            ProfileUpdate::new("Ana María", "Li").with_phone("+34 600 000 000"),
        )
        .await?;
    ensure!(updated.profile().name() == "Ana María");
    ensure!(updated.profile().phone() == Some("+34 600 000 000"));
    Ok(())
}
