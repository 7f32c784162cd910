//! Given steps for project collaboration BDD scenarios.

use super::world::{CollaborationWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::project::services::ProjectRequest;

#[given(r#"a manager "{email}" is registered"#)]
fn manager_is_registered(world: &mut CollaborationWorld, email: String) -> Result<(), eyre::Report> {
    let principal = world.register_manager(&email)?;
    if world.manager.is_none() {
        world.manager = Some(principal);
    }
    Ok(())
}

#[given(r#"the manager owns a project titled "{title}""#)]
fn manager_owns_project(world: &mut CollaborationWorld, title: String) -> Result<(), eyre::Report> {
    let manager = world.manager()?;
    let project = run_async(
        world
            .project_service()
            .create(&manager, ProjectRequest::new(title)),
    )
    .wrap_err("create project in scenario setup")?;
    world.project = Some(project);
    Ok(())
}

#[given(r#"the manager has invited "{email}" as "{name}" "{surname}""#)]
fn manager_has_invited(
    world: &mut CollaborationWorld,
    email: String,
    name: String,
    surname: String,
) -> Result<(), eyre::Report> {
    world.invite(&email, &name, &surname)
}

#[given(r#"the manager assigns a task titled "{title}" to "{email}" due in {days:u64} days"#)]
fn manager_has_assigned_task(
    world: &mut CollaborationWorld,
    title: String,
    email: String,
    days: u64,
) -> Result<(), eyre::Report> {
    world.assign_task(&title, &email, days)
}

#[given(r#""{email}" comments "{content}""#)]
fn member_has_commented(
    world: &mut CollaborationWorld,
    email: String,
    content: String,
) -> Result<(), eyre::Report> {
    world
        .comment(&email, &content)?
        .wrap_err("comment in scenario setup")?;
    Ok(())
}
