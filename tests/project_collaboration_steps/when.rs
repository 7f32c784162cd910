//! When steps for project collaboration BDD scenarios.

use super::world::{CollaborationWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::task::domain::TaskStatus;

#[when(r#"the manager invites "{email}" as "{name}" "{surname}""#)]
fn manager_invites(
    world: &mut CollaborationWorld,
    email: String,
    name: String,
    surname: String,
) -> Result<(), eyre::Report> {
    world.invite(&email, &name, &surname)
}

#[when(r#"the manager assigns a task titled "{title}" to "{email}" due in {days:u64} days"#)]
fn manager_assigns_task(
    world: &mut CollaborationWorld,
    title: String,
    email: String,
    days: u64,
) -> Result<(), eyre::Report> {
    world.assign_task(&title, &email, days)
}

#[when(r#""{email}" marks the task completed"#)]
fn assignee_marks_completed(
    world: &mut CollaborationWorld,
    email: String,
) -> Result<(), eyre::Report> {
    let assignee = world.principal(&email)?;
    let task_id = world.task()?.id();
    match run_async(world.task_service().mark_completed(&assignee, task_id)) {
        Ok(task) => {
            world.task = Some(task);
            world.last_error = None;
        }
        Err(err) => world.last_error = Some(err.kind()),
    }
    Ok(())
}

#[when(r#""{email}" moves the task to "{status}""#)]
fn member_moves_task(
    world: &mut CollaborationWorld,
    email: String,
    status: String,
) -> Result<(), eyre::Report> {
    let target = TaskStatus::try_from(status.as_str())?;
    let caller = world.principal(&email)?;
    let task_id = world.task()?.id();
    let result = run_async(world.task_service().change_status(&caller, task_id, target));
    world.last_error = result.err().map(|err| err.kind());
    Ok(())
}

#[when("the manager closes the project")]
fn manager_closes_project(world: &mut CollaborationWorld) -> Result<(), eyre::Report> {
    let manager = world.manager()?;
    let project_id = world.project()?.id();
    let project = run_async(world.project_service().close(&manager, project_id))?;
    world.project = Some(project);
    Ok(())
}

#[when(r#""{email}" comments "{content}""#)]
fn member_comments(
    world: &mut CollaborationWorld,
    email: String,
    content: String,
) -> Result<(), eyre::Report> {
    let result = world.comment(&email, &content)?;
    world.last_error = result.err().map(|err| err.kind());
    Ok(())
}

#[when(r#""{email}" lists the tasks of the project"#)]
fn member_lists_tasks(world: &mut CollaborationWorld, email: String) -> Result<(), eyre::Report> {
    let caller = world.principal(&email)?;
    let project_id = world.project()?.id();
    let result = run_async(world.task_service().list_for_project(&caller, project_id));
    world.last_error = result.err().map(|err| err.kind());
    Ok(())
}

#[when(r#"the manager tries to add a task titled "{title}" for "{email}""#)]
fn manager_tries_to_add_task(
    world: &mut CollaborationWorld,
    title: String,
    email: String,
) -> Result<(), eyre::Report> {
    let outcome = world.try_assign_task(&title, &email, 2)?;
    world.last_error = outcome.err().map(|err| err.kind());
    Ok(())
}
