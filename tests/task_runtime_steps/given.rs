//! Given steps for task command BDD scenarios.

use super::world::{TaskRuntimeWorld, run_async};
use chrono::Utc;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use task_runtime::task::{
    domain::{ClaimTaskPayload, FieldChange, PrincipalId, Task, TaskId, TaskStatus},
    ports::TaskQueryPort,
};

fn seed(world: &TaskRuntimeWorld, task: &Task) -> Result<(), eyre::Report> {
    run_async(world.store.insert(task)).wrap_err("seed task for scenario")
}

#[given(r#"a task "{task_id}" owned by "{owner}" with no assignee"#)]
fn unassigned_task(
    world: &mut TaskRuntimeWorld,
    task_id: String,
    owner: String,
) -> Result<(), eyre::Report> {
    let task = Task::new(TaskId::new(task_id)?, "Review invoice", Utc::now())
        .with_owner(PrincipalId::new(owner)?);
    seed(world, &task)
}

#[given(r#"a task "{task_id}" owned by "{owner}" assigned to "{assignee}""#)]
fn assigned_task(
    world: &mut TaskRuntimeWorld,
    task_id: String,
    owner: String,
    assignee: String,
) -> Result<(), eyre::Report> {
    let task = Task::new(TaskId::new(task_id)?, "Review invoice", Utc::now())
        .with_owner(PrincipalId::new(owner)?)
        .with_change(&FieldChange::Assignee(Some(PrincipalId::new(assignee)?)))
        .with_change(&FieldChange::Status(TaskStatus::Assigned));
    seed(world, &task)
}

#[given(r#"the signed-in principal is "{principal}""#)]
fn signed_in_principal(world: &mut TaskRuntimeWorld, principal: String) -> Result<(), eyre::Report> {
    world.sign_in(&principal)
}

#[given(r#""{principal}" has claimed "{task_id}""#)]
fn principal_has_claimed(
    world: &mut TaskRuntimeWorld,
    principal: String,
    task_id: String,
) -> Result<(), eyre::Report> {
    world.sign_in(&principal)?;
    run_async(world.runtime.claim(&ClaimTaskPayload::new(task_id)))
        .wrap_err("claim task in scenario setup")?;
    Ok(())
}
