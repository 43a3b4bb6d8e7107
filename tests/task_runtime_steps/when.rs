//! When steps for task command BDD scenarios.

use super::world::{TaskRuntimeWorld, run_async};
use rstest_bdd_macros::when;
use task_runtime::task::domain::{CancelTaskPayload, ClaimTaskPayload, UpdateTaskPayload};

#[when(r#"the principal updates the description of "{task_id}" to "{description}""#)]
fn update_description(world: &mut TaskRuntimeWorld, task_id: String, description: String) {
    let payload = UpdateTaskPayload::new(task_id).with_description(description);
    world.last_result = Some(run_async(world.runtime.update(&payload)));
}

#[when(r#"the principal claims "{task_id}" twice"#)]
fn claim_twice(world: &mut TaskRuntimeWorld, task_id: String) -> Result<(), eyre::Report> {
    let payload = ClaimTaskPayload::new(task_id);
    for _ in 0..2 {
        match run_async(world.runtime.claim(&payload)) {
            Ok(task) => return Err(eyre::eyre!("claim unexpectedly succeeded: {task:?}")),
            Err(err) => world.claim_failures.push(err.to_string()),
        }
    }
    Ok(())
}

#[when(r#"the principal cancels "{task_id}""#)]
fn cancel(world: &mut TaskRuntimeWorld, task_id: String) {
    let payload = CancelTaskPayload::new(task_id);
    world.last_result = Some(run_async(world.runtime.cancel(&payload)));
}
