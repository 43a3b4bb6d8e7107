//! Then steps for task command BDD scenarios.

use super::world::{TaskRuntimeWorld, run_async};
use rstest_bdd_macros::then;
use task_runtime::task::domain::{Task, TaskId, TaskStatus};

fn stored(world: &TaskRuntimeWorld, task_id: String) -> Result<Task, eyre::Report> {
    let id = TaskId::new(task_id)?;
    Ok(run_async(world.runtime.task(&id))?)
}

#[then(r#"the command fails with "{message}""#)]
fn command_fails_with(world: &TaskRuntimeWorld, message: String) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing command result"))?;
    match result {
        Err(err) if err.to_string() == message => Ok(()),
        other => Err(eyre::eyre!("expected failure {message:?}, got {other:?}")),
    }
}

#[then("no field change was applied")]
fn no_field_change(world: &TaskRuntimeWorld) -> Result<(), eyre::Report> {
    let changes = world.store.applied_changes()?;
    if !changes.is_empty() {
        return Err(eyre::eyre!("expected no field changes, found {changes:?}"));
    }
    Ok(())
}

#[then("{count:usize} field change was applied")]
fn field_changes_applied(world: &TaskRuntimeWorld, count: usize) -> Result<(), eyre::Report> {
    let changes = world.store.applied_changes()?;
    if changes.len() != count {
        return Err(eyre::eyre!(
            "expected {count} field changes, found {changes:?}"
        ));
    }
    Ok(())
}

#[then("no event was published")]
fn no_event(world: &TaskRuntimeWorld) -> Result<(), eyre::Report> {
    let events = world.listener.events();
    if !events.is_empty() {
        return Err(eyre::eyre!("expected no events, found {}", events.len()));
    }
    Ok(())
}

#[then(r#"{count:usize} "{kind}" event was published"#)]
fn events_published(
    world: &TaskRuntimeWorld,
    count: usize,
    kind: String,
) -> Result<(), eyre::Report> {
    let events = world.listener.events();
    let matching = events
        .iter()
        .filter(|event| event.kind().as_str() == kind)
        .count();
    if matching != count || events.len() != count {
        return Err(eyre::eyre!(
            "expected {count} {kind} events, found {matching} of {}",
            events.len()
        ));
    }
    Ok(())
}

#[then(r#"the task "{task_id}" has description "{description}""#)]
fn task_has_description(
    world: &TaskRuntimeWorld,
    task_id: String,
    description: String,
) -> Result<(), eyre::Report> {
    let task = stored(world, task_id)?;
    if task.description() != Some(description.as_str()) {
        return Err(eyre::eyre!(
            "expected description {description:?}, found {:?}",
            task.description()
        ));
    }
    Ok(())
}

#[then(r#"the task "{task_id}" has status "{status}""#)]
fn task_has_status(
    world: &TaskRuntimeWorld,
    task_id: String,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = stored(world, task_id)?;
    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            task.status().as_str()
        ));
    }
    Ok(())
}

#[then(r#"both claims fail with "{message}""#)]
fn both_claims_fail(world: &TaskRuntimeWorld, message: String) -> Result<(), eyre::Report> {
    if world.claim_failures.len() != 2 || world.claim_failures.iter().any(|m| *m != message) {
        return Err(eyre::eyre!(
            "expected two failures {message:?}, found {:?}",
            world.claim_failures
        ));
    }
    Ok(())
}
