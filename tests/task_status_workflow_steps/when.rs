//! When steps for task status workflow scenarios.

use super::world::{WorkflowWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#""{username}" starts the task"#)]
fn worker_starts(world: &mut WorkflowWorld, username: String) -> Result<(), eyre::Report> {
    let worker = world.worker(&username)?.clone();
    let task_id = world.task()?.id();
    let result = run_async(world.lifecycle.start(&worker, task_id));
    world.record(result);
    Ok(())
}

#[when("the admin approves the task")]
fn admin_approves(world: &mut WorkflowWorld) -> Result<(), eyre::Report> {
    let admin = world.admin()?.clone();
    let task_id = world.task()?.id();
    let result = run_async(world.lifecycle.approve(&admin, task_id));
    world.record(result);
    Ok(())
}

#[when("the admin rejects the task")]
fn admin_rejects(world: &mut WorkflowWorld) -> Result<(), eyre::Report> {
    let admin = world.admin()?.clone();
    let task_id = world.task()?.id();
    let result = run_async(world.lifecycle.reject(&admin, task_id));
    world.record(result);
    Ok(())
}

#[when(r#"admin "{username}" approves the task"#)]
fn peer_approves(world: &mut WorkflowWorld, username: String) -> Result<(), eyre::Report> {
    let peer = world.peer(&username)?.clone();
    let task_id = world.task()?.id();
    let result = run_async(world.lifecycle.approve(&peer, task_id));
    world.record(result);
    Ok(())
}

#[when(r#"admin "{username}" rejects the task"#)]
fn peer_rejects(world: &mut WorkflowWorld, username: String) -> Result<(), eyre::Report> {
    let peer = world.peer(&username)?.clone();
    let task_id = world.task()?.id();
    let result = run_async(world.lifecycle.reject(&peer, task_id));
    world.record(result);
    Ok(())
}
