//! Given steps for task status workflow scenarios.

use super::world::{WorkflowWorld, run_async};
use chrono::{Days, Utc};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskdesk::department::domain::DEFAULT_ADMIN_PASSWORD;
use taskdesk::task::services::AssignTaskRequest;
use taskdesk::user::services::CreateUserRequest;

const WORKER_PASSWORD: &str = "field123";
const PEER_PASSWORD: &str = "review123";

#[given(r#"a department "{name}""#)]
fn department(world: &mut WorkflowWorld, name: String) -> Result<(), eyre::Report> {
    let admin = run_async(world.departments.create(&world.master, &name))
        .wrap_err("create department for workflow scenario")?;
    let session = world.sign_in(admin.username().as_str(), DEFAULT_ADMIN_PASSWORD)?;
    world.admin = Some(session);
    Ok(())
}

#[given(r#"a worker "{username}" in the department"#)]
fn worker_in_department(world: &mut WorkflowWorld, username: String) -> Result<(), eyre::Report> {
    let admin = world.admin()?.clone();
    run_async(
        world
            .directory
            .create_user(&admin, CreateUserRequest::new(&username, WORKER_PASSWORD)),
    )
    .wrap_err("create worker for workflow scenario")?;
    let session = world.sign_in(&username, WORKER_PASSWORD)?;
    world.workers.insert(username, session);
    Ok(())
}

#[given(r#"another admin "{username}" in the department"#)]
fn peer_admin_in_department(world: &mut WorkflowWorld, username: String) -> Result<(), eyre::Report> {
    let department = world
        .admin()?
        .department()
        .ok_or_else(|| eyre::eyre!("department admin has no department"))?
        .as_str()
        .to_owned();
    let request = CreateUserRequest::new(&username, PEER_PASSWORD)
        .in_department(department)
        .as_admin();
    run_async(world.directory.create_user(&world.master, request))
        .wrap_err("create second admin for workflow scenario")?;
    let session = world.sign_in(&username, PEER_PASSWORD)?;
    world.peers.insert(username, session);
    Ok(())
}

#[given(r#"the admin has assigned a task to "{username}""#)]
fn task_assigned(world: &mut WorkflowWorld, username: String) -> Result<(), eyre::Report> {
    let admin = world.admin()?.clone();
    let assignee = world.worker(&username)?.user_id();
    let due_date = Utc::now()
        .date_naive()
        .checked_add_days(Days::new(3))
        .ok_or_else(|| eyre::eyre!("due date out of range"))?;
    let request = AssignTaskRequest::new(
        "Patch potholes",
        "Ring road, north stretch",
        "12.9716,77.5946",
        due_date,
        assignee,
    );
    let task = run_async(world.lifecycle.assign(&admin, request))
        .wrap_err("assign task for workflow scenario")?;
    world.task = Some(task);
    Ok(())
}

#[given(r#""{username}" has started the task"#)]
fn task_started(world: &mut WorkflowWorld, username: String) -> Result<(), eyre::Report> {
    let worker = world.worker(&username)?.clone();
    let task_id = world.task()?.id();
    let started = run_async(world.lifecycle.start(&worker, task_id))
        .wrap_err("start task in scenario setup")?;
    world.task = Some(started);
    Ok(())
}
