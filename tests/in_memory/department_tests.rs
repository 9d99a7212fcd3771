//! Department administration across services.

use super::helpers::{Office, next_week, office};
use rstest::rstest;
use taskdesk::department::{
    domain::{DEFAULT_ADMIN_PASSWORD, DepartmentDeletion},
    services::DepartmentError,
};
use taskdesk::task::services::AssignTaskRequest;
use taskdesk::user::{
    domain::{DepartmentName, Username},
    ports::UserRepository,
    services::CreateUserRequest,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn renamed_department_keeps_its_members(#[future] office: Office) {
    let ctx = office.await;
    ctx.departments
        .create(&ctx.master, "Water Works")
        .await
        .expect("department should be created");
    let admin = ctx.sign_in("Admin_Water_Works", DEFAULT_ADMIN_PASSWORD).await;
    ctx.directory
        .create_user(&admin, CreateUserRequest::new("latha", "valve123"))
        .await
        .expect("admin should add a worker");

    let moved = ctx
        .departments
        .rename(&ctx.master, "Water Works", "Utilities")
        .await
        .expect("rename should succeed");

    assert_eq!(moved, 2);
    let utilities = DepartmentName::new("Utilities").expect("valid department");
    let members = ctx
        .users
        .list_by_department(&utilities)
        .await
        .expect("listing should succeed");
    assert_eq!(members.len(), 2);
    let stats = ctx
        .dashboard
        .dashboard(&ctx.master)
        .await
        .expect("dashboard should load");
    assert_eq!(stats.department_counts.get(&utilities), Some(&2));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_department_removes_members_and_their_tasks(#[future] office: Office) {
    let ctx = office.await;
    ctx.departments
        .create(&ctx.master, "Roads")
        .await
        .expect("department should be created");
    let admin = ctx.sign_in("Admin_Roads", DEFAULT_ADMIN_PASSWORD).await;
    let worker = ctx
        .directory
        .create_user(&admin, CreateUserRequest::new("anil", "pothole1"))
        .await
        .expect("admin should add a worker");
    ctx.lifecycle
        .assign(
            &admin,
            AssignTaskRequest::new(
                "Clear drain",
                "Junction 4",
                "12.97,77.59",
                next_week(),
                worker.id(),
            ),
        )
        .await
        .expect("assignment should succeed");

    let deletion = ctx
        .departments
        .delete(&ctx.master, "Roads")
        .await
        .expect("delete should succeed");

    assert_eq!(
        deletion,
        DepartmentDeletion {
            tasks_removed: 1,
            users_removed: 2,
            users_detached: 0,
        }
    );
    let admin_name = Username::new("Admin_Roads").expect("valid username");
    assert!(
        ctx.users
            .find_by_username(&admin_name)
            .await
            .expect("lookup should succeed")
            .is_none()
    );
    let stats = ctx
        .dashboard
        .dashboard(&ctx.master)
        .await
        .expect("dashboard should load");
    assert_eq!(stats.total_users, 1);
    assert_eq!(stats.total_tasks, 0);
    assert!(stats.department_counts.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn department_names_clash_ignoring_case(#[future] office: Office) {
    let ctx = office.await;
    ctx.departments
        .create(&ctx.master, "Roads")
        .await
        .expect("department should be created");

    let result = ctx.departments.create(&ctx.master, "roads").await;

    assert!(matches!(result, Err(DepartmentError::AlreadyExists(_))));
}
