//! `PostgreSQL` integration tests for task persistence.

use super::helpers::{BoxError, TestDatabase, account, database, task_between, test_runtime};
use mockable::DefaultClock;
use rstest::rstest;
use taskdesk::health::probe_store;
use taskdesk::task::{
    domain::{DocumentPath, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use taskdesk::user::ports::UserRepository;

#[rstest]
fn stored_task_reads_back(database: TestDatabase) -> Result<(), BoxError> {
    let ctx = &database;
    test_runtime()?.block_on(async {
        let admin = account("Admin_Field", Some("Field"), true);
        let ravi = account("ravi", Some("Field"), false);
        ctx.users.store(&admin).await?;
        ctx.users.store(&ravi).await?;
        let task = task_between(&admin, &ravi, "Inspect culvert");
        ctx.tasks.store(&task).await?;

        let found = ctx
            .tasks
            .find_by_id(task.id())
            .await?
            .expect("task should exist");

        assert_eq!(found.title(), task.title());
        assert_eq!(found.status(), TaskStatus::Pending);
        assert_eq!(found.assigned_by(), admin.id());
        assert_eq!(found.assigned_to(), ravi.id());
        assert_eq!(found.location(), task.location());
        assert_eq!(found.due_date(), task.due_date());
        assert!(found.document().is_none());
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn update_persists_status_and_document(database: TestDatabase) -> Result<(), BoxError> {
    let ctx = &database;
    test_runtime()?.block_on(async {
        let admin = account("Admin_Field", Some("Field"), true);
        let ravi = account("ravi", Some("Field"), false);
        ctx.users.store(&admin).await?;
        ctx.users.store(&ravi).await?;
        let mut task = task_between(&admin, &ravi, "Inspect culvert");
        ctx.tasks.store(&task).await?;

        task.start(&DefaultClock)?;
        let path = DocumentPath::for_task(task.id(), "culvert.pdf")?;
        task.attach_document(path.clone(), &DefaultClock);
        ctx.tasks.update(&task).await?;

        let found = ctx
            .tasks
            .find_by_id(task.id())
            .await?
            .expect("task should exist");
        assert_eq!(found.status(), TaskStatus::InProgress);
        assert_eq!(found.document(), Some(&path));
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn update_of_unknown_task_is_not_found(database: TestDatabase) -> Result<(), BoxError> {
    let ctx = &database;
    test_runtime()?.block_on(async {
        let admin = account("Admin_Field", Some("Field"), true);
        let ravi = account("ravi", Some("Field"), false);
        let task = task_between(&admin, &ravi, "Never stored");

        let result = ctx.tasks.update(&task).await;

        assert!(matches!(result, Err(TaskRepositoryError::NotFound(id)) if id == task.id()));
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn delete_involving_removes_tasks_on_either_side(database: TestDatabase) -> Result<(), BoxError> {
    let ctx = &database;
    test_runtime()?.block_on(async {
        let admin = account("Admin_Field", Some("Field"), true);
        let ravi = account("ravi", Some("Field"), false);
        let meera = account("meera", Some("Field"), false);
        for user in [&admin, &ravi, &meera] {
            ctx.users.store(user).await?;
        }
        ctx.tasks.store(&task_between(&admin, &ravi, "First")).await?;
        ctx.tasks.store(&task_between(&admin, &meera, "Second")).await?;
        ctx.tasks.store(&task_between(&ravi, &meera, "Third")).await?;

        let removed = ctx.tasks.delete_involving(&[ravi.id()]).await?;

        assert_eq!(removed, 2);
        let remaining = ctx.tasks.list_assigned_to(meera.id()).await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(
            remaining.first().map(|task| task.title().as_str()),
            Some("Second")
        );
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn health_check_reports_reachable_store(database: TestDatabase) -> Result<(), BoxError> {
    let ctx = &database;
    test_runtime()?.block_on(async {

        let report = probe_store(&ctx.tasks).await;

        assert!(report.success, "{}", report.message);
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn delete_removes_only_the_named_task(database: TestDatabase) -> Result<(), BoxError> {
    let ctx = &database;
    test_runtime()?.block_on(async {
        let admin = account("Admin_Field", Some("Field"), true);
        let ravi = account("ravi", Some("Field"), false);
        ctx.users.store(&admin).await?;
        ctx.users.store(&ravi).await?;
        let doomed = task_between(&admin, &ravi, "Doomed");
        let kept = task_between(&admin, &ravi, "Kept");
        ctx.tasks.store(&doomed).await?;
        ctx.tasks.store(&kept).await?;

        ctx.tasks.delete(doomed.id()).await?;

        assert!(ctx.tasks.find_by_id(doomed.id()).await?.is_none());
        assert!(ctx.tasks.find_by_id(kept.id()).await?.is_some());
        let again = ctx.tasks.delete(doomed.id()).await;
        assert!(matches!(again, Err(TaskRepositoryError::NotFound(id)) if id == doomed.id()));
        Ok::<(), BoxError>(())
    })
}
