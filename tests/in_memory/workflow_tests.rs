//! Assignment, review and evidence flows across services.

use super::helpers::{DOCUMENT_BASE_URL, Office, next_week, office};
use rstest::rstest;
use taskdesk::auth::domain::{AccessError, Session};
use taskdesk::department::domain::DEFAULT_ADMIN_PASSWORD;
use taskdesk::document::{domain::DocumentUpload, ports::DocumentStore};
use taskdesk::task::{
    domain::{Task, TaskFilter, TaskStatus},
    services::{AssignTaskRequest, TaskLifecycleError},
};
use taskdesk::user::services::CreateUserRequest;

struct Crew {
    admin: Session,
    worker: Session,
    task: Task,
}

/// Provisions `Roads`, signs its admin in, adds a worker and assigns them a
/// task.
async fn staffed(ctx: &Office) -> Crew {
    let admin_account = ctx
        .departments
        .create(&ctx.master, "Roads")
        .await
        .expect("department should be created");
    let admin = ctx
        .sign_in(admin_account.username().as_str(), DEFAULT_ADMIN_PASSWORD)
        .await;
    let worker_account = ctx
        .directory
        .create_user(&admin, CreateUserRequest::new("anil", "pothole1"))
        .await
        .expect("admin should add a worker");
    let worker = ctx.sign_in("anil", "pothole1").await;
    let task = ctx
        .lifecycle
        .assign(
            &admin,
            AssignTaskRequest::new(
                "Patch potholes",
                "Ring road, north stretch",
                "12.9716,77.5946",
                next_week(),
                worker_account.id(),
            ),
        )
        .await
        .expect("assignment should succeed");
    Crew {
        admin,
        worker,
        task,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assigned_task_is_started_and_approved(#[future] office: Office) {
    let ctx = office.await;
    let crew = staffed(&ctx).await;

    let inbox = ctx
        .lifecycle
        .tasks_for_assignee(&crew.worker, &TaskFilter::all())
        .await
        .expect("worker listing should succeed");
    assert_eq!(inbox.len(), 1);
    let first = inbox.first().expect("one task");
    assert_eq!(first.task.status(), TaskStatus::Pending);
    assert_eq!(
        first
            .assigned_by
            .as_ref()
            .map(|summary| summary.username.as_str()),
        Some("Admin_Roads")
    );

    ctx.lifecycle
        .start(&crew.worker, crew.task.id())
        .await
        .expect("worker should start the task");
    let review = ctx
        .lifecycle
        .awaiting_review(&crew.admin)
        .await
        .expect("review listing should succeed");
    assert_eq!(review.len(), 1);

    let approved = ctx
        .lifecycle
        .approve(&crew.admin, crew.task.id())
        .await
        .expect("admin should approve");
    assert_eq!(approved.status(), TaskStatus::Completed);

    let stats = ctx
        .dashboard
        .dashboard(&ctx.master)
        .await
        .expect("dashboard should load");
    assert_eq!(stats.total_tasks, 1);
    assert_eq!(stats.task_status_counts.completed, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_task_returns_to_pending(#[future] office: Office) {
    let ctx = office.await;
    let crew = staffed(&ctx).await;

    ctx.lifecycle
        .start(&crew.worker, crew.task.id())
        .await
        .expect("worker should start the task");
    let rejected = ctx
        .lifecycle
        .reject(&crew.admin, crew.task.id())
        .await
        .expect("admin should reject");

    assert_eq!(rejected.status(), TaskStatus::Pending);
    let review = ctx
        .lifecycle
        .awaiting_review(&crew.admin)
        .await
        .expect("review listing should succeed");
    assert!(review.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn worker_cannot_approve_own_task(#[future] office: Office) {
    let ctx = office.await;
    let crew = staffed(&ctx).await;
    ctx.lifecycle
        .start(&crew.worker, crew.task.id())
        .await
        .expect("worker should start the task");

    let result = ctx.lifecycle.approve(&crew.worker, crew.task.id()).await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Access(AccessError::AdminRequired))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn worker_attaches_evidence(#[future] office: Office) {
    let ctx = office.await;
    let crew = staffed(&ctx).await;
    let upload = DocumentUpload::new("site-report.pdf", b"%PDF-1.7".to_vec())
        .expect("valid upload");

    let updated = ctx
        .attachments
        .attach(&crew.worker, crew.task.id(), upload)
        .await
        .expect("assignee should attach");

    let url = ctx
        .attachments
        .document_url(&updated)
        .expect("document url");
    assert_eq!(
        url,
        format!(
            "{DOCUMENT_BASE_URL}/documents/{}/site-report.pdf",
            crew.task.id()
        )
    );
    let path = updated.document().expect("document path");
    let stored = ctx
        .documents
        .get(path)
        .await
        .expect("read should succeed");
    assert_eq!(stored.as_deref(), Some(b"%PDF-1.7".as_slice()));
}
