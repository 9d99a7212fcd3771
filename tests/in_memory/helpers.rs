//! Shared fixtures for the in-memory end-to-end tests.

use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use taskdesk::auth::{
    domain::{LoginGate, Session},
    services::{LoginOutcome, LoginService},
};
use taskdesk::department::services::DepartmentService;
use taskdesk::document::{
    adapters::memory::InMemoryDocumentStore, services::TaskDocumentService,
};
use taskdesk::reporting::services::DashboardService;
use taskdesk::task::{adapters::memory::InMemoryTaskRepository, services::TaskLifecycleService};
use taskdesk::user::{
    adapters::memory::InMemoryUserRepository,
    domain::{NewUserData, Password, PasswordDigest, User, Username},
    ports::UserRepository,
    services::UserDirectoryService,
};

/// Master-admin login name seeded into every office.
pub const MASTER_USERNAME: &str = "root";
/// Master-admin password seeded into every office.
pub const MASTER_PASSWORD: &str = "master@123";
/// Prefix for public document URLs.
pub const DOCUMENT_BASE_URL: &str = "http://localhost/storage/task_documents";

type Users = InMemoryUserRepository;
type Tasks = InMemoryTaskRepository;

/// Every service wired over one set of in-memory stores.
pub struct Office {
    pub users: Arc<Users>,
    pub documents: Arc<InMemoryDocumentStore>,
    pub login: LoginService<Users>,
    pub directory: UserDirectoryService<Users, Tasks, DefaultClock>,
    pub lifecycle: TaskLifecycleService<Tasks, Users, DefaultClock>,
    pub departments: DepartmentService<Users, Tasks, DefaultClock>,
    pub attachments: TaskDocumentService<Tasks, InMemoryDocumentStore, DefaultClock>,
    pub dashboard: DashboardService<Users, Tasks>,
    pub master: Session,
}

impl Office {
    /// Logs in with a fresh gate and returns the session.
    pub async fn sign_in(&self, username: &str, password: &str) -> Session {
        let mut gate = LoginGate::new();
        match self
            .login
            .login(&mut gate, username, password)
            .await
            .expect("login should reach a decision")
        {
            LoginOutcome::Authenticated { session, .. } => session,
            other => panic!("expected {username} to sign in, got {other:?}"),
        }
    }
}

/// Provides an office whose only account is the master-admin.
#[fixture]
pub async fn office() -> Office {
    let users = Arc::new(InMemoryUserRepository::new());
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let documents = Arc::new(InMemoryDocumentStore::new(DOCUMENT_BASE_URL));
    let clock = Arc::new(DefaultClock);

    let password = Password::new(MASTER_PASSWORD).expect("valid password");
    let master = User::new(
        NewUserData {
            username: Username::new(MASTER_USERNAME).expect("valid username"),
            password: PasswordDigest::derive(&password).expect("password should hash"),
            department: None,
            is_admin: false,
            is_master_admin: true,
        },
        &DefaultClock,
    );
    users.store(&master).await.expect("seed master-admin");

    Office {
        login: LoginService::new(Arc::clone(&users)),
        directory: UserDirectoryService::new(
            Arc::clone(&users),
            Arc::clone(&tasks),
            Arc::clone(&clock),
        ),
        lifecycle: TaskLifecycleService::new(
            Arc::clone(&tasks),
            Arc::clone(&users),
            Arc::clone(&clock),
        ),
        departments: DepartmentService::new(
            Arc::clone(&users),
            Arc::clone(&tasks),
            Arc::clone(&clock),
        ),
        attachments: TaskDocumentService::new(Arc::clone(&tasks), Arc::clone(&documents), clock),
        dashboard: DashboardService::new(Arc::clone(&users), tasks),
        users,
        documents,
        master: Session::for_user(&master),
    }
}

/// A due date one week out.
pub fn next_week() -> NaiveDate {
    Utc::now()
        .date_naive()
        .checked_add_days(Days::new(7))
        .expect("date in range")
}
