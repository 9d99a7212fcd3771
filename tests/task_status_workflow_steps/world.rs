//! Shared world state for task status workflow scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskdesk::auth::{
    domain::{LoginGate, Session},
    services::{LoginOutcome, LoginService},
};
use taskdesk::department::services::DepartmentService;
use taskdesk::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskStatus},
    ports::TaskRepository,
    services::{TaskLifecycleError, TaskLifecycleService},
};
use taskdesk::user::{
    adapters::memory::InMemoryUserRepository,
    domain::{NewUserData, Password, PasswordDigest, User, Username},
    services::UserDirectoryService,
};

type Users = InMemoryUserRepository;
type Tasks = InMemoryTaskRepository;

/// Scenario world for task status workflow behaviour tests.
pub struct WorkflowWorld {
    pub login: LoginService<Users>,
    pub directory: UserDirectoryService<Users, Tasks, DefaultClock>,
    pub departments: DepartmentService<Users, Tasks, DefaultClock>,
    pub lifecycle: TaskLifecycleService<Tasks, Users, DefaultClock>,
    pub tasks: Arc<Tasks>,
    pub master: Session,
    pub admin: Option<Session>,
    pub workers: HashMap<String, Session>,
    pub peers: HashMap<String, Session>,
    pub task: Option<Task>,
    pub last_result: Option<Result<Task, TaskLifecycleError>>,
}

impl WorkflowWorld {
    /// Creates a world over empty in-memory stores.
    ///
    /// The master-admin session is minted directly; department creation
    /// only inspects the session.
    #[must_use]
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let clock = Arc::new(DefaultClock);
        let password = Password::new("master@123").expect("valid password");
        let master = User::new(
            NewUserData {
                username: Username::new("root").expect("valid username"),
                password: PasswordDigest::derive(&password).expect("password should hash"),
                department: None,
                is_admin: false,
                is_master_admin: true,
            },
            &DefaultClock,
        );

        Self {
            login: LoginService::new(Arc::clone(&users)),
            directory: UserDirectoryService::new(
                Arc::clone(&users),
                Arc::clone(&tasks),
                Arc::clone(&clock),
            ),
            departments: DepartmentService::new(
                Arc::clone(&users),
                Arc::clone(&tasks),
                Arc::clone(&clock),
            ),
            lifecycle: TaskLifecycleService::new(Arc::clone(&tasks), users, clock),
            tasks,
            master: Session::for_user(&master),
            admin: None,
            workers: HashMap::new(),
            peers: HashMap::new(),
            task: None,
            last_result: None,
        }
    }

    /// Signs in with a fresh gate.
    pub fn sign_in(&self, username: &str, password: &str) -> Result<Session, eyre::Report> {
        let mut gate = LoginGate::new();
        match run_async(self.login.login(&mut gate, username, password))? {
            LoginOutcome::Authenticated { session, .. } => Ok(session),
            other => Err(eyre::eyre!("{username} could not sign in: {other:?}")),
        }
    }

    /// Returns the department admin's session.
    pub fn admin(&self) -> Result<&Session, eyre::Report> {
        self.admin
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing department admin in scenario world"))
    }

    /// Returns a worker's session.
    pub fn worker(&self, username: &str) -> Result<&Session, eyre::Report> {
        self.workers
            .get(username)
            .ok_or_else(|| eyre::eyre!("unknown worker {username} in scenario world"))
    }

    /// Returns another admin's session.
    pub fn peer(&self, username: &str) -> Result<&Session, eyre::Report> {
        self.peers
            .get(username)
            .ok_or_else(|| eyre::eyre!("unknown admin {username} in scenario world"))
    }

    /// Returns the assigned task.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing assigned task in scenario world"))
    }

    /// Reads the assigned task's status back from the store.
    pub fn stored_status(&self) -> Result<TaskStatus, eyre::Report> {
        let id = self.task()?.id();
        let stored = run_async(self.tasks.find_by_id(id))?
            .ok_or_else(|| eyre::eyre!("task {id} missing from the store"))?;
        Ok(stored.status())
    }

    /// Records an action outcome, keeping the latest task state on success.
    pub fn record(&mut self, result: Result<Task, TaskLifecycleError>) {
        if let Ok(ref updated) = result {
            self.task = Some(updated.clone());
        }
        self.last_result = Some(result);
    }
}

impl Default for WorkflowWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> WorkflowWorld {
    WorkflowWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
