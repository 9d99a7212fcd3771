//! Shared helpers for `PostgreSQL` integration tests.

use chrono::NaiveDate;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::fixture;
use taskdesk::task::{
    adapters::postgres::PostgresTaskRepository,
    domain::{NewTaskData, Task, TaskDescription, TaskLocation, TaskTitle},
};
use taskdesk::user::{
    adapters::postgres::{PostgresUserRepository, UserPgPool},
    domain::{DepartmentName, NewUserData, Password, PasswordDigest, User, Username},
};
use tokio::runtime::Runtime;
use uuid::Uuid;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// SQL creating the `users` and `tasks` tables.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_users_and_tasks/up.sql");

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "taskdesk_test_template";

/// Creates a tokio runtime for driving the async repositories in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be built.
pub fn test_runtime() -> Result<Runtime, BoxError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| Box::new(err) as BoxError)
}

/// Ensures the template database exists with the schema applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: &TestCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(CREATE_SCHEMA_SQL)
                .map_err(|e| eyre::eyre!("schema migration failed: {e}"))?;
            Ok(())
        })
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(())
}

/// Drops the test database once every pool using it has gone.
pub struct CleanupGuard {
    cluster: &'static TestCluster,
    db_name: String,
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if let Err(err) = self.cluster.drop_database(self.db_name.as_str()) {
            tracing::warn!(database = %self.db_name, error = %err, "test database left behind");
        }
    }
}

/// Throwaway database cloned from the migrated template.
///
/// Field order matters: the repositories close their pools before the guard
/// drops the database.
pub struct TestDatabase {
    pub users: PostgresUserRepository,
    pub tasks: PostgresTaskRepository,
    _cleanup: CleanupGuard,
}

impl TestDatabase {
    fn create(cluster: &'static TestCluster) -> Result<Self, BoxError> {
        ensure_template(cluster)?;
        let db_name = format!("taskdesk_test_{}", Uuid::new_v4().simple());
        cluster
            .create_database_from_template(db_name.as_str(), TEMPLATE_DB)
            .map_err(|e| Box::new(e) as BoxError)?;
        let cleanup = CleanupGuard {
            cluster,
            db_name: db_name.clone(),
        };

        let url = cluster.connection().database_url(&db_name);
        let pool: UserPgPool = Pool::builder()
            .max_size(2)
            .build(ConnectionManager::<PgConnection>::new(url))?;

        Ok(Self {
            users: PostgresUserRepository::new(pool.clone()),
            tasks: PostgresTaskRepository::new(pool),
            _cleanup: cleanup,
        })
    }
}

/// Provides a fresh database on the shared embedded cluster.
#[fixture]
pub fn database(shared_test_cluster: &'static TestCluster) -> TestDatabase {
    TestDatabase::create(shared_test_cluster).expect("test database setup")
}

/// Builds an account with a fixed test password.
pub fn account(name: &str, department: Option<&str>, is_admin: bool) -> User {
    let password = Password::new("secret1").expect("valid password");
    User::new(
        NewUserData {
            username: Username::new(name).expect("valid username"),
            password: PasswordDigest::derive(&password).expect("password should hash"),
            department: department.map(|dept| DepartmentName::new(dept).expect("valid department")),
            is_admin,
            is_master_admin: false,
        },
        &DefaultClock,
    )
}

/// Builds a pending task between two accounts.
pub fn task_between(assigner: &User, assignee: &User, title: &str) -> Task {
    Task::new(
        NewTaskData {
            title: TaskTitle::new(title).expect("valid title"),
            description: TaskDescription::new("Check and report").expect("valid description"),
            assigned_by: assigner.id(),
            assigned_to: assignee.id(),
            location: TaskLocation::with_coordinates(r#"{"lat":12.5,"lng":76.25,"name":"Depot"}"#)
                .expect("valid location"),
            due_date: NaiveDate::from_ymd_opt(2031, 2, 28).expect("valid date"),
        },
        &DefaultClock,
    )
}
