//! `PostgreSQL` repository implementation for user accounts.

use super::{
    models::{NewUserRow, UserChangeset, UserRow},
    schema::users,
};
use crate::user::{
    domain::{DepartmentName, PasswordDigest, PersistedUserData, User, UserId, Username},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by user adapters.
pub type UserPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: UserPgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: UserPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let username = user.username().clone();
        let new_row = to_new_row(user);

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_username_unique_violation(info.as_ref()) =>
                    {
                        UserRepositoryError::DuplicateUsername(username.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserRepositoryError::DuplicateUser(user_id)
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let username = user.username().clone();
        let changeset = UserChangeset {
            username: user.username().as_str().to_owned(),
            password_digest: user.password().to_storage(),
            department: user.department().map(|name| name.as_str().to_owned()),
            is_admin: user.is_admin(),
            is_master_admin: user.is_master_admin(),
            updated_at: user.updated_at(),
        };

        self.run_blocking(move |connection| {
            let updated_count =
                diesel::update(users::table.filter(users::id.eq(user_id.into_inner())))
                    .set(&changeset)
                    .execute(connection)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                            if is_username_unique_violation(info.as_ref()) =>
                        {
                            UserRepositoryError::DuplicateUsername(username.clone())
                        }
                        _ => UserRepositoryError::persistence(err),
                    })?;

            if updated_count == 0 {
                return Err(UserRepositoryError::NotFound(user_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: UserId) -> UserRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted_count = diesel::delete(users::table.filter(users::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(UserRepositoryError::persistence)?;
            if deleted_count == 0 {
                return Err(UserRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_many(&self, ids: &[UserId]) -> UserRepositoryResult<usize> {
        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            diesel::delete(users::table.filter(users::id.eq_any(uuids)))
                .execute(connection)
                .map_err(UserRepositoryError::persistence)
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_username(&self, username: &Username) -> UserRepositoryResult<Option<User>> {
        let lookup = username.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::username.eq(&lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn list_all(&self) -> UserRepositoryResult<Vec<User>> {
        self.run_blocking(move |connection| {
            let rows = users::table
                .order((users::department.asc().nulls_first(), users::username.asc()))
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }

    async fn list_by_department(
        &self,
        department: &DepartmentName,
    ) -> UserRepositoryResult<Vec<User>> {
        let lookup = department.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = users::table
                .filter(users::department.eq(&lookup))
                .order(users::username.asc())
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }

    async fn list_departments(&self) -> UserRepositoryResult<Vec<DepartmentName>> {
        self.run_blocking(move |connection| {
            let names = users::table
                .select(users::department)
                .filter(users::department.is_not_null())
                .distinct()
                .order(users::department.asc())
                .load::<Option<String>>(connection)
                .map_err(UserRepositoryError::persistence)?;
            names
                .into_iter()
                .flatten()
                .map(|name| {
                    DepartmentName::new(name).map_err(UserRepositoryError::invalid_persisted_data)
                })
                .collect()
        })
        .await
    }

    async fn rename_department(
        &self,
        from: &DepartmentName,
        to: &DepartmentName,
    ) -> UserRepositoryResult<usize> {
        let from_name = from.as_str().to_owned();
        let to_name = to.as_str().to_owned();
        self.run_blocking(move |connection| {
            diesel::update(users::table.filter(users::department.eq(&from_name)))
                .set((
                    users::department.eq(&to_name),
                    users::updated_at.eq(diesel::dsl::now),
                ))
                .execute(connection)
                .map_err(UserRepositoryError::persistence)
        })
        .await
    }
}

fn to_new_row(user: &User) -> NewUserRow {
    NewUserRow {
        id: user.id().into_inner(),
        username: user.username().as_str().to_owned(),
        password_digest: user.password().to_storage(),
        department: user.department().map(|name| name.as_str().to_owned()),
        is_admin: user.is_admin(),
        is_master_admin: user.is_master_admin(),
        created_at: user.created_at(),
        updated_at: user.updated_at(),
    }
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let UserRow {
        id,
        username,
        password_digest,
        department,
        is_admin,
        is_master_admin,
        created_at,
        updated_at,
    } = row;

    let parsed_username =
        Username::new(username).map_err(UserRepositoryError::invalid_persisted_data)?;
    let parsed_password = PasswordDigest::parse(&password_digest)
        .map_err(UserRepositoryError::invalid_persisted_data)?;
    let parsed_department = department
        .map(DepartmentName::new)
        .transpose()
        .map_err(UserRepositoryError::invalid_persisted_data)?;

    let data = PersistedUserData {
        id: UserId::from_uuid(id),
        username: parsed_username,
        password: parsed_password,
        department: parsed_department,
        is_admin,
        is_master_admin,
        created_at,
        updated_at,
    };
    Ok(User::from_persisted(data))
}

fn is_username_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_users_username")
}
