//! `PostgreSQL` integration tests for account persistence.

use super::helpers::{BoxError, TestDatabase, account, database, test_runtime};
use rstest::rstest;
use taskdesk::user::{
    domain::{DepartmentName, Username},
    ports::{UserRepository, UserRepositoryError},
};

#[rstest]
fn stored_account_is_found_by_username(database: TestDatabase) -> Result<(), BoxError> {
    let ctx = &database;
    test_runtime()?.block_on(async {
        let ravi = account("ravi", Some("Field"), false);
        ctx.users.store(&ravi).await?;

        let found = ctx
            .users
            .find_by_username(&Username::new("ravi")?)
            .await?
            .expect("account should exist");

        assert_eq!(found.id(), ravi.id());
        assert_eq!(found.department(), ravi.department());
        assert!(found.password().verify("secret1"));
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn duplicate_username_is_rejected(database: TestDatabase) -> Result<(), BoxError> {
    let ctx = &database;
    test_runtime()?.block_on(async {
        ctx.users.store(&account("ravi", Some("Field"), false)).await?;

        let result = ctx.users.store(&account("ravi", Some("Office"), false)).await;

        assert!(matches!(
            result,
            Err(UserRepositoryError::DuplicateUsername(_))
        ));
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn department_rename_moves_every_member(database: TestDatabase) -> Result<(), BoxError> {
    let ctx = &database;
    test_runtime()?.block_on(async {
        ctx.users.store(&account("Admin_Field", Some("Field"), true)).await?;
        ctx.users.store(&account("ravi", Some("Field"), false)).await?;
        ctx.users.store(&account("meera", Some("Office"), false)).await?;

        let moved = ctx
            .users
            .rename_department(&DepartmentName::new("Field")?, &DepartmentName::new("Survey")?)
            .await?;

        assert_eq!(moved, 2);
        assert_eq!(
            ctx.users.list_departments().await?,
            vec![DepartmentName::new("Office")?, DepartmentName::new("Survey")?]
        );
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn delete_many_reports_removed_accounts(database: TestDatabase) -> Result<(), BoxError> {
    let ctx = &database;
    test_runtime()?.block_on(async {
        let ravi = account("ravi", Some("Field"), false);
        let meera = account("meera", Some("Field"), false);
        ctx.users.store(&ravi).await?;
        ctx.users.store(&meera).await?;

        let removed = ctx.users.delete_many(&[ravi.id(), meera.id()]).await?;

        assert_eq!(removed, 2);
        assert!(ctx.users.list_all().await?.is_empty());
        Ok::<(), BoxError>(())
    })
}
