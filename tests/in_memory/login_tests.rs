//! Login landings and the failed-attempt lock.

use super::helpers::{MASTER_PASSWORD, MASTER_USERNAME, Office, office};
use rstest::rstest;
use taskdesk::auth::{
    domain::{Landing, LoginGate, MAX_LOGIN_ATTEMPTS},
    services::LoginOutcome,
};
use taskdesk::department::domain::DEFAULT_ADMIN_PASSWORD;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn each_role_lands_on_its_dashboard(#[future] office: Office) {
    let ctx = office.await;
    ctx.departments
        .create(&ctx.master, "Parks")
        .await
        .expect("department should be created");

    let master = ctx.sign_in(MASTER_USERNAME, MASTER_PASSWORD).await;
    let admin = ctx.sign_in("Admin_Parks", DEFAULT_ADMIN_PASSWORD).await;

    assert_eq!(master.landing(), Landing::MasterDashboard);
    assert_eq!(admin.landing(), Landing::AdminDashboard);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_failures_divert_even_correct_credentials(#[future] office: Office) {
    let ctx = office.await;
    let mut gate = LoginGate::new();

    for _ in 0..MAX_LOGIN_ATTEMPTS {
        ctx.login
            .login(&mut gate, MASTER_USERNAME, "wrong-password")
            .await
            .expect("login should reach a decision");
    }
    let outcome = ctx
        .login
        .login(&mut gate, MASTER_USERNAME, MASTER_PASSWORD)
        .await
        .expect("login should reach a decision");

    assert!(gate.is_locked());
    assert_eq!(outcome, LoginOutcome::Diverted);
    assert_eq!(outcome.landing(), Some(Landing::Decoy));
}
