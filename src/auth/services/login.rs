//! Username/password login with role-based landing.

use crate::auth::domain::{DECOY_USERNAME, Landing, LoginGate, Session};
use crate::user::{
    domain::Username,
    ports::{UserRepository, UserRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;

/// Outcome of a login attempt that reached a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials matched an account.
    Authenticated {
        /// Session for the account.
        session: Session,
        /// Dashboard for the account's role.
        landing: Landing,
    },
    /// Credentials did not match; the client may try again.
    Rejected {
        /// One-based number of this failure.
        attempt: u32,
        /// Attempts left before diversion.
        remaining: u32,
    },
    /// The client is sent to the decoy page.
    Diverted,
}

impl LoginOutcome {
    /// Returns the landing target, or `None` when the client stays on the
    /// login form.
    #[must_use]
    pub const fn landing(&self) -> Option<Landing> {
        match self {
            Self::Authenticated { landing, .. } => Some(*landing),
            Self::Rejected { .. } => None,
            Self::Diverted => Some(Landing::Decoy),
        }
    }
}

/// Errors that prevent a login decision.
#[derive(Debug, Error)]
pub enum LoginError {
    /// Username or password was left empty.
    #[error("please enter both username and password")]
    MissingCredentials,
    /// Account lookup failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

/// Login service checking credentials against the user store.
#[derive(Clone)]
pub struct LoginService<U>
where
    U: UserRepository,
{
    users: Arc<U>,
}

impl<U> LoginService<U>
where
    U: UserRepository,
{
    /// Creates a new login service.
    #[must_use]
    pub const fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    /// Attempts a login for the client tracked by `gate`.
    ///
    /// Empty credentials are rejected without counting. The decoy username
    /// and a locked gate divert without touching the store. Each credential
    /// mismatch is counted; the third one locks the gate and diverts.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::MissingCredentials`] for empty input and
    /// [`LoginError::Repository`] when the account lookup fails.
    pub async fn login(
        &self,
        gate: &mut LoginGate,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome, LoginError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(LoginError::MissingCredentials);
        }

        if username.trim() == DECOY_USERNAME {
            tracing::info!("decoy username diverted");
            return Ok(LoginOutcome::Diverted);
        }

        if gate.is_locked() {
            tracing::warn!(username = %username.trim(), "login attempt on locked gate diverted");
            return Ok(LoginOutcome::Diverted);
        }

        let account = match Username::new(username) {
            Ok(parsed) => self.users.find_by_username(&parsed).await?,
            Err(_) => None,
        };

        match account {
            Some(user) if user.password().verify(password) => {
                gate.reset();
                let session = Session::for_user(&user);
                let landing = session.landing();
                tracing::info!(
                    user_id = %user.id(),
                    role = %user.role(),
                    "login succeeded"
                );
                Ok(LoginOutcome::Authenticated { session, landing })
            }
            _ => {
                let failure = gate.record_failure();
                tracing::warn!(
                    username = %username.trim(),
                    attempt = failure.attempt,
                    "login failed"
                );
                if gate.is_locked() {
                    Ok(LoginOutcome::Diverted)
                } else {
                    Ok(LoginOutcome::Rejected {
                        attempt: failure.attempt,
                        remaining: failure.remaining,
                    })
                }
            }
        }
    }
}
