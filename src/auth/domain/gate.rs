//! Failed-login bookkeeping for a single client.

/// Number of failed attempts after which a client is diverted.
pub const MAX_LOGIN_ATTEMPTS: u32 = 3;

/// Username that is always diverted to the decoy page.
pub const DECOY_USERNAME: &str = "mona";

/// Failed-attempt counter kept per client (one browser tab in the web
/// front end).
///
/// Once the limit is reached the gate stays locked; the caller drops it to
/// start over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginGate {
    failed_attempts: u32,
}

/// Result of recording a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailedAttempt {
    /// One-based number of this failure.
    pub attempt: u32,
    /// Attempts left before the gate locks.
    pub remaining: u32,
}

impl LoginGate {
    /// Creates a gate with no recorded failures.
    #[must_use]
    pub const fn new() -> Self {
        Self { failed_attempts: 0 }
    }

    /// Returns the number of failures recorded so far.
    #[must_use]
    pub const fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    /// Returns `true` once the failure limit has been reached.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.failed_attempts >= MAX_LOGIN_ATTEMPTS
    }

    /// Records a failed attempt.
    pub const fn record_failure(&mut self) -> FailedAttempt {
        self.failed_attempts = self.failed_attempts.saturating_add(1);
        FailedAttempt {
            attempt: self.failed_attempts,
            remaining: MAX_LOGIN_ATTEMPTS.saturating_sub(self.failed_attempts),
        }
    }

    /// Clears the failure count after a successful login.
    pub const fn reset(&mut self) {
        self.failed_attempts = 0;
    }
}
