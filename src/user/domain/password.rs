//! Password input and bcrypt hash types.

use super::UserDomainError;
use bcrypt::DEFAULT_COST;
use std::fmt;

/// Minimum password length accepted by directory operations.
pub const MIN_PASSWORD_LENGTH: usize = 6;

const BCRYPT_VERSIONS: [&str; 4] = ["2a", "2b", "2x", "2y"];
const BCRYPT_PAYLOAD_LENGTH: usize = 53;

/// Plaintext password supplied when creating or updating an account.
///
/// The value is trimmed on construction and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Creates a validated password.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::PasswordTooShort`] when the trimmed value is
    /// shorter than [`MIN_PASSWORD_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(UserDomainError::PasswordTooShort {
                minimum: MIN_PASSWORD_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the plaintext value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Bcrypt hash of a password, stored in the modular crypt format
/// `$2b$<cost>$<salt+hash>`.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    hash: String,
}

impl PasswordDigest {
    /// Hashes the password with a fresh salt at [`DEFAULT_COST`].
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::PasswordHashing`] when the hasher rejects
    /// the input.
    pub fn derive(password: &Password) -> Result<Self, UserDomainError> {
        let hash = bcrypt::hash(password.expose(), DEFAULT_COST)
            .map_err(|err| UserDomainError::PasswordHashing(err.to_string()))?;
        Ok(Self { hash })
    }

    /// Parses a stored bcrypt hash.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::MalformedPasswordDigest`] when the value is
    /// not a `$2a$`, `$2b$`, `$2x$` or `$2y$` hash with a two-digit cost and a
    /// 53-character payload.
    pub fn parse(stored: &str) -> Result<Self, UserDomainError> {
        if !is_bcrypt_hash(stored) {
            return Err(UserDomainError::MalformedPasswordDigest);
        }
        Ok(Self {
            hash: stored.to_owned(),
        })
    }

    /// Returns `true` when the candidate plaintext matches this hash.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        bcrypt::verify(candidate, &self.hash).is_ok_and(|matched| matched)
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub fn to_storage(&self) -> String {
        self.hash.clone()
    }

    /// Returns the work factor encoded in the hash.
    #[must_use]
    pub fn cost(&self) -> Option<u32> {
        self.hash
            .split('$')
            .nth(2)
            .and_then(|cost| cost.parse().ok())
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordDigest")
            .field("cost", &self.cost())
            .finish_non_exhaustive()
    }
}

fn is_bcrypt_hash(stored: &str) -> bool {
    let mut parts = stored.split('$');
    let leading = parts.next();
    let version = parts.next().unwrap_or_default();
    let cost = parts.next().unwrap_or_default();
    let payload = parts.next().unwrap_or_default();

    leading == Some("")
        && parts.next().is_none()
        && BCRYPT_VERSIONS.contains(&version)
        && cost.len() == 2
        && cost.parse::<u32>().is_ok_and(|value| (4..=31).contains(&value))
        && payload.len() == BCRYPT_PAYLOAD_LENGTH
        && payload
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '/')
}
