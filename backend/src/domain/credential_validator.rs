//! Credential validation over the user repository.
//!
//! Pure lookups with no side effects: existence checks and stored-hash
//! comparison. Store failures propagate to the caller as domain errors
//! rather than being folded into a `false` answer.

use std::sync::Arc;

use tracing::debug;

use super::password::PasswordHasher;
use super::ports::{UserRepository, UserStoreError};
use super::user::Username;
use super::Error;

/// Maps store failures on read paths to domain errors.
fn map_store_error(error: UserStoreError) -> Error {
    match error {
        UserStoreError::Connection { message } => Error::service_unavailable(message),
        other => Error::internal(other.to_string()),
    }
}

/// Checks whether a named user exists and whether a supplied password
/// matches the stored hash.
#[derive(Clone)]
pub struct CredentialValidator {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl CredentialValidator {
    /// Create a validator over the given store and hashing algorithm.
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// True iff a user with exactly this name exists in the store.
    pub async fn validate_user(&self, username: &Username) -> Result<bool, Error> {
        let user = self
            .users
            .find_by_name(username)
            .await
            .map_err(map_store_error)?;
        Ok(user.is_some())
    }

    /// True iff the user exists and the stored hash matches the hasher's
    /// digest of the supplied plaintext.
    pub async fn validate_password(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<bool, Error> {
        let Some(user) = self
            .users
            .find_by_name(username)
            .await
            .map_err(map_store_error)?
        else {
            debug!(user = %username, "password check for unknown user");
            return Ok(false);
        };

        Ok(self.hasher.verify(password, user.password_hash()))
    }
}
