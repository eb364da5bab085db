//! User lifecycle management: create, update, delete, and role
//! reassignment.
//!
//! Expected conditions (duplicate name, missing user or role) surface as
//! typed domain errors; anything else from the store becomes an internal
//! or service-unavailable error, never a silent failure.

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use super::password::PasswordHasher;
use super::ports::{RoleRepository, RoleStoreError, UserRepository, UserStoreError};
use super::user::{RoleId, User, Username};
use super::Error;

/// Maps unexpected user-store failures on manager paths.
fn map_unexpected(error: UserStoreError) -> Error {
    match error {
        UserStoreError::Connection { message } => Error::service_unavailable(message),
        other => Error::internal(other.to_string()),
    }
}

fn map_role_store_error(error: RoleStoreError) -> Error {
    match error {
        RoleStoreError::Connection { message } => Error::service_unavailable(message),
        RoleStoreError::Query { message } => Error::internal(message),
    }
}

fn unknown_user(name: &Username) -> Error {
    Error::not_found(format!("user: {name}, could not be found"))
}

/// Create/update/delete user records and role assignments.
#[derive(Clone)]
pub struct UserManager {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserManager {
    /// Create a manager over the given stores and hashing algorithm.
    pub fn new(
        users: Arc<dyn UserRepository>,
        roles: Arc<dyn RoleRepository>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            users,
            roles,
            hasher,
        }
    }

    /// Insert a new user record with a freshly hashed password.
    ///
    /// A duplicate name yields [`crate::domain::ErrorCode::Conflict`] and
    /// leaves the existing record untouched.
    pub async fn create_user(
        &self,
        name: &Username,
        password: &str,
        role_ids: Vec<RoleId>,
    ) -> Result<(), Error> {
        let user = User::new(
            Uuid::new_v4(),
            name.clone(),
            self.hasher.hash(password),
            role_ids,
        );

        match self.users.insert(&user).await {
            Ok(()) => {
                info!(user = %name, "user created");
                Ok(())
            }
            Err(UserStoreError::UniqueViolation { constraint }) => Err(Error::conflict(format!(
                "user: {name}, already exists"
            ))
            .with_details(json!({ "constraint": constraint }))),
            Err(other) => Err(map_unexpected(other)),
        }
    }

    /// Replace the password of the user matched by name.
    pub async fn update_user(&self, name: &Username, password: &str) -> Result<(), Error> {
        match self
            .users
            .update_password(name, &self.hasher.hash(password))
            .await
        {
            Ok(()) => {
                info!(user = %name, "user updated");
                Ok(())
            }
            Err(UserStoreError::NotFound) => Err(unknown_user(name)),
            Err(other) => Err(map_unexpected(other)),
        }
    }

    /// Remove the user record matched by name.
    pub async fn delete_user(&self, name: &Username) -> Result<(), Error> {
        match self.users.delete(name).await {
            Ok(()) => {
                info!(user = %name, "user deleted");
                Ok(())
            }
            Err(UserStoreError::NotFound) => Err(unknown_user(name)),
            Err(other) => Err(map_unexpected(other)),
        }
    }

    /// Reassign the user's role set after checking every role exists.
    pub async fn update_user_role(
        &self,
        name: &Username,
        role_ids: &[RoleId],
    ) -> Result<(), Error> {
        for role_id in role_ids {
            let role = self
                .roles
                .find_by_id(*role_id)
                .await
                .map_err(map_role_store_error)?;
            if role.is_none() {
                return Err(Error::not_found(format!(
                    "role: {role_id}, could not be found"
                )));
            }
        }

        match self.users.update_roles(name, role_ids).await {
            Ok(()) => {
                info!(user = %name, roles = ?role_ids, "user roles updated");
                Ok(())
            }
            Err(UserStoreError::NotFound) => Err(unknown_user(name)),
            Err(other) => Err(map_unexpected(other)),
        }
    }
}
