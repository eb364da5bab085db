//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::user::{RoleId, User, Username};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserStoreError {
    /// Store connection could not be established.
    #[error("user store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query { message: String },
    /// A unique index rejected the write, e.g. a duplicate user name.
    #[error("user store unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },
    /// The targeted record does not exist.
    #[error("user record not found")]
    NotFound,
}

impl UserStoreError {
    /// Connection failure with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Query failure with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Unique violation naming the offending constraint.
    pub fn unique_violation(constraint: impl Into<String>) -> Self {
        Self::UniqueViolation {
            constraint: constraint.into(),
        }
    }
}

/// Driven port for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by exact name, including assigned role ids.
    async fn find_by_name(&self, name: &Username) -> Result<Option<User>, UserStoreError>;

    /// Insert a new user record. Duplicate names surface as
    /// [`UserStoreError::UniqueViolation`].
    async fn insert(&self, user: &User) -> Result<(), UserStoreError>;

    /// Replace the stored password hash of the user matched by name. Fails
    /// with [`UserStoreError::NotFound`] when absent.
    async fn update_password(
        &self,
        name: &Username,
        password_hash: &str,
    ) -> Result<(), UserStoreError>;

    /// Remove the user record matched by name. Fails with
    /// [`UserStoreError::NotFound`] when absent.
    async fn delete(&self, name: &Username) -> Result<(), UserStoreError>;

    /// Reassign the user's role set. Fails with
    /// [`UserStoreError::NotFound`] when the user is absent.
    async fn update_roles(&self, name: &Username, roles: &[RoleId])
        -> Result<(), UserStoreError>;
}
