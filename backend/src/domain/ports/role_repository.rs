//! Port abstraction for role lookups.

use async_trait::async_trait;

use crate::domain::user::{Role, RoleId};

/// Persistence errors raised by role repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoleStoreError {
    /// Store connection could not be established.
    #[error("role store connection failed: {message}")]
    Connection { message: String },
    /// Query failed during execution.
    #[error("role store query failed: {message}")]
    Query { message: String },
}

impl RoleStoreError {
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
}

/// Driven port for role lookups. Roles are read-only reference data here.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Fetch a role by identifier.
    async fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, RoleStoreError>;
}
