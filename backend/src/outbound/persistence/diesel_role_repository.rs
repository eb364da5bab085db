//! PostgreSQL-backed `RoleRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RoleRepository, RoleStoreError};
use crate::domain::user::{Role, RoleId};

use super::error_mapping::{map_basic_diesel_error, pool_error_message};
use super::models::RoleRow;
use super::pool::{DbPool, PoolError};
use super::schema::roles;

/// Diesel-backed implementation of the `RoleRepository` port.
#[derive(Clone)]
pub struct DieselRoleRepository {
    pool: DbPool,
}

impl DieselRoleRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RoleStoreError {
    RoleStoreError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> RoleStoreError {
    map_basic_diesel_error(error, RoleStoreError::query, RoleStoreError::connection)
}

#[async_trait]
impl RoleRepository for DieselRoleRepository {
    async fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, RoleStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<RoleRow> = roles::table
            .find(id)
            .select(RoleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(|row| Role {
            id: row.id,
            name: row.name,
        }))
    }
}
