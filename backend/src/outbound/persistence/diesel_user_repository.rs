//! PostgreSQL-backed `UserRepository` implementation using Diesel.
//!
//! Unique-index rejections keep the constraint name so the user manager can
//! report a precise conflict; `update`/`delete` report zero affected rows as
//! `NotFound` instead of succeeding silently.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{UserRepository, UserStoreError};
use crate::domain::user::{RoleId, User, Username};

use super::error_mapping::{log_diesel_error, pool_error_message};
use super::models::{NewUserRoleRow, NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{user_roles, users};

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserStoreError {
    UserStoreError::connection(pool_error_message(error))
}

/// Map Diesel errors, surfacing unique violations with their constraint
/// name.
fn map_diesel_error(error: diesel::result::Error) -> UserStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    log_diesel_error(&error);

    match error {
        DieselError::NotFound => UserStoreError::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            UserStoreError::unique_violation(
                info.constraint_name().unwrap_or("unique constraint"),
            )
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserStoreError::connection("database connection error")
        }
        DieselError::DatabaseError(_, info) => UserStoreError::query(info.message().to_owned()),
        _ => UserStoreError::query("database error"),
    }
}

async fn load_role_ids(
    conn: &mut diesel_async::AsyncPgConnection,
    user_id: Uuid,
) -> Result<Vec<RoleId>, diesel::result::Error> {
    user_roles::table
        .filter(user_roles::user_id.eq(user_id))
        .order(user_roles::role_id.asc())
        .select(user_roles::role_id)
        .load(conn)
        .await
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_name(&self, name: &Username) -> Result<Option<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::name.eq(name.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let role_ids = load_role_ids(&mut conn, row.id)
            .await
            .map_err(map_diesel_error)?;

        let name = Username::new(&row.name)
            .map_err(|err| UserStoreError::query(format!("corrupt user name: {err}")))?;
        Ok(Some(User::new(row.id, name, row.password_hash, role_ids)))
    }

    async fn insert(&self, user: &User) -> Result<(), UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: user.id(),
            name: user.name().as_ref(),
            password_hash: user.password_hash(),
        };
        let role_rows: Vec<NewUserRoleRow> = user
            .role_ids()
            .iter()
            .map(|role_id| NewUserRoleRow {
                user_id: user.id(),
                role_id: *role_id,
            })
            .collect();

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(users::table)
                    .values(&new_row)
                    .execute(conn)
                    .await?;

                if !role_rows.is_empty() {
                    diesel::insert_into(user_roles::table)
                        .values(&role_rows)
                        .execute(conn)
                        .await?;
                }

                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn update_password(
        &self,
        name: &Username,
        password_hash: &str,
    ) -> Result<(), UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::update(users::table.filter(users::name.eq(name.as_ref())))
            .set(users::password_hash.eq(password_hash))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if affected == 0 {
            return Err(UserStoreError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, name: &Username) -> Result<(), UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // user_roles rows go with the user via ON DELETE CASCADE.
        let affected = diesel::delete(users::table.filter(users::name.eq(name.as_ref())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if affected == 0 {
            return Err(UserStoreError::NotFound);
        }
        Ok(())
    }

    async fn update_roles(
        &self,
        name: &Username,
        roles: &[RoleId],
    ) -> Result<(), UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let roles = roles.to_vec();
        let name = name.as_ref().to_owned();

        conn.transaction(|conn| {
            async move {
                let user_id: Option<Uuid> = users::table
                    .filter(users::name.eq(&name))
                    .select(users::id)
                    .first(conn)
                    .await
                    .optional()?;

                let Some(user_id) = user_id else {
                    return Err(diesel::result::Error::NotFound);
                };

                diesel::delete(user_roles::table.filter(user_roles::user_id.eq(user_id)))
                    .execute(conn)
                    .await?;

                let role_rows: Vec<NewUserRoleRow> = roles
                    .iter()
                    .map(|role_id| NewUserRoleRow {
                        user_id,
                        role_id: *role_id,
                    })
                    .collect();

                if !role_rows.is_empty() {
                    diesel::insert_into(user_roles::table)
                        .values(&role_rows)
                        .execute(conn)
                        .await?;
                }

                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
