//! Diesel persistence adapters implementing the domain ports.

mod diesel_recipe_repository;
mod diesel_role_repository;
mod diesel_user_repository;
mod error_mapping;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_recipe_repository::DieselRecipeRepository;
pub use diesel_role_repository::DieselRoleRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
