//! Domain ports for the hexagonal boundary.
//!
//! Inbound adapters depend on the domain services; the services depend on
//! these driven ports, implemented by the persistence adapters in
//! `outbound::persistence`.

mod recipe_repository;
mod role_repository;
mod user_repository;

pub use recipe_repository::{RecipeRepository, RecipeStoreError};
pub use role_repository::{RoleRepository, RoleStoreError};
pub use user_repository::{UserRepository, UserStoreError};
