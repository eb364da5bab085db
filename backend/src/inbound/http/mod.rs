//! HTTP inbound adapter: actix handlers, shared state, and error mapping.

pub mod auth;
pub mod error;
pub mod health;
pub mod recipes;
pub mod state;

pub use error::ApiResult;
pub use state::{AuthState, RecipeState};
