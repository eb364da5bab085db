//! Domain types, services, and ports.
//!
//! Everything in this module is transport and storage agnostic. Inbound
//! adapters translate HTTP payloads into these types; outbound adapters
//! implement the port traits in [`ports`].

pub mod auth;
pub mod credential_validator;
pub mod error;
pub mod filter;
pub mod password;
pub mod ports;
pub mod recipe;
pub mod recipe_service;
pub mod token;
pub mod user;
pub mod user_manager;

pub use self::auth::{CredentialsValidationError, LoginCredentials};
pub use self::credential_validator::CredentialValidator;
pub use self::error::{Error, ErrorCode};
pub use self::filter::RecipeRequirements;
pub use self::password::{PasswordHasher, Sha256PasswordHasher};
pub use self::recipe::{
    Allergen, MacroIngredient, MicroIngredient, NewRecipe, Nutrient, NutrientId, Recipe, RecipeId,
    RecipeValidationError,
};
pub use self::recipe_service::RecipeService;
pub use self::token::{OpaqueTokenIssuer, TokenIssuer};
pub use self::user::{Role, RoleId, User, Username, UsernameValidationError};
pub use self::user_manager::UserManager;

/// Convenient result alias for fallible domain operations.
pub type DomainResult<T> = Result<T, Error>;
