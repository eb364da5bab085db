//! Shared HTTP adapter state.
//!
//! Handlers accept these bundles via `actix_web::web::Data`. Services are
//! constructed explicitly in `main` (or a test) and passed in; there is no
//! injection container. Auth and recipe handlers take separate bundles,
//! mirroring the two service surfaces.

use std::sync::Arc;

use crate::domain::{CredentialValidator, RecipeService, TokenIssuer, UserManager};

/// Dependency bundle for the auth handlers.
#[derive(Clone)]
pub struct AuthState {
    /// Existence and password checks for login.
    pub credentials: CredentialValidator,
    /// Bearer token issuance for validated identities.
    pub tokens: Arc<dyn TokenIssuer>,
    /// User lifecycle operations.
    pub users: UserManager,
}

/// Dependency bundle for the recipe handlers.
#[derive(Clone)]
pub struct RecipeState {
    /// Filtered recipe search and persistence.
    pub recipes: RecipeService,
}
