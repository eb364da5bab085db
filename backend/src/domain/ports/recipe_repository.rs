//! Port abstraction for recipe persistence and filtered search.

use async_trait::async_trait;

use crate::domain::filter::RecipeRequirements;
use crate::domain::recipe::{NewRecipe, Recipe, RecipeId};

/// Persistence errors raised by recipe repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeStoreError {
    /// Store connection could not be established.
    #[error("recipe store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("recipe store query failed: {message}")]
    Query { message: String },
    /// A database constraint rejected the write. Carries the constraint
    /// name when the backend reports one.
    #[error("recipe store constraint violated: {message}")]
    ConstraintViolation {
        constraint: Option<String>,
        message: String,
    },
}

impl RecipeStoreError {
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

    /// Constraint violation, preserving the original constraint name.
    pub fn constraint_violation(
        constraint: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ConstraintViolation {
            constraint,
            message: message.into(),
        }
    }
}

/// Driven port for recipe persistence and search.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Fetch recipes matching the given criteria, eagerly loading the
    /// nested collections. The result contains each matching recipe
    /// exactly once, ordered by recipe id ascending.
    async fn find_by_requirements(
        &self,
        requirements: &RecipeRequirements,
    ) -> Result<Vec<Recipe>, RecipeStoreError>;

    /// Fetch one recipe by identifier with its nested collections.
    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RecipeStoreError>;

    /// Insert a recipe and its nested rows in one transaction, returning
    /// the new identifier. Constraint failures surface as
    /// [`RecipeStoreError::ConstraintViolation`].
    async fn insert(&self, recipe: &NewRecipe) -> Result<RecipeId, RecipeStoreError>;
}
