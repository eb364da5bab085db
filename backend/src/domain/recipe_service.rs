//! Recipe search and persistence over the recipe repository.
//!
//! The repository performs the actual filter composition; this service owns
//! the error policy: persistence violations keep their category with an
//! enriched message, they are never downgraded to internal errors.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use super::filter::RecipeRequirements;
use super::ports::{RecipeRepository, RecipeStoreError};
use super::recipe::{NewRecipe, Recipe, RecipeId};
use super::Error;

/// Maps store failures on read paths to domain errors.
fn map_read_error(error: RecipeStoreError) -> Error {
    match error {
        RecipeStoreError::Connection { message } => Error::service_unavailable(message),
        other => Error::internal(other.to_string()),
    }
}

/// Filtered recipe lookup and whole-recipe persistence.
#[derive(Clone)]
pub struct RecipeService {
    recipes: Arc<dyn RecipeRepository>,
}

impl RecipeService {
    /// Create a service over the given recipe store.
    pub fn new(recipes: Arc<dyn RecipeRepository>) -> Self {
        Self { recipes }
    }

    /// Fetch recipes matching the given criteria.
    ///
    /// Absent or empty criteria impose no constraint; the result contains
    /// each matching recipe exactly once, ordered by id.
    pub async fn find_by_requirements(
        &self,
        requirements: &RecipeRequirements,
    ) -> Result<Vec<Recipe>, Error> {
        debug!(unconstrained = requirements.is_unconstrained(), "recipe search");
        self.recipes
            .find_by_requirements(requirements)
            .await
            .map_err(map_read_error)
    }

    /// Fetch one recipe by identifier.
    pub async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, Error> {
        self.recipes.find_by_id(id).await.map_err(map_read_error)
    }

    /// Validate and durably persist a recipe.
    ///
    /// An application-level validation failure and a database-level
    /// constraint violation each re-raise under their own category with an
    /// enriched message carrying the original violation details.
    pub async fn persist(&self, recipe: &NewRecipe) -> Result<RecipeId, Error> {
        if let Err(violation) = recipe.validate() {
            return Err(Error::validation(format!(
                "could not persist recipe due to validation error: {violation}"
            )));
        }

        match self.recipes.insert(recipe).await {
            Ok(id) => {
                info!(recipe = %recipe.name, id, "recipe persisted");
                Ok(id)
            }
            Err(RecipeStoreError::ConstraintViolation {
                constraint,
                message,
            }) => {
                let mut error = Error::constraint_violation(format!(
                    "could not persist recipe in database due to constraint violation: {message}"
                ));
                if let Some(name) = constraint {
                    error = error.with_details(json!({ "constraint": name }));
                }
                Err(error)
            }
            Err(RecipeStoreError::Connection { message }) => {
                Err(Error::service_unavailable(message))
            }
            Err(other) => Err(Error::internal(other.to_string())),
        }
    }
}
