//! Recipe aggregate and its nested ingredient graph.
//!
//! The nested collections (macro-ingredients, micro-ingredients, nutrients,
//! allergens, dietary tags) are read-only joined data on the query path;
//! only whole-recipe persistence mutates them.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identifier of a recipe record.
pub type RecipeId = i64;

/// Identifier of a nutrient reference record.
pub type NutrientId = i64;

/// Nutrient carried by a micro-ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Nutrient {
    /// Reference-data identifier used by the nutrient filter.
    pub id: NutrientId,
    /// Display name, e.g. `"protein"`.
    pub name: String,
}

/// Allergen tag carried by a micro-ingredient, matched by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Allergen {
    /// Allergen name, e.g. `"peanut"`.
    pub name: String,
}

/// Finer-grained ingredient carrying nutrient and allergen data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MicroIngredient {
    /// Ingredient name.
    pub name: String,
    /// Nutrients contributed by this ingredient.
    pub nutrients: Vec<Nutrient>,
    /// Allergens present in this ingredient. May be empty; absence of
    /// allergen data never counts as a match against an exclusion list.
    pub allergens: Vec<Allergen>,
}

/// Top-level ingredient of a recipe, composed of micro-ingredients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MacroIngredient {
    /// Ingredient name.
    pub name: String,
    /// Component micro-ingredients.
    pub micro_ingredients: Vec<MicroIngredient>,
}

/// Stored recipe with its eagerly loaded nested collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Stable identifier; search results are ordered by this field.
    pub id: RecipeId,
    /// Recipe name.
    pub name: String,
    /// Difficulty level name, matched exactly by the difficulty filter.
    pub difficulty: String,
    /// Top-level ingredients.
    pub macro_ingredients: Vec<MacroIngredient>,
    /// Diet names this recipe is suitable for. May be empty; the diet
    /// filter excludes untagged recipes while active.
    pub dietary_suitability: Vec<String>,
}

/// Recipe payload accepted by the persist path, validated before any store
/// call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    /// Recipe name; must be unique in the store.
    pub name: String,
    /// Difficulty level name.
    pub difficulty: String,
    /// Top-level ingredients.
    #[serde(default)]
    pub macro_ingredients: Vec<MacroIngredient>,
    /// Diet names this recipe is suitable for.
    #[serde(default)]
    pub dietary_suitability: Vec<String>,
}

/// Application-level validation failures raised before persisting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeValidationError {
    /// Recipe name was blank.
    EmptyName,
    /// Difficulty name was blank.
    EmptyDifficulty,
    /// A macro- or micro-ingredient had a blank name.
    EmptyIngredientName,
}

impl fmt::Display for RecipeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "recipe name must not be empty"),
            Self::EmptyDifficulty => write!(f, "recipe difficulty must not be empty"),
            Self::EmptyIngredientName => write!(f, "ingredient names must not be empty"),
        }
    }
}

impl std::error::Error for RecipeValidationError {}

impl NewRecipe {
    /// Check the payload against application-level rules.
    pub fn validate(&self) -> Result<(), RecipeValidationError> {
        if self.name.trim().is_empty() {
            return Err(RecipeValidationError::EmptyName);
        }
        if self.difficulty.trim().is_empty() {
            return Err(RecipeValidationError::EmptyDifficulty);
        }
        for macro_ingredient in &self.macro_ingredients {
            if macro_ingredient.name.trim().is_empty() {
                return Err(RecipeValidationError::EmptyIngredientName);
            }
            for micro_ingredient in &macro_ingredient.micro_ingredients {
                if micro_ingredient.name.trim().is_empty() {
                    return Err(RecipeValidationError::EmptyIngredientName);
                }
            }
        }
        Ok(())
    }
}
