//! Optional search criteria for the recipe filter.
//!
//! Each member is independent and only constrains the result set when both
//! present and non-empty; `None` and an empty collection mean the same
//! thing. Active criteria combine with logical AND.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::recipe::NutrientId;

/// Request-scoped filter criteria for recipe search. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequirements {
    /// Allergen names to exclude. Recipes with no allergen data remain
    /// included when this is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergens_to_avoid: Option<Vec<String>>,
    /// Diet names to include. Untagged recipes are excluded while active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suitable_for_diets: Option<Vec<String>>,
    /// Required nutrient ids; at least one must appear in the recipe's
    /// joined nutrient rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrient_ids: Option<Vec<NutrientId>>,
    /// Exact difficulty name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

/// Return `Some(slice)` only when the optional collection actually
/// constrains the query.
fn active<T>(values: Option<&Vec<T>>) -> Option<&[T]> {
    values.filter(|v| !v.is_empty()).map(Vec::as_slice)
}

impl RecipeRequirements {
    /// Allergen exclusion set, when it constrains the query.
    pub fn active_allergens(&self) -> Option<&[String]> {
        active(self.allergens_to_avoid.as_ref())
    }

    /// Diet inclusion set, when it constrains the query.
    pub fn active_diets(&self) -> Option<&[String]> {
        active(self.suitable_for_diets.as_ref())
    }

    /// Required nutrient id set, when it constrains the query.
    pub fn active_nutrient_ids(&self) -> Option<&[NutrientId]> {
        active(self.nutrient_ids.as_ref())
    }

    /// Difficulty constraint, when present and non-blank.
    pub fn active_difficulty(&self) -> Option<&str> {
        self.difficulty
            .as_deref()
            .filter(|value| !value.is_empty())
    }

    /// True when no member constrains the query at all.
    pub fn is_unconstrained(&self) -> bool {
        self.active_allergens().is_none()
            && self.active_diets().is_none()
            && self.active_nutrient_ids().is_none()
            && self.active_difficulty().is_none()
    }
}
