//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    allergens, dietary_suitability, macro_ingredients, micro_ingredient_nutrients,
    micro_ingredients, nutrients, recipes, roles, user_roles, users,
};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub password_hash: String,
    #[expect(dead_code, reason = "schema field kept for audit queries")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading from the roles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RoleRow {
    pub id: i64,
    pub name: String,
}

/// Insertable struct for role assignments.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_roles)]
pub(crate) struct NewUserRoleRow {
    pub user_id: Uuid,
    pub role_id: i64,
}

// ---------------------------------------------------------------------------
// Recipe graph models
// ---------------------------------------------------------------------------

/// Row struct for reading from the recipes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeRow {
    pub id: i64,
    pub name: String,
    pub difficulty: String,
    #[expect(dead_code, reason = "schema field kept for audit queries")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new recipe records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipes)]
pub(crate) struct NewRecipeRow<'a> {
    pub name: &'a str,
    pub difficulty: &'a str,
}

/// Row struct for reading from the macro_ingredients table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = macro_ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MacroIngredientRow {
    pub id: i64,
    pub recipe_id: i64,
    pub name: String,
}

/// Insertable struct for macro-ingredient records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = macro_ingredients)]
pub(crate) struct NewMacroIngredientRow<'a> {
    pub recipe_id: i64,
    pub name: &'a str,
}

/// Row struct for reading from the micro_ingredients table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = micro_ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MicroIngredientRow {
    pub id: i64,
    pub macro_ingredient_id: i64,
    pub name: String,
}

/// Insertable struct for micro-ingredient records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = micro_ingredients)]
pub(crate) struct NewMicroIngredientRow<'a> {
    pub macro_ingredient_id: i64,
    pub name: &'a str,
}

/// Row struct for reading from the nutrients table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = nutrients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NutrientRow {
    pub id: i64,
    pub name: String,
}

/// Row struct for the micro-ingredient/nutrient junction.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = micro_ingredient_nutrients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MicroIngredientNutrientRow {
    pub micro_ingredient_id: i64,
    pub nutrient_id: i64,
}

/// Row struct for reading from the allergens table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = allergens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AllergenRow {
    #[expect(dead_code, reason = "surrogate key, ordering only")]
    pub id: i64,
    pub micro_ingredient_id: i64,
    pub name: String,
}

/// Insertable struct for allergen tags.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = allergens)]
pub(crate) struct NewAllergenRow<'a> {
    pub micro_ingredient_id: i64,
    pub name: &'a str,
}

/// Row struct for reading from the dietary_suitability table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = dietary_suitability)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DietaryTagRow {
    #[expect(dead_code, reason = "surrogate key, ordering only")]
    pub id: i64,
    pub recipe_id: i64,
    pub name: String,
}

/// Insertable struct for dietary-suitability tags.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = dietary_suitability)]
pub(crate) struct NewDietaryTagRow<'a> {
    pub recipe_id: i64,
    pub name: &'a str,
}
