//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`
//! exactly. They are used by Diesel for compile-time query validation and
//! type-safe SQL generation; `diesel print-schema` can regenerate them from
//! a live database.

diesel::table! {
    /// User accounts.
    ///
    /// `name` carries a unique index (`users_name_key`).
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name.
        name -> Varchar,
        /// Stored password hash, opaque to the database.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Named permission groupings, reference data.
    roles (id) {
        id -> Int8,
        name -> Varchar,
    }
}

diesel::table! {
    /// Role assignments per user.
    user_roles (user_id, role_id) {
        user_id -> Uuid,
        role_id -> Int8,
    }
}

diesel::table! {
    /// Recipes with their difficulty level name.
    recipes (id) {
        id -> Int8,
        /// Unique recipe name (`recipes_name_key`).
        name -> Varchar,
        difficulty -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Top-level ingredients of a recipe.
    macro_ingredients (id) {
        id -> Int8,
        recipe_id -> Int8,
        name -> Varchar,
    }
}

diesel::table! {
    /// Finer-grained ingredients of a macro-ingredient.
    micro_ingredients (id) {
        id -> Int8,
        macro_ingredient_id -> Int8,
        name -> Varchar,
    }
}

diesel::table! {
    /// Nutrient reference data, targeted by the nutrient-id filter.
    nutrients (id) {
        id -> Int8,
        name -> Varchar,
    }
}

diesel::table! {
    /// Nutrients carried by a micro-ingredient.
    micro_ingredient_nutrients (micro_ingredient_id, nutrient_id) {
        micro_ingredient_id -> Int8,
        nutrient_id -> Int8,
    }
}

diesel::table! {
    /// Allergen tags on a micro-ingredient, matched by name.
    allergens (id) {
        id -> Int8,
        micro_ingredient_id -> Int8,
        name -> Varchar,
    }
}

diesel::table! {
    /// Diet names a recipe is suitable for.
    dietary_suitability (id) {
        id -> Int8,
        recipe_id -> Int8,
        name -> Varchar,
    }
}

diesel::joinable!(user_roles -> users (user_id));
diesel::joinable!(user_roles -> roles (role_id));
diesel::joinable!(macro_ingredients -> recipes (recipe_id));
diesel::joinable!(micro_ingredients -> macro_ingredients (macro_ingredient_id));
diesel::joinable!(micro_ingredient_nutrients -> micro_ingredients (micro_ingredient_id));
diesel::joinable!(micro_ingredient_nutrients -> nutrients (nutrient_id));
diesel::joinable!(allergens -> micro_ingredients (micro_ingredient_id));
diesel::joinable!(dietary_suitability -> recipes (recipe_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    roles,
    user_roles,
    recipes,
    macro_ingredients,
    micro_ingredients,
    nutrients,
    micro_ingredient_nutrients,
    allergens,
    dietary_suitability,
);
