//! PostgreSQL-backed `RecipeRepository` implementation using Diesel.
//!
//! The filtered search runs in two phases. Phase one composes a boxed query
//! over the recipes table, adding one id-subselect predicate per active
//! criterion; selecting from the base table keeps the result free of join
//! duplicates and ordering by id keeps it deterministic. Phase two eagerly
//! loads the nested collections for the matched ids and reassembles the
//! aggregate in memory.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::filter::RecipeRequirements;
use crate::domain::ports::{RecipeRepository, RecipeStoreError};
use crate::domain::recipe::{
    MacroIngredient, MicroIngredient, NewRecipe, Nutrient, Recipe, RecipeId,
};

use super::error_mapping::{log_diesel_error, map_basic_diesel_error, pool_error_message};
use super::models::{
    AllergenRow, DietaryTagRow, MacroIngredientRow, MicroIngredientNutrientRow,
    MicroIngredientRow, NewAllergenRow, NewDietaryTagRow, NewMacroIngredientRow,
    NewMicroIngredientRow, NewRecipeRow, NutrientRow, RecipeRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{
    allergens, dietary_suitability, macro_ingredients, micro_ingredient_nutrients,
    micro_ingredients, nutrients, recipes,
};

/// Diesel-backed implementation of the `RecipeRepository` port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecipeStoreError {
    RecipeStoreError::connection(pool_error_message(error))
}

fn map_read_error(error: diesel::result::Error) -> RecipeStoreError {
    map_basic_diesel_error(error, RecipeStoreError::query, RecipeStoreError::connection)
}

/// Map Diesel errors on the write path, keeping constraint details.
fn map_write_error(error: diesel::result::Error) -> RecipeStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    log_diesel_error(&error);

    match error {
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::UniqueViolation
            | DatabaseErrorKind::ForeignKeyViolation
            | DatabaseErrorKind::NotNullViolation
            | DatabaseErrorKind::CheckViolation => RecipeStoreError::constraint_violation(
                info.constraint_name().map(ToOwned::to_owned),
                info.message().to_owned(),
            ),
            DatabaseErrorKind::ClosedConnection => {
                RecipeStoreError::connection("database connection error")
            }
            _ => RecipeStoreError::query(info.message().to_owned()),
        },
        _ => RecipeStoreError::query("database error"),
    }
}

type RecipesQuery = diesel::dsl::IntoBoxed<
    'static,
    diesel::dsl::Select<recipes::table, diesel::dsl::AsSelect<RecipeRow, diesel::pg::Pg>>,
    diesel::pg::Pg,
>;

/// Compose the filter query: one id-subselect predicate per active
/// criterion, ordered by recipe id.
fn filtered_query(requirements: &RecipeRequirements) -> RecipesQuery {
    let mut query = recipes::table
        .select(RecipeRow::as_select())
        .into_boxed();

    if let Some(names) = requirements.active_allergens() {
        // Exclusion is recipe-level: a recipe with any offending allergen
        // drops out, while recipes with no allergen rows stay.
        let offending = allergens::table
            .inner_join(micro_ingredients::table.inner_join(macro_ingredients::table))
            .filter(allergens::name.eq_any(names.to_vec()))
            .select(macro_ingredients::recipe_id);
        query = query.filter(recipes::id.ne_all(offending));
    }

    if let Some(diets) = requirements.active_diets() {
        // Inclusion semantics: untagged recipes cannot match.
        let tagged = dietary_suitability::table
            .filter(dietary_suitability::name.eq_any(diets.to_vec()))
            .select(dietary_suitability::recipe_id);
        query = query.filter(recipes::id.eq_any(tagged));
    }

    if let Some(nutrient_ids) = requirements.active_nutrient_ids() {
        let matching = micro_ingredient_nutrients::table
            .inner_join(micro_ingredients::table.inner_join(macro_ingredients::table))
            .filter(micro_ingredient_nutrients::nutrient_id.eq_any(nutrient_ids.to_vec()))
            .select(macro_ingredients::recipe_id);
        query = query.filter(recipes::id.eq_any(matching));
    }

    if let Some(difficulty) = requirements.active_difficulty() {
        query = query.filter(recipes::difficulty.eq(difficulty.to_owned()));
    }

    query.order(recipes::id.asc())
}

/// Eagerly load the nested collections for the given recipe rows and
/// reassemble the aggregates, preserving the row order.
async fn load_recipe_graph(
    conn: &mut AsyncPgConnection,
    recipe_rows: Vec<RecipeRow>,
) -> Result<Vec<Recipe>, diesel::result::Error> {
    if recipe_rows.is_empty() {
        return Ok(Vec::new());
    }

    let recipe_ids: Vec<i64> = recipe_rows.iter().map(|row| row.id).collect();

    let macro_rows: Vec<MacroIngredientRow> = macro_ingredients::table
        .filter(macro_ingredients::recipe_id.eq_any(&recipe_ids))
        .order(macro_ingredients::id.asc())
        .select(MacroIngredientRow::as_select())
        .load(conn)
        .await?;
    let macro_ids: Vec<i64> = macro_rows.iter().map(|row| row.id).collect();

    let micro_rows: Vec<MicroIngredientRow> = if macro_ids.is_empty() {
        Vec::new()
    } else {
        micro_ingredients::table
            .filter(micro_ingredients::macro_ingredient_id.eq_any(&macro_ids))
            .order(micro_ingredients::id.asc())
            .select(MicroIngredientRow::as_select())
            .load(conn)
            .await?
    };
    let micro_ids: Vec<i64> = micro_rows.iter().map(|row| row.id).collect();

    let (nutrient_rows, allergen_rows) = if micro_ids.is_empty() {
        (Vec::new(), Vec::new())
    } else {
        let nutrient_rows: Vec<(MicroIngredientNutrientRow, NutrientRow)> =
            micro_ingredient_nutrients::table
                .inner_join(nutrients::table)
                .filter(micro_ingredient_nutrients::micro_ingredient_id.eq_any(&micro_ids))
                .order(nutrients::id.asc())
                .select((
                    MicroIngredientNutrientRow::as_select(),
                    NutrientRow::as_select(),
                ))
                .load(conn)
                .await?;

        let allergen_rows: Vec<AllergenRow> = allergens::table
            .filter(allergens::micro_ingredient_id.eq_any(&micro_ids))
            .order(allergens::id.asc())
            .select(AllergenRow::as_select())
            .load(conn)
            .await?;

        (nutrient_rows, allergen_rows)
    };

    let tag_rows: Vec<DietaryTagRow> = dietary_suitability::table
        .filter(dietary_suitability::recipe_id.eq_any(&recipe_ids))
        .order(dietary_suitability::id.asc())
        .select(DietaryTagRow::as_select())
        .load(conn)
        .await?;

    Ok(assemble(
        recipe_rows,
        macro_rows,
        micro_rows,
        nutrient_rows,
        allergen_rows,
        tag_rows,
    ))
}

fn assemble(
    recipe_rows: Vec<RecipeRow>,
    macro_rows: Vec<MacroIngredientRow>,
    micro_rows: Vec<MicroIngredientRow>,
    nutrient_rows: Vec<(MicroIngredientNutrientRow, NutrientRow)>,
    allergen_rows: Vec<AllergenRow>,
    tag_rows: Vec<DietaryTagRow>,
) -> Vec<Recipe> {
    let mut nutrients_by_micro: HashMap<i64, Vec<Nutrient>> = HashMap::new();
    for (link, nutrient) in nutrient_rows {
        nutrients_by_micro
            .entry(link.micro_ingredient_id)
            .or_default()
            .push(Nutrient {
                id: nutrient.id,
                name: nutrient.name,
            });
    }

    let mut allergens_by_micro: HashMap<i64, Vec<crate::domain::recipe::Allergen>> =
        HashMap::new();
    for row in allergen_rows {
        allergens_by_micro
            .entry(row.micro_ingredient_id)
            .or_default()
            .push(crate::domain::recipe::Allergen { name: row.name });
    }

    let mut micros_by_macro: HashMap<i64, Vec<MicroIngredient>> = HashMap::new();
    for row in micro_rows {
        let micro = MicroIngredient {
            name: row.name,
            nutrients: nutrients_by_micro.remove(&row.id).unwrap_or_default(),
            allergens: allergens_by_micro.remove(&row.id).unwrap_or_default(),
        };
        micros_by_macro
            .entry(row.macro_ingredient_id)
            .or_default()
            .push(micro);
    }

    let mut macros_by_recipe: HashMap<i64, Vec<MacroIngredient>> = HashMap::new();
    for row in macro_rows {
        let macro_ingredient = MacroIngredient {
            name: row.name,
            micro_ingredients: micros_by_macro.remove(&row.id).unwrap_or_default(),
        };
        macros_by_recipe
            .entry(row.recipe_id)
            .or_default()
            .push(macro_ingredient);
    }

    let mut tags_by_recipe: HashMap<i64, Vec<String>> = HashMap::new();
    for row in tag_rows {
        tags_by_recipe.entry(row.recipe_id).or_default().push(row.name);
    }

    recipe_rows
        .into_iter()
        .map(|row| Recipe {
            id: row.id,
            name: row.name,
            difficulty: row.difficulty,
            macro_ingredients: macros_by_recipe.remove(&row.id).unwrap_or_default(),
            dietary_suitability: tags_by_recipe.remove(&row.id).unwrap_or_default(),
        })
        .collect()
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn find_by_requirements(
        &self,
        requirements: &RecipeRequirements,
    ) -> Result<Vec<Recipe>, RecipeStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let recipe_rows: Vec<RecipeRow> = filtered_query(requirements)
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        load_recipe_graph(&mut conn, recipe_rows)
            .await
            .map_err(map_read_error)
    }

    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RecipeStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<RecipeRow> = recipes::table
            .find(id)
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut loaded = load_recipe_graph(&mut conn, vec![row])
            .await
            .map_err(map_read_error)?;
        Ok(loaded.pop())
    }

    async fn insert(&self, recipe: &NewRecipe) -> Result<RecipeId, RecipeStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let recipe_id: i64 = diesel::insert_into(recipes::table)
                    .values(NewRecipeRow {
                        name: &recipe.name,
                        difficulty: &recipe.difficulty,
                    })
                    .returning(recipes::id)
                    .get_result(conn)
                    .await?;

                let tag_rows: Vec<NewDietaryTagRow<'_>> = recipe
                    .dietary_suitability
                    .iter()
                    .map(|name| NewDietaryTagRow { recipe_id, name })
                    .collect();
                if !tag_rows.is_empty() {
                    diesel::insert_into(dietary_suitability::table)
                        .values(&tag_rows)
                        .execute(conn)
                        .await?;
                }

                for macro_ingredient in &recipe.macro_ingredients {
                    let macro_id: i64 = diesel::insert_into(macro_ingredients::table)
                        .values(NewMacroIngredientRow {
                            recipe_id,
                            name: &macro_ingredient.name,
                        })
                        .returning(macro_ingredients::id)
                        .get_result(conn)
                        .await?;

                    for micro_ingredient in &macro_ingredient.micro_ingredients {
                        let micro_id: i64 = diesel::insert_into(micro_ingredients::table)
                            .values(NewMicroIngredientRow {
                                macro_ingredient_id: macro_id,
                                name: &micro_ingredient.name,
                            })
                            .returning(micro_ingredients::id)
                            .get_result(conn)
                            .await?;

                        let allergen_rows: Vec<NewAllergenRow<'_>> = micro_ingredient
                            .allergens
                            .iter()
                            .map(|allergen| NewAllergenRow {
                                micro_ingredient_id: micro_id,
                                name: &allergen.name,
                            })
                            .collect();
                        if !allergen_rows.is_empty() {
                            diesel::insert_into(allergens::table)
                                .values(&allergen_rows)
                                .execute(conn)
                                .await?;
                        }

                        // Nutrients are reference data; an unknown id fails
                        // the foreign key and rolls the transaction back.
                        let nutrient_links: Vec<MicroIngredientNutrientRow> = micro_ingredient
                            .nutrients
                            .iter()
                            .map(|nutrient| MicroIngredientNutrientRow {
                                micro_ingredient_id: micro_id,
                                nutrient_id: nutrient.id,
                            })
                            .collect();
                        if !nutrient_links.is_empty() {
                            diesel::insert_into(micro_ingredient_nutrients::table)
                                .values(&nutrient_links)
                                .execute(conn)
                                .await?;
                        }
                    }
                }

                Ok(recipe_id)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_write_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the filter composition and the in-memory
    //! assembly step.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn sql_for(requirements: &RecipeRequirements) -> String {
        diesel::debug_query::<diesel::pg::Pg, _>(&filtered_query(requirements)).to_string()
    }

    #[test]
    fn unconstrained_query_scans_only_the_recipes_table() {
        let sql = sql_for(&RecipeRequirements::default());

        assert!(sql.contains(r#"FROM "recipes""#));
        assert!(sql.contains("ORDER BY"));
        assert!(!sql.contains("allergens"));
        assert!(!sql.contains("dietary_suitability"));
        assert!(!sql.contains("micro_ingredient_nutrients"));
        assert!(!sql.contains(r#""difficulty" = "#));
    }

    #[rstest]
    #[case::allergens(
        RecipeRequirements {
            allergens_to_avoid: Some(vec!["peanut".into()]),
            ..RecipeRequirements::default()
        },
        "allergens",
        "peanut"
    )]
    #[case::diets(
        RecipeRequirements {
            suitable_for_diets: Some(vec!["vegan".into()]),
            ..RecipeRequirements::default()
        },
        "dietary_suitability",
        "vegan"
    )]
    #[case::nutrients(
        RecipeRequirements {
            nutrient_ids: Some(vec![7]),
            ..RecipeRequirements::default()
        },
        "micro_ingredient_nutrients",
        "7"
    )]
    #[case::difficulty(
        RecipeRequirements {
            difficulty: Some("easy".into()),
            ..RecipeRequirements::default()
        },
        r#""difficulty" = "#,
        "easy"
    )]
    fn each_active_criterion_adds_its_predicate(
        #[case] requirements: RecipeRequirements,
        #[case] fragment: &str,
        #[case] bind: &str,
    ) {
        let sql = sql_for(&requirements);

        assert!(sql.contains(fragment), "missing predicate in: {sql}");
        assert!(sql.contains(bind), "missing bind value in: {sql}");
    }

    #[test]
    fn allergen_exclusion_negates_a_recipe_id_subselect() {
        let sql = sql_for(&RecipeRequirements {
            allergens_to_avoid: Some(vec!["peanut".into()]),
            ..RecipeRequirements::default()
        });

        // The predicate must compare recipe ids against a subselect, not
        // filter joined rows; that is what keeps allergen-free recipes in.
        let negated = sql.contains(r#""recipes"."id" != ALL"#)
            || sql.contains(r#""recipes"."id" NOT IN"#);
        assert!(negated, "sql was: {sql}");
        assert!(sql.contains(r#""macro_ingredients"."recipe_id""#));
    }

    #[test]
    fn combined_criteria_all_appear_in_one_statement() {
        let sql = sql_for(&RecipeRequirements {
            allergens_to_avoid: Some(vec!["peanut".into()]),
            suitable_for_diets: Some(vec!["vegan".into()]),
            nutrient_ids: Some(vec![7]),
            difficulty: Some("easy".into()),
        });

        assert!(sql.contains("allergens"));
        assert!(sql.contains("dietary_suitability"));
        assert!(sql.contains("micro_ingredient_nutrients"));
        assert!(sql.contains(r#""difficulty" = "#));
        assert!(sql.contains("ORDER BY"));
    }

    fn recipe_row(id: i64, name: &str) -> RecipeRow {
        RecipeRow {
            id,
            name: name.into(),
            difficulty: "easy".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn assemble_groups_nested_rows_under_their_parents() {
        let recipes = vec![recipe_row(1, "pasta"), recipe_row(2, "salad")];
        let macros = vec![
            MacroIngredientRow {
                id: 10,
                recipe_id: 1,
                name: "sauce".into(),
            },
            MacroIngredientRow {
                id: 11,
                recipe_id: 1,
                name: "base".into(),
            },
        ];
        let micros = vec![MicroIngredientRow {
            id: 100,
            macro_ingredient_id: 10,
            name: "tomato".into(),
        }];
        let nutrient_links = vec![(
            MicroIngredientNutrientRow {
                micro_ingredient_id: 100,
                nutrient_id: 5,
            },
            NutrientRow {
                id: 5,
                name: "vitamin c".into(),
            },
        )];
        let allergen_rows = vec![AllergenRow {
            id: 1000,
            micro_ingredient_id: 100,
            name: "peanut".into(),
        }];
        let tags = vec![DietaryTagRow {
            id: 7,
            recipe_id: 2,
            name: "vegan".into(),
        }];

        let assembled = assemble(recipes, macros, micros, nutrient_links, allergen_rows, tags);

        assert_eq!(assembled.len(), 2);
        let pasta = &assembled[0];
        assert_eq!(pasta.id, 1);
        assert_eq!(pasta.macro_ingredients.len(), 2);
        let sauce = &pasta.macro_ingredients[0];
        assert_eq!(sauce.micro_ingredients.len(), 1);
        assert_eq!(sauce.micro_ingredients[0].nutrients[0].id, 5);
        assert_eq!(sauce.micro_ingredients[0].allergens[0].name, "peanut");
        assert!(pasta.dietary_suitability.is_empty());

        let salad = &assembled[1];
        assert!(salad.macro_ingredients.is_empty());
        assert_eq!(salad.dietary_suitability, vec!["vegan".to_owned()]);
    }

    #[test]
    fn assemble_preserves_input_order_and_yields_each_recipe_once() {
        let recipes = vec![recipe_row(3, "c"), recipe_row(5, "e"), recipe_row(9, "i")];
        let assembled = assemble(
            recipes,
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );
        let ids: Vec<i64> = assembled.iter().map(|recipe| recipe.id).collect();
        assert_eq!(ids, vec![3, 5, 9]);
    }
}
