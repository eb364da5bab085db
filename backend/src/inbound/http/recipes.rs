//! Recipe API handlers.
//!
//! ```text
//! POST /api/recipes/search {"allergensToAvoid":["peanut"],"difficulty":"easy"}
//! POST /api/recipes        {"name":"pasta","difficulty":"easy", ...}
//! GET  /api/recipes/{id}
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, NewRecipe, Recipe, RecipeId, RecipeRequirements};
use crate::inbound::http::state::RecipeState;
use crate::inbound::http::ApiResult;

/// Response for a successfully persisted recipe.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCreatedResponse {
    /// Identifier assigned by the store.
    pub id: RecipeId,
}

/// Search recipes by dietary requirements.
///
/// Absent or empty criteria impose no constraint, so an empty body returns
/// every recipe.
#[utoipa::path(
    post,
    path = "/api/recipes/search",
    request_body = RecipeRequirements,
    responses(
        (status = 200, description = "Matching recipes", body = [Recipe]),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "searchRecipes"
)]
#[post("/search")]
pub async fn search_recipes(
    state: web::Data<RecipeState>,
    requirements: web::Json<RecipeRequirements>,
) -> ApiResult<web::Json<Vec<Recipe>>> {
    let found = state.recipes.find_by_requirements(&requirements).await?;
    Ok(web::Json(found))
}

/// Persist a new recipe with its full ingredient graph.
#[utoipa::path(
    post,
    path = "/api/recipes",
    request_body = NewRecipe,
    responses(
        (status = 201, description = "Recipe persisted", body = RecipeCreatedResponse),
        (status = 400, description = "Validation failure", body = Error),
        (status = 409, description = "Constraint violation", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("")]
pub async fn create_recipe(
    state: web::Data<RecipeState>,
    payload: web::Json<NewRecipe>,
) -> ApiResult<HttpResponse> {
    let id = state.recipes.persist(&payload).await?;
    Ok(HttpResponse::Created().json(RecipeCreatedResponse { id }))
}

/// Fetch one recipe by identifier.
#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Recipe found", body = Recipe),
        (status = 404, description = "Unknown recipe", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe"
)]
#[get("/{id}")]
pub async fn get_recipe(
    state: web::Data<RecipeState>,
    id: web::Path<RecipeId>,
) -> ApiResult<web::Json<Recipe>> {
    let id = id.into_inner();
    let recipe = state.recipes.find_by_id(id).await?.ok_or_else(|| {
        Error::not_found(format!("recipe: {id}, could not be found"))
    })?;
    Ok(web::Json(recipe))
}

#[cfg(test)]
mod tests {
    //! Handler coverage against an in-memory store.
    use std::sync::{Arc, Mutex};

    use actix_web::{test as actix_test, web, App};
    use async_trait::async_trait;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{RecipeRepository, RecipeStoreError};
    use crate::domain::recipe::{Allergen, MacroIngredient, MicroIngredient, Nutrient};
    use crate::domain::RecipeService;

    #[derive(Default)]
    struct MemoryRecipeRepository {
        recipes: Mutex<Vec<Recipe>>,
        insert_failure: Option<RecipeStoreError>,
    }

    impl MemoryRecipeRepository {
        fn with_recipes(recipes: Vec<Recipe>) -> Self {
            Self {
                recipes: Mutex::new(recipes),
                insert_failure: None,
            }
        }

        fn with_insert_failure(failure: RecipeStoreError) -> Self {
            Self {
                recipes: Mutex::new(Vec::new()),
                insert_failure: Some(failure),
            }
        }

        fn stored_count(&self) -> usize {
            self.recipes.lock().expect("recipes lock").len()
        }
    }

    fn matches(recipe: &Recipe, requirements: &RecipeRequirements) -> bool {
        if let Some(difficulty) = requirements.active_difficulty() {
            if recipe.difficulty != difficulty {
                return false;
            }
        }
        if let Some(diets) = requirements.active_diets() {
            if !recipe
                .dietary_suitability
                .iter()
                .any(|diet| diets.contains(diet))
            {
                return false;
            }
        }
        if let Some(avoid) = requirements.active_allergens() {
            let offending = recipe
                .macro_ingredients
                .iter()
                .flat_map(|m| &m.micro_ingredients)
                .flat_map(|m| &m.allergens)
                .any(|allergen| avoid.contains(&allergen.name));
            if offending {
                return false;
            }
        }
        if let Some(ids) = requirements.active_nutrient_ids() {
            let carries = recipe
                .macro_ingredients
                .iter()
                .flat_map(|m| &m.micro_ingredients)
                .flat_map(|m| &m.nutrients)
                .any(|nutrient| ids.contains(&nutrient.id));
            if !carries {
                return false;
            }
        }
        true
    }

    #[async_trait]
    impl RecipeRepository for MemoryRecipeRepository {
        async fn find_by_requirements(
            &self,
            requirements: &RecipeRequirements,
        ) -> Result<Vec<Recipe>, RecipeStoreError> {
            Ok(self
                .recipes
                .lock()
                .expect("recipes lock")
                .iter()
                .filter(|recipe| matches(recipe, requirements))
                .cloned()
                .collect())
        }

        async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RecipeStoreError> {
            Ok(self
                .recipes
                .lock()
                .expect("recipes lock")
                .iter()
                .find(|recipe| recipe.id == id)
                .cloned())
        }

        async fn insert(&self, recipe: &NewRecipe) -> Result<RecipeId, RecipeStoreError> {
            if let Some(failure) = self.insert_failure.clone() {
                return Err(failure);
            }
            let mut recipes = self.recipes.lock().expect("recipes lock");
            let id = (recipes.len() + 1) as RecipeId;
            recipes.push(Recipe {
                id,
                name: recipe.name.clone(),
                difficulty: recipe.difficulty.clone(),
                macro_ingredients: recipe.macro_ingredients.clone(),
                dietary_suitability: recipe.dietary_suitability.clone(),
            });
            Ok(id)
        }
    }

    fn recipe(id: RecipeId, difficulty: &str, diets: &[&str], allergens: &[&str]) -> Recipe {
        Recipe {
            id,
            name: format!("recipe-{id}"),
            difficulty: difficulty.into(),
            macro_ingredients: vec![MacroIngredient {
                name: "base".into(),
                micro_ingredients: vec![MicroIngredient {
                    name: "filling".into(),
                    nutrients: vec![Nutrient {
                        id,
                        name: format!("nutrient-{id}"),
                    }],
                    allergens: allergens
                        .iter()
                        .map(|name| Allergen {
                            name: (*name).into(),
                        })
                        .collect(),
                }],
            }],
            dietary_suitability: diets.iter().map(|diet| (*diet).into()).collect(),
        }
    }

    struct Fixture {
        repository: Arc<MemoryRecipeRepository>,
        state: web::Data<RecipeState>,
    }

    fn fixture(repository: MemoryRecipeRepository) -> Fixture {
        let repository = Arc::new(repository);
        let state = web::Data::new(RecipeState {
            recipes: RecipeService::new(repository.clone()),
        });
        Fixture { repository, state }
    }

    fn test_app(
        state: web::Data<RecipeState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(state).service(
            web::scope("/api/recipes")
                .service(search_recipes)
                .service(create_recipe)
                .service(get_recipe),
        )
    }

    #[actix_web::test]
    async fn empty_criteria_return_every_recipe() {
        let fixture = fixture(MemoryRecipeRepository::with_recipes(vec![
            recipe(1, "easy", &["vegan"], &[]),
            recipe(2, "hard", &[], &["peanut"]),
        ]));
        let app = actix_test::init_service(test_app(fixture.state.clone())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/recipes/search")
                .set_json(serde_json::json!({}))
                .to_request(),
        )
        .await;

        assert!(response.status().is_success());
        let found: Vec<Recipe> = actix_test::read_body_json(response).await;
        assert_eq!(found.len(), 2);
    }

    #[actix_web::test]
    async fn allergen_exclusion_drops_offending_recipes() {
        let fixture = fixture(MemoryRecipeRepository::with_recipes(vec![
            recipe(1, "easy", &[], &[]),
            recipe(2, "easy", &[], &["peanut"]),
        ]));
        let app = actix_test::init_service(test_app(fixture.state.clone())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/recipes/search")
                .set_json(serde_json::json!({ "allergensToAvoid": ["peanut"] }))
                .to_request(),
        )
        .await;

        let found: Vec<Recipe> = actix_test::read_body_json(response).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
    }

    #[actix_web::test]
    async fn combined_criteria_apply_conjunctively() {
        let fixture = fixture(MemoryRecipeRepository::with_recipes(vec![
            recipe(1, "easy", &["vegan"], &[]),
            recipe(2, "easy", &[], &[]),
            recipe(3, "hard", &["vegan"], &[]),
        ]));
        let app = actix_test::init_service(test_app(fixture.state.clone())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/recipes/search")
                .set_json(serde_json::json!({
                    "suitableForDiets": ["vegan"],
                    "difficulty": "easy"
                }))
                .to_request(),
        )
        .await;

        let found: Vec<Recipe> = actix_test::read_body_json(response).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
    }

    #[actix_web::test]
    async fn create_recipe_persists_and_returns_the_new_id() {
        let fixture = fixture(MemoryRecipeRepository::default());
        let app = actix_test::init_service(test_app(fixture.state.clone())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/recipes")
                .set_json(serde_json::json!({
                    "name": "pasta",
                    "difficulty": "easy",
                    "dietarySuitability": ["vegetarian"]
                }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
        let body: RecipeCreatedResponse = actix_test::read_body_json(response).await;
        assert_eq!(body.id, 1);
        assert_eq!(fixture.repository.stored_count(), 1);
    }

    #[actix_web::test]
    async fn invalid_recipes_yield_bad_request_before_the_store() {
        let fixture = fixture(MemoryRecipeRepository::default());
        let app = actix_test::init_service(test_app(fixture.state.clone())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/recipes")
                .set_json(serde_json::json!({ "name": "  ", "difficulty": "easy" }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "validation");
        assert_eq!(fixture.repository.stored_count(), 0);
    }

    #[actix_web::test]
    async fn duplicate_recipe_names_yield_conflict() {
        let fixture = fixture(MemoryRecipeRepository::with_insert_failure(
            RecipeStoreError::constraint_violation(
                Some("recipes_name_key".into()),
                "duplicate key value violates unique constraint \"recipes_name_key\"",
            ),
        ));
        let app = actix_test::init_service(test_app(fixture.state.clone())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/recipes")
                .set_json(serde_json::json!({ "name": "pasta", "difficulty": "easy" }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), actix_web::http::StatusCode::CONFLICT);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["constraint"], "recipes_name_key");
    }

    #[actix_web::test]
    async fn get_recipe_maps_absence_to_not_found() {
        let fixture = fixture(MemoryRecipeRepository::with_recipes(vec![recipe(
            1,
            "easy",
            &[],
            &[],
        )]));
        let app = actix_test::init_service(test_app(fixture.state.clone())).await;

        let found = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/recipes/1")
                .to_request(),
        )
        .await;
        assert!(found.status().is_success());

        let missing = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/recipes/9")
                .to_request(),
        )
        .await;
        assert_eq!(missing.status(), actix_web::http::StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(missing).await;
        assert_eq!(body["message"], "recipe: 9, could not be found");
    }
}
