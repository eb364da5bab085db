//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates every annotated handler and schema into one
//! document, served as JSON at `/api-docs/openapi.json`.

use utoipa::OpenApi;

use crate::domain::{
    Allergen, Error, ErrorCode, MacroIngredient, MicroIngredient, NewRecipe, Nutrient, Recipe,
    RecipeRequirements,
};
use crate::inbound::http::auth::{TokenResponse, UserPayload};
use crate::inbound::http::recipes::RecipeCreatedResponse;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recipe backend API",
        description = "HTTP interface for user authentication and dietary-requirement recipe search."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::create_user,
        crate::inbound::http::auth::update_user,
        crate::inbound::http::auth::delete_user,
        crate::inbound::http::auth::update_user_role,
        crate::inbound::http::recipes::search_recipes,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        UserPayload,
        TokenResponse,
        RecipeRequirements,
        Recipe,
        NewRecipe,
        RecipeCreatedResponse,
        MacroIngredient,
        MicroIngredient,
        Nutrient,
        Allergen,
    )),
    tags(
        (name = "auth", description = "Authentication and user management"),
        (name = "recipes", description = "Recipe search and persistence"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
