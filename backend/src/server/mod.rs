//! Server construction and wiring.
//!
//! Builds the service states from a database pool and assembles the actix
//! application. Wiring is explicit; there is no injection container.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{get, web, App};
use utoipa::OpenApi;

use crate::doc::ApiDoc;
use crate::domain::{
    CredentialValidator, OpaqueTokenIssuer, RecipeService, Sha256PasswordHasher, UserManager,
};
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::{auth, recipes, AuthState, RecipeState};
use crate::outbound::persistence::{
    DbPool, DieselRecipeRepository, DieselRoleRepository, DieselUserRepository,
};

/// Serve the generated OpenAPI document.
#[get("/api-docs/openapi.json")]
async fn openapi_json() -> web::Json<utoipa::openapi::OpenApi> {
    web::Json(ApiDoc::openapi())
}

/// Build the service states over database-backed adapters.
pub fn build_states(pool: &DbPool) -> (AuthState, RecipeState) {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let roles = Arc::new(DieselRoleRepository::new(pool.clone()));
    let hasher = Arc::new(Sha256PasswordHasher);

    let auth = AuthState {
        credentials: CredentialValidator::new(users.clone(), hasher.clone()),
        tokens: Arc::new(OpaqueTokenIssuer),
        users: UserManager::new(users, roles, hasher),
    };
    let recipe = RecipeState {
        recipes: RecipeService::new(Arc::new(DieselRecipeRepository::new(pool.clone()))),
    };
    (auth, recipe)
}

/// Assemble the actix application over pre-built states.
pub fn build_app(
    auth_state: web::Data<AuthState>,
    recipe_state: web::Data<RecipeState>,
    health_state: web::Data<HealthState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(auth_state)
        .app_data(recipe_state)
        .app_data(health_state)
        .service(
            web::scope("/api/auth")
                .service(auth::login)
                .service(auth::create_user)
                .service(auth::update_user)
                .service(auth::delete_user)
                .service(auth::update_user_role),
        )
        .service(
            web::scope("/api/recipes")
                .service(recipes::search_recipes)
                .service(recipes::create_recipe)
                .service(recipes::get_recipe),
        )
        .service(web::scope("/health").service(live).service(ready))
        .service(openapi_json)
}

#[cfg(test)]
mod tests {
    //! Route wiring checks against stub-backed states.
    use std::sync::Mutex;

    use actix_web::test as actix_test;
    use async_trait::async_trait;
    use uuid::Uuid;

    use super::*;
    use crate::domain::ports::{
        RecipeRepository, RecipeStoreError, RoleRepository, RoleStoreError, UserRepository,
        UserStoreError,
    };
    use crate::domain::user::Role;
    use crate::domain::{
        NewRecipe, PasswordHasher, Recipe, RecipeId, RecipeRequirements, RoleId, User, Username,
    };

    #[derive(Default)]
    struct StubUserRepository {
        user: Mutex<Option<User>>,
    }

    #[async_trait]
    impl UserRepository for StubUserRepository {
        async fn find_by_name(&self, name: &Username) -> Result<Option<User>, UserStoreError> {
            Ok(self
                .user
                .lock()
                .expect("user lock")
                .as_ref()
                .filter(|user| user.name() == name)
                .cloned())
        }

        async fn insert(&self, user: &User) -> Result<(), UserStoreError> {
            *self.user.lock().expect("user lock") = Some(user.clone());
            Ok(())
        }

        async fn update_password(
            &self,
            _name: &Username,
            _password_hash: &str,
        ) -> Result<(), UserStoreError> {
            Ok(())
        }

        async fn delete(&self, _name: &Username) -> Result<(), UserStoreError> {
            Ok(())
        }

        async fn update_roles(
            &self,
            _name: &Username,
            _roles: &[RoleId],
        ) -> Result<(), UserStoreError> {
            Ok(())
        }
    }

    struct StubRoleRepository;

    #[async_trait]
    impl RoleRepository for StubRoleRepository {
        async fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, RoleStoreError> {
            Ok(Some(Role {
                id,
                name: format!("role-{id}"),
            }))
        }
    }

    struct StubRecipeRepository;

    #[async_trait]
    impl RecipeRepository for StubRecipeRepository {
        async fn find_by_requirements(
            &self,
            _requirements: &RecipeRequirements,
        ) -> Result<Vec<Recipe>, RecipeStoreError> {
            Ok(Vec::new())
        }

        async fn find_by_id(&self, _id: RecipeId) -> Result<Option<Recipe>, RecipeStoreError> {
            Ok(None)
        }

        async fn insert(&self, _recipe: &NewRecipe) -> Result<RecipeId, RecipeStoreError> {
            Ok(1)
        }
    }

    fn stub_states() -> (web::Data<AuthState>, web::Data<RecipeState>) {
        let users = Arc::new(StubUserRepository::default());
        let hasher = Arc::new(Sha256PasswordHasher);
        users.user.lock().expect("user lock").replace(User::new(
            Uuid::new_v4(),
            Username::new("alice").expect("valid name"),
            hasher.hash("pw"),
            Vec::new(),
        ));
        let auth = web::Data::new(AuthState {
            credentials: CredentialValidator::new(users.clone(), hasher.clone()),
            tokens: Arc::new(OpaqueTokenIssuer),
            users: UserManager::new(users, Arc::new(StubRoleRepository), hasher),
        });
        let recipe = web::Data::new(RecipeState {
            recipes: RecipeService::new(Arc::new(StubRecipeRepository)),
        });
        (auth, recipe)
    }

    #[actix_web::test]
    async fn the_assembled_app_serves_every_surface() {
        let (auth_state, recipe_state) = stub_states();
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        let app = actix_test::init_service(build_app(auth_state, recipe_state, health_state)).await;

        let login = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(serde_json::json!({ "username": "alice", "password": "pw" }))
                .to_request(),
        )
        .await;
        assert!(login.status().is_success());

        let search = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/recipes/search")
                .set_json(serde_json::json!({}))
                .to_request(),
        )
        .await;
        assert!(search.status().is_success());

        let health = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert!(health.status().is_success());

        let docs = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api-docs/openapi.json")
                .to_request(),
        )
        .await;
        assert!(docs.status().is_success());
    }
}
