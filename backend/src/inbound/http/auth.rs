//! Auth API handlers.
//!
//! ```text
//! POST   /api/auth/login            {"username":"alice","password":"pw"}
//! POST   /api/auth/create-user      {"username":"alice","password":"pw","roleIds":[1]}
//! POST   /api/auth/update-user      {"username":"alice","password":"new-pw"}
//! DELETE /api/auth/delete-user      {"username":"alice"}
//! POST   /api/auth/update-user-role {"username":"alice","roleIds":[1,2]}
//! ```

use actix_web::{delete, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    CredentialsValidationError, Error, LoginCredentials, RoleId, Username,
    UsernameValidationError,
};
use crate::inbound::http::state::AuthState;
use crate::inbound::http::ApiResult;

/// User payload shared by the auth endpoints, mirroring the single DTO the
/// surface accepts everywhere.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    /// Unique login name.
    pub username: String,
    /// Plaintext password; ignored by endpoints that do not need it.
    #[serde(default)]
    pub password: String,
    /// Role ids; ignored by endpoints that do not need them.
    #[serde(default)]
    pub role_ids: Vec<RoleId>,
}

/// Token response for a successful login.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Opaque bearer token bound to the authenticated identity.
    pub token: String,
}

fn map_credentials_validation_error(err: CredentialsValidationError) -> Error {
    match err {
        CredentialsValidationError::EmptyUsername => {
            Error::invalid_request("username must not be empty")
                .with_details(json!({ "field": "username", "code": "empty_username" }))
        }
        CredentialsValidationError::EmptyPassword => {
            Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password", "code": "empty_password" }))
        }
    }
}

fn map_username_validation_error(err: UsernameValidationError) -> Error {
    match err {
        UsernameValidationError::Empty => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
    }
}

fn parse_username(raw: &str) -> Result<Username, Error> {
    Username::new(raw).map_err(map_username_validation_error)
}

/// Authenticate a user and issue a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = UserPayload,
    responses(
        (status = 200, description = "Login success", body = TokenResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Wrong password", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<AuthState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<web::Json<TokenResponse>> {
    let payload = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(map_credentials_validation_error)?;
    let username = credentials.username();

    if !state.credentials.validate_user(username).await? {
        return Err(Error::not_found(format!(
            "invalid username, user: {username}, could not be found"
        )));
    }

    if !state
        .credentials
        .validate_password(username, credentials.password())
        .await?
    {
        return Err(Error::forbidden(format!(
            "invalid password, user: {username}"
        )));
    }

    let token = state.tokens.issue(username);
    Ok(web::Json(TokenResponse { token }))
}

/// Create a new user record.
#[utoipa::path(
    post,
    path = "/api/auth/create-user",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Name already exists", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "createUser"
)]
#[post("/create-user")]
pub async fn create_user(
    state: web::Data<AuthState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(map_credentials_validation_error)?;
    let username = credentials.username();

    // Pre-check for a friendlier conflict; the unique index still backstops
    // a concurrent create.
    if state.credentials.validate_user(username).await? {
        return Err(Error::conflict(format!(
            "user: {username}, already exists"
        )));
    }

    state
        .users
        .create_user(username, credentials.password(), payload.role_ids)
        .await?;

    Ok(HttpResponse::Created().json(json!({ "message": "user created successfully" })))
}

/// Replace the password of an existing user.
#[utoipa::path(
    post,
    path = "/api/auth/update-user",
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "updateUser"
)]
#[post("/update-user")]
pub async fn update_user(
    state: web::Data<AuthState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(map_credentials_validation_error)?;

    state
        .users
        .update_user(credentials.username(), credentials.password())
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "user details updated successfully" })))
}

/// Delete an existing user.
#[utoipa::path(
    delete,
    path = "/api/auth/delete-user",
    request_body = UserPayload,
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "deleteUser"
)]
#[delete("/delete-user")]
pub async fn delete_user(
    state: web::Data<AuthState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let username = parse_username(&payload.username)?;
    state.users.delete_user(&username).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Reassign the role set of an existing user.
#[utoipa::path(
    post,
    path = "/api/auth/update-user-role",
    request_body = UserPayload,
    responses(
        (status = 200, description = "Roles updated"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown user or role", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "updateUserRole"
)]
#[post("/update-user-role")]
pub async fn update_user_role(
    state: web::Data<AuthState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let username = parse_username(&payload.username)?;
    state
        .users
        .update_user_role(&username, &payload.role_ids)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "user details updated successfully" })))
}
