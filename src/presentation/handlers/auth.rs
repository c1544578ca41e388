use crate::application::auth::login::{LoginRequest, LoginUseCase};
use crate::application::auth::logout::LogoutUseCase;
use crate::application::auth::refresh::{RefreshTokenRequest, RefreshTokenUseCase};
use crate::application::auth::register::{RegisterRequest, RegisterUseCase};
use crate::application::users::get::GetUserUseCase;
use crate::infrastructure::state::AppState;
use crate::presentation::dtos::{AuthSessionResource, AuthTokenResource, UserResource};
use crate::presentation::extractors::AuthUser;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::{JsonApiMeta, JsonApiResource, JsonApiResponse};
use crate::shared::validation::ValidatedJson;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// Create an account and sign it in
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = JsonApiResponse<JsonApiResource<AuthSessionResource>>),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 429, description = "Too many requests")
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = RegisterUseCase::new(
        state.users.clone(),
        state.passwords.clone(),
        state.token_service.clone(),
    );
    let session = use_case.execute(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(JsonApiResponse::new(AuthSessionResource::resource(session))),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = JsonApiResponse<JsonApiResource<AuthSessionResource>>),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 429, description = "Too many requests")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = LoginUseCase::new(
        state.users.clone(),
        state.passwords.clone(),
        state.token_service.clone(),
    );
    let session = use_case.execute(req).await?;

    Ok(Json(JsonApiResponse::new(AuthSessionResource::resource(
        session,
    ))))
}

/// Trade a refresh token for a new pair; the presented token stops working
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Token refreshed", body = JsonApiResponse<JsonApiResource<AuthTokenResource>>),
        (status = 401, description = "Invalid, expired or reused refresh token", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 429, description = "Too many requests")
    ),
    tag = "auth"
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshTokenRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = RefreshTokenUseCase::new(state.token_service.clone());
    let pair = use_case.execute(req).await?;

    Ok(Json(JsonApiResponse::new(AuthTokenResource::resource(pair))))
}

/// Revoke every refresh token of the caller
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = JsonApiResponse<serde_json::Value>),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let revoked = LogoutUseCase::new(state.token_service.clone())
        .execute(auth.user_id)
        .await?;

    Ok(Json(
        JsonApiResponse::new(serde_json::Value::Null)
            .with_meta(JsonApiMeta::new().with_extra(json!({ "revoked": revoked }))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current user", body = JsonApiResponse<JsonApiResource<UserResource>>),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let user = GetUserUseCase::new(state.users.clone())
        .execute(auth.user_id)
        .await?;

    Ok(Json(JsonApiResponse::new(UserResource::resource(user))))
}
