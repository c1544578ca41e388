use crate::application::auth::login::LoginRequest;
use crate::application::auth::refresh::RefreshTokenRequest;
use crate::application::auth::register::RegisterRequest;
use crate::domain::users::Role;
use crate::presentation::dtos::{AuthSessionResource, AuthTokenResource, UserResource};
use crate::shared::error::{ErrorResponse, JsonApiError, JsonApiErrorSource};
use crate::shared::response::{JsonApiResource, JsonApiResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MagicStream Auth API",
        version = "0.1.0",
        description = "Accounts and session tokens for the MagicStream movie catalog.\n\nResponses follow the JSON:API v1.1 document structure."
    ),
    paths(
        crate::presentation::handlers::health::health_check,
        crate::presentation::handlers::auth::register,
        crate::presentation::handlers::auth::login,
        crate::presentation::handlers::auth::refresh_token,
        crate::presentation::handlers::auth::logout,
        crate::presentation::handlers::auth::me,
        crate::presentation::handlers::admin::cleanup_refresh_tokens,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            RefreshTokenRequest,
            Role,
            UserResource,
            AuthTokenResource,
            AuthSessionResource,
            JsonApiResource<UserResource>,
            JsonApiResource<AuthTokenResource>,
            JsonApiResource<AuthSessionResource>,
            JsonApiResponse<JsonApiResource<UserResource>>,
            JsonApiResponse<JsonApiResource<AuthTokenResource>>,
            JsonApiResponse<JsonApiResource<AuthSessionResource>>,
            JsonApiResponse<serde_json::Value>,
            ErrorResponse,
            JsonApiError,
            JsonApiErrorSource,
        )
    ),
    tags(
        (name = "health", description = "Liveness and database connectivity"),
        (name = "auth", description = "Registration, login and token lifecycle"),
        (name = "admin", description = "Operations restricted to ADMIN users")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
