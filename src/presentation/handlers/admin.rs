use crate::application::auth::cleanup::CleanupExpiredTokensUseCase;
use crate::infrastructure::state::AppState;
use crate::presentation::extractors::AdminUser;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::{JsonApiMeta, JsonApiResponse};
use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

/// Delete expired refresh tokens now instead of waiting for the scheduled sweep
#[utoipa::path(
    post,
    path = "/api/v1/admin/refresh-tokens/cleanup",
    responses(
        (status = 200, description = "Expired refresh tokens deleted", body = JsonApiResponse<serde_json::Value>),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn cleanup_refresh_tokens(
    State(state): State<AppState>,
    admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let deleted = CleanupExpiredTokensUseCase::new(state.token_service.clone())
        .execute()
        .await?;
    tracing::info!(admin_id = %admin.user.id, deleted, "manual refresh token cleanup");

    Ok(Json(
        JsonApiResponse::new(serde_json::Value::Null)
            .with_meta(JsonApiMeta::new().with_extra(json!({ "deleted": deleted }))),
    ))
}
