use crate::domain::auth::TokenError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Validation error: {0}")]
    InvalidFields(#[from] validator::ValidationErrors),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

/// JSON:API error object
#[derive(Debug, Serialize, ToSchema)]
pub struct JsonApiError {
    pub status: String,
    pub title: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<JsonApiErrorSource>,
}

/// Where in the request document the error was found
#[derive(Debug, Serialize, ToSchema)]
pub struct JsonApiErrorSource {
    /// JSON Pointer into the request body, e.g. `/email`
    pub pointer: String,
}

impl JsonApiError {
    fn new(status: StatusCode, detail: String, source: Option<JsonApiErrorSource>) -> Self {
        Self {
            status: status.as_u16().to_string(),
            title: status.canonical_reason().unwrap_or("Error").to_string(),
            detail,
            source,
        }
    }
}

/// Top-level error document
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub errors: Vec<JsonApiError>,
}

impl AppError {
    fn status_and_detail(self) -> (StatusCode, String) {
        match self {
            AppError::ValidationError(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::InvalidFields(errors) => (StatusCode::UNPROCESSABLE_ENTITY, errors.to_string()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::DatabaseError(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            AppError::InternalServerError(e) => {
                tracing::error!("Internal server error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, errors) = match self {
            AppError::InvalidFields(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, field_errors(&errors))
            }
            other => {
                let (status, detail) = other.status_and_detail();
                (status, vec![JsonApiError::new(status, detail, None)])
            }
        };

        (status, Json(ErrorResponse { errors })).into_response()
    }
}

/// One error object per failed rule, pointing at the offending field
fn field_errors(errors: &validator::ValidationErrors) -> Vec<JsonApiError> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, failures)| {
            failures.iter().map(move |failure| {
                let detail = match &failure.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid ({})", field, failure.code),
                };
                JsonApiError::new(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    detail,
                    Some(JsonApiErrorSource {
                        pointer: format!("/{}", field),
                    }),
                )
            })
        })
        .collect()
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidToken => {
                AppError::Unauthorized("Invalid or expired token".to_string())
            }
            TokenError::RevokedToken => {
                AppError::Unauthorized("Token has been revoked".to_string())
            }
            TokenError::Persistence(e) | TokenError::Signing(e) => {
                AppError::InternalServerError(e)
            }
        }
    }
}
