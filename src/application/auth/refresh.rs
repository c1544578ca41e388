use crate::application::auth::token_service::TokenService;
use crate::domain::auth::{TokenError, TokenPair};
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

pub struct RefreshTokenUseCase {
    tokens: Arc<TokenService>,
}

impl RefreshTokenUseCase {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    #[tracing::instrument(skip_all)]
    pub async fn execute(&self, req: RefreshTokenRequest) -> Result<TokenPair, AppError> {
        self.tokens
            .rotate_refresh_token(&req.refresh_token)
            .await
            .map_err(|e| match e {
                TokenError::InvalidToken | TokenError::RevokedToken => {
                    AppError::Unauthorized("Invalid or expired refresh token".to_string())
                }
                other => other.into(),
            })
    }
}
