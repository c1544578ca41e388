use crate::application::auth::token_service::TokenService;
use crate::shared::error::AppError;
use std::sync::Arc;

pub struct CleanupExpiredTokensUseCase {
    tokens: Arc<TokenService>,
}

impl CleanupExpiredTokensUseCase {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self) -> Result<u64, AppError> {
        Ok(self.tokens.cleanup_expired().await?)
    }
}
