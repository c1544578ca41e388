use crate::application::auth::token_service::TokenService;
use crate::shared::error::AppError;
use std::sync::Arc;
use uuid::Uuid;

/// Ends every session of a user by revoking all of their refresh tokens.
/// Access tokens already handed out stay valid until they expire.
pub struct LogoutUseCase {
    tokens: Arc<TokenService>,
}

impl LogoutUseCase {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, user_id: Uuid) -> Result<u64, AppError> {
        Ok(self.tokens.revoke_all_for_user(user_id).await?)
    }
}
