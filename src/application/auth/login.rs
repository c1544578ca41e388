use crate::application::auth::token_service::TokenService;
use crate::application::auth::{AuthSession, normalize_email};
use crate::domain::password::PasswordHashingService;
use crate::domain::users::UserRepository;
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ada@example.com")]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "password123")]
    pub password: String,
}

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct LoginUseCase {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordHashingService>,
    tokens: Arc<TokenService>,
}

impl LoginUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordHashingService>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    #[tracing::instrument(skip(self, req), fields(email = %req.email))]
    pub async fn execute(&self, req: LoginRequest) -> Result<AuthSession, AppError> {
        let user = self
            .users
            .find_by_email(&normalize_email(&req.email))
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !self
            .passwords
            .verify_password(&req.password, &user.password_hash)?
        {
            tracing::debug!(user_id = %user.id, "password mismatch");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let tokens = self.tokens.issue_token_pair(user.id).await?;

        Ok(AuthSession { user, tokens })
    }
}
