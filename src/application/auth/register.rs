use crate::application::auth::token_service::TokenService;
use crate::application::auth::{AuthSession, normalize_email};
use crate::domain::password::PasswordHashingService;
use crate::domain::users::{NewUser, Role, UserRepository};
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100, message = "First name must be 2-100 characters"))]
    #[schema(example = "Ada", min_length = 2, max_length = 100)]
    pub first_name: String,
    #[validate(length(min = 2, max = 100, message = "Last name must be 2-100 characters"))]
    #[schema(example = "Lovelace", min_length = 2, max_length = 100)]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "password123", min_length = 6)]
    pub password: String,
}

pub struct RegisterUseCase {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordHashingService>,
    tokens: Arc<TokenService>,
}

impl RegisterUseCase {
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
    pub async fn execute(&self, req: RegisterRequest) -> Result<AuthSession, AppError> {
        let email = normalize_email(&req.email);

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = self.passwords.hash_password(&req.password)?;

        let user = self
            .users
            .create(NewUser {
                first_name: req.first_name.trim().to_string(),
                last_name: req.last_name.trim().to_string(),
                email,
                password_hash,
                role: Role::User,
            })
            .await
            .map_err(|e| {
                // Lost a race with another registration for the same address
                if is_unique_violation(&e) {
                    AppError::Conflict("Email already registered".to_string())
                } else {
                    AppError::InternalServerError(e)
                }
            })?;

        let tokens = self.tokens.issue_token_pair(user.id).await?;
        tracing::info!(user_id = %user.id, "user registered");

        Ok(AuthSession { user, tokens })
    }
}

fn is_unique_violation(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .is_some_and(|e| e.is_unique_violation())
}
