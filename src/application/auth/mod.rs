pub mod cleanup;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod token_service;

use crate::domain::auth::TokenPair;
use crate::domain::users::User;

/// A signed-in user together with freshly issued tokens
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub tokens: TokenPair,
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
