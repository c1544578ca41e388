use crate::application::auth::AuthSession;
use crate::domain::auth::TokenPair;
use crate::domain::users::{Role, User};
use crate::shared::response::JsonApiResource;
use serde::Serialize;
use time::OffsetDateTime;
use utoipa::ToSchema;

/// Public view of a user; never carries the password hash
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResource {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for UserResource {
    fn from(user: User) -> Self {
        Self {
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl UserResource {
    pub fn resource(user: User) -> JsonApiResource<UserResource> {
        JsonApiResource::new("users", user.id.to_string(), user.into())
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokenResource {
    pub access_token: String,
    pub refresh_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Access token lifetime in seconds
    #[schema(example = 900)]
    pub expires_in: i64,
}

impl AuthTokenResource {
    pub fn resource(pair: TokenPair) -> JsonApiResource<AuthTokenResource> {
        JsonApiResource::new("tokens", pair.user_id.to_string(), pair.into())
    }
}

impl From<TokenPair> for AuthTokenResource {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: pair.access_expires_in,
        }
    }
}

/// User profile plus the tokens issued for it
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthSessionResource {
    pub user: UserResource,
    pub tokens: AuthTokenResource,
}

impl AuthSessionResource {
    pub fn resource(session: AuthSession) -> JsonApiResource<AuthSessionResource> {
        let id = session.user.id.to_string();
        JsonApiResource::new(
            "sessions",
            id,
            Self {
                user: session.user.into(),
                tokens: session.tokens.into(),
            },
        )
    }
}
