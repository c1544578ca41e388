use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// Which secret a token is signed with and what it may be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Access => write!(f, "access"),
            TokenType::Refresh => write!(f, "refresh"),
        }
    }
}

/// JWT Claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Unique token ID, keeps two tokens minted in the same second distinct
    pub jti: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    #[serde(rename = "type")]
    pub token_type: TokenType,
}

impl Claims {
    pub fn new(user_id: Uuid, token_type: TokenType, issued_at: OffsetDateTime, ttl: Duration) -> Self {
        let iat = issued_at.unix_timestamp();
        Self {
            sub: user_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat,
            exp: iat + ttl.whole_seconds(),
            token_type,
        }
    }

    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|e| anyhow::anyhow!("Invalid user ID in claims: {}", e))
    }

    pub fn expires_at(&self) -> Result<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(self.exp)
            .map_err(|e| anyhow::anyhow!("Invalid expiry in claims: {}", e))
    }
}

/// Access + refresh token issued together
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub user_id: Uuid,
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_in: i64,
}

/// Persisted refresh token record
#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    pub expires_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub revoked: bool,
}

impl RefreshToken {
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        now > self.expires_at
    }
}

/// New refresh token for creation
#[derive(Debug, Clone)]
pub struct NewRefreshToken {
    pub user_id: Uuid,
    pub token: String,
    pub expires_at: OffsetDateTime,
}

/// Repository trait for refresh tokens
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Persist a new, non-revoked refresh token
    async fn create(&self, token: NewRefreshToken) -> Result<RefreshToken>;

    /// Find the record holding exactly this token string for this user
    async fn find_by_token_and_user(
        &self,
        token: &str,
        user_id: Uuid,
    ) -> Result<Option<RefreshToken>>;

    /// Revoke every live refresh token of a user, returning how many flipped
    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<u64>;

    /// Revoke one record if it is still live.
    ///
    /// Returns `false` when no live record with that id exists, either because
    /// it was never stored, was deleted, or was already revoked.
    async fn revoke_by_id(&self, id: Uuid) -> Result<bool>;

    /// Delete every record whose expiry is strictly before `now`
    async fn delete_expired(&self, now: OffsetDateTime) -> Result<u64>;
}

/// Signs and verifies JWTs with the secret that belongs to each token type
pub trait TokenCodec: Send + Sync {
    fn encode(&self, claims: &Claims) -> Result<String>;

    /// Verify signature and expiry using the key for `token_type`
    fn decode(&self, token: &str, token_type: TokenType) -> Result<Claims>;
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("token has been revoked")]
    RevokedToken,
    #[error("failed to persist token: {0}")]
    Persistence(anyhow::Error),
    #[error("failed to sign token: {0}")]
    Signing(anyhow::Error),
}
