use crate::domain::auth::{
    Claims, NewRefreshToken, RefreshTokenRepository, TokenCodec, TokenError, TokenPair, TokenType,
};
use std::sync::Arc;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// Issues, validates, rotates and revokes session tokens.
///
/// Holds no mutable state of its own; refresh token state lives in the
/// repository, so one instance is shared by every request.
pub struct TokenService {
    codec: Arc<dyn TokenCodec>,
    refresh_tokens: Arc<dyn RefreshTokenRepository>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(
        codec: Arc<dyn TokenCodec>,
        refresh_tokens: Arc<dyn RefreshTokenRepository>,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            codec,
            refresh_tokens,
            access_ttl,
            refresh_ttl,
        }
    }

    /// Mint an access/refresh pair and persist the refresh token.
    ///
    /// Nothing is returned unless the refresh token was stored.
    pub async fn issue_token_pair(&self, user_id: Uuid) -> Result<TokenPair, TokenError> {
        let now = OffsetDateTime::now_utc();

        let access_claims = Claims::new(user_id, TokenType::Access, now, self.access_ttl);
        let refresh_claims = Claims::new(user_id, TokenType::Refresh, now, self.refresh_ttl);

        let access_token = self
            .codec
            .encode(&access_claims)
            .map_err(TokenError::Signing)?;
        let refresh_token = self
            .codec
            .encode(&refresh_claims)
            .map_err(TokenError::Signing)?;
        let expires_at = refresh_claims.expires_at().map_err(TokenError::Signing)?;

        self.refresh_tokens
            .create(NewRefreshToken {
                user_id,
                token: refresh_token.clone(),
                expires_at,
            })
            .await
            .map_err(TokenError::Persistence)?;

        tracing::debug!(%user_id, "issued token pair");

        Ok(TokenPair {
            user_id,
            access_token,
            refresh_token,
            access_expires_in: self.access_ttl.whole_seconds(),
        })
    }

    /// Check an access token and return its subject. Never touches the store.
    pub fn validate_access_token(&self, token: &str) -> Result<Uuid, TokenError> {
        self.verify(token, TokenType::Access)
    }

    /// Revoke every live refresh token of a user, returning how many were revoked
    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<u64, TokenError> {
        let revoked = self
            .refresh_tokens
            .revoke_all_for_user(user_id)
            .await
            .map_err(TokenError::Persistence)?;

        tracing::debug!(%user_id, revoked, "revoked refresh tokens");
        Ok(revoked)
    }

    /// Exchange a refresh token for a new pair. Each refresh token works once.
    pub async fn rotate_refresh_token(&self, token: &str) -> Result<TokenPair, TokenError> {
        let user_id = self.verify(token, TokenType::Refresh)?;

        let record = self
            .refresh_tokens
            .find_by_token_and_user(token, user_id)
            .await
            .map_err(TokenError::Persistence)?
            .ok_or(TokenError::InvalidToken)?;

        if record.revoked {
            tracing::warn!(%user_id, token_id = %record.id, "revoked refresh token presented");
            return Err(TokenError::RevokedToken);
        }

        if record.is_expired(OffsetDateTime::now_utc()) {
            if let Err(e) = self.refresh_tokens.revoke_by_id(record.id).await {
                tracing::warn!(token_id = %record.id, "failed to revoke expired refresh token: {}", e);
            }
            return Err(TokenError::InvalidToken);
        }

        match self.refresh_tokens.revoke_by_id(record.id).await {
            Ok(true) => {}
            Ok(false) => {
                // Another rotation of the same token got there first
                tracing::warn!(%user_id, token_id = %record.id, "concurrent refresh token reuse");
                return Err(TokenError::RevokedToken);
            }
            Err(e) => {
                tracing::warn!(token_id = %record.id, "failed to revoke rotated refresh token: {}", e);
            }
        }

        self.issue_token_pair(user_id).await
    }

    /// Delete every refresh token that expired before now, revoked or not
    pub async fn cleanup_expired(&self) -> Result<u64, TokenError> {
        let deleted = self
            .refresh_tokens
            .delete_expired(OffsetDateTime::now_utc())
            .await
            .map_err(TokenError::Persistence)?;

        tracing::info!(deleted, "removed expired refresh tokens");
        Ok(deleted)
    }

    fn verify(&self, token: &str, expected: TokenType) -> Result<Uuid, TokenError> {
        let claims = self
            .codec
            .decode(token, expected)
            .map_err(|_| TokenError::InvalidToken)?;

        if claims.token_type != expected || claims.sub.is_empty() {
            return Err(TokenError::InvalidToken);
        }

        claims.user_id().map_err(|_| TokenError::InvalidToken)
    }
}
