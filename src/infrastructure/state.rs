use crate::application::auth::token_service::TokenService;
use crate::domain::password::PasswordHashingService;
use crate::domain::users::UserRepository;
use crate::infrastructure::auth::JwtTokenCodec;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::db::DbPool;
use crate::infrastructure::password::PasswordService;
use crate::infrastructure::repositories::refresh_tokens::PostgresRefreshTokenRepository;
use crate::infrastructure::repositories::users::PostgresUserRepository;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<AppConfig>,
    pub token_service: Arc<TokenService>,
    pub users: Arc<dyn UserRepository>,
    pub passwords: Arc<dyn PasswordHashingService>,
}

impl AppState {
    /// Wire the Postgres-backed services. Fails if the JWT secrets are unusable.
    pub fn new(pool: DbPool, config: AppConfig) -> anyhow::Result<Self> {
        let codec = JwtTokenCodec::new(
            config.jwt_access_secret.as_bytes(),
            config.jwt_refresh_secret.as_bytes(),
        )?;

        let token_service = TokenService::new(
            Arc::new(codec),
            Arc::new(PostgresRefreshTokenRepository::new(pool.clone())),
            config.access_token_ttl(),
            config.refresh_token_ttl(),
        );

        Ok(Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            pool,
            config: Arc::new(config),
            token_service: Arc::new(token_service),
            passwords: Arc::new(PasswordService::new()),
        })
    }

    /// Wire caller-supplied services; the pool is only used for health checks
    pub fn with_services(
        pool: DbPool,
        config: AppConfig,
        token_service: Arc<TokenService>,
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordHashingService>,
    ) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            token_service,
            users,
            passwords,
        }
    }
}
