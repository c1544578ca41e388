use anyhow::{Result, bail};
use std::env;
use std::str::FromStr;
use time::Duration;

/// One day
pub const MAX_ACCESS_TOKEN_MINUTES: i64 = 24 * 60;
/// One year
pub const MAX_REFRESH_TOKEN_HOURS: i64 = 24 * 365;

/// Runtime settings read from the environment (after `.env` is loaded)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub jwt_access_secret: String,
    pub jwt_refresh_secret: String,
    pub access_token_expire_minutes: i64,
    pub refresh_token_expire_hours: i64,
    pub rate_limit_per_minute: u64,
    pub request_timeout_secs: u64,
    /// 0 disables the background sweep
    pub token_cleanup_interval_secs: u64,
}

impl AppConfig {
    /// Load configuration, failing on anything the service cannot start without
    pub fn from_env() -> Result<Self> {
        let database_url = required("DATABASE_URL")?;
        let jwt_access_secret = required("JWT_ACCESS_SECRET")?;
        let jwt_refresh_secret = required("JWT_REFRESH_SECRET")?;

        let config = Self {
            port: parse_or("PORT", 5000),
            database_url,
            jwt_access_secret,
            jwt_refresh_secret,
            access_token_expire_minutes: parse_or("ACCESS_TOKEN_EXPIRE_MINUTES", 15),
            refresh_token_expire_hours: parse_or("REFRESH_TOKEN_EXPIRE_HOURS", 168),
            rate_limit_per_minute: parse_or("RATE_LIMIT_PER_MINUTE", 60),
            request_timeout_secs: parse_or("REQUEST_TIMEOUT_SECS", 5),
            token_cleanup_interval_secs: parse_or("TOKEN_CLEANUP_INTERVAL_SECS", 3600),
        };

        if !(1..=MAX_ACCESS_TOKEN_MINUTES).contains(&config.access_token_expire_minutes) {
            bail!(
                "ACCESS_TOKEN_EXPIRE_MINUTES must be between 1 and {}",
                MAX_ACCESS_TOKEN_MINUTES
            );
        }
        if !(1..=MAX_REFRESH_TOKEN_HOURS).contains(&config.refresh_token_expire_hours) {
            bail!(
                "REFRESH_TOKEN_EXPIRE_HOURS must be between 1 and {}",
                MAX_REFRESH_TOKEN_HOURS
            );
        }
        if config.rate_limit_per_minute == 0 {
            bail!("RATE_LIMIT_PER_MINUTE must be at least 1");
        }

        Ok(config)
    }

    pub fn access_token_ttl(&self) -> Duration {
        Duration::minutes(self.access_token_expire_minutes)
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::hours(self.refresh_token_expire_hours)
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }
}

fn required(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => bail!("{} must be set to a non-empty value", key),
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
