use crate::application::auth::token_service::TokenService;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Periodically delete expired refresh tokens.
///
/// The first sweep runs one full `every` after start. Abort the handle to stop.
pub fn spawn_token_cleanup(token_service: Arc<TokenService>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + every, every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if let Err(e) = token_service.cleanup_expired().await {
                tracing::error!("refresh token cleanup failed: {}", e);
            }
        }
    })
}
