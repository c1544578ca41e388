use crate::infrastructure::state::AppState;
use crate::presentation::handlers::admin;
use axum::{Router, routing::post};

/// Admin routes; every handler takes an `AdminUser`
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/refresh-tokens/cleanup",
        post(admin::cleanup_refresh_tokens),
    )
}
