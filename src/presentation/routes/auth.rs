use crate::infrastructure::state::AppState;
use crate::presentation::handlers::auth;
use crate::presentation::middleware::rate_limit::rate_limit_layer;
use axum::{
    Router,
    routing::{get, post},
};

/// Auth routes. The unauthenticated ones are rate limited per client IP.
pub fn routes(requests_per_minute: u64) -> anyhow::Result<Router<AppState>> {
    let public = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh_token))
        .layer(rate_limit_layer(requests_per_minute)?);

    let session = Router::new()
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me));

    Ok(public.merge(session))
}
