use crate::infrastructure::state::AppState;
use crate::presentation::handlers;
use crate::presentation::openapi::ApiDoc;
use crate::presentation::routes;
use axum::http::{HeaderName, StatusCode};
use axum::{Router, routing::get};
use tower_http::compression::CompressionLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

pub fn app(state: AppState) -> anyhow::Result<Router> {
    let timeout = state.config.request_timeout();
    let auth_routes = routes::auth::routes(state.config.rate_limit_per_minute)?;

    Ok(Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health::health_check))
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/admin", routes::admin::routes())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::SERVICE_UNAVAILABLE,
            timeout,
        ))
        .layer(CompressionLayer::new())
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid))
        .with_state(state))
}
