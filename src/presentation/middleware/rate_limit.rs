use axum::{body::Body, extract::ConnectInfo};
use governor::{clock::QuantaInstant, middleware::NoOpMiddleware};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, errors::GovernorError, governor::GovernorConfigBuilder,
    key_extractor::KeyExtractor,
};

pub type RateLimitLayer = GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, Body>;

/// Keys requests by peer IP. Requests without connection info (in-process
/// tests) all share the loopback bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClientIpKeyExtractor;

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<B>(&self, req: &axum::http::Request<B>) -> Result<Self::Key, GovernorError> {
        Ok(req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)))
    }
}

/// Allow `requests_per_minute` requests per IP, refilled evenly over the minute
pub fn rate_limit_layer(requests_per_minute: u64) -> anyhow::Result<RateLimitLayer> {
    if requests_per_minute == 0 || requests_per_minute > 60_000 {
        anyhow::bail!("rate limit must be between 1 and 60000 requests per minute");
    }
    let replenish_ms = 60_000 / requests_per_minute;
    let burst = u32::try_from(requests_per_minute)?;

    let config = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(replenish_ms)
            .burst_size(burst)
            .key_extractor(ClientIpKeyExtractor)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Failed to build rate limiter config"))?,
    );

    Ok(GovernorLayer::new(config))
}
