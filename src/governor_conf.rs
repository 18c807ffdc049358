use crate::server::rate_limiter::ClientIpExtractor;
use anyhow::{Error, anyhow};
use governor::middleware::NoOpMiddleware;
use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};

// one token back per minute; generation calls cost upstream credits
pub fn get_governor_conf(
    burst_per_minute: u32,
    extractor: ClientIpExtractor,
) -> Result<GovernorConfig<ClientIpExtractor, NoOpMiddleware>, Error> {
    GovernorConfigBuilder::default()
        .per_second(60)
        .burst_size(burst_per_minute.max(1))
        .key_extractor(extractor)
        .finish()
        .ok_or_else(|| anyhow!("invalid rate limit configuration"))
}
